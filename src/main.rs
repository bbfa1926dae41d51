//! Shopfront CLI - exercises the session lifecycle from a terminal.
//!
//! `shopfront login` signs in, `shopfront products` lists the catalog,
//! `shopfront logout` clears the session. The startup restore (validate, then
//! refresh, then anonymous) runs before every command.

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use shopfront::auth::FileTokenStore;
use shopfront::{ApiClient, Config, SessionManager, SessionState};

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn usage() {
    eprintln!("Usage: shopfront <command>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  status     Show the current session state (default)");
    eprintln!("  login      Sign in with email and password");
    eprintln!("  register   Create an account and sign in");
    eprintln!("  profile    Show the signed-in user's profile");
    eprintln!("  products   List the product catalog");
    eprintln!("  logout     Sign out and clear stored tokens");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = Config::load()?;
    let api = Arc::new(ApiClient::with_config(&config)?);
    let store = Arc::new(FileTokenStore::new(config.data_dir()?)?);
    let manager = SessionManager::new(api.clone(), store);

    info!("Restoring session");
    manager.initialize().await;

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("status");

    match command {
        "status" => {
            let session = manager.current();
            match session.state {
                SessionState::Authenticated => {
                    let who = session
                        .profile
                        .map(|p| p.email)
                        .unwrap_or_else(|| "unknown user".to_string());
                    println!("Signed in as {}", who);
                }
                _ => println!("Not signed in"),
            }
        }
        "login" => {
            if manager.current().is_authenticated() {
                println!("Already signed in. Run `shopfront logout` first.");
                return Ok(());
            }
            let email = prompt("Email: ")?;
            let password = rpassword::prompt_password("Password: ")?;
            if manager.sign_in(&email, &password).await {
                println!("Signed in.");
            } else {
                println!("Invalid credentials or service unavailable.");
            }
        }
        "register" => {
            if manager.current().is_authenticated() {
                println!("Already signed in. Run `shopfront logout` first.");
                return Ok(());
            }
            let name = prompt("Name: ")?;
            let email = prompt("Email: ")?;
            let password = rpassword::prompt_password("Password: ")?;
            if manager.sign_up(&name, &email, &password).await {
                println!("Account created, signed in.");
            } else {
                println!("Registration failed. If the account was created, try `shopfront login`.");
            }
        }
        "profile" => match manager.current().profile {
            Some(profile) => {
                println!("{} <{}>", profile.name, profile.email);
                if let Some(role) = profile.role {
                    println!("Role: {}", role);
                }
                if let Some(avatar) = profile.avatar {
                    println!("Avatar: {}", avatar);
                }
            }
            None => println!("Not signed in."),
        },
        "products" => {
            let products = api.products(0, 20).await?;
            for product in products {
                println!("{:>10}  {}", product.price_display(), product.title);
            }
        }
        "logout" => {
            manager.sign_out().await;
            println!("Signed out.");
        }
        _ => usage(),
    }

    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
