use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Placeholder avatar assigned to newly registered accounts.
/// The random suffix keeps the image service from serving the same face twice.
const AVATAR_PLACEHOLDER_BASE: &str = "https://api.lorem.space/image/face?w=640&h=480&r=";

/// Access/refresh token pair as returned by the login and refresh endpoints.
///
/// Invariant maintained by the session manager: both tokens are persisted
/// together or not at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// User record returned by the profile and registration endpoints.
///
/// The session manager only cares about presence or absence; fields are
/// carried through for display by consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(rename = "creationAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Registration payload for the users endpoint.
/// Transient input only; never persisted client-side.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub avatar: String,
}

impl NewUser {
    /// Build a registration payload with a generated placeholder avatar.
    pub fn new(name: &str, email: &str, password: &str) -> Self {
        let suffix: u32 = rand::thread_rng().gen_range(0..=1000);
        Self {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            avatar: format!("{}{}", AVATAR_PLACEHOLDER_BASE, suffix),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_profile_response() {
        let json = r#"{
            "id": 1,
            "email": "john@mail.com",
            "password": "changeme",
            "name": "Jhon",
            "role": "customer",
            "avatar": "https://i.imgur.com/LDOO4Qs.jpg",
            "creationAt": "2023-01-03T12:00:00.000Z",
            "updatedAt": "2023-01-03T12:00:00.000Z"
        }"#;

        let profile: UserProfile = serde_json::from_str(json).expect("Failed to parse profile JSON");
        assert_eq!(profile.id, 1);
        assert_eq!(profile.email, "john@mail.com");
        assert_eq!(profile.name, "Jhon");
        assert_eq!(profile.role.as_deref(), Some("customer"));
        assert!(profile.created_at.is_some());
    }

    #[test]
    fn test_parse_profile_without_timestamps() {
        // Registration responses sometimes omit timestamps
        let json = r#"{"id": 2, "email": "a@b.com", "name": "A"}"#;
        let profile: UserProfile = serde_json::from_str(json).expect("Failed to parse minimal profile");
        assert!(profile.created_at.is_none());
        assert!(profile.avatar.is_none());
    }

    #[test]
    fn test_parse_token_pair() {
        let json = r#"{"access_token": "eyJhb.access", "refresh_token": "eyJhb.refresh"}"#;
        let pair: TokenPair = serde_json::from_str(json).expect("Failed to parse token pair");
        assert_eq!(pair.access_token, "eyJhb.access");
        assert_eq!(pair.refresh_token, "eyJhb.refresh");
    }

    #[test]
    fn test_new_user_avatar_placeholder() {
        let user = NewUser::new("Jane", "jane@mail.com", "secret");
        assert!(user.avatar.starts_with(AVATAR_PLACEHOLDER_BASE));
        let suffix: u32 = user.avatar[AVATAR_PLACEHOLDER_BASE.len()..]
            .parse()
            .expect("avatar suffix should be numeric");
        assert!(suffix <= 1000);
    }
}
