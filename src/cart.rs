//! In-memory shopping cart.
//!
//! Cart state lives for the process only; nothing here is persisted or sent
//! to the server.

use crate::models::Product;

#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

#[derive(Debug, Default)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a product. Adding a product already in the cart
    /// increments its quantity.
    pub fn add(&mut self, product: Product) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            item.quantity += 1;
        } else {
            self.items.push(CartItem { product, quantity: 1 });
        }
    }

    /// Adjust a line's quantity by a delta. A quantity reaching zero removes
    /// the line. Unknown product ids are ignored.
    pub fn change_quantity(&mut self, product_id: i64, delta: i32) {
        if let Some(index) = self.items.iter().position(|i| i.product.id == product_id) {
            let current = self.items[index].quantity as i64;
            let updated = current + delta as i64;
            if updated <= 0 {
                self.items.remove(index);
            } else {
                self.items[index].quantity = updated as u32;
            }
        }
    }

    pub fn remove(&mut self, product_id: i64) {
        self.items.retain(|i| i.product.id != product_id);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Total price across all lines.
    pub fn total(&self) -> f64 {
        self.items
            .iter()
            .map(|i| i.product.price * i.quantity as f64)
            .sum()
    }

    /// Total unit count across all lines.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, price: f64) -> Product {
        Product {
            id,
            title: format!("Product {}", id),
            price,
            description: None,
            images: Vec::new(),
            category: None,
        }
    }

    #[test]
    fn test_add_merges_duplicate_lines() {
        let mut cart = Cart::new();
        cart.add(product(1, 999.0));
        cart.add(product(1, 999.0));
        cart.add(product(3, 249.0));

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_total() {
        let mut cart = Cart::new();
        cart.add(product(1, 999.0));
        cart.add(product(3, 249.0));
        cart.change_quantity(3, 1);

        assert_eq!(cart.total(), 999.0 + 249.0 * 2.0);
    }

    #[test]
    fn test_quantity_dropping_to_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add(product(1, 10.0));
        cart.change_quantity(1, -1);

        assert!(cart.is_empty());
    }

    #[test]
    fn test_change_quantity_for_unknown_product_is_ignored() {
        let mut cart = Cart::new();
        cart.change_quantity(42, 3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = Cart::new();
        cart.add(product(1, 10.0));
        cart.add(product(2, 20.0));

        cart.remove(1);
        assert_eq!(cart.items().len(), 1);

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), 0.0);
    }
}
