use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// Catalog entry from the products endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub category: Option<Category>,
}

impl Product {
    /// Formatted price for display ("$999.00")
    pub fn price_display(&self) -> String {
        format!("${:.2}", self.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_product_response() {
        let json = r#"{
            "id": 4,
            "title": "Handmade Fresh Table",
            "price": 687,
            "description": "Andy shoes are designed to keeping in...",
            "category": {"id": 5, "name": "Others", "image": "https://placeimg.com/640/480/any?r=0.591"},
            "images": ["https://placeimg.com/640/480/any?r=0.9178"]
        }"#;

        let product: Product = serde_json::from_str(json).expect("Failed to parse product JSON");
        assert_eq!(product.id, 4);
        assert_eq!(product.title, "Handmade Fresh Table");
        assert_eq!(product.price, 687.0);
        assert_eq!(product.category.as_ref().map(|c| c.name.as_str()), Some("Others"));
        assert_eq!(product.images.len(), 1);
        assert_eq!(product.price_display(), "$687.00");
    }

    #[test]
    fn test_parse_product_minimal() {
        let json = r#"{"id": 1, "title": "Thing", "price": 9.5}"#;
        let product: Product = serde_json::from_str(json).expect("Failed to parse minimal product");
        assert!(product.images.is_empty());
        assert!(product.category.is_none());
    }
}
