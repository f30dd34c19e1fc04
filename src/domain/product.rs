//! Catalog records: products, variants, reviews

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{ProductId, SellerId};
use super::money::Money;

/// Fixed shop taxonomy. Labels are spelled out here rather than derived
/// from the variant name so renames stay a display concern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Electronics,
    #[serde(rename = "Smart Home")]
    SmartHome,
    Wearables,
    Gaming,
    Accessories,
}

impl Category {
    pub fn all() -> [Category; 5] {
        [
            Category::Electronics,
            Category::SmartHome,
            Category::Wearables,
            Category::Gaming,
            Category::Accessories,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::SmartHome => "Smart Home",
            Category::Wearables => "Wearables",
            Category::Gaming => "Gaming",
            Category::Accessories => "Accessories",
        }
    }
}

/// A single buyer review. Ratings are whole stars, 1 through 5.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub author: String,
    pub rating: u8,
    pub comment: String,
    pub date: DateTime<Utc>,
    pub image: Option<String>,
}

/// One selectable option within a variant axis, with its own price and stock.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VariantOption {
    pub name: String,
    pub price: Money,
    pub stock: u32,
}

/// A variant axis such as Color or Size.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub kind: String,
    pub options: Vec<VariantOption>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub original_price: Option<Money>,
    pub stock: Option<u32>,
    pub sale_end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub images: Vec<String>,
    pub category: Category,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews_count: usize,
    pub vendor: String,
    pub seller_id: SellerId,
    #[serde(default)]
    pub variants: Vec<Variant>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub is_subscribable: bool,
    #[serde(default)]
    pub is_negotiable: bool,
    pub min_price: Option<Money>,
}

impl Product {
    /// Only an explicit zero counts as sold out; unknown stock sells freely.
    pub fn is_out_of_stock(&self) -> bool {
        self.stock == Some(0)
    }

    pub fn is_on_sale(&self) -> bool {
        self.original_price.is_some()
    }

    /// Appends a review and re-derives the aggregate rating from the full
    /// list, rounded to one decimal place.
    pub fn record_review(&mut self, review: Review) {
        self.reviews.push(review);
        self.reviews_count = self.reviews.len();
        let sum: f64 = self.reviews.iter().map(|r| f64::from(r.rating)).sum();
        let mean = sum / self.reviews.len() as f64;
        self.rating = (mean * 10.0).round() / 10.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_product() -> Product {
        Product {
            id: ProductId(1),
            name: "Wireless Earbuds".to_string(),
            description: "Noise-cancelling earbuds".to_string(),
            price: Money::leones(250),
            original_price: None,
            stock: Some(10),
            sale_end_date: None,
            images: vec![],
            category: Category::Electronics,
            rating: 0.0,
            reviews_count: 0,
            vendor: "Freetown Audio".to_string(),
            seller_id: SellerId::new("seller-1"),
            variants: vec![],
            reviews: vec![],
            is_subscribable: false,
            is_negotiable: false,
            min_price: None,
        }
    }

    fn review(rating: u8) -> Review {
        Review {
            author: "Aminata".to_string(),
            rating,
            comment: "ok".to_string(),
            date: Utc::now(),
            image: None,
        }
    }

    #[test]
    fn test_record_review_rederives_rating() {
        let mut product = sample_product();
        product.record_review(review(4));
        product.record_review(review(5));
        assert_eq!(product.reviews_count, 2);
        assert_eq!(product.rating, 4.5);

        product.record_review(review(4));
        assert_eq!(product.reviews_count, 3);
        assert_eq!(product.rating, 4.3);
    }

    #[test]
    fn test_out_of_stock_requires_explicit_zero() {
        let mut product = sample_product();
        assert!(!product.is_out_of_stock());
        product.stock = None;
        assert!(!product.is_out_of_stock());
        product.stock = Some(0);
        assert!(product.is_out_of_stock());
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(Category::SmartHome.label(), "Smart Home");
        assert_eq!(Category::all().len(), 5);
    }
}
