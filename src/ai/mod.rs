//! Assistant capability facade
//!
//! The commerce core consumes these capabilities but never implements them;
//! the embedding application wires in a real model client behind
//! [`ShoppingAssistant`]. Calls can be slow and can fail, so every call site
//! treats the result as optional flavor: an [`AiError`] downgrades to a
//! neutral fallback and never blocks shopping. [`offline::OfflineAssistant`]
//! is the bundled no-backend implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::account::{Buyer, BuyerQuest};
use crate::domain::ids::ProductId;
use crate::domain::money::Money;
use crate::domain::product::{Category, Product, Review};

mod offline;

pub use offline::OfflineAssistant;

#[derive(Debug, Error)]
pub enum AiError {
    /// No assistant backend is configured.
    #[error("assistant is not configured")]
    Unavailable,
    /// The configured backend failed or answered with something unusable.
    #[error("assistant call failed: {0}")]
    Upstream(#[from] anyhow::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

/// One turn in a price haggle. Bot turns may carry an offer; an accepted
/// offer arrives with `is_final` set.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NegotiationTurn {
    pub sender: Sender,
    pub text: String,
    pub offer: Option<Money>,
    pub is_final: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NegotiationReply {
    pub text: String,
    pub offer: Option<Money>,
    pub is_final: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchSuggestions {
    pub suggestions: Vec<String>,
    pub did_you_mean: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketCategory {
    Shipping,
    Payment,
    Return,
    #[serde(rename = "Product Inquiry")]
    ProductInquiry,
    #[serde(rename = "Account Issue")]
    AccountIssue,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketAnalysis {
    pub category: TicketCategory,
    pub sentiment: Sentiment,
}

/// A generated quest before it is adopted into a buyer profile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuestDraft {
    pub title: String,
    pub description: String,
    pub points: u32,
}

impl QuestDraft {
    /// Stamps the draft with a fresh id and an open completion state.
    pub fn into_quest(self) -> BuyerQuest {
        BuyerQuest {
            id: format!("quest-{}", Uuid::new_v4()),
            title: self.title,
            description: self.description,
            points: self.points,
            is_completed: false,
        }
    }
}

/// Raw image payload handed through to the backend untouched.
#[derive(Clone, Debug)]
pub struct ImageData {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

/// Generative capabilities the storefront can lean on. Object-safe so the
/// embedding application can hand over a boxed client.
#[async_trait]
pub trait ShoppingAssistant: Send + Sync {
    /// Free-form shopping chat over the running conversation.
    async fn chat_reply(&self, history: &[ChatMessage]) -> Result<String, AiError>;

    /// Drafts a product description from seller keywords.
    async fn describe_product(&self, keywords: &str) -> Result<String, AiError>;

    /// Condenses buyer reviews into a short summary.
    async fn summarize_reviews(&self, reviews: &[Review]) -> Result<String, AiError>;

    /// Typo corrections and related terms for a search box input.
    async fn search_suggestions(
        &self,
        query: &str,
        categories: &[Category],
    ) -> Result<SearchSuggestions, AiError>;

    /// Sorts a support message into a category with a sentiment.
    async fn categorize_ticket(&self, message: &str) -> Result<TicketAnalysis, AiError>;

    /// Answers the latest buyer turn in a haggle over a negotiable product.
    async fn negotiate(
        &self,
        product: &Product,
        history: &[NegotiationTurn],
    ) -> Result<NegotiationReply, AiError>;

    /// Writes a spotlight story for a seller from bullet points.
    async fn vendor_story(&self, store_name: &str, bullet_points: &str)
        -> Result<String, AiError>;

    /// Picks catalog products matching a buyer's browsing history.
    async fn recommend_products(
        &self,
        browsing_history: &[ProductId],
        catalog: &[Product],
    ) -> Result<Vec<ProductId>, AiError>;

    /// Finds catalog products visually similar to an uploaded image.
    async fn similar_by_image(
        &self,
        image: &ImageData,
        catalog: &[Product],
    ) -> Result<Vec<ProductId>, AiError>;

    /// Proposes fresh loyalty quests for a buyer profile.
    async fn draft_quests(&self, buyer: &Buyer) -> Result<Vec<QuestDraft>, AiError>;

    /// Renders a try-on image for a wearable product, when the backend can.
    async fn try_on_preview(
        &self,
        user_image: &ImageData,
        product: &Product,
    ) -> Result<Option<String>, AiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quest_draft_adoption() {
        let quest = QuestDraft {
            title: "Smart Home Scout".to_string(),
            description: "Browse three Smart Home products".to_string(),
            points: 120,
        }
        .into_quest();

        assert!(quest.id.starts_with("quest-"));
        assert!(!quest.is_completed);
        assert_eq!(quest.points, 120);

        let again = QuestDraft {
            title: "Smart Home Scout".to_string(),
            description: "Browse three Smart Home products".to_string(),
            points: 120,
        }
        .into_quest();
        assert_ne!(quest.id, again.id);
    }

    #[test]
    fn test_ticket_labels_match_wire_form() {
        let json = serde_json::to_string(&TicketCategory::ProductInquiry).unwrap();
        assert_eq!(json, "\"Product Inquiry\"");
        let parsed: TicketCategory = serde_json::from_str("\"Account Issue\"").unwrap();
        assert_eq!(parsed, TicketCategory::AccountIssue);
    }
}
