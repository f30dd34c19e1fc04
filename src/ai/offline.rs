//! No-backend assistant

use async_trait::async_trait;

use super::{
    AiError, ChatMessage, ImageData, NegotiationReply, NegotiationTurn, QuestDraft,
    SearchSuggestions, ShoppingAssistant, TicketAnalysis,
};
use crate::domain::account::Buyer;
use crate::domain::ids::ProductId;
use crate::domain::product::{Category, Product, Review};

/// Stand-in used when no model backend is configured. Text capabilities
/// answer with fixed copy, list capabilities answer empty, and analysis
/// capabilities report [`AiError::Unavailable`] so callers fall back the
/// same way they would on a backend outage.
#[derive(Clone, Copy, Debug, Default)]
pub struct OfflineAssistant;

const UNAVAILABLE_COPY: &str = "AI service is currently unavailable. Please try again later.";

#[async_trait]
impl ShoppingAssistant for OfflineAssistant {
    async fn chat_reply(&self, _history: &[ChatMessage]) -> Result<String, AiError> {
        Ok(
            "That's a bit outside my expertise, but our human support team can help! \
             You can find a contact form in our Help Center."
                .to_string(),
        )
    }

    async fn describe_product(&self, _keywords: &str) -> Result<String, AiError> {
        Ok(UNAVAILABLE_COPY.to_string())
    }

    async fn summarize_reviews(&self, _reviews: &[Review]) -> Result<String, AiError> {
        Ok("No summary available.".to_string())
    }

    async fn search_suggestions(
        &self,
        _query: &str,
        _categories: &[Category],
    ) -> Result<SearchSuggestions, AiError> {
        Ok(SearchSuggestions::default())
    }

    async fn categorize_ticket(&self, _message: &str) -> Result<TicketAnalysis, AiError> {
        Err(AiError::Unavailable)
    }

    async fn negotiate(
        &self,
        _product: &Product,
        _history: &[NegotiationTurn],
    ) -> Result<NegotiationReply, AiError> {
        Ok(NegotiationReply {
            text: "Sorry, I'm having trouble with the connection. Let's try again.".to_string(),
            offer: None,
            is_final: false,
        })
    }

    async fn vendor_story(
        &self,
        _store_name: &str,
        _bullet_points: &str,
    ) -> Result<String, AiError> {
        Ok("AI service is unavailable.".to_string())
    }

    async fn recommend_products(
        &self,
        _browsing_history: &[ProductId],
        _catalog: &[Product],
    ) -> Result<Vec<ProductId>, AiError> {
        Ok(Vec::new())
    }

    async fn similar_by_image(
        &self,
        _image: &ImageData,
        _catalog: &[Product],
    ) -> Result<Vec<ProductId>, AiError> {
        Ok(Vec::new())
    }

    async fn draft_quests(&self, _buyer: &Buyer) -> Result<Vec<QuestDraft>, AiError> {
        Ok(Vec::new())
    }

    async fn try_on_preview(
        &self,
        _user_image: &ImageData,
        _product: &Product,
    ) -> Result<Option<String>, AiError> {
        Ok(None)
    }
}
