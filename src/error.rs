//! Error taxonomy
//!
//! Every error carries a stable `token()` the embedding UI can translate.
//! Tokens are part of the public contract; messages are for logs.

use thiserror::Error;

use crate::domain::ids::{OrderId, ProductId};
use crate::domain::order::OrderStatus;
pub use crate::storage::StorageError;

pub type Result<T, E = StorefrontError> = std::result::Result<T, E>;

/// Signup, login and profile failures.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no account is signed in for this operation")]
    NotSignedIn,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("email is already registered")]
    EmailTaken,
    #[error("email belongs to another account")]
    EmailInUse,
    #[error("email address is not valid")]
    InvalidEmail,
    #[error("password needs 8+ characters with a number and a symbol")]
    WeakPassword,
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("all fields must be filled in")]
    MissingFields,
    #[error("store name is required")]
    MissingStoreName,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl AuthError {
    pub fn token(&self) -> &'static str {
        match self {
            AuthError::NotSignedIn => "not_signed_in_error",
            AuthError::InvalidCredentials => "login_error",
            AuthError::EmailTaken => "signup_email_exists",
            AuthError::EmailInUse => "email_in_use_error",
            AuthError::InvalidEmail => "signup_invalid_email",
            AuthError::WeakPassword => "signup_password_weak",
            AuthError::PasswordMismatch => "signup_password_mismatch",
            AuthError::MissingFields => "fill_all_fields",
            AuthError::MissingStoreName => "store_name_required",
            AuthError::Storage(_) => "auth_storage_error",
        }
    }
}

/// Checkout, fulfilment and tracking failures.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("cannot place an order from an empty cart")]
    EmptyCart,
    #[error("order {0} not found")]
    NotFound(OrderId),
    #[error("order status cannot move from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },
    #[error("tracking codes start with SK-")]
    InvalidTrackingCode,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl OrderError {
    pub fn token(&self) -> &'static str {
        match self {
            OrderError::EmptyCart => "empty_cart_error",
            OrderError::NotFound(_) => "order_not_found_error",
            OrderError::InvalidTransition { .. } => "invalid_status_transition",
            OrderError::InvalidTrackingCode => "invalid_order_id_format",
            OrderError::Storage(_) => "order_storage_error",
        }
    }
}

/// Catalog lookup and persistence failures.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("product {0} not found")]
    ProductNotFound(ProductId),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl CatalogError {
    pub fn token(&self) -> &'static str {
        match self {
            CatalogError::ProductNotFound(_) => "product_not_found_error",
            CatalogError::Storage(_) => "catalog_storage_error",
        }
    }
}

/// Umbrella error for the command boundary.
#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Order(#[from] OrderError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("comparison tray holds at most four products")]
    ComparisonFull,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl StorefrontError {
    pub fn token(&self) -> &'static str {
        match self {
            StorefrontError::Auth(err) => err.token(),
            StorefrontError::Order(err) => err.token(),
            StorefrontError::Catalog(err) => err.token(),
            StorefrontError::ComparisonFull => "comparison_limit_error",
            StorefrontError::Storage(_) => "storage_error",
        }
    }
}
