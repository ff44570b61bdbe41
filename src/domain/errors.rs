use thiserror::Error;

use super::order::OrderStatus;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found")]
    NotFound,
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Order has no items")]
    MissingItems,
    #[error("Invalid input: {0}")]
    InvalidInput(&'static str),
    #[error("Cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Short machine-readable reason for client-input errors.
    pub fn reason(&self) -> &'static str {
        match self {
            DomainError::NotFound => "NotFound",
            DomainError::Unauthorized => "Unauthorized",
            DomainError::MissingItems => "MissingItems",
            DomainError::InvalidInput(reason) => reason,
            DomainError::InvalidTransition { .. } => "InvalidTransition",
            DomainError::Internal(_) => "Internal",
        }
    }
}
