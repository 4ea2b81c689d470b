pub mod models;
pub mod registry;
pub mod service;
pub mod time;

pub use models::{DeliveryPartner, Order};
pub use registry::Registry;
pub use service::OrderService;
pub use time::DeliveryTime;

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("No assigned orders: {0}")]
    NoAssignedOrders(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
