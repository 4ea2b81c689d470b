use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use courier_domain::OrderService;

use crate::error::AppError;

/// Shared application state: the order service behind the single exclusive
/// lock that serializes mutations against reads. Handlers hold the guard for
/// one synchronous call and never across an await.
#[derive(Clone)]
pub struct AppState {
    orders: Arc<RwLock<OrderService>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            orders: Arc::new(RwLock::new(OrderService::new())),
        }
    }

    pub fn orders(&self) -> Result<RwLockReadGuard<'_, OrderService>, AppError> {
        self.orders
            .read()
            .map_err(|_| AppError::InternalServerError("order service lock poisoned".to_string()))
    }

    pub fn orders_mut(&self) -> Result<RwLockWriteGuard<'_, OrderService>, AppError> {
        self.orders
            .write()
            .map_err(|_| AppError::InternalServerError("order service lock poisoned".to_string()))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
