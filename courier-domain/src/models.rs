use serde::{Deserialize, Serialize};

use crate::time::DeliveryTime;

/// A delivery request with a caller-assigned id and a scheduled delivery time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: String,
    pub delivery_time: DeliveryTime,
    pub assigned_partner_id: Option<String>,
}

impl Order {
    pub fn new(order_id: String, delivery_time: DeliveryTime) -> Self {
        Self {
            order_id,
            delivery_time,
            assigned_partner_id: None,
        }
    }

    pub fn is_unassigned(&self) -> bool {
        self.assigned_partner_id.is_none()
    }
}

/// An agent capable of carrying assigned orders.
///
/// The assigned set is mutated only by the registry, which keeps the
/// order-side and partner-side of the link consistent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryPartner {
    pub partner_id: String,
    pub assigned_order_ids: Vec<String>,
}

impl DeliveryPartner {
    pub fn new(partner_id: String) -> Self {
        Self {
            partner_id,
            assigned_order_ids: Vec::new(),
        }
    }

    /// Derived from the assigned set, never stored separately
    pub fn order_count(&self) -> usize {
        self.assigned_order_ids.len()
    }
}
