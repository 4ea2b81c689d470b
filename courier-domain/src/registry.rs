use std::collections::HashMap;

use crate::models::{DeliveryPartner, Order};
use crate::{DomainError, DomainResult};

/// Sole owner of order and partner storage, and the single source of truth
/// for the assignment relation between them.
///
/// Invariant: `order.assigned_partner_id == Some(p)` exactly when the order's
/// id appears in partner `p`'s assigned set. Every mutation below repairs the
/// counterpart entity before returning, so the link is never observed broken.
pub struct Registry {
    orders: HashMap<String, Order>,
    // creation-order log; `order_ids` must enumerate in insertion order
    order_log: Vec<String>,
    partners: HashMap<String, DeliveryPartner>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            orders: HashMap::new(),
            order_log: Vec::new(),
            partners: HashMap::new(),
        }
    }

    pub fn insert_order(&mut self, order: Order) -> DomainResult<()> {
        if self.orders.contains_key(&order.order_id) {
            return Err(DomainError::DuplicateKey(format!(
                "Order already exists: {}",
                order.order_id
            )));
        }
        self.order_log.push(order.order_id.clone());
        self.orders.insert(order.order_id.clone(), order);
        Ok(())
    }

    pub fn insert_partner(&mut self, partner_id: &str) -> DomainResult<()> {
        if self.partners.contains_key(partner_id) {
            return Err(DomainError::DuplicateKey(format!(
                "Partner already exists: {}",
                partner_id
            )));
        }
        self.partners.insert(
            partner_id.to_string(),
            DeliveryPartner::new(partner_id.to_string()),
        );
        Ok(())
    }

    pub fn order(&self, order_id: &str) -> DomainResult<&Order> {
        self.orders
            .get(order_id)
            .ok_or_else(|| DomainError::NotFound(format!("Order not found: {}", order_id)))
    }

    pub fn partner(&self, partner_id: &str) -> DomainResult<&DeliveryPartner> {
        self.partners
            .get(partner_id)
            .ok_or_else(|| DomainError::NotFound(format!("Partner not found: {}", partner_id)))
    }

    /// Link an order to a partner. A previous assignment is detached first;
    /// repeating the same pair is a no-op.
    pub fn assign(&mut self, order_id: &str, partner_id: &str) -> DomainResult<()> {
        // check the partner side before touching the order, so a failed call
        // leaves no partial state behind
        if !self.partners.contains_key(partner_id) {
            return Err(DomainError::NotFound(format!(
                "Partner not found: {}",
                partner_id
            )));
        }

        let previous = {
            let order = self.order_mut(order_id)?;
            order.assigned_partner_id.replace(partner_id.to_string())
        };

        if previous.as_deref() == Some(partner_id) {
            // already linked; the partner's set holds the id
            return Ok(());
        }
        if let Some(previous_id) = previous {
            if let Some(partner) = self.partners.get_mut(&previous_id) {
                partner.assigned_order_ids.retain(|id| id != order_id);
            }
        }
        if let Some(partner) = self.partners.get_mut(partner_id) {
            partner.assigned_order_ids.push(order_id.to_string());
        }
        Ok(())
    }

    /// Remove an order, detaching it from the owning partner's set first
    pub fn remove_order(&mut self, order_id: &str) -> DomainResult<Order> {
        let order = self
            .orders
            .remove(order_id)
            .ok_or_else(|| DomainError::NotFound(format!("Order not found: {}", order_id)))?;
        self.order_log.retain(|id| id != order_id);
        if let Some(partner_id) = &order.assigned_partner_id {
            if let Some(partner) = self.partners.get_mut(partner_id) {
                partner.assigned_order_ids.retain(|id| id != order_id);
            }
        }
        Ok(order)
    }

    /// Remove a partner; its orders revert to unassigned, they are not deleted
    pub fn remove_partner(&mut self, partner_id: &str) -> DomainResult<DeliveryPartner> {
        let partner = self
            .partners
            .remove(partner_id)
            .ok_or_else(|| DomainError::NotFound(format!("Partner not found: {}", partner_id)))?;
        for order_id in &partner.assigned_order_ids {
            if let Some(order) = self.orders.get_mut(order_id) {
                order.assigned_partner_id = None;
            }
        }
        Ok(partner)
    }

    /// All order ids in creation order
    pub fn order_ids(&self) -> &[String] {
        &self.order_log
    }

    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.values()
    }

    pub fn partners(&self) -> impl Iterator<Item = &DeliveryPartner> {
        self.partners.values()
    }

    fn order_mut(&mut self, order_id: &str) -> DomainResult<&mut Order> {
        self.orders
            .get_mut(order_id)
            .ok_or_else(|| DomainError::NotFound(format!("Order not found: {}", order_id)))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
