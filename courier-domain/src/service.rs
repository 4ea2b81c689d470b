use crate::models::{DeliveryPartner, Order};
use crate::registry::Registry;
use crate::time::DeliveryTime;
use crate::{DomainError, DomainResult};

/// Public operation surface over the registry.
///
/// Validates raw ids and times at the boundary, delegates all storage and
/// link maintenance to the [`Registry`], and computes the derived queries
/// (counts, per-partner listings, time filtering).
pub struct OrderService {
    registry: Registry,
}

impl OrderService {
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
        }
    }

    /// Register a new order. The id is caller-assigned and must be unique.
    pub fn add_order(&mut self, order_id: &str, delivery_time: &str) -> DomainResult<()> {
        require_id(order_id, "order id")?;
        let delivery_time = DeliveryTime::parse(delivery_time)?;
        self.registry
            .insert_order(Order::new(order_id.to_string(), delivery_time))?;
        tracing::info!("Added order {} scheduled at {}", order_id, delivery_time);
        Ok(())
    }

    /// Register a new delivery partner with an empty assignment set
    pub fn add_partner(&mut self, partner_id: &str) -> DomainResult<()> {
        require_id(partner_id, "partner id")?;
        self.registry.insert_partner(partner_id)?;
        tracing::info!("Added delivery partner {}", partner_id);
        Ok(())
    }

    /// Assign an existing order to an existing partner. Re-assignment moves
    /// the order between partners; repeating the same pair is a no-op.
    pub fn add_order_partner_pair(&mut self, order_id: &str, partner_id: &str) -> DomainResult<()> {
        self.registry.assign(order_id, partner_id)?;
        tracing::info!("Assigned order {} to partner {}", order_id, partner_id);
        Ok(())
    }

    pub fn order_by_id(&self, order_id: &str) -> DomainResult<Order> {
        self.registry.order(order_id).cloned()
    }

    pub fn partner_by_id(&self, partner_id: &str) -> DomainResult<DeliveryPartner> {
        self.registry.partner(partner_id).cloned()
    }

    pub fn order_count_by_partner_id(&self, partner_id: &str) -> DomainResult<usize> {
        Ok(self.registry.partner(partner_id)?.order_count())
    }

    /// Ids of the partner's assigned orders, in assignment order
    pub fn orders_by_partner_id(&self, partner_id: &str) -> DomainResult<Vec<String>> {
        Ok(self.registry.partner(partner_id)?.assigned_order_ids.clone())
    }

    /// Ids of every order, in creation order
    pub fn all_orders(&self) -> Vec<String> {
        self.registry.order_ids().to_vec()
    }

    pub fn count_of_unassigned_orders(&self) -> usize {
        self.registry.orders().filter(|o| o.is_unassigned()).count()
    }

    /// Count of the partner's assigned orders scheduled strictly after `time`
    pub fn orders_left_after_given_time_by_partner_id(
        &self,
        time: &str,
        partner_id: &str,
    ) -> DomainResult<usize> {
        let cutoff = DeliveryTime::parse(time)?;
        let partner = self.registry.partner(partner_id)?;
        Ok(self
            .assigned_orders(partner)
            .filter(|o| o.delivery_time > cutoff)
            .count())
    }

    /// Latest delivery time among the partner's assigned orders, as "HH:MM".
    ///
    /// A partner with an empty assignment set is reported as
    /// [`DomainError::NoAssignedOrders`], distinct from an unknown partner.
    pub fn last_delivery_time_by_partner_id(&self, partner_id: &str) -> DomainResult<String> {
        let partner = self.registry.partner(partner_id)?;
        let last = self
            .assigned_orders(partner)
            .map(|o| o.delivery_time)
            .max()
            .ok_or_else(|| {
                DomainError::NoAssignedOrders(format!(
                    "Partner {} has no assigned orders",
                    partner_id
                ))
            })?;
        Ok(last.to_string())
    }

    /// Delete a partner; every order it carried reverts to unassigned
    pub fn delete_partner_by_id(&mut self, partner_id: &str) -> DomainResult<()> {
        let partner = self.registry.remove_partner(partner_id)?;
        tracing::info!(
            "Deleted partner {}, {} orders back to unassigned",
            partner_id,
            partner.order_count()
        );
        Ok(())
    }

    /// Delete an order, detaching it from its partner's set if assigned
    pub fn delete_order_by_id(&mut self, order_id: &str) -> DomainResult<()> {
        let order = self.registry.remove_order(order_id)?;
        match order.assigned_partner_id {
            Some(partner_id) => {
                tracing::info!("Deleted order {}, detached from partner {}", order_id, partner_id)
            }
            None => tracing::info!("Deleted order {}", order_id),
        }
        Ok(())
    }

    fn assigned_orders<'a>(
        &'a self,
        partner: &'a DeliveryPartner,
    ) -> impl Iterator<Item = &'a Order> {
        partner
            .assigned_order_ids
            .iter()
            .filter_map(|id| self.registry.order(id).ok())
    }
}

impl Default for OrderService {
    fn default() -> Self {
        Self::new()
    }
}

fn require_id(id: &str, what: &str) -> DomainResult<()> {
    if id.trim().is_empty() {
        return Err(DomainError::InvalidInput(format!("Empty {}", what)));
    }
    Ok(())
}
