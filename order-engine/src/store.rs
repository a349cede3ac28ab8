//! Order repository abstraction
//!
//! The lifecycle model stays independent of storage: consumers inject an
//! [`OrderStore`] and the engine only calls `get`/`list`/`save`. The
//! in-memory implementation backs tests and the mock dashboards.

use dashmap::DashMap;
use shared::order::{Order, OrderFilters};
use shared::{OrderError, OrderResult};

/// Injected repository boundary for orders
pub trait OrderStore: Send + Sync {
    /// Fetch one order by id
    fn get(&self, id: &str) -> OrderResult<Order>;
    /// All orders matching the filters, newest first
    fn list(&self, filters: &OrderFilters) -> Vec<Order>;
    /// Persist an order (insert or replace)
    fn save(&self, order: Order) -> OrderResult<()>;
}

/// In-memory store backed by a concurrent map
#[derive(Debug, Default)]
pub struct MemoryOrderStore {
    orders: DashMap<String, Order>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

impl OrderStore for MemoryOrderStore {
    fn get(&self, id: &str) -> OrderResult<Order> {
        self.orders
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| OrderError::OrderNotFound(id.to_string()))
    }

    fn list(&self, filters: &OrderFilters) -> Vec<Order> {
        let mut orders: Vec<Order> = self
            .orders
            .iter()
            .filter(|entry| filters.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        orders
    }

    fn save(&self, order: Order) -> OrderResult<()> {
        self.orders.insert(order.id.clone(), order);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::{KindFilter, OrderDetails, StatusFilter};

    fn manual_order(id: &str, number: &str, created_at: i64) -> Order {
        Order::new(
            id.to_string(),
            number.to_string(),
            "user-1".to_string(),
            2500,
            OrderDetails::ManualService { session_id: None },
            created_at,
        )
    }

    #[test]
    fn test_get_missing_order() {
        let store = MemoryOrderStore::new();
        assert_eq!(
            store.get("nope").unwrap_err(),
            OrderError::OrderNotFound("nope".to_string())
        );
    }

    #[test]
    fn test_save_and_get() {
        let store = MemoryOrderStore::new();
        let order = manual_order("order-1", "ORD-2025-0001", 1_000);
        store.save(order.clone()).unwrap();
        assert_eq!(store.get("order-1").unwrap(), order);
    }

    #[test]
    fn test_list_newest_first() {
        let store = MemoryOrderStore::new();
        store.save(manual_order("order-1", "ORD-2025-0001", 1_000)).unwrap();
        store.save(manual_order("order-2", "ORD-2025-0002", 3_000)).unwrap();
        store.save(manual_order("order-3", "ORD-2025-0003", 2_000)).unwrap();

        let ids: Vec<String> = store
            .list(&OrderFilters::default())
            .into_iter()
            .map(|order| order.id)
            .collect();
        assert_eq!(ids, ["order-2", "order-3", "order-1"]);
    }

    #[test]
    fn test_list_applies_filters() {
        let store = MemoryOrderStore::new();
        store.save(manual_order("order-1", "ORD-2025-0001", 1_000)).unwrap();

        let kind_miss = OrderFilters {
            kind: KindFilter::CustomService,
            ..Default::default()
        };
        assert!(store.list(&kind_miss).is_empty());

        let pending = OrderFilters {
            status: StatusFilter::Pending,
            ..Default::default()
        };
        assert_eq!(store.list(&pending).len(), 1);
    }
}
