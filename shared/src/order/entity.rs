//! Order entity - tagged union over [`OrderKind`]
//!
//! The entity is pure data plus cheap accessors. Transition legality,
//! guards, and invariant validation live in the engine crate; views and
//! dashboards only read this state.

use super::status::{OrderKind, OrderStatus};
use serde::{Deserialize, Serialize};

/// One entry of the append-only status audit trail
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusHistoryItem {
    pub status: OrderStatus,
    /// Unix millis
    pub timestamp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Design or production image attached to a custom order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DesignImage {
    pub id: String,
    pub url: String,
    /// Unix millis
    pub uploaded_at: i64,
    /// At most one design image may be confirmed per order
    #[serde(default)]
    pub is_confirmed: bool,
}

/// Logistics record, attached when the order ships
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogisticsInfo {
    pub courier: String,
    pub tracking_number: String,
    /// Unix millis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipped_at: Option<i64>,
}

/// Kind-specific order attributes for the custom design service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomDetails {
    pub design_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// 30% of total amount, in smallest currency unit
    pub deposit_amount: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposit_paid_at: Option<i64>,
    /// Remainder after deposit; deposit + final == total
    pub final_amount: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_paid_at: Option<i64>,
    pub design_images: Vec<DesignImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub production_images: Option<Vec<DesignImage>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logistics: Option<LogisticsInfo>,
    /// Associated chat session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Kind-specific payload of an order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderDetails {
    ManualService {
        /// Associated chat session
        #[serde(skip_serializing_if = "Option::is_none")]
        session_id: Option<String>,
    },
    CustomService(CustomDetails),
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Order {
    pub id: String,
    /// Human-readable display number, `ORD-<year>-<seq>`
    pub order_number: String,
    pub user_id: String,
    /// Total amount in smallest currency unit, positive
    pub amount: i64,
    pub status: OrderStatus,
    /// Unix millis
    pub created_at: i64,
    /// Unix millis
    pub updated_at: i64,
    /// Append-only audit trail; last entry always matches `status`
    pub status_history: Vec<StatusHistoryItem>,
    pub details: OrderDetails,
}

impl Order {
    /// Create an order in its kind's initial status with a single
    /// history entry
    pub fn new(
        id: String,
        order_number: String,
        user_id: String,
        amount: i64,
        details: OrderDetails,
        now: i64,
    ) -> Self {
        let kind = match &details {
            OrderDetails::ManualService { .. } => OrderKind::ManualService,
            OrderDetails::CustomService(_) => OrderKind::CustomService,
        };
        let status = OrderStatus::initial(kind);
        Self {
            id,
            order_number,
            user_id,
            amount,
            status,
            created_at: now,
            updated_at: now,
            status_history: vec![StatusHistoryItem {
                status,
                timestamp: now,
                note: None,
            }],
            details,
        }
    }

    /// The order's kind, derived from its details payload
    pub fn kind(&self) -> OrderKind {
        match &self.details {
            OrderDetails::ManualService { .. } => OrderKind::ManualService,
            OrderDetails::CustomService(_) => OrderKind::CustomService,
        }
    }

    /// Custom-service details, if this is a custom order
    pub fn custom(&self) -> Option<&CustomDetails> {
        match &self.details {
            OrderDetails::CustomService(details) => Some(details),
            OrderDetails::ManualService { .. } => None,
        }
    }

    /// Mutable custom-service details, if this is a custom order
    pub fn custom_mut(&mut self) -> Option<&mut CustomDetails> {
        match &mut self.details {
            OrderDetails::CustomService(details) => Some(details),
            OrderDetails::ManualService { .. } => None,
        }
    }

    /// Design name for search/display (custom orders only)
    pub fn design_name(&self) -> Option<&str> {
        self.custom().map(|details| details.design_name.as_str())
    }

    /// Associated chat session, if any
    pub fn session_id(&self) -> Option<&str> {
        match &self.details {
            OrderDetails::ManualService { session_id } => session_id.as_deref(),
            OrderDetails::CustomService(details) => details.session_id.as_deref(),
        }
    }

    /// Last history entry; `None` only for malformed data
    pub fn last_history(&self) -> Option<&StatusHistoryItem> {
        self.status_history.last()
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Append a history entry and move to the new status
    ///
    /// Callers must have validated the transition first; this only performs
    /// the mechanical append + status/updated_at update.
    pub fn record_status(&mut self, status: OrderStatus, timestamp: i64, note: Option<String>) {
        self.status_history.push(StatusHistoryItem {
            status,
            timestamp,
            note,
        });
        self.status = status;
        self.updated_at = timestamp;
    }
}
