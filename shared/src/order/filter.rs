//! List-view filters
//!
//! Filter values are UI input, distinct from status categories: `All` is a
//! filter value, never a category a status can classify into.

use super::entity::Order;
use super::status::{FilterCategory, OrderKind};
use serde::{Deserialize, Serialize};

/// Kind filter tab
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KindFilter {
    #[default]
    All,
    ManualService,
    CustomService,
}

impl KindFilter {
    pub fn matches(&self, kind: OrderKind) -> bool {
        match self {
            Self::All => true,
            Self::ManualService => kind == OrderKind::ManualService,
            Self::CustomService => kind == OrderKind::CustomService,
        }
    }
}

/// Status filter tab (coarse categories plus `All`)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl StatusFilter {
    pub fn matches(&self, category: FilterCategory) -> bool {
        match self {
            Self::All => true,
            Self::Pending => category == FilterCategory::Pending,
            Self::InProgress => category == FilterCategory::InProgress,
            Self::Completed => category == FilterCategory::Completed,
            Self::Cancelled => category == FilterCategory::Cancelled,
        }
    }
}

/// Combined list filters: kind tab, status tab, free-text search
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OrderFilters {
    #[serde(default)]
    pub kind: KindFilter,
    #[serde(default)]
    pub status: StatusFilter,
    /// Case-insensitive substring over order number and design name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl OrderFilters {
    pub fn matches(&self, order: &Order) -> bool {
        if !self.kind.matches(order.kind()) {
            return false;
        }
        if !self.status.matches(order.status.category()) {
            return false;
        }
        if let Some(query) = &self.search {
            let query = query.to_lowercase();
            let number_hit = order.order_number.to_lowercase().contains(&query);
            let name_hit = order
                .design_name()
                .is_some_and(|name| name.to_lowercase().contains(&query));
            if !number_hit && !name_hit {
                return false;
            }
        }
        true
    }
}
