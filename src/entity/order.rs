use serde::{Deserialize, Serialize};

use super::{is_present, EntityId};
use crate::error::{Result, StudioError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Designed,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "Pending"),
            OrderStatus::Designed => write!(f, "Designed"),
        }
    }
}

/// A company's request for a business-card design.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: EntityId,
    pub company_name: String,
    pub brand_details: String,
    pub status: OrderStatus,
}

impl Order {
    pub fn new(id: EntityId, company_name: String, brand_details: String) -> Result<Self> {
        if !is_present(&company_name) || !is_present(&brand_details) {
            return Err(StudioError::Validation(
                "Please fill in all fields".to_string(),
            ));
        }

        Ok(Self {
            id,
            company_name,
            brand_details,
            status: OrderStatus::Pending,
        })
    }

    pub fn is_pending(&self) -> bool {
        self.status == OrderStatus::Pending
    }

    /// Advance to Designed. There is no way back to Pending.
    pub fn mark_designed(&mut self) {
        self.status = OrderStatus::Designed;
    }
}
