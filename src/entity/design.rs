use serde::{Deserialize, Serialize};

use super::{is_present, EntityId};
use crate::error::{Result, StudioError};

/// A template authored against an order, carrying its own share code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Design {
    pub id: EntityId,
    /// Weak reference; checked only when the design is created.
    pub order_id: EntityId,
    pub template: String,
    pub share_code: String,
}

impl Design {
    pub fn new(id: EntityId, order_id: EntityId, template: String, share_code: String) -> Result<Self> {
        Self::validate_template(&template)?;

        Ok(Self {
            id,
            order_id,
            template,
            share_code,
        })
    }

    pub fn validate_template(template: &str) -> Result<()> {
        if !is_present(template) {
            return Err(StudioError::Validation(
                "Please enter a design template".to_string(),
            ));
        }
        Ok(())
    }
}
