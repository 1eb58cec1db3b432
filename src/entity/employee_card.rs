use serde::{Deserialize, Serialize};

use super::{is_present, Design, EntityId};
use crate::error::{Result, StudioError};

/// A finalized card assigned to a named employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeCard {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub title: String,
    /// Copied from the design at assignment time.
    pub template: String,
    pub share_code: String,
}

impl EmployeeCard {
    pub fn new(
        id: EntityId,
        design: &Design,
        name: String,
        email: String,
        phone: String,
        title: String,
        share_code: String,
    ) -> Result<Self> {
        Self::validate_details(&name, &email, &phone, &title)?;

        Ok(Self {
            id,
            name,
            email,
            phone,
            title,
            template: design.template.clone(),
            share_code,
        })
    }

    pub fn validate_details(name: &str, email: &str, phone: &str, title: &str) -> Result<()> {
        if ![name, email, phone, title].iter().all(|f| is_present(f)) {
            return Err(StudioError::Validation(
                "Please fill in all employee details".to_string(),
            ));
        }
        Ok(())
    }

    /// One-line summary in the form shown when a card is received.
    pub fn summary(&self) -> String {
        format!("{}, {}, {}, {}", self.name, self.title, self.email, self.phone)
    }
}
