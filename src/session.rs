//! UI selection state: the active role, form drafts and what is on screen.
//!
//! Drafts are cleared only when the action that consumes them succeeds,
//! except the receive code, which is cleared every time.

use crate::entity::{EmployeeCard, EntityId, Role, ShareCodeSource};
use crate::error::{Result, StudioError};
use crate::storage::KeyValueStore;
use crate::studio::Studio;

/// Message shown when a receive code matches no card.
pub const INVALID_SHARE_CODE: &str = "Invalid share code";

/// Current values of every input field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub company_name: String,
    pub brand_details: String,
    pub design_template: String,
    pub employee_name: String,
    pub employee_email: String,
    pub employee_phone: String,
    pub employee_title: String,
    pub receive_code: String,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    pub role: Role,
    pub form: FormState,
    /// Code displayed after an employee shares a card.
    pub shared_code: Option<String>,
    /// Card displayed after a successful receive.
    pub received: Option<EmployeeCard>,
    pub receive_error: Option<String>,
}

impl Session {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            ..Self::default()
        }
    }

    pub fn place_order<S: KeyValueStore, C: ShareCodeSource>(
        &mut self,
        studio: &mut Studio<S, C>,
    ) -> Result<EntityId> {
        let order = studio.place_order(&self.form.company_name, &self.form.brand_details)?;
        self.form.company_name.clear();
        self.form.brand_details.clear();
        Ok(order.id)
    }

    pub fn submit_design<S: KeyValueStore, C: ShareCodeSource>(
        &mut self,
        studio: &mut Studio<S, C>,
        order_id: EntityId,
    ) -> Result<EntityId> {
        let design = studio.submit_design(order_id, &self.form.design_template)?;
        self.form.design_template.clear();
        Ok(design.id)
    }

    pub fn assign_card<S: KeyValueStore, C: ShareCodeSource>(
        &mut self,
        studio: &mut Studio<S, C>,
        design_id: EntityId,
    ) -> Result<EntityId> {
        let form = &mut self.form;
        let card = studio.assign_card(
            design_id,
            &form.employee_name,
            &form.employee_email,
            &form.employee_phone,
            &form.employee_title,
        )?;
        form.employee_name.clear();
        form.employee_email.clear();
        form.employee_phone.clear();
        form.employee_title.clear();
        Ok(card.id)
    }

    pub fn share_card<S: KeyValueStore, C: ShareCodeSource>(
        &mut self,
        studio: &Studio<S, C>,
        card_id: EntityId,
    ) -> Result<&str> {
        let code = studio.share_card(card_id)?;
        Ok(self.shared_code.insert(code.to_string()).as_str())
    }

    /// Look up the receive-code draft. Not-found is recorded on the session
    /// as well as returned.
    pub fn receive_card<S: KeyValueStore, C: ShareCodeSource>(
        &mut self,
        studio: &Studio<S, C>,
    ) -> Result<&EmployeeCard> {
        let code = std::mem::take(&mut self.form.receive_code);

        match studio.receive_card(&code) {
            Ok(card) => {
                self.receive_error = None;
                Ok(&*self.received.insert(card.clone()))
            }
            Err(e) => {
                if matches!(e, StudioError::ShareCodeNotFound(_)) {
                    self.receive_error = Some(INVALID_SHARE_CODE.to_string());
                }
                Err(e)
            }
        }
    }

    /// Dismiss the received card.
    pub fn close_card(&mut self) {
        self.received = None;
    }
}
