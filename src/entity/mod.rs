mod design;
mod employee_card;
mod order;
mod role;
mod share_code;

pub use design::Design;
pub use employee_card::EmployeeCard;
pub use order::{Order, OrderStatus};
pub use role::Role;
pub use share_code::{
    is_well_formed, RandomShareCodes, ShareCodeSource, SHARE_CODE_ALPHABET, SHARE_CODE_LEN,
};

use chrono::{DateTime, Utc};

/// Entity ids are creation timestamps in milliseconds since the Unix epoch.
pub type EntityId = i64;

/// Decode an entity id back into its creation time.
pub fn created_at(id: EntityId) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(id)
}

/// A required form field counts as present only if it has non-whitespace content.
pub(crate) fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}
