//! Non-fatal problems surfaced to the user.
//!
//! A transition that succeeded in memory but could not be written to the
//! store is reported here instead of failing the action.

/// A warning about something the user should know but that did not stop
/// the action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// Writing a key to the store failed; the change lives only in memory.
    PersistenceFailed { key: String, message: String },
    /// A stored value could not be parsed and was loaded as empty.
    MalformedData { key: String, message: String },
    /// Every drawn share code was already taken; a duplicate was accepted.
    DuplicateShareCode { code: String, attempts: usize },
}

/// Format a warning for display.
pub fn format_warning(warning: &Warning) -> String {
    match warning {
        Warning::PersistenceFailed { key, message } => {
            format!(
                "Warning: could not save '{}' ({}) - changes will be lost on exit",
                key, message
            )
        }
        Warning::MalformedData { key, message } => {
            format!(
                "Warning: stored '{}' is unreadable ({}) - loaded as empty",
                key, message
            )
        }
        Warning::DuplicateShareCode { code, attempts } => {
            format!(
                "Warning: share code {} is already in use (gave up after {} attempts)",
                code, attempts
            )
        }
    }
}
