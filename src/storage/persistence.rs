use serde::de::DeserializeOwned;
use serde::Serialize;

use super::KeyValueStore;
use crate::entity::{Design, EmployeeCard, Order};
use crate::error::{Result, StudioError};
use crate::warnings::Warning;

pub const ORDERS_KEY: &str = "orders";
pub const DESIGNS_KEY: &str = "designs";
pub const EMPLOYEES_KEY: &str = "employees";
pub const DARK_MODE_KEY: &str = "darkMode";

/// Everything the studio keeps between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub orders: Vec<Order>,
    pub designs: Vec<Design>,
    pub cards: Vec<EmployeeCard>,
    pub dark_mode: bool,
}

/// Maps studio collections onto string keys of a [`KeyValueStore`].
pub struct Persistence<S> {
    store: S,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load all collections. Missing or malformed values load as empty;
    /// malformed ones are reported as warnings. Store read failures are errors.
    pub fn load(&self) -> Result<(Snapshot, Vec<Warning>)> {
        let mut warnings = Vec::new();

        let orders = self.load_collection(ORDERS_KEY, &mut warnings)?;
        let designs = self.load_collection(DESIGNS_KEY, &mut warnings)?;
        let cards = self.load_collection(EMPLOYEES_KEY, &mut warnings)?;
        let dark_mode = self.load_dark_mode()?;

        tracing::debug!(
            orders = orders.len(),
            designs = designs.len(),
            cards = cards.len(),
            dark_mode,
            "loaded studio state"
        );

        Ok((
            Snapshot {
                orders,
                designs,
                cards,
                dark_mode,
            },
            warnings,
        ))
    }

    fn load_collection<T: DeserializeOwned>(
        &self,
        key: &str,
        warnings: &mut Vec<Warning>,
    ) -> Result<Vec<T>> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(Vec::new());
        };

        // The browser app wrote the literal string "null" for cleared keys.
        match serde_json::from_str::<Option<Vec<T>>>(&raw) {
            Ok(items) => Ok(items.unwrap_or_default()),
            Err(e) => {
                tracing::warn!(key, error = %e, "malformed stored collection, treating as empty");
                warnings.push(Warning::MalformedData {
                    key: key.to_string(),
                    message: e.to_string(),
                });
                Ok(Vec::new())
            }
        }
    }

    fn load_dark_mode(&self) -> Result<bool> {
        Ok(self.store.get(DARK_MODE_KEY)?.as_deref() == Some("true"))
    }

    /// Write the three collections. Every key is attempted; failures are
    /// returned per key rather than stopping at the first.
    pub fn save_collections(
        &mut self,
        orders: &[Order],
        designs: &[Design],
        cards: &[EmployeeCard],
    ) -> Vec<(&'static str, StudioError)> {
        let mut failures = Vec::new();

        if let Err(e) = self.save_collection(ORDERS_KEY, orders) {
            failures.push((ORDERS_KEY, e));
        }
        if let Err(e) = self.save_collection(DESIGNS_KEY, designs) {
            failures.push((DESIGNS_KEY, e));
        }
        if let Err(e) = self.save_collection(EMPLOYEES_KEY, cards) {
            failures.push((EMPLOYEES_KEY, e));
        }

        failures
    }

    fn save_collection<T: Serialize>(&mut self, key: &str, items: &[T]) -> Result<()> {
        let json = serde_json::to_string(items)?;
        self.store.set(key, &json)?;
        tracing::debug!(key, count = items.len(), "saved collection");
        Ok(())
    }

    pub fn save_dark_mode(&mut self, dark_mode: bool) -> Result<()> {
        self.store
            .set(DARK_MODE_KEY, if dark_mode { "true" } else { "false" })
    }
}
