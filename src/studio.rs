//! The studio state store and its transition actions.
//!
//! Every mutating action runs the same cycle: validate, apply to the
//! in-memory collections, persist all collections, then notify observers.
//! Persistence failures never undo the transition; they are kept as
//! [`Warning`]s for the caller to drain.

use std::collections::HashSet;

use chrono::Utc;

use crate::config::{ShareCodePolicy, StudioConfig};
use crate::entity::{
    Design, EmployeeCard, EntityId, Order, RandomShareCodes, ShareCodeSource,
};
use crate::error::{Result, StudioError};
use crate::storage::{KeyValueStore, Persistence};
use crate::warnings::Warning;

/// Draws allowed before a colliding share code is accepted.
pub const MAX_CODE_ATTEMPTS: usize = 16;

/// What just happened, delivered to observers after it was persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudioEvent {
    OrderPlaced(Order),
    DesignSubmitted(Design),
    CardAssigned(EmployeeCard),
    CardReceived(EmployeeCard),
    ThemeChanged { dark_mode: bool },
}

pub trait Observer {
    fn notify(&self, event: &StudioEvent);
}

impl<F: Fn(&StudioEvent)> Observer for F {
    fn notify(&self, event: &StudioEvent) {
        self(event)
    }
}

/// Logs every event at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn notify(&self, event: &StudioEvent) {
        match event {
            StudioEvent::OrderPlaced(order) => {
                tracing::info!(id = order.id, company = %order.company_name, "order placed")
            }
            StudioEvent::DesignSubmitted(design) => tracing::info!(
                id = design.id,
                order_id = design.order_id,
                share_code = %design.share_code,
                "design submitted"
            ),
            StudioEvent::CardAssigned(card) => tracing::info!(
                id = card.id,
                name = %card.name,
                share_code = %card.share_code,
                "card assigned"
            ),
            StudioEvent::CardReceived(card) => {
                tracing::info!(id = card.id, name = %card.name, "card received")
            }
            StudioEvent::ThemeChanged { dark_mode } => {
                tracing::info!(dark_mode, "theme changed")
            }
        }
    }
}

pub struct Studio<S, C = RandomShareCodes> {
    persistence: Persistence<S>,
    codes: C,
    share_codes: ShareCodePolicy,
    orders: Vec<Order>,
    designs: Vec<Design>,
    cards: Vec<EmployeeCard>,
    dark_mode: bool,
    last_id: EntityId,
    observers: Vec<Box<dyn Observer>>,
    warnings: Vec<Warning>,
}

impl<S: KeyValueStore> Studio<S> {
    /// Load state from `store`, drawing share codes at random.
    pub fn load(store: S, config: &StudioConfig) -> Result<Self> {
        Self::load_with_codes(store, RandomShareCodes, config.share_codes)
    }
}

impl<S: KeyValueStore, C: ShareCodeSource> Studio<S, C> {
    pub fn load_with_codes(store: S, codes: C, share_codes: ShareCodePolicy) -> Result<Self> {
        let persistence = Persistence::new(store);
        let (snapshot, warnings) = persistence.load()?;

        let last_id = snapshot
            .orders
            .iter()
            .map(|o| o.id)
            .chain(snapshot.designs.iter().map(|d| d.id))
            .chain(snapshot.cards.iter().map(|c| c.id))
            .max()
            .unwrap_or(0);

        Ok(Self {
            persistence,
            codes,
            share_codes,
            orders: snapshot.orders,
            designs: snapshot.designs,
            cards: snapshot.cards,
            dark_mode: snapshot.dark_mode,
            last_id,
            observers: Vec::new(),
            warnings,
        })
    }

    pub fn add_observer(&mut self, observer: impl Observer + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn store(&self) -> &S {
        self.persistence.store()
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Orders still waiting for a design.
    pub fn pending_orders(&self) -> impl Iterator<Item = &Order> + '_ {
        self.orders.iter().filter(|o| o.is_pending())
    }

    pub fn designs(&self) -> &[Design] {
        &self.designs
    }

    pub fn cards(&self) -> &[EmployeeCard] {
        &self.cards
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn order(&self, id: EntityId) -> Result<&Order> {
        self.orders
            .iter()
            .find(|o| o.id == id)
            .ok_or(StudioError::OrderNotFound(id))
    }

    pub fn design(&self, id: EntityId) -> Result<&Design> {
        self.designs
            .iter()
            .find(|d| d.id == id)
            .ok_or(StudioError::DesignNotFound(id))
    }

    pub fn card(&self, id: EntityId) -> Result<&EmployeeCard> {
        self.cards
            .iter()
            .find(|c| c.id == id)
            .ok_or(StudioError::CardNotFound(id))
    }

    /// Drain warnings collected since the last call.
    pub fn take_warnings(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }

    /// Company action: request a new design.
    pub fn place_order(&mut self, company_name: &str, brand_details: &str) -> Result<Order> {
        let order = Order::new(
            self.next_id()?,
            company_name.to_string(),
            brand_details.to_string(),
        )?;

        self.last_id = order.id;
        self.orders.push(order.clone());
        self.commit(StudioEvent::OrderPlaced(order.clone()));

        Ok(order)
    }

    /// Designer action: attach a template to an order and mark it Designed.
    ///
    /// The order's current status is not checked, so an already designed
    /// order can receive another design.
    pub fn submit_design(&mut self, order_id: EntityId, template: &str) -> Result<Design> {
        Design::validate_template(template)?;

        let index = self
            .orders
            .iter()
            .position(|o| o.id == order_id)
            .ok_or(StudioError::OrderNotFound(order_id))?;

        let id = self.next_id()?;
        let taken: HashSet<&str> = self.designs.iter().map(|d| d.share_code.as_str()).collect();
        let code = draw_code(&mut self.codes, self.share_codes, &taken, &mut self.warnings);
        let design = Design::new(id, order_id, template.to_string(), code)?;

        self.last_id = design.id;
        self.orders[index].mark_designed();
        self.designs.push(design.clone());
        self.commit(StudioEvent::DesignSubmitted(design.clone()));

        Ok(design)
    }

    /// HR action: issue a card for an employee from an existing design.
    pub fn assign_card(
        &mut self,
        design_id: EntityId,
        name: &str,
        email: &str,
        phone: &str,
        title: &str,
    ) -> Result<EmployeeCard> {
        EmployeeCard::validate_details(name, email, phone, title)?;

        let id = self.next_id()?;
        let design = self
            .designs
            .iter()
            .find(|d| d.id == design_id)
            .ok_or(StudioError::DesignNotFound(design_id))?;
        let taken: HashSet<&str> = self.cards.iter().map(|c| c.share_code.as_str()).collect();
        let code = draw_code(&mut self.codes, self.share_codes, &taken, &mut self.warnings);
        let card = EmployeeCard::new(
            id,
            design,
            name.to_string(),
            email.to_string(),
            phone.to_string(),
            title.to_string(),
            code,
        )?;

        self.last_id = card.id;
        self.cards.push(card.clone());
        self.commit(StudioEvent::CardAssigned(card.clone()));

        Ok(card)
    }

    /// Employee action: the code to hand out for a card.
    pub fn share_card(&self, card_id: EntityId) -> Result<&str> {
        Ok(self.card(card_id)?.share_code.as_str())
    }

    /// Look a card up by its share code. The first match wins.
    pub fn receive_card(&self, code: &str) -> Result<&EmployeeCard> {
        let card = self
            .cards
            .iter()
            .find(|c| c.share_code == code)
            .ok_or_else(|| StudioError::ShareCodeNotFound(code.to_string()))?;

        self.notify(&StudioEvent::CardReceived(card.clone()));
        Ok(card)
    }

    /// Look a design up by its share code. The first match wins.
    pub fn design_by_share_code(&self, code: &str) -> Result<&Design> {
        self.designs
            .iter()
            .find(|d| d.share_code == code)
            .ok_or_else(|| StudioError::ShareCodeNotFound(code.to_string()))
    }

    pub fn set_dark_mode(&mut self, dark_mode: bool) {
        self.dark_mode = dark_mode;

        if let Err(e) = self.persistence.save_dark_mode(dark_mode) {
            self.record_persist_failure(crate::storage::DARK_MODE_KEY, &e);
        }
        self.notify(&StudioEvent::ThemeChanged { dark_mode });
    }

    /// Flip the theme and return the new value.
    pub fn toggle_dark_mode(&mut self) -> bool {
        let dark_mode = !self.dark_mode;
        self.set_dark_mode(dark_mode);
        dark_mode
    }

    /// Millisecond timestamp, bumped past the last issued id if the clock
    /// has not moved.
    fn next_id(&self) -> Result<EntityId> {
        let after_last = self
            .last_id
            .checked_add(1)
            .ok_or_else(|| StudioError::Storage(format!("no id left after {}", self.last_id)))?;
        Ok(Utc::now().timestamp_millis().max(after_last))
    }

    fn commit(&mut self, event: StudioEvent) {
        let failures = self
            .persistence
            .save_collections(&self.orders, &self.designs, &self.cards);
        for (key, error) in failures {
            self.record_persist_failure(key, &error);
        }

        self.notify(&event);
    }

    fn record_persist_failure(&mut self, key: &str, error: &StudioError) {
        tracing::warn!(key, error = %error, "failed to persist studio state");
        self.warnings.push(Warning::PersistenceFailed {
            key: key.to_string(),
            message: error.to_string(),
        });
    }

    fn notify(&self, event: &StudioEvent) {
        for observer in &self.observers {
            observer.notify(event);
        }
    }
}

fn draw_code<C: ShareCodeSource>(
    codes: &mut C,
    policy: ShareCodePolicy,
    taken: &HashSet<&str>,
    warnings: &mut Vec<Warning>,
) -> String {
    let mut code = codes.next_code();
    if policy == ShareCodePolicy::AllowDuplicates {
        return code;
    }

    let mut attempts = 1;
    while taken.contains(code.as_str()) {
        if attempts >= MAX_CODE_ATTEMPTS {
            tracing::warn!(%code, attempts, "accepting duplicate share code");
            warnings.push(Warning::DuplicateShareCode {
                code: code.clone(),
                attempts,
            });
            break;
        }
        code = codes.next_code();
        attempts += 1;
    }

    code
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{is_well_formed, OrderStatus};
    use crate::storage::{MemoryStore, ORDERS_KEY};
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    /// Hands out the given codes in order, then a fixed fallback.
    struct FixedCodes(VecDeque<String>);

    impl FixedCodes {
        fn new(codes: &[&str]) -> Self {
            Self(codes.iter().map(|c| c.to_string()).collect())
        }
    }

    impl ShareCodeSource for FixedCodes {
        fn next_code(&mut self) -> String {
            self.0.pop_front().unwrap_or_else(|| "ZZZZZZZZ".to_string())
        }
    }

    /// Reads work, writes always fail.
    #[derive(Default)]
    struct ReadOnlyStore(MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.0.get(key)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(StudioError::Storage("quota exceeded".to_string()))
        }
    }

    fn studio() -> Studio<MemoryStore> {
        Studio::load(MemoryStore::new(), &StudioConfig::default()).unwrap()
    }

    fn studio_with_codes(codes: &[&str], policy: ShareCodePolicy) -> Studio<MemoryStore, FixedCodes> {
        Studio::load_with_codes(MemoryStore::new(), FixedCodes::new(codes), policy).unwrap()
    }

    fn collection_sizes<S: KeyValueStore, C: ShareCodeSource>(s: &Studio<S, C>) -> (usize, usize, usize) {
        (s.orders().len(), s.designs().len(), s.cards().len())
    }

    #[test]
    fn test_place_order_appends_pending_order() {
        let mut studio = studio();
        let order = studio.place_order("Acme", "blue logo").unwrap();

        assert_eq!(studio.orders().len(), 1);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(studio.orders()[0], order);
    }

    #[test]
    fn test_place_order_rejects_blank_fields() {
        let mut studio = studio();
        for (name, details) in [("", "blue"), ("Acme", ""), ("  ", "blue"), ("", "")] {
            let err = studio.place_order(name, details).unwrap_err();
            assert!(matches!(err, StudioError::Validation(_)));
        }
        assert_eq!(collection_sizes(&studio), (0, 0, 0));
        assert_eq!(studio.store().get(ORDERS_KEY).unwrap(), None);
    }

    #[test]
    fn test_ids_strictly_increase() {
        let mut studio = studio();
        let a = studio.place_order("A", "a").unwrap();
        let b = studio.place_order("B", "b").unwrap();
        let c = studio.place_order("C", "c").unwrap();
        assert!(a.id < b.id && b.id < c.id);
    }

    #[test]
    fn test_submit_design_marks_order_designed() {
        let mut studio = studio();
        let order = studio.place_order("Acme", "blue logo").unwrap();
        let design = studio.submit_design(order.id, "T").unwrap();

        assert_eq!(studio.order(order.id).unwrap().status, OrderStatus::Designed);
        assert_eq!(studio.designs().len(), 1);
        assert_eq!(design.template, "T");
        assert_eq!(design.order_id, order.id);
        assert!(is_well_formed(&design.share_code));
        assert_eq!(studio.pending_orders().count(), 0);
    }

    #[test]
    fn test_submit_design_rejects_empty_template() {
        let mut studio = studio();
        let order = studio.place_order("Acme", "blue logo").unwrap();

        let err = studio.submit_design(order.id, "").unwrap_err();
        assert!(matches!(err, StudioError::Validation(_)));
        assert_eq!(collection_sizes(&studio), (1, 0, 0));
        assert!(studio.order(order.id).unwrap().is_pending());
    }

    #[test]
    fn test_submit_design_requires_existing_order() {
        let mut studio = studio();
        let err = studio.submit_design(12345, "T").unwrap_err();
        assert!(matches!(err, StudioError::OrderNotFound(12345)));
        assert!(studio.designs().is_empty());
    }

    #[test]
    fn test_submit_design_twice_is_allowed() {
        let mut studio = studio();
        let order = studio.place_order("Acme", "blue logo").unwrap();
        studio.submit_design(order.id, "first").unwrap();
        studio.submit_design(order.id, "second").unwrap();

        assert_eq!(studio.designs().len(), 2);
        assert_eq!(studio.order(order.id).unwrap().status, OrderStatus::Designed);
    }

    #[test]
    fn test_assign_card_copies_template() {
        let mut studio = studio();
        let order = studio.place_order("Acme", "blue logo").unwrap();
        let design = studio.submit_design(order.id, "minimalist, blue").unwrap();
        let card = studio
            .assign_card(design.id, "Jane Doe", "j@x.com", "555-1234", "Designer")
            .unwrap();

        assert_eq!(card.template, "minimalist, blue");
        assert!(is_well_formed(&card.share_code));
        assert_eq!(studio.cards().len(), 1);
    }

    #[test]
    fn test_assign_card_rejects_missing_details() {
        let mut studio = studio();
        let order = studio.place_order("Acme", "blue logo").unwrap();
        let design = studio.submit_design(order.id, "T").unwrap();

        let err = studio
            .assign_card(design.id, "Jane Doe", "", "555-1234", "Designer")
            .unwrap_err();
        assert!(matches!(err, StudioError::Validation(_)));
        assert_eq!(collection_sizes(&studio), (1, 1, 0));
    }

    #[test]
    fn test_assign_card_unknown_design_is_not_found() {
        let mut studio = studio();
        let err = studio
            .assign_card(7, "Jane Doe", "j@x.com", "555-1234", "Designer")
            .unwrap_err();
        assert!(matches!(err, StudioError::DesignNotFound(7)));
        assert!(studio.cards().is_empty());
    }

    #[test]
    fn test_receive_card_by_share_code() {
        let mut studio = studio_with_codes(&["DESIGN01", "CARD0001", "CARD0002"], ShareCodePolicy::Regenerate);
        let order = studio.place_order("Acme", "blue logo").unwrap();
        let design = studio.submit_design(order.id, "T").unwrap();
        studio.assign_card(design.id, "Jane", "j@x.com", "1", "CTO").unwrap();
        studio.assign_card(design.id, "John", "o@x.com", "2", "CFO").unwrap();

        assert_eq!(studio.receive_card("CARD0002").unwrap().name, "John");
        assert!(matches!(
            studio.receive_card("NOPE0000"),
            Err(StudioError::ShareCodeNotFound(code)) if code == "NOPE0000"
        ));
        // Design codes do not resolve to cards.
        assert!(studio.receive_card("DESIGN01").is_err());
        assert_eq!(studio.design_by_share_code("DESIGN01").unwrap().id, design.id);
    }

    #[test]
    fn test_share_card_returns_code() {
        let mut studio = studio_with_codes(&["DESIGN01", "CARD0001"], ShareCodePolicy::Regenerate);
        let order = studio.place_order("Acme", "blue logo").unwrap();
        let design = studio.submit_design(order.id, "T").unwrap();
        let card = studio.assign_card(design.id, "Jane", "j@x.com", "1", "CTO").unwrap();

        assert_eq!(studio.share_card(card.id).unwrap(), "CARD0001");
        assert!(matches!(studio.share_card(1), Err(StudioError::CardNotFound(1))));
    }

    #[test]
    fn test_colliding_code_is_redrawn() {
        let mut studio = studio_with_codes(
            &["SAMECODE", "SAMECODE", "OTHER001"],
            ShareCodePolicy::Regenerate,
        );
        let order = studio.place_order("Acme", "blue").unwrap();
        let first = studio.submit_design(order.id, "a").unwrap();
        let second = studio.submit_design(order.id, "b").unwrap();

        assert_eq!(first.share_code, "SAMECODE");
        assert_eq!(second.share_code, "OTHER001");
        assert!(studio.take_warnings().is_empty());
    }

    #[test]
    fn test_duplicates_allowed_when_configured() {
        let mut studio = studio_with_codes(&["SAMECODE", "SAMECODE"], ShareCodePolicy::AllowDuplicates);
        let order = studio.place_order("Acme", "blue").unwrap();
        studio.submit_design(order.id, "a").unwrap();
        let second = studio.submit_design(order.id, "b").unwrap();

        assert_eq!(second.share_code, "SAMECODE");
        assert!(studio.take_warnings().is_empty());
    }

    #[test]
    fn test_duplicate_codes_resolve_to_first_entry() {
        let mut studio = studio_with_codes(
            &["DUPCODE1", "DUPCODE1", "SAMECARD", "SAMECARD"],
            ShareCodePolicy::AllowDuplicates,
        );
        let first_order = studio.place_order("Acme", "blue").unwrap();
        let second_order = studio.place_order("Globex", "green").unwrap();
        let first_design = studio.submit_design(first_order.id, "a").unwrap();
        studio.submit_design(second_order.id, "b").unwrap();
        studio.assign_card(first_design.id, "First", "f@x.com", "1", "CTO").unwrap();
        studio.assign_card(first_design.id, "Second", "s@x.com", "2", "CFO").unwrap();

        assert_eq!(studio.receive_card("SAMECARD").unwrap().name, "First");
        assert_eq!(studio.design_by_share_code("DUPCODE1").unwrap().id, first_design.id);
    }

    #[test]
    fn test_exhausted_redraws_accept_duplicate_with_warning() {
        // Fallback code is always ZZZZZZZZ once the list runs out.
        let mut studio = studio_with_codes(&["ZZZZZZZZ"], ShareCodePolicy::Regenerate);
        let order = studio.place_order("Acme", "blue").unwrap();
        studio.submit_design(order.id, "a").unwrap();
        let second = studio.submit_design(order.id, "b").unwrap();

        assert_eq!(second.share_code, "ZZZZZZZZ");
        let warnings = studio.take_warnings();
        assert_eq!(
            warnings,
            vec![Warning::DuplicateShareCode {
                code: "ZZZZZZZZ".to_string(),
                attempts: MAX_CODE_ATTEMPTS,
            }]
        );
    }

    #[test]
    fn test_state_survives_reload() {
        let mut studio = studio();
        let order = studio.place_order("Acme", "blue logo").unwrap();
        let design = studio.submit_design(order.id, "T").unwrap();
        studio.assign_card(design.id, "Jane", "j@x.com", "1", "CTO").unwrap();
        studio.set_dark_mode(true);

        let store = studio.store().clone();
        let reloaded = Studio::load(store, &StudioConfig::default()).unwrap();

        assert_eq!(reloaded.orders(), studio.orders());
        assert_eq!(reloaded.designs(), studio.designs());
        assert_eq!(reloaded.cards(), studio.cards());
        assert!(reloaded.dark_mode());
    }

    #[test]
    fn test_reload_continues_ids_after_stored_max() {
        let mut store = MemoryStore::new();
        let future = Utc::now().timestamp_millis() + 60_000;
        store
            .set(
                ORDERS_KEY,
                &format!(r#"[{{"id":{},"companyName":"A","brandDetails":"b","status":"Pending"}}]"#, future),
            )
            .unwrap();

        let mut studio = Studio::load(store, &StudioConfig::default()).unwrap();
        let order = studio.place_order("B", "c").unwrap();
        assert_eq!(order.id, future + 1);
    }

    #[test]
    fn test_exhausted_id_space_is_an_error() {
        let mut store = MemoryStore::new();
        store
            .set(
                ORDERS_KEY,
                &format!(r#"[{{"id":{},"companyName":"A","brandDetails":"b","status":"Pending"}}]"#, i64::MAX),
            )
            .unwrap();

        let mut studio = Studio::load(store, &StudioConfig::default()).unwrap();
        let err = studio.place_order("B", "c").unwrap_err();

        assert!(matches!(err, StudioError::Storage(_)));
        assert_eq!(studio.orders().len(), 1);
    }

    #[test]
    fn test_persistence_failure_becomes_warning() {
        let mut studio =
            Studio::load(ReadOnlyStore::default(), &StudioConfig::default()).unwrap();
        let order = studio.place_order("Acme", "blue").unwrap();

        // The transition stands in memory.
        assert_eq!(studio.orders(), &[order]);

        let warnings = studio.take_warnings();
        assert_eq!(warnings.len(), 3);
        assert!(warnings
            .iter()
            .all(|w| matches!(w, Warning::PersistenceFailed { message, .. } if message.contains("quota"))));
        assert!(studio.take_warnings().is_empty());

        studio.toggle_dark_mode();
        assert_eq!(studio.take_warnings().len(), 1);
    }

    #[test]
    fn test_observers_see_events_in_order() {
        let mut studio = studio();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        studio.add_observer(move |event: &StudioEvent| sink.borrow_mut().push(event.clone()));
        studio.add_observer(TracingObserver);

        let order = studio.place_order("Acme", "blue").unwrap();
        let design = studio.submit_design(order.id, "T").unwrap();
        let card = studio.assign_card(design.id, "Jane", "j@x.com", "1", "CTO").unwrap();
        studio.receive_card(&card.share_code).unwrap();
        assert!(studio.toggle_dark_mode());
        let _ = studio.place_order("", "");

        let seen = seen.borrow();
        assert_eq!(seen.len(), 5);
        assert!(matches!(&seen[0], StudioEvent::OrderPlaced(o) if o.id == order.id));
        assert!(matches!(&seen[1], StudioEvent::DesignSubmitted(d) if d.id == design.id));
        assert!(matches!(&seen[2], StudioEvent::CardAssigned(c) if c.id == card.id));
        assert!(matches!(&seen[3], StudioEvent::CardReceived(c) if c.id == card.id));
        assert_eq!(seen[4], StudioEvent::ThemeChanged { dark_mode: true });
    }
}
