//! The incremental FSM model.
//!
//! One `FsmModel` exists per compilation. The parser drives it through the
//! mutators (`set_name`, `declare_state`, `declare_event`,
//! `set_initial_state`, `add_transition`); the table builder and the emitters
//! consume it through the read-only accessors once the script is exhausted.
//!
//! States and events are kept in source declaration order, so the generated
//! enums read in the same order the script declared them.

use crate::error::FsmError;
use crate::symbol::{NameKind, SymbolTable};
use crate::validate::TransitionValidator;
use serde::Serialize;

/// A recorded transition. Transitions are not unique: a later transition for
/// the same `(from, event)` pair overwrites the earlier one when the lookup
/// table is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub from: String,
    pub event: String,
    pub to: String,
}

#[derive(Debug, Clone)]
struct FsmName {
    raw: String,
    display_form: String,
}

/// Accumulates declarations and transitions for one compilation.
#[derive(Debug, Default)]
pub struct FsmModel {
    symbols: SymbolTable,
    name: Option<FsmName>,
    states: Vec<String>,
    events: Vec<String>,
    transitions: Vec<Transition>,
    initial_state: Option<String>,
}

impl FsmModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the FSM name, replacing any previously set name.
    ///
    /// Replacement is clean: the old name is released from the symbol table,
    /// so it can be reused afterwards, and setting the same name twice is an
    /// idempotent success. Fails with `DuplicateName` if the requested name
    /// is held by a state or an event.
    pub fn set_name(&mut self, name: &str) -> Result<(), FsmError> {
        if let Some(current) = &self.name {
            if current.raw == name {
                return Ok(());
            }
        }

        self.symbols.declare(name, NameKind::FsmName)?;
        if let Some(old) = self.name.take() {
            self.symbols.remove(&old.raw);
        }

        self.name = Some(FsmName {
            raw: name.to_string(),
            display_form: name.to_uppercase(),
        });
        tracing::debug!(name, "FSM name set");
        Ok(())
    }

    /// Declares a state, appending it to the state sequence.
    pub fn declare_state(&mut self, name: &str) -> Result<(), FsmError> {
        self.symbols.declare(name, NameKind::State)?;
        self.states.push(name.to_string());
        tracing::debug!(state = name, "state declared");
        Ok(())
    }

    /// Declares an event, appending it to the event sequence.
    pub fn declare_event(&mut self, name: &str) -> Result<(), FsmError> {
        self.symbols.declare(name, NameKind::Event)?;
        self.events.push(name.to_string());
        tracing::debug!(event = name, "event declared");
        Ok(())
    }

    /// Designates a declared state as the initial state.
    ///
    /// Fails with `InvalidInitialState` if `name` is not a declared state;
    /// on failure any previously designated initial state is retained.
    pub fn set_initial_state(&mut self, name: &str) -> Result<(), FsmError> {
        if self.symbols.kind_of(name) != Some(NameKind::State) {
            return Err(FsmError::InvalidInitialState {
                state: name.to_string(),
            });
        }
        self.initial_state = Some(name.to_string());
        Ok(())
    }

    /// Records a transition.
    ///
    /// The source state must already be declared; the event and the target
    /// state are auto-created if absent. A missing event whose name is held
    /// by another kind cannot be created and fails the whole transition with
    /// `EventCreationFailed`. A target name held by another kind fails with
    /// `DuplicateName`; an event auto-created earlier in the same call is
    /// kept, matching the accumulate-and-continue contract.
    pub fn add_transition(&mut self, from: &str, event: &str, to: &str) -> Result<(), FsmError> {
        TransitionValidator::check(&self.symbols, from, event, to)?;

        if self.symbols.kind_of(event) != Some(NameKind::Event) {
            self.declare_event(event)
                .map_err(|_| FsmError::EventCreationFailed {
                    event: event.to_string(),
                })?;
            tracing::debug!(event, "event auto-created by transition");
        }

        if self.symbols.kind_of(to) != Some(NameKind::State) {
            self.declare_state(to)?;
            tracing::debug!(state = to, "target state auto-created by transition");
        }

        self.transitions.push(Transition {
            from: from.to_string(),
            event: event.to_string(),
            to: to.to_string(),
        });
        Ok(())
    }

    /// The FSM name, or `"default"` if none was ever set.
    pub fn name(&self) -> &str {
        self.name.as_ref().map(|n| n.raw.as_str()).unwrap_or("default")
    }

    /// The uppercase display form of the FSM name, or `"DEFAULT"` if none
    /// was ever set. Used for header guards.
    pub fn display_name(&self) -> &str {
        self.name
            .as_ref()
            .map(|n| n.display_form.as_str())
            .unwrap_or("DEFAULT")
    }

    /// The initial state: the explicitly designated one, falling back to the
    /// most recently declared state. Fails with `EmptyModel` when no states
    /// exist.
    pub fn initial_state(&self) -> Result<&str, FsmError> {
        if let Some(state) = &self.initial_state {
            return Ok(state);
        }
        self.states
            .last()
            .map(String::as_str)
            .ok_or(FsmError::EmptyModel)
    }

    /// States in declaration order.
    pub fn states(&self) -> &[String] {
        &self.states
    }

    /// Events in declaration order.
    pub fn events(&self) -> &[String] {
        &self.events
    }

    /// Transitions in the order they were recorded.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Releases everything, including the symbol table. Afterwards the model
    /// is indistinguishable from a freshly constructed one, so it can be
    /// reused for an independent compilation.
    pub fn clear(&mut self) {
        self.symbols.clear();
        self.name = None;
        self.states.clear();
        self.events.clear();
        self.transitions.clear();
        self.initial_state = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_uniqueness_across_kinds() {
        let mut model = FsmModel::new();
        model.declare_state("Busy").unwrap();

        assert!(model.set_name("Busy").is_err());
        assert!(model.declare_event("Busy").is_err());
        assert!(model.declare_state("Busy").is_err());
        assert_eq!(model.state_count(), 1);
    }

    #[test]
    fn test_set_name_replaces_cleanly() {
        let mut model = FsmModel::new();
        model.set_name("Turnstile").unwrap();
        model.set_name("Gate").unwrap();

        assert_eq!(model.name(), "Gate");
        assert_eq!(model.display_name(), "GATE");
        // The old name was released and can be reused.
        assert!(model.declare_state("Turnstile").is_ok());
    }

    #[test]
    fn test_set_name_same_name_is_idempotent() {
        let mut model = FsmModel::new();
        model.set_name("Turnstile").unwrap();
        assert!(model.set_name("Turnstile").is_ok());
        assert_eq!(model.name(), "Turnstile");
    }

    #[test]
    fn test_name_fallbacks() {
        let model = FsmModel::new();
        assert_eq!(model.name(), "default");
        assert_eq!(model.display_name(), "DEFAULT");
    }

    #[test]
    fn test_declaration_order_preserved() {
        let mut model = FsmModel::new();
        model.declare_state("Locked").unwrap();
        model.declare_state("Unlocked").unwrap();
        model.declare_event("Coin").unwrap();
        model.declare_event("Push").unwrap();

        assert_eq!(model.states(), ["Locked", "Unlocked"]);
        assert_eq!(model.events(), ["Coin", "Push"]);
    }

    #[test]
    fn test_initial_state_defaults_to_last_declared() {
        let mut model = FsmModel::new();
        model.declare_state("S1").unwrap();
        model.declare_state("S2").unwrap();

        assert_eq!(model.initial_state().unwrap(), "S2");
    }

    #[test]
    fn test_set_initial_state_explicit() {
        let mut model = FsmModel::new();
        model.declare_state("S1").unwrap();
        model.declare_state("S2").unwrap();
        model.set_initial_state("S1").unwrap();

        assert_eq!(model.initial_state().unwrap(), "S1");
    }

    #[test]
    fn test_set_initial_state_undeclared_preserves_previous() {
        let mut model = FsmModel::new();
        model.declare_state("S1").unwrap();
        model.set_initial_state("S1").unwrap();

        let err = model.set_initial_state("Ghost").unwrap_err();
        assert!(matches!(err, FsmError::InvalidInitialState { .. }));
        assert_eq!(model.initial_state().unwrap(), "S1");
    }

    #[test]
    fn test_initial_state_empty_model() {
        let model = FsmModel::new();
        assert_eq!(model.initial_state().unwrap_err(), FsmError::EmptyModel);
    }

    #[test]
    fn test_transition_auto_creates_event_and_target() {
        let mut model = FsmModel::new();
        model.declare_state("Locked").unwrap();

        model.add_transition("Locked", "Coin", "Unlocked").unwrap();

        assert_eq!(model.state_count(), 2);
        assert_eq!(model.event_count(), 1);
        assert_eq!(model.states(), ["Locked", "Unlocked"]);
        assert_eq!(model.events(), ["Coin"]);
        assert_eq!(
            model.transitions(),
            [Transition {
                from: "Locked".to_string(),
                event: "Coin".to_string(),
                to: "Unlocked".to_string(),
            }]
        );
    }

    #[test]
    fn test_self_transition_leaves_counts_unchanged() {
        let mut model = FsmModel::new();
        model.declare_state("Locked").unwrap();

        let err = model.add_transition("Locked", "Coin", "Locked").unwrap_err();
        assert!(matches!(err, FsmError::SelfTransition { .. }));
        assert_eq!(model.state_count(), 1);
        assert_eq!(model.event_count(), 0);
        assert!(model.transitions().is_empty());
    }

    #[test]
    fn test_transition_from_undeclared_state() {
        let mut model = FsmModel::new();
        model.declare_state("Locked").unwrap();

        let err = model.add_transition("Ghost", "Coin", "Locked").unwrap_err();
        assert!(matches!(err, FsmError::UnknownFromState { .. }));
        assert!(model.transitions().is_empty());
    }

    #[test]
    fn test_transition_event_name_held_by_state() {
        let mut model = FsmModel::new();
        model.declare_state("Locked").unwrap();
        model.declare_state("Broken").unwrap();

        // "Broken" is a state, so it cannot serve as an auto-created event.
        let err = model
            .add_transition("Locked", "Broken", "Unlocked")
            .unwrap_err();
        assert_eq!(
            err,
            FsmError::EventCreationFailed {
                event: "Broken".to_string(),
            }
        );
        assert!(model.transitions().is_empty());
    }

    #[test]
    fn test_transition_target_name_held_by_event() {
        let mut model = FsmModel::new();
        model.declare_state("Locked").unwrap();
        model.declare_event("Coin").unwrap();

        let err = model.add_transition("Locked", "Push", "Coin").unwrap_err();
        assert!(matches!(err, FsmError::DuplicateName { .. }));
        // The event was auto-created before the target was rejected.
        assert_eq!(model.events(), ["Coin", "Push"]);
        assert!(model.transitions().is_empty());
    }

    #[test]
    fn test_duplicate_transitions_both_recorded() {
        let mut model = FsmModel::new();
        model.declare_state("A").unwrap();
        model.add_transition("A", "x", "B").unwrap();
        model.add_transition("A", "x", "C").unwrap();

        assert_eq!(model.transitions().len(), 2);
    }

    #[test]
    fn test_clear_resets_to_fresh() {
        let mut model = FsmModel::new();
        model.set_name("Turnstile").unwrap();
        model.declare_state("Locked").unwrap();
        model.add_transition("Locked", "Coin", "Unlocked").unwrap();
        model.set_initial_state("Locked").unwrap();

        model.clear();

        assert_eq!(model.name(), "default");
        assert_eq!(model.state_count(), 0);
        assert_eq!(model.event_count(), 0);
        assert!(model.transitions().is_empty());
        assert_eq!(model.initial_state().unwrap_err(), FsmError::EmptyModel);
        // No residual uniqueness conflicts.
        assert!(model.set_name("Turnstile").is_ok());
        assert!(model.declare_state("Locked").is_ok());
        assert!(model.declare_event("Coin").is_ok());
    }
}
