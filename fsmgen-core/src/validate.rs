//! Transition legality checks.

use crate::error::FsmError;
use crate::symbol::{NameKind, SymbolTable};

/// Checks a transition request against the declared symbols before the model
/// records it. The checks that can reject a transition outright live here;
/// auto-creation of missing events and target states is the model's job.
pub struct TransitionValidator;

impl TransitionValidator {
    /// Rejects self-transitions and transitions out of undeclared states.
    ///
    /// The target state is deliberately not checked: an undeclared `to` is
    /// legal and gets auto-created by the model.
    pub fn check(
        symbols: &SymbolTable,
        from: &str,
        event: &str,
        to: &str,
    ) -> Result<(), FsmError> {
        if from == to {
            return Err(FsmError::SelfTransition {
                state: from.to_string(),
                event: event.to_string(),
            });
        }

        if symbols.kind_of(from) != Some(NameKind::State) {
            return Err(FsmError::UnknownFromState {
                state: from.to_string(),
            });
        }

        Ok(())
    }
}
