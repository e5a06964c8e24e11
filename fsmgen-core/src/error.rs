//! Core error types.

use crate::symbol::NameKind;
use thiserror::Error;

/// Errors from the semantic model and table builder.
///
/// Every mutator on the model is total: a failed declaration is reported
/// through one of these variants and the model is left usable, so a caller
/// can keep accumulating further declarations after a rejection.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FsmError {
    #[error("duplicate name: '{name}' is already declared as {kind}")]
    DuplicateName { name: String, kind: NameKind },

    #[error("illegal transition: from '{state}' to itself on event '{event}'")]
    SelfTransition { state: String, event: String },

    #[error("illegal transition: from state '{state}' has not been declared")]
    UnknownFromState { state: String },

    #[error("event '{event}' could not be created")]
    EventCreationFailed { event: String },

    #[error("invalid initial state: '{state}' has not been declared")]
    InvalidInitialState { state: String },

    #[error("model has no states")]
    EmptyModel,
}
