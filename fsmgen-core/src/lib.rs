//! # fsmgen-core
//!
//! Semantic model and transition-table builder for fsmgen.
//!
//! This crate provides:
//! - Symbol table enforcing name uniqueness across the FSM namespaces
//! - The incremental model that accumulates declarations and transitions
//! - Transition legality checks
//! - Dense `states x events -> state` lookup-table construction

pub mod error;
pub mod model;
pub mod symbol;
pub mod table;
pub mod validate;

pub use error::FsmError;
pub use model::{FsmModel, Transition};
pub use symbol::{NameKind, SymbolTable};
pub use table::{CompiledFsm, LookupTable};
pub use validate::TransitionValidator;
