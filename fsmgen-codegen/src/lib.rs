//! # fsmgen-codegen
//!
//! Code emitters for fsmgen.
//!
//! Consumes a `CompiledFsm` snapshot and renders it as:
//! - a C++ header/source pair implementing a table-driven FSM class
//! - a JSON description for downstream tooling
//!
//! Every emitter acquires its output sink before producing the first byte;
//! a file that cannot be created is a hard error, never a partial write.

pub mod cpp;
pub mod error;
pub mod json;

pub use cpp::CppEmitter;
pub use error::CodegenError;
pub use json::JsonEmitter;
