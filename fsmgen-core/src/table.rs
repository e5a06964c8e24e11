//! Dense lookup-table construction.
//!
//! The table maps `(state index, event index)` to a target state index,
//! with indices assigned by declaration order. Construction is two-phase:
//! every cell starts as a self-loop, then the recorded transitions overwrite
//! cells in order. An event a state does not handle therefore leaves the
//! machine where it is, and a later transition for the same `(from, event)`
//! pair wins over an earlier one.

use crate::error::FsmError;
use crate::model::FsmModel;
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// Dense row-major `states x events -> state` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTable {
    state_count: usize,
    event_count: usize,
    cells: Vec<usize>,
}

impl LookupTable {
    /// Builds the table from a finalized model.
    ///
    /// Fails with `EmptyModel` when no states are declared. Zero events is
    /// legal and yields a degenerate `|states| x 0` table.
    pub fn build(model: &FsmModel) -> Result<Self, FsmError> {
        if model.state_count() == 0 {
            return Err(FsmError::EmptyModel);
        }

        let state_index: HashMap<&str, usize> = model
            .states()
            .iter()
            .enumerate()
            .map(|(i, s)| (s.as_str(), i))
            .collect();
        let event_index: HashMap<&str, usize> = model
            .events()
            .iter()
            .enumerate()
            .map(|(i, e)| (e.as_str(), i))
            .collect();

        let state_count = model.state_count();
        let event_count = model.event_count();

        // Phase 1: every cell defaults to its own state (self-loop).
        let mut cells = vec![0; state_count * event_count];
        for (s, row) in cells.chunks_mut(event_count.max(1)).enumerate() {
            row.fill(s);
        }

        // Phase 2: replay transitions in recorded order; later entries for
        // the same (from, event) pair overwrite earlier ones.
        for t in model.transitions() {
            // The model validates every transition before recording it, so
            // all three names resolve to declared entries.
            if let (Some(&from), Some(&event), Some(&to)) = (
                state_index.get(t.from.as_str()),
                event_index.get(t.event.as_str()),
                state_index.get(t.to.as_str()),
            ) {
                cells[from * event_count + event] = to;
            }
        }

        Ok(Self {
            state_count,
            event_count,
            cells,
        })
    }

    /// The target state index for `(state, event)`.
    pub fn target(&self, state: usize, event: usize) -> usize {
        self.cells[state * self.event_count + event]
    }

    /// One row of targets: every event's outcome for the given state.
    pub fn row(&self, state: usize) -> &[usize] {
        &self.cells[state * self.event_count..(state + 1) * self.event_count]
    }

    pub fn state_count(&self) -> usize {
        self.state_count
    }

    pub fn event_count(&self) -> usize {
        self.event_count
    }
}

impl Serialize for LookupTable {
    /// Serializes as a sequence of rows, one per state.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.state_count))?;
        for state in 0..self.state_count {
            seq.serialize_element(self.row(state))?;
        }
        seq.end()
    }
}

/// Fully resolved machine: everything an emitter needs, in one snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct CompiledFsm {
    pub name: String,
    pub display_name: String,
    pub states: Vec<String>,
    pub events: Vec<String>,
    pub initial_state: String,
    pub table: LookupTable,
}

impl CompiledFsm {
    /// Resolves the model into a snapshot, building the lookup table and the
    /// effective initial state.
    pub fn from_model(model: &FsmModel) -> Result<Self, FsmError> {
        let table = LookupTable::build(model)?;
        let initial_state = model.initial_state()?.to_string();

        Ok(Self {
            name: model.name().to_string(),
            display_name: model.display_name().to_string(),
            states: model.states().to_vec(),
            events: model.events().to_vec(),
            initial_state,
            table,
        })
    }

    /// Index of the initial state in the state sequence.
    pub fn initial_state_index(&self) -> usize {
        self.states
            .iter()
            .position(|s| s == &self.initial_state)
            .unwrap_or(0)
    }
}
