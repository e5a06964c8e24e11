//! JSON emitter.
//!
//! Serializes the compiled machine for downstream tooling: name, display
//! name, ordered states and events, the effective initial state, and the
//! dense table as one row of target indices per state.

use crate::error::CodegenError;
use fsmgen_core::CompiledFsm;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes the JSON description of one compiled machine.
pub struct JsonEmitter<'a> {
    fsm: &'a CompiledFsm,
}

impl<'a> JsonEmitter<'a> {
    pub fn new(fsm: &'a CompiledFsm) -> Self {
        Self { fsm }
    }

    /// Path of the generated file under `out_dir`.
    pub fn output_path(&self, out_dir: &Path) -> PathBuf {
        out_dir.join(format!("{}Fsm.json", self.fsm.name))
    }

    /// Creates the file under `out_dir` and returns its path.
    pub fn write_file(&self, out_dir: &Path) -> Result<PathBuf, CodegenError> {
        let path = self.output_path(out_dir);
        let file = File::create(&path).map_err(|source| CodegenError::CreateFile {
            path: path.clone(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        self.write(&mut writer)?;
        writer.flush()?;
        tracing::info!(path = %path.display(), "JSON description created");
        Ok(path)
    }

    /// Renders the description to any sink.
    pub fn write<W: Write>(&self, w: &mut W) -> Result<(), CodegenError> {
        serde_json::to_writer_pretty(&mut *w, self.fsm)?;
        writeln!(w)?;
        Ok(())
    }
}
