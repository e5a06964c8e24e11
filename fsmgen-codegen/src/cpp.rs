//! C++ emitter.
//!
//! Renders a compiled machine as a `<Name>Fsm.h` / `<Name>Fsm.cpp` pair: a
//! states enum, an events enum, and a class whose constructor fills the
//! lookup table with self-loops and then assigns the declared transitions.
//! `applyEvent` resolves in constant time by indexing the table.

use crate::error::CodegenError;
use fsmgen_core::CompiledFsm;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const BANNER: &str = "// Automatically generated by fsmgen. Do not edit.";

/// Writes the header/source pair for one compiled machine.
pub struct CppEmitter<'a> {
    fsm: &'a CompiledFsm,
}

impl<'a> CppEmitter<'a> {
    pub fn new(fsm: &'a CompiledFsm) -> Self {
        Self { fsm }
    }

    /// Path of the generated header under `out_dir`.
    pub fn header_path(&self, out_dir: &Path) -> PathBuf {
        out_dir.join(format!("{}Fsm.h", self.fsm.name))
    }

    /// Path of the generated source under `out_dir`.
    pub fn source_path(&self, out_dir: &Path) -> PathBuf {
        out_dir.join(format!("{}Fsm.cpp", self.fsm.name))
    }

    /// Creates both files under `out_dir` and returns their paths.
    ///
    /// Each file is created before any of its content is rendered; creation
    /// failure aborts with `CreateFile` and nothing is written.
    pub fn write_files(&self, out_dir: &Path) -> Result<Vec<PathBuf>, CodegenError> {
        let header_path = self.header_path(out_dir);
        let mut header = BufWriter::new(create(&header_path)?);
        self.write_header(&mut header)?;
        header.flush()?;
        tracing::info!(path = %header_path.display(), "header file created");

        let source_path = self.source_path(out_dir);
        let mut source = BufWriter::new(create(&source_path)?);
        self.write_source(&mut source)?;
        source.flush()?;
        tracing::info!(path = %source_path.display(), "source file created");

        Ok(vec![header_path, source_path])
    }

    /// Renders the header: guard, enums, class declaration.
    pub fn write_header<W: Write>(&self, w: &mut W) -> Result<(), CodegenError> {
        let name = &self.fsm.name;
        let guard = format!("{}_FSM_H", self.fsm.display_name);

        writeln!(w, "{BANNER}")?;
        writeln!(w)?;
        writeln!(w, "#ifndef {guard}")?;
        writeln!(w, "#define {guard}")?;
        writeln!(w)?;

        writeln!(w, "// The {name} FSM states.")?;
        writeln!(w, "enum {name}State")?;
        writeln!(w, "{{")?;
        for state in &self.fsm.states {
            writeln!(w, "\t{state},")?;
        }
        writeln!(w, "}};")?;
        writeln!(w)?;

        writeln!(w, "// The {name} FSM events.")?;
        writeln!(w, "enum {name}Event")?;
        writeln!(w, "{{")?;
        for event in &self.fsm.events {
            writeln!(w, "\t{event},")?;
        }
        writeln!(w, "}};")?;
        writeln!(w)?;

        writeln!(w, "// The {name} FSM class.")?;
        writeln!(w, "class {name}Fsm")?;
        writeln!(w, "{{")?;
        writeln!(w, "public:")?;
        writeln!(w, "\t{name}Fsm();")?;
        writeln!(w, "\t{name}Fsm({name}State _initialState);")?;
        writeln!(w, "\t~{name}Fsm();")?;
        writeln!(w)?;
        writeln!(w, "\tvoid applyEvent({name}Event _event);")?;
        writeln!(w, "\tvoid reset();")?;
        writeln!(w, "\t{name}State getCurrentState();")?;
        writeln!(w, "\tvoid setCurrentState({name}State _state);")?;
        writeln!(w, "private:")?;
        writeln!(w, "\t{name}State currentState;")?;
        writeln!(w, "\t{name}State initialState;")?;
        writeln!(
            w,
            "\t{name}State lookUpTable[{}][{}];",
            self.fsm.states.len(),
            self.fsm.events.len()
        )?;
        writeln!(w, "}};")?;
        writeln!(w)?;
        writeln!(w, "#endif /*{guard}*/")?;
        Ok(())
    }

    /// Renders the source: constructors, destructor, and the event methods.
    pub fn write_source<W: Write>(&self, w: &mut W) -> Result<(), CodegenError> {
        let name = &self.fsm.name;

        writeln!(w, "{BANNER}")?;
        writeln!(w)?;
        writeln!(w, "#include \"{name}Fsm.h\"")?;
        writeln!(w)?;

        writeln!(w, "// {name}Fsm default constructor.")?;
        writeln!(w, "{name}Fsm::{name}Fsm()")?;
        writeln!(w, "{{")?;
        writeln!(w, "\tinitialState = {};", self.fsm.initial_state)?;
        writeln!(w, "\tcurrentState = initialState;")?;
        writeln!(w)?;
        self.write_table_fill(w)?;
        writeln!(w, "}}")?;
        writeln!(w)?;

        writeln!(w, "// {name}Fsm constructor - sets initial state.")?;
        writeln!(w, "{name}Fsm::{name}Fsm({name}State _initialState)")?;
        writeln!(w, "{{")?;
        writeln!(w, "\tinitialState = _initialState;")?;
        writeln!(w, "\tcurrentState = initialState;")?;
        writeln!(w)?;
        self.write_table_fill(w)?;
        writeln!(w, "}}")?;
        writeln!(w)?;

        writeln!(w, "// {name}Fsm destructor.")?;
        writeln!(w, "{name}Fsm::~{name}Fsm()")?;
        writeln!(w, "{{")?;
        writeln!(w, "}}")?;
        writeln!(w)?;

        writeln!(w, "// Applies an event and transitions to a new state if required.")?;
        writeln!(w, "void {name}Fsm::applyEvent({name}Event _event)")?;
        writeln!(w, "{{")?;
        writeln!(w, "\tcurrentState = lookUpTable[currentState][_event];")?;
        writeln!(w, "}}")?;
        writeln!(w)?;

        writeln!(w, "// Resets the FSM to its initial state.")?;
        writeln!(w, "void {name}Fsm::reset()")?;
        writeln!(w, "{{")?;
        writeln!(w, "\tcurrentState = initialState;")?;
        writeln!(w, "}}")?;
        writeln!(w)?;

        writeln!(w, "// Returns the current state of the FSM.")?;
        writeln!(w, "{name}State {name}Fsm::getCurrentState()")?;
        writeln!(w, "{{")?;
        writeln!(w, "\treturn currentState;")?;
        writeln!(w, "}}")?;
        writeln!(w)?;

        writeln!(w, "// Sets the current state of the FSM.")?;
        writeln!(w, "void {name}Fsm::setCurrentState({name}State _state)")?;
        writeln!(w, "{{")?;
        writeln!(w, "\tcurrentState = _state;")?;
        writeln!(w, "}}")?;
        Ok(())
    }

    /// The two-phase table fill: default every cell to a self-loop, then
    /// assign the cells the transitions changed. Defaults are emitted as a
    /// loop, overrides by name.
    fn write_table_fill<W: Write>(&self, w: &mut W) -> Result<(), CodegenError> {
        let name = &self.fsm.name;
        let table = &self.fsm.table;

        writeln!(w, "\tfor (int i = 0; i < {}; ++i) {{", table.state_count())?;
        writeln!(w, "\t\tfor (int j = 0; j < {}; ++j) {{", table.event_count())?;
        writeln!(w, "\t\t\tlookUpTable[i][j] = {name}State(i);")?;
        writeln!(w, "\t\t}}")?;
        writeln!(w, "\t}}")?;

        for (s, state) in self.fsm.states.iter().enumerate() {
            for (e, event) in self.fsm.events.iter().enumerate() {
                let target = table.target(s, e);
                if target != s {
                    writeln!(
                        w,
                        "\tlookUpTable[{state}][{event}] = {};",
                        self.fsm.states[target]
                    )?;
                }
            }
        }
        Ok(())
    }
}

fn create(path: &Path) -> Result<File, CodegenError> {
    File::create(path).map_err(|source| CodegenError::CreateFile {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsmgen_core::FsmModel;

    fn turnstile() -> CompiledFsm {
        let mut model = FsmModel::new();
        model.set_name("Turnstile").unwrap();
        model.declare_state("Locked").unwrap();
        model.declare_state("Unlocked").unwrap();
        model.set_initial_state("Locked").unwrap();
        model.add_transition("Locked", "Coin", "Unlocked").unwrap();
        model.add_transition("Unlocked", "Push", "Locked").unwrap();
        CompiledFsm::from_model(&model).unwrap()
    }

    fn render_header(fsm: &CompiledFsm) -> String {
        let mut buf = Vec::new();
        CppEmitter::new(fsm).write_header(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn render_source(fsm: &CompiledFsm) -> String {
        let mut buf = Vec::new();
        CppEmitter::new(fsm).write_source(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_header_guard_uses_display_name() {
        let header = render_header(&turnstile());
        assert!(header.contains("#ifndef TURNSTILE_FSM_H"));
        assert!(header.contains("#define TURNSTILE_FSM_H"));
        assert!(header.contains("#endif /*TURNSTILE_FSM_H*/"));
    }

    #[test]
    fn test_header_enums_in_declaration_order() {
        let header = render_header(&turnstile());
        assert!(header.contains("enum TurnstileState\n{\n\tLocked,\n\tUnlocked,\n};"));
        assert!(header.contains("enum TurnstileEvent\n{\n\tCoin,\n\tPush,\n};"));
    }

    #[test]
    fn test_header_table_dimensions() {
        let header = render_header(&turnstile());
        assert!(header.contains("TurnstileState lookUpTable[2][2];"));
    }

    #[test]
    fn test_source_default_fill_and_overrides() {
        let source = render_source(&turnstile());
        assert!(source.contains("lookUpTable[i][j] = TurnstileState(i);"));
        assert!(source.contains("\tlookUpTable[Locked][Coin] = Unlocked;"));
        assert!(source.contains("\tlookUpTable[Unlocked][Push] = Locked;"));
        // Self-loop cells are covered by the default fill, not re-emitted.
        assert!(!source.contains("lookUpTable[Locked][Push]"));
        assert!(!source.contains("lookUpTable[Unlocked][Coin]"));
    }

    #[test]
    fn test_source_initial_state() {
        let source = render_source(&turnstile());
        assert!(source.contains("\tinitialState = Locked;"));
    }

    #[test]
    fn test_write_files_creates_pair() {
        let dir = tempfile::tempdir().unwrap();
        let fsm = turnstile();
        let paths = CppEmitter::new(&fsm).write_files(dir.path()).unwrap();

        assert_eq!(paths.len(), 2);
        assert!(dir.path().join("TurnstileFsm.h").is_file());
        assert!(dir.path().join("TurnstileFsm.cpp").is_file());
    }

    #[test]
    fn test_write_files_missing_directory_is_create_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no/such/dir");
        let fsm = turnstile();

        let err = CppEmitter::new(&fsm).write_files(&missing).unwrap_err();
        assert!(matches!(err, CodegenError::CreateFile { .. }));
        assert!(!dir.path().join("no").exists());
    }
}
