//! fsmgen - table-driven FSM compiler
//!
//! Reads an FSM script, builds the transition table, and emits a
//! table-driven implementation (C++ header/source pair and/or a JSON
//! description).

use clap::{Parser, ValueEnum};
use fsmgen_codegen::{CppEmitter, JsonEmitter};
use fsmgen_core::{CompiledFsm, FsmModel};
use fsmgen_parser::parse_into;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fsmgen")]
#[command(about = "Compiles textual FSM specifications into table-driven implementations")]
#[command(version)]
struct Cli {
    /// FSM script to compile
    script: PathBuf,

    /// Output directory for generated files
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "cpp")]
    emit: Emit,

    /// Emit output even when the script produced diagnostics
    #[arg(long)]
    keep_going: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Emit {
    Cpp,
    Json,
    All,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let source = std::fs::read_to_string(&cli.script)?;

    let mut model = FsmModel::new();
    let report = parse_into(&mut model, &source);

    if !report.is_clean() {
        tracing::warn!(
            rejected = report.diagnostics.len(),
            accepted = report.statements_ok,
            "script produced diagnostics"
        );
        if !cli.keep_going {
            return Err(format!(
                "{} statement(s) rejected; no output written (use --keep-going to override)",
                report.diagnostics.len()
            )
            .into());
        }
    }

    let fsm = CompiledFsm::from_model(&model)?;
    tracing::info!(
        name = %fsm.name,
        states = fsm.states.len(),
        events = fsm.events.len(),
        initial = %fsm.initial_state,
        "compiled FSM"
    );

    std::fs::create_dir_all(&cli.out_dir)?;
    match cli.emit {
        Emit::Cpp => {
            CppEmitter::new(&fsm).write_files(&cli.out_dir)?;
        }
        Emit::Json => {
            JsonEmitter::new(&fsm).write_file(&cli.out_dir)?;
        }
        Emit::All => {
            CppEmitter::new(&fsm).write_files(&cli.out_dir)?;
            JsonEmitter::new(&fsm).write_file(&cli.out_dir)?;
        }
    }

    Ok(())
}
