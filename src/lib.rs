//! Wide console engine (workspace facade crate).
//!
//! Re-exports the workspace crates under stable module names
//! (`wide_console::{core,engine,input,term,types}`) and hosts the pieces the
//! binaries share: logging setup and setup-error reporting.

pub mod logging;

pub use wide_console_core as core;
pub use wide_console_engine as engine;
pub use wide_console_input as input;
pub use wide_console_term as term;
pub use wide_console_types as types;

use std::io::Write;

use crate::engine::EngineError;

/// Write the user-facing report for a fatal engine error.
///
/// Setup failures print the error line followed by the host diagnostic.
pub fn write_error_report(out: &mut impl Write, err: &EngineError) -> std::io::Result<()> {
    writeln!(out, "ERROR: {err}")?;
    if let EngineError::Setup(setup) = err {
        writeln!(out, "\t{}", setup.diagnostic())?;
    }
    Ok(())
}

/// [`write_error_report`] to stderr.
pub fn print_error(err: &EngineError) {
    let _ = write_error_report(&mut std::io::stderr().lock(), err);
}
