//! Definition language front end: scanner, parser and diagnostics.
//!
//! A definition file lists devices, the connections between them and the
//! signals to monitor. Whitespace is insignificant; text between a pair of
//! `#` markers is a comment.
//!
//! # Grammar Overview
//!
//! ```text
//! file              = devices_block connections_block monitor_block "MAIN_END"
//! devices_block     = "DEVICES" { device_def } "END"
//! device_def        = NAME [ "," NUMBER ] "=" NAME ";"
//! connections_block = "CONNECTIONS" { connection_def } "END"
//! connection_def    = NAME [ "." NAME ] "-" NAME "." NAME ";"
//! monitor_block     = "MONITOR" { monitor_def } "END"
//! monitor_def       = NAME [ "." NAME ] ";"
//!
//! NAME   = letter { letter | digit | '_' }
//! NUMBER = digit { digit }
//! ```
//!
//! In a device definition the first name is the device type and the second
//! is the new device's name.
//!
//! # Device Types
//!
//! | Type | Qualifier | Inputs | Outputs |
//! |------|-----------|--------|---------|
//! | AND, NAND, OR, NOR | inputs, 1 to 16 | `I1`..`In` | unnamed |
//! | XOR | none | `I1`, `I2` | unnamed |
//! | CLOCK | half period, > 0 | none | unnamed |
//! | SWITCH | initial state, 0 or 1 | none | unnamed |
//! | DTYPE | none | `DATA`, `CLK`, `SET`, `CLEAR` | `Q`, `QBAR` |
//!
//! # Example
//!
//! ```text
//! # Two switches into a NAND gate #
//! DEVICES
//!     SWITCH, 0 = SW1;
//!     SWITCH, 1 = SW2;
//!     NAND, 2 = G1;
//! END
//! CONNECTIONS
//!     SW1 - G1.I1;
//!     SW2 - G1.I2;
//! END
//! MONITOR
//!     G1;
//! END
//! MAIN_END
//! ```

mod diagnostics;
mod parser;
mod scanner;

pub use diagnostics::{Diagnostic, ErrorKind, Recovery, RecoveryPlan, SyntaxError};
pub use parser::Parser;
pub use scanner::{Keyword, Scanner, Symbol, TokenKind, COMMENT_MARKER};

use std::io::Write;

use crate::circuit::NetworkBuilder;
use crate::error::{LogsimError, Result};
use crate::names::Names;

/// Parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Print the offending source line and a caret under each diagnostic.
    ///
    /// Turn off to get one line per diagnostic, e.g. for comparing output
    /// in tests.
    pub inline_locations: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            inline_locations: true,
        }
    }
}

/// Parse a definition file's text, building the network into `builder`.
///
/// Diagnostics are written to `out`. Returns `true` if the file had no
/// errors.
pub fn parse_network<B: NetworkBuilder, W: Write>(
    source: &str,
    names: &mut Names,
    builder: &mut B,
    out: W,
    options: ParseOptions,
) -> bool {
    let scanner = Scanner::new(source, names);
    let mut parser = Parser::new(scanner, builder, out, options);
    parser.parse_network()
}

/// Parse a definition file from disk.
///
/// Fails only if the file cannot be read or diagnostics cannot be written.
pub fn parse_file<B: NetworkBuilder, W: Write>(
    path: &std::path::Path,
    names: &mut Names,
    builder: &mut B,
    out: W,
    options: ParseOptions,
) -> Result<bool> {
    let content = std::fs::read_to_string(path).map_err(|e| LogsimError::file_read(path, e))?;
    let scanner = Scanner::new(&content, names);
    let mut parser = Parser::new(scanner, builder, out, options);
    let ok = parser.parse_network();
    parser.check_output()?;
    Ok(ok)
}
