//! Diagnostics reported while parsing a definition file.
//!
//! Every problem found in the input becomes a [`Diagnostic`]. The parser's
//! own codes live in [`SyntaxError`]; the circuit model contributes its own
//! closed enums, wrapped together in [`ErrorKind`].

use std::fmt;

use thiserror::Error;

use crate::circuit::{ConnectionError, DeviceError, MonitorError};

/// Lexical, syntax and structural errors detected by the parser itself.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxError {
    #[error("Extra semicolons added")]
    ExtraSemicolon,
    #[error("DEVICES already called")]
    ExtraDevices,
    #[error("CONNECTIONS already called")]
    ExtraConnect,
    #[error("MONITOR already called")]
    ExtraMonitor,
    #[error("Not a number")]
    NoNumber,
    #[error("Expected a semicolon here")]
    NoSemicolon,
    #[error("Not a valid device name")]
    InvalidDeviceName,
    #[error("Expected an equals sign here")]
    NoEquals,
    #[error("Expected an 'END' statement")]
    NoEnd,
    #[error("Not a valid supported device type")]
    InvalidDeviceType,
    #[error("Not a valid type of output label")]
    InvalidOutputLabel,
    #[error("Expected a dot here")]
    NoDot,
    #[error("Expected a dash here")]
    NoDash,
    #[error("Expected a 'DEVICES' statement here")]
    ExpectDevices,
    #[error("Expected a 'CONNECTIONS' statement here")]
    ExpectConnect,
    #[error("Expected a 'MONITOR' statement here")]
    ExpectMonitor,
    #[error("Expected a 'MAIN_END' statement here")]
    NoMainEnd,
    #[error("Invalid input label")]
    InvalidInputLabel,
    #[error("Not all inputs are connected")]
    IncompleteNetwork,
    #[error("Unterminated comment present")]
    UnterminatedComment,
}

/// How the parser resynchronizes after reporting an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Stay on the current symbol
    None,
    /// Skip to the next `;` or `END` inside a section
    InBlock,
    /// Skip to the next section keyword not yet parsed, or `MAIN_END`
    OutOfBlock,
}

/// What the parser does once a [`SyntaxError`] has been recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoveryPlan {
    /// Print the offending source line with a caret
    pub caret: bool,
    /// Consume the current symbol before recovering
    pub advance: bool,
    /// Resynchronization mode
    pub recovery: Recovery,
}

impl SyntaxError {
    /// Look up how this error is displayed and recovered from.
    pub fn recovery(self) -> RecoveryPlan {
        use SyntaxError::*;

        let (caret, advance, recovery) = match self {
            ExtraSemicolon | NoEnd | UnterminatedComment => (true, false, Recovery::None),
            ExtraDevices | ExtraConnect | ExtraMonitor => (true, true, Recovery::OutOfBlock),
            NoNumber | NoSemicolon | InvalidDeviceName | NoEquals | InvalidDeviceType
            | InvalidOutputLabel | NoDot | NoDash | InvalidInputLabel => {
                (true, false, Recovery::InBlock)
            }
            ExpectDevices | ExpectConnect | ExpectMonitor | NoMainEnd => {
                (true, false, Recovery::OutOfBlock)
            }
            IncompleteNetwork => (false, false, Recovery::None),
        };
        RecoveryPlan {
            caret,
            advance,
            recovery,
        }
    }

    /// Whether later semantic actions are still allowed after this error.
    ///
    /// Extra semicolons never leave the parser out of step with the input.
    pub fn blocks_building(self) -> bool {
        !matches!(self, SyntaxError::ExtraSemicolon | SyntaxError::IncompleteNetwork)
    }
}

/// Any error the parser can report.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Device(#[from] DeviceError),
    #[error(transparent)]
    Connection(#[from] ConnectionError),
    #[error(transparent)]
    Monitor(#[from] MonitorError),
}

impl ErrorKind {
    /// Check whether this is a semantic error raised by the circuit model.
    pub fn is_semantic(&self) -> bool {
        !matches!(self, ErrorKind::Syntax(_))
    }
}

/// A reported error anchored at a source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagnostic {
    /// What went wrong
    pub kind: ErrorKind,
    /// Line number (1-indexed)
    pub line: u32,
    /// Column number (1-indexed)
    pub column: u32,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ERROR (line {}, column {}): {}",
            self.line, self.column, self.kind
        )
    }
}
