//! # Logsim
//!
//! Front end for a logic circuit simulator.
//!
//! This library provides:
//! - A scanner and recursive-descent parser for circuit definition files
//! - Precise, caret-annotated diagnostics with error recovery, so a single
//!   pass reports every independent problem in a file
//! - An in-memory logic network (devices, connections, monitored signals)
//!   built as the file is parsed
//!
//! ## Architecture
//!
//! - [`names`] - Interned identifiers shared by every other module
//! - [`dsl`] - Scanner, parser and diagnostics for the definition language
//! - [`circuit`] - The logic network and the [`NetworkBuilder`] interface the
//!   parser drives
//!
//! ## Usage
//!
//! ```
//! use logsim::{dsl, Circuit, Names};
//!
//! let source = "DEVICES SWITCH, 1 = SW; END CONNECTIONS END MONITOR SW; END MAIN_END";
//! let mut names = Names::new();
//! let mut circuit = Circuit::new(&mut names);
//! let mut diagnostics = Vec::new();
//!
//! let ok = dsl::parse_network(source, &mut names, &mut circuit, &mut diagnostics, Default::default());
//! assert!(ok);
//! assert_eq!(circuit.monitors().len(), 1);
//! ```
//!
//! ## Error Handling
//!
//! Malformed input is never a Rust error. Each problem becomes a
//! [`dsl::Diagnostic`], written to the caller's output sink as it is found,
//! and parsing continues from the next safe symbol. Declarations are only
//! handed to the network while the file is still in step with the grammar,
//! so a file with syntax errors never yields a half-built network.

pub mod circuit;
pub mod dsl;
pub mod error;
pub mod names;

// Re-export main types for convenience
pub use circuit::{Circuit, NetworkBuilder};
pub use dsl::{parse_network, ParseOptions, Parser, Scanner};
pub use error::{LogsimError, Result};
pub use names::{NameId, Names};
