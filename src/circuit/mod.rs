//! Logic network representation.
//!
//! The parser never touches the network directly. It drives a
//! [`NetworkBuilder`], which [`Circuit`] implements: one call per well-formed
//! declaration, each returning `Ok(())` or the reason the declaration was
//! rejected.

mod devices;
mod graph;
mod monitors;
mod network;
mod types;

pub use devices::{Catalogue, DeviceError, MAX_GATE_INPUTS};
pub use graph::Circuit;
pub use monitors::MonitorError;
pub use network::ConnectionError;
pub use types::*;

use crate::names::NameId;

/// Semantic actions invoked by the parser.
pub trait NetworkBuilder {
    /// Add a device named `device` of the type spelled by `kind`.
    fn make_device(
        &mut self,
        device: NameId,
        kind: NameId,
        qualifier: Option<i64>,
    ) -> Result<(), DeviceError>;

    /// Connect an output to an input.
    fn make_connection(
        &mut self,
        out_device: NameId,
        out_port: Option<NameId>,
        in_device: NameId,
        in_port: Option<NameId>,
    ) -> Result<(), ConnectionError>;

    /// Monitor a device output.
    fn make_monitor(&mut self, device: NameId, port: Option<NameId>) -> Result<(), MonitorError>;

    /// Check that every input in the network is connected.
    fn check_network(&self) -> bool;
}
