//! Logic network structure.

use std::collections::HashMap;

use super::devices::{Catalogue, DeviceError};
use super::monitors::MonitorError;
use super::network::ConnectionError;
use super::types::{Device, Signal};
use super::NetworkBuilder;
use crate::names::{NameId, Names};

/// A logic network built from a definition file.
#[derive(Debug, Clone)]
pub struct Circuit {
    /// All devices, in declaration order
    pub(super) devices: Vec<Device>,

    /// Mapping from device names to positions in `devices`
    pub(super) index: HashMap<NameId, usize>,

    /// Device types and port labels
    pub(super) catalogue: Catalogue,

    /// Monitored outputs, in declaration order
    pub(super) monitors: Vec<Signal>,

    /// Number of connections made
    pub(super) connection_count: usize,
}

impl Circuit {
    /// Create an empty network, interning type and port names into `names`.
    pub fn new(names: &mut Names) -> Self {
        Self {
            devices: Vec::new(),
            index: HashMap::new(),
            catalogue: Catalogue::new(names),
            monitors: Vec::new(),
            connection_count: 0,
        }
    }

    /// All devices, in declaration order.
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    /// Find a device by name.
    pub fn device(&self, id: NameId) -> Option<&Device> {
        self.index.get(&id).map(|&i| &self.devices[i])
    }

    /// Monitored outputs, in declaration order.
    pub fn monitors(&self) -> &[Signal] {
        &self.monitors
    }

    /// Number of connections made.
    pub fn connection_count(&self) -> usize {
        self.connection_count
    }
}

impl NetworkBuilder for Circuit {
    fn make_device(
        &mut self,
        device: NameId,
        kind: NameId,
        qualifier: Option<i64>,
    ) -> Result<(), DeviceError> {
        self.add_device(device, kind, qualifier)
    }

    fn make_connection(
        &mut self,
        out_device: NameId,
        out_port: Option<NameId>,
        in_device: NameId,
        in_port: Option<NameId>,
    ) -> Result<(), ConnectionError> {
        self.connect(out_device, out_port, in_device, in_port)
    }

    fn make_monitor(&mut self, device: NameId, port: Option<NameId>) -> Result<(), MonitorError> {
        self.add_monitor(device, port)
    }

    fn check_network(&self) -> bool {
        self.all_inputs_connected()
    }
}
