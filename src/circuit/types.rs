//! Core types for the logic network.

use std::fmt;

use crate::names::{NameId, Names};

/// Device types supported by the definition language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    /// AND gate
    And,
    /// NAND gate
    Nand,
    /// OR gate
    Or,
    /// NOR gate
    Nor,
    /// Two-input exclusive OR
    Xor,
    /// Square wave source
    Clock,
    /// Constant source
    Switch,
    /// D-type flip-flop
    DType,
}

impl DeviceKind {
    /// All device types.
    pub const ALL: [DeviceKind; 8] = [
        DeviceKind::And,
        DeviceKind::Nand,
        DeviceKind::Or,
        DeviceKind::Nor,
        DeviceKind::Xor,
        DeviceKind::Clock,
        DeviceKind::Switch,
        DeviceKind::DType,
    ];

    /// Spelling of the type in a definition file.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Nand => "NAND",
            Self::Or => "OR",
            Self::Nor => "NOR",
            Self::Xor => "XOR",
            Self::Clock => "CLOCK",
            Self::Switch => "SWITCH",
            Self::DType => "DTYPE",
        }
    }

    /// Parse a device type from its spelling.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    /// Whether this is a gate with a configurable number of inputs.
    pub fn is_gate(self) -> bool {
        matches!(self, Self::And | Self::Nand | Self::Or | Self::Nor)
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A device output, as written on the left of a connection or in a monitor.
///
/// `port` is `None` for devices with a single unnamed output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signal {
    /// Device name
    pub device: NameId,
    /// Output label
    pub port: Option<NameId>,
}

impl Signal {
    /// Render as `DEVICE` or `DEVICE.PORT`.
    pub fn display_name(&self, names: &Names) -> String {
        let device = names.lookup(self.device).unwrap_or("?");
        match self.port.and_then(|port| names.lookup(port)) {
            Some(port) => format!("{}.{}", device, port),
            None => device.to_string(),
        }
    }
}

/// A device instance in the network.
#[derive(Debug, Clone)]
pub struct Device {
    /// Device name
    pub id: NameId,
    /// Device type
    pub kind: DeviceKind,
    /// Number given after the type, if any
    pub qualifier: Option<i64>,
    /// Input ports, in port order, with the output driving each
    pub inputs: Vec<(NameId, Option<Signal>)>,
    /// Output ports; a single `None` for unnamed outputs
    pub outputs: Vec<Option<NameId>>,
}

impl Device {
    /// Check whether `port` names one of this device's inputs.
    pub fn has_input(&self, port: Option<NameId>) -> bool {
        port.map_or(false, |port| self.inputs.iter().any(|(id, _)| *id == port))
    }

    /// Check whether `port` names one of this device's outputs.
    pub fn has_output(&self, port: Option<NameId>) -> bool {
        self.outputs.contains(&port)
    }

    /// The output currently driving input `port`.
    pub fn input_source(&self, port: NameId) -> Option<Signal> {
        self.inputs
            .iter()
            .find(|(id, _)| *id == port)
            .and_then(|(_, source)| *source)
    }

    /// Check whether every input has a driver.
    pub fn is_fully_connected(&self) -> bool {
        self.inputs.iter().all(|(_, source)| source.is_some())
    }
}
