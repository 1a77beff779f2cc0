//! Connections between device outputs and inputs.

use thiserror::Error;
use tracing::debug;

use super::types::Signal;
use super::Circuit;
use crate::names::NameId;

/// Reasons a connection is rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionError {
    /// The device written before the dash does not exist
    #[error("Device name does not exist")]
    OutputDeviceAbsent,
    /// The device written after the dash does not exist
    #[error("Device name does not exist")]
    InputDeviceAbsent,
    #[error("Input is already connected")]
    InputConnected,
    #[error("Cannot connect an input to an input")]
    InputToInput,
    #[error("Cannot connect output to output")]
    OutputToOutput,
    #[error("Port does not exist")]
    PortAbsent,
}

impl Circuit {
    /// Connect two ports. Either side may be the output.
    pub(super) fn connect(
        &mut self,
        first_device: NameId,
        first_port: Option<NameId>,
        second_device: NameId,
        second_port: Option<NameId>,
    ) -> Result<(), ConnectionError> {
        let first = *self
            .index
            .get(&first_device)
            .ok_or(ConnectionError::OutputDeviceAbsent)?;
        let second = *self
            .index
            .get(&second_device)
            .ok_or(ConnectionError::InputDeviceAbsent)?;

        let first_signal = Signal {
            device: first_device,
            port: first_port,
        };
        let second_signal = Signal {
            device: second_device,
            port: second_port,
        };

        if self.devices[first].has_input(first_port) {
            if self.devices[second].has_output(second_port) {
                self.drive(first, first_port, second_signal)
            } else if self.devices[second].has_input(second_port) {
                Err(ConnectionError::InputToInput)
            } else {
                Err(ConnectionError::PortAbsent)
            }
        } else if self.devices[first].has_output(first_port) {
            if self.devices[second].has_input(second_port) {
                self.drive(second, second_port, first_signal)
            } else if self.devices[second].has_output(second_port) {
                Err(ConnectionError::OutputToOutput)
            } else {
                Err(ConnectionError::PortAbsent)
            }
        } else {
            Err(ConnectionError::PortAbsent)
        }
    }

    fn drive(
        &mut self,
        device: usize,
        port: Option<NameId>,
        source: Signal,
    ) -> Result<(), ConnectionError> {
        let slot = self.devices[device]
            .inputs
            .iter_mut()
            .find(|(id, _)| Some(*id) == port)
            .map(|(_, slot)| slot)
            .ok_or(ConnectionError::PortAbsent)?;
        if slot.is_some() {
            return Err(ConnectionError::InputConnected);
        }
        *slot = Some(source);
        self.connection_count += 1;
        debug!(device = %self.devices[device].id, ?port, "input connected");
        Ok(())
    }

    /// Check that every input of every device is driven.
    pub fn all_inputs_connected(&self) -> bool {
        self.devices.iter().all(|device| device.is_fully_connected())
    }
}
