//! Monitored signals.

use thiserror::Error;
use tracing::debug;

use super::types::Signal;
use super::Circuit;
use crate::names::NameId;

/// Reasons a monitor point is rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonitorError {
    #[error("Can only monitor outputs")]
    NotOutput,
    #[error("Output already being monitored")]
    MonitorPresent,
    #[error("Device does not exist")]
    DeviceAbsent,
}

impl Circuit {
    pub(super) fn add_monitor(
        &mut self,
        device: NameId,
        port: Option<NameId>,
    ) -> Result<(), MonitorError> {
        let index = *self.index.get(&device).ok_or(MonitorError::DeviceAbsent)?;
        if !self.devices[index].has_output(port) {
            return Err(MonitorError::NotOutput);
        }

        let signal = Signal { device, port };
        if self.monitors.contains(&signal) {
            return Err(MonitorError::MonitorPresent);
        }
        debug!(%device, ?port, "monitor added");
        self.monitors.push(signal);
        Ok(())
    }
}
