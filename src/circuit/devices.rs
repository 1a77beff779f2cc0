//! Device catalogue and device creation.

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use super::types::{Device, DeviceKind};
use super::Circuit;
use crate::names::{NameId, Names};

/// Largest number of inputs a gate may have.
pub const MAX_GATE_INPUTS: i64 = 16;

/// Reasons a device declaration is rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceError {
    #[error("Device by this name already exists")]
    DevicePresent,
    #[error("No qualifier given and device type requires one")]
    NoQualifier,
    #[error("Qualifier is invalid for device type")]
    InvalidQualifier,
    #[error("Qualifier given but one was not allowed with device type")]
    QualifierPresent,
    #[error("Device Type given is not a valid device type")]
    BadDevice,
}

/// Interned spellings of device types and port labels.
#[derive(Debug, Clone)]
pub struct Catalogue {
    kinds: HashMap<NameId, DeviceKind>,
    /// Gate inputs `I1` to `I16`
    gate_inputs: Vec<NameId>,
    data: NameId,
    clk: NameId,
    set: NameId,
    clear: NameId,
    q: NameId,
    qbar: NameId,
}

impl Catalogue {
    /// Intern every type and port spelling into `names`.
    pub fn new(names: &mut Names) -> Self {
        let kinds = DeviceKind::ALL
            .into_iter()
            .map(|kind| (names.intern(kind.as_str()), kind))
            .collect();
        let gate_inputs = (1..=MAX_GATE_INPUTS)
            .map(|n| names.intern(&format!("I{}", n)))
            .collect();

        Self {
            kinds,
            gate_inputs,
            data: names.intern("DATA"),
            clk: names.intern("CLK"),
            set: names.intern("SET"),
            clear: names.intern("CLEAR"),
            q: names.intern("Q"),
            qbar: names.intern("QBAR"),
        }
    }

    /// Resolve a device type from its interned spelling.
    pub fn kind(&self, id: NameId) -> Option<DeviceKind> {
        self.kinds.get(&id).copied()
    }

    /// Build a device, checking the qualifier against the device type.
    pub fn instantiate(
        &self,
        id: NameId,
        kind: DeviceKind,
        qualifier: Option<i64>,
    ) -> Result<Device, DeviceError> {
        let (inputs, outputs) = match kind {
            DeviceKind::And | DeviceKind::Nand | DeviceKind::Or | DeviceKind::Nor => {
                let count = qualifier.ok_or(DeviceError::NoQualifier)?;
                if !(1..=MAX_GATE_INPUTS).contains(&count) {
                    return Err(DeviceError::InvalidQualifier);
                }
                (self.gate_inputs[..count as usize].to_vec(), vec![None])
            }
            DeviceKind::Xor => {
                if qualifier.is_some() {
                    return Err(DeviceError::QualifierPresent);
                }
                (self.gate_inputs[..2].to_vec(), vec![None])
            }
            DeviceKind::Clock => {
                let half_period = qualifier.ok_or(DeviceError::NoQualifier)?;
                if half_period <= 0 {
                    return Err(DeviceError::InvalidQualifier);
                }
                (Vec::new(), vec![None])
            }
            DeviceKind::Switch => {
                let state = qualifier.ok_or(DeviceError::NoQualifier)?;
                if !matches!(state, 0 | 1) {
                    return Err(DeviceError::InvalidQualifier);
                }
                (Vec::new(), vec![None])
            }
            DeviceKind::DType => {
                if qualifier.is_some() {
                    return Err(DeviceError::QualifierPresent);
                }
                (
                    vec![self.data, self.clk, self.set, self.clear],
                    vec![Some(self.q), Some(self.qbar)],
                )
            }
        };

        Ok(Device {
            id,
            kind,
            qualifier,
            inputs: inputs.into_iter().map(|port| (port, None)).collect(),
            outputs,
        })
    }
}

impl Circuit {
    pub(super) fn add_device(
        &mut self,
        id: NameId,
        kind: NameId,
        qualifier: Option<i64>,
    ) -> Result<(), DeviceError> {
        if self.index.contains_key(&id) {
            return Err(DeviceError::DevicePresent);
        }
        let kind = self.catalogue.kind(kind).ok_or(DeviceError::BadDevice)?;
        let device = self.catalogue.instantiate(id, kind, qualifier)?;

        debug!(device = %id, %kind, ?qualifier, "device added");
        self.index.insert(id, self.devices.len());
        self.devices.push(device);
        Ok(())
    }
}
