use std::fmt;

/// Placement of a tensor's backing storage.
///
/// Placement is explicit metadata: operations that combine tensors require
/// every operand to share one placement and never move data between devices.
/// The reference [`CpuBackend`](crate::CpuBackend) executes on host memory
/// for every placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Device {
    /// Host memory.
    #[default]
    Cpu,
    /// An accelerator identified by its ordinal.
    Accelerator(u32),
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu => write!(f, "cpu"),
            Device::Accelerator(ordinal) => write!(f, "accelerator:{}", ordinal),
        }
    }
}
