use std::fmt;

use nix::request_code_write;
use nix::sys::ioctl::ioctl_num_type;

use crate::record::{SETUP_RECORD_SIZE, TRIGGER_RECORD_SIZE};
use crate::sys::ULEDS_IOC_MAGIC;

/// Raw request number of a control operation, as passed to `ioctl(2)`.
pub type RequestCode = ioctl_num_type;

/// `_IOW('l', 0x01, struct uleds_user_dev)`
pub const ULEDS_IOC_DEV_SETUP: RequestCode =
    request_code_write!(ULEDS_IOC_MAGIC, 0x01, SETUP_RECORD_SIZE);
/// `_IOW('l', 0x02, struct uleds_user_trigger)`
pub const ULEDS_IOC_SET_DEFAULT_TRIGGER: RequestCode =
    request_code_write!(ULEDS_IOC_MAGIC, 0x02, TRIGGER_RECORD_SIZE);

/// The control operations understood by the uleds driver.
///
/// Every request number maps to a variant: numbers the driver does not define come back as
/// [`ControlOp::Unknown`] carrying the raw value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ControlOp {
    /// Register the LED with its name and maximum brightness.
    DevSetup,
    /// Set the trigger the LED starts out with.
    SetDefaultTrigger,
    Unknown(RequestCode),
}

impl ControlOp {
    pub const fn from_code(code: RequestCode) -> Self {
        match code {
            ULEDS_IOC_DEV_SETUP => ControlOp::DevSetup,
            ULEDS_IOC_SET_DEFAULT_TRIGGER => ControlOp::SetDefaultTrigger,
            other => ControlOp::Unknown(other),
        }
    }

    pub const fn code(self) -> RequestCode {
        match self {
            ControlOp::DevSetup => ULEDS_IOC_DEV_SETUP,
            ControlOp::SetDefaultTrigger => ULEDS_IOC_SET_DEFAULT_TRIGGER,
            ControlOp::Unknown(code) => code,
        }
    }

    /// Size of the record the operation carries, if it is a known one.
    pub const fn payload_size(self) -> Option<usize> {
        match self {
            ControlOp::DevSetup => Some(SETUP_RECORD_SIZE),
            ControlOp::SetDefaultTrigger => Some(TRIGGER_RECORD_SIZE),
            ControlOp::Unknown(_) => None,
        }
    }
}

impl From<RequestCode> for ControlOp {
    fn from(code: RequestCode) -> Self {
        Self::from_code(code)
    }
}

impl fmt::Display for ControlOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ControlOp::DevSetup => f.pad("ULEDS_IOC_DEV_SETUP"),
            ControlOp::SetDefaultTrigger => f.pad("ULEDS_IOC_SET_DEFAULT_TRIGGER"),
            ControlOp::Unknown(code) => write!(f, "unknown control operation {:#x}", code),
        }
    }
}
