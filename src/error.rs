use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::control::ControlOp;

/// Errors returned while registering LEDs or waiting for brightness events.
#[derive(Debug, Error)]
pub enum Error {
    /// The control device node is missing or could not be opened read-write.
    #[error("failed to open LED control device {}: {source}", path.display())]
    DeviceOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The kernel rejected a setup or default-trigger submission.
    #[error("{op} rejected for LED {name:?}: {source}")]
    ControlOperation {
        op: ControlOp,
        name: String,
        #[source]
        source: io::Error,
    },
    /// A signal arrived while blocked waiting for readiness.
    #[error("interrupted while waiting for brightness events")]
    ReadInterrupted,
    /// A read returned part of a brightness record.
    #[error("short brightness record from LED {name:?}: got {len} of 4 bytes")]
    ShortRead { name: String, len: usize },
    #[error(transparent)]
    Io(io::Error),
}

impl Error {
    pub(crate) fn control(op: ControlOp, name: &str, source: io::Error) -> Self {
        Error::ControlOperation {
            op,
            name: name.to_owned(),
            source,
        }
    }

    /// Returns the raw OS error code behind this error, if there is one.
    ///
    /// Useful for telling apart the kernel's reasons for rejecting a registration, e.g. `EBUSY`
    /// for a handle that is already set up or `EINVAL` for an unacceptable name.
    pub fn errno(&self) -> Option<i32> {
        match self {
            Error::DeviceOpen { source, .. }
            | Error::ControlOperation { source, .. }
            | Error::Io(source) => source.raw_os_error(),
            Error::ReadInterrupted => Some(libc::EINTR),
            Error::ShortRead { .. } => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::Interrupted {
            Error::ReadInterrupted
        } else {
            Error::Io(err)
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
