//! Creating userspace LEDs through the uleds control device.
//!
//! Each LED needs its own open handle on the control device: the kernel binds one LED class
//! device to every file that has been set up, and removes it again when the file is closed.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::os::unix::io::{AsFd, AsRawFd, BorrowedFd, RawFd};
use std::path::PathBuf;

use log::debug;

use crate::config::{Config, SetupMethod};
use crate::control::ControlOp;
use crate::error::{Error, Result};
use crate::record::{Brightness, SetupRecord, TriggerRecord, BRIGHTNESS_RECORD_SIZE};
use crate::{nix_err, sys};

/// Where the kernel exposes LED class devices.
pub const SYSFS_LEDS_PATH: &str = "/sys/class/leds";

/// Registers LEDs with the uleds driver according to a [`Config`].
#[derive(Debug, Clone, Default)]
pub struct Registrar {
    config: Config,
}

impl Registrar {
    pub fn new(config: Config) -> Self {
        Registrar { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Registers one LED per name, in order.
    ///
    /// Stops at the first failure. LEDs registered before it are released again when the
    /// partial result is dropped.
    pub fn register<I>(&self, names: I) -> Result<Vec<Registration>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        names
            .into_iter()
            .map(|name| self.register_one(name.as_ref()))
            .collect()
    }

    /// Opens a fresh handle on the control device and sets it up as the LED `name`.
    ///
    /// Names longer than 63 bytes are truncated.
    pub fn register_one(&self, name: &str) -> Result<Registration> {
        let file = self.open_control_device()?;

        let setup = SetupRecord::new(name, self.config.max_brightness);
        match self.config.setup_method {
            SetupMethod::Ioctl => unsafe { sys::uleds_ioc_dev_setup(file.as_raw_fd(), &setup.0) }
                .map(drop)
                .map_err(|e| Error::control(ControlOp::DevSetup, name, nix_err(e)))?,
            SetupMethod::Write => write_setup(&file, &setup)
                .map_err(|e| Error::control(ControlOp::DevSetup, name, e))?,
        }
        debug!(
            "registered LED {:?} (max brightness {}) via {:?}",
            name, self.config.max_brightness, self.config.setup_method
        );

        if let Some(trigger) = &self.config.default_trigger {
            let record = TriggerRecord::new(trigger);
            unsafe { sys::uleds_ioc_set_default_trigger(file.as_raw_fd(), &record.0) }.map_err(
                |e| Error::control(ControlOp::SetDefaultTrigger, name, nix_err(e)),
            )?;
            debug!("set default trigger of LED {:?} to {:?}", name, trigger);
        }

        Ok(Registration {
            name: name.to_owned(),
            max_brightness: self.config.max_brightness,
            file,
        })
    }

    fn open_control_device(&self) -> Result<File> {
        let path = &self.config.device_path;
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|source| Error::DeviceOpen {
                path: path.clone(),
                source,
            })?;
        debug!("opened {} as fd {}", path.display(), file.as_raw_fd());
        Ok(file)
    }
}

fn write_setup(mut file: &File, setup: &SetupRecord) -> io::Result<()> {
    let bytes = setup.to_bytes();
    let written = file.write(&bytes)?;
    if written != bytes.len() {
        return Err(io::Error::new(
            io::ErrorKind::WriteZero,
            format!("setup record accepted {} of {} bytes", written, bytes.len()),
        ));
    }
    Ok(())
}

/// An LED that has been set up with the kernel, together with the handle that keeps it alive.
///
/// Dropping the registration closes the handle, which removes the LED.
#[derive(Debug)]
pub struct Registration {
    name: String,
    max_brightness: u32,
    file: File,
}

impl Registration {
    /// Wraps a handle that has already been set up.
    pub fn from_file(name: impl Into<String>, max_brightness: u32, file: File) -> Self {
        Registration {
            name: name.into(),
            max_brightness,
            file,
        }
    }

    /// Returns the name the LED was registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn max_brightness(&self) -> u32 {
        self.max_brightness
    }

    /// The LED class device the kernel created for this registration.
    pub fn sysfs_path(&self) -> PathBuf {
        PathBuf::from(SYSFS_LEDS_PATH).join(&self.name)
    }

    pub fn file(&self) -> &File {
        &self.file
    }

    pub fn into_file(self) -> File {
        self.file
    }

    /// Reads one brightness record.
    ///
    /// Blocks until the brightness changes unless the handle is non-blocking. A zero-byte read
    /// returns `Ok(None)`.
    pub fn read_brightness(&self) -> Result<Option<Brightness>> {
        let mut buf = [0u8; BRIGHTNESS_RECORD_SIZE];
        let len = (&self.file).read(&mut buf)?;
        self.decode(len, buf)
    }

    pub(crate) fn decode(
        &self,
        len: usize,
        buf: [u8; BRIGHTNESS_RECORD_SIZE],
    ) -> Result<Option<Brightness>> {
        match len {
            0 => Ok(None),
            BRIGHTNESS_RECORD_SIZE => Ok(Some(Brightness::from_bytes(buf))),
            len => Err(Error::ShortRead {
                name: self.name.clone(),
                len,
            }),
        }
    }

    #[cfg(feature = "tokio")]
    #[inline]
    pub fn into_brightness_stream(self) -> io::Result<crate::BrightnessStream> {
        crate::BrightnessStream::new(self)
    }
}

impl AsFd for Registration {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.file.as_fd()
    }
}

impl AsRawFd for Registration {
    fn as_raw_fd(&self) -> RawFd {
        self.file.as_raw_fd()
    }
}
