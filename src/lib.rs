//! Userspace LEDs for Linux.
//!
//! The kernel's `uleds` driver lets a program create LED class devices that are backed by
//! userspace instead of hardware. Every time something writes to such an LED's
//! `/sys/class/leds/<name>/brightness`, the driver queues the new value for the program that
//! created it. The upstream documentation lives at
//! <https://www.kernel.org/doc/html/latest/leds/uleds.html>.
//!
//! Using the driver takes two steps:
//!
//! 1. **Registration.** Open `/dev/uleds` once per LED and hand the driver a setup record with
//!    the LED's name and maximum brightness, optionally followed by a default trigger. The open
//!    handle *is* the LED: closing it removes the class device. See [`Registrar`] and
//!    [`Registration`].
//! 2. **Monitoring.** Each handle becomes readable whenever its brightness changes, and a read
//!    returns the new value as a native-endian `u32`. [`EventLoop`] multiplexes any number of
//!    handles with epoll and reports [`Observation`]s.
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use uleds::{Config, Dedup, Registrar};
//!
//! let registrar = Registrar::new(Config::default());
//! let leds = registrar.register(["uleds::test0", "uleds::test1"])?;
//! uleds::monitor(&leds, Dedup::Off, |obs| println!("{}", obs))?;
//! # Ok(())
//! # }
//! ```
//!
//! Creating LEDs generally requires root. Blocking in [`EventLoop::wait`] only ends with a
//! brightness change or a signal; a signal comes back as [`Error::ReadInterrupted`] once every
//! handle has been removed from the poller.

#![cfg(any(target_os = "linux", target_os = "android"))]
#![allow(non_camel_case_types)]

mod config;
mod control;
mod error;
mod event_loop;
mod poller;
mod record;
mod registrar;
mod sys;
#[cfg(feature = "tokio")]
mod tokio_stream;

use std::io;

pub use crate::config::{Config, SetupMethod, DEFAULT_DEVICE_PATH, DEFAULT_MAX_BRIGHTNESS};
pub use crate::control::{
    ControlOp, RequestCode, ULEDS_IOC_DEV_SETUP, ULEDS_IOC_SET_DEFAULT_TRIGGER,
};
pub use crate::error::{Error, Result};
pub use crate::event_loop::{monitor, Dedup, EventLoop, Observation};
pub use crate::poller::{EpollPoller, Poller, Token};
pub use crate::record::{
    Brightness, SetupRecord, TriggerRecord, BRIGHTNESS_RECORD_SIZE, LED_MAX_NAME_SIZE,
    SETUP_RECORD_SIZE, TRIGGER_MAX_NAME_SIZE, TRIGGER_RECORD_SIZE,
};
pub use crate::registrar::{Registrar, Registration, SYSFS_LEDS_PATH};
#[cfg(feature = "tokio")]
pub use crate::tokio_stream::BrightnessStream;

#[inline]
pub(crate) fn nix_err(err: nix::Error) -> io::Error {
    io::Error::from_raw_os_error(err as i32)
}
