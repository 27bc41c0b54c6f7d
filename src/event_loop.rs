//! Waiting for brightness changes on registered LEDs.

use std::convert::Infallible;
use std::fmt;
use std::os::unix::io::AsFd;

use log::{debug, trace, warn};

use crate::error::Result;
use crate::poller::{EpollPoller, Poller, Token};
use crate::record::Brightness;
use crate::registrar::Registration;

/// A brightness change seen on one LED.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Observation {
    pub name: String,
    pub brightness: Brightness,
}

impl Observation {
    pub fn new(name: impl Into<String>, brightness: u32) -> Self {
        Observation {
            name: name.into(),
            brightness: Brightness(brightness),
        }
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: brightness {}", self.name, self.brightness)
    }
}

/// Whether repeated samples of the same value are reported.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Dedup {
    /// Report every sample the kernel delivers.
    #[default]
    Off,
    /// Report a sample only if it differs from the previous one for the same LED.
    OnChange,
}

/// Watches a set of registered LEDs for brightness changes.
///
/// Creating the loop registers every LED's handle with the poller; dropping it deregisters
/// them again, whichever way the loop is left.
pub struct EventLoop<'a, P: Poller> {
    poller: P,
    leds: &'a [Registration],
    registered: usize,
    dedup: Dedup,
    last_seen: Vec<Option<Brightness>>,
    ready: Vec<Token>,
}

impl<'a> EventLoop<'a, EpollPoller> {
    /// Builds a loop over a fresh epoll instance.
    pub fn with_epoll(leds: &'a [Registration], dedup: Dedup) -> Result<Self> {
        Self::new(EpollPoller::new()?, leds, dedup)
    }
}

impl<'a, P: Poller> EventLoop<'a, P> {
    pub fn new(poller: P, leds: &'a [Registration], dedup: Dedup) -> Result<Self> {
        let mut this = EventLoop {
            poller,
            leds,
            registered: 0,
            dedup,
            last_seen: vec![None; leds.len()],
            ready: Vec::with_capacity(leds.len()),
        };
        for (token, led) in leds.iter().enumerate() {
            this.poller.register(led.as_fd(), token)?;
            this.registered += 1;
            debug!("watching LED {:?}", led.name());
        }
        Ok(this)
    }

    /// Blocks until at least one LED is readable and returns what was read from the ready ones.
    ///
    /// The result may be empty: zero-byte reads and suppressed duplicates produce nothing.
    ///
    /// A failed read on any ready LED fails the whole call, and samples already read from
    /// other LEDs in the same cycle are lost.
    pub fn wait(&mut self) -> Result<Vec<Observation>> {
        self.ready.clear();
        self.poller.wait(&mut self.ready)?;

        let mut observations = Vec::with_capacity(self.ready.len());
        for &token in &self.ready {
            let Some(led) = self.leds.get(token) else {
                continue;
            };
            let Some(brightness) = led.read_brightness()? else {
                trace!("empty read from LED {:?}", led.name());
                continue;
            };
            trace!("LED {:?} reported brightness {}", led.name(), brightness);

            let last = &mut self.last_seen[token];
            if self.dedup == Dedup::OnChange && *last == Some(brightness) {
                continue;
            }
            *last = Some(brightness);
            observations.push(Observation::new(led.name(), brightness.value()));
        }
        Ok(observations)
    }

    /// Waits forever, handing each observation to `sink`.
    ///
    /// Only returns on error; an interrupted wait comes back as
    /// [`Error::ReadInterrupted`](crate::Error::ReadInterrupted) after the handles have been
    /// deregistered.
    pub fn run<F>(mut self, mut sink: F) -> Result<Infallible>
    where
        F: FnMut(&Observation),
    {
        loop {
            for observation in self.wait()? {
                sink(&observation);
            }
        }
    }

    /// Removes every handle from the poller. Calling it again does nothing.
    ///
    /// Returns how many handles were deregistered by this call.
    pub fn deregister_all(&mut self) -> usize {
        let count = self.registered;
        for led in &self.leds[..count] {
            match self.poller.deregister(led.as_fd()) {
                Ok(()) => debug!("stopped watching LED {:?}", led.name()),
                Err(e) => warn!("failed to stop watching LED {:?}: {}", led.name(), e),
            }
        }
        self.registered = 0;
        count
    }

    pub fn leds(&self) -> &'a [Registration] {
        self.leds
    }
}

impl<P: Poller> Drop for EventLoop<'_, P> {
    fn drop(&mut self) {
        self.deregister_all();
    }
}

/// Watches `leds` on a fresh epoll instance until an error or interruption.
pub fn monitor<F>(leds: &[Registration], dedup: Dedup, sink: F) -> Result<Infallible>
where
    F: FnMut(&Observation),
{
    EventLoop::with_epoll(leds, dedup)?.run(sink)
}
