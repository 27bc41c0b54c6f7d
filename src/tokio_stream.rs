use std::future::poll_fn;
use std::io::{self, Read};
use std::os::unix::io::AsRawFd;
use std::task::{ready, Context, Poll};

use tokio::io::unix::AsyncFd;

use crate::error::{Error, Result};
use crate::record::{Brightness, BRIGHTNESS_RECORD_SIZE};
use crate::{nix_err, Registration};

/// An asynchronous stream of brightness samples from one LED.
///
/// The stream ends when the handle reads zero bytes or the kernel reports that the LED is gone
/// (`ENODEV`).
pub struct BrightnessStream {
    led: AsyncFd<Registration>,
}
impl Unpin for BrightnessStream {}

impl BrightnessStream {
    pub(crate) fn new(led: Registration) -> io::Result<Self> {
        use nix::fcntl;
        fcntl::fcntl(led.as_raw_fd(), fcntl::F_SETFL(fcntl::OFlag::O_NONBLOCK))
            .map_err(nix_err)?;
        let led = AsyncFd::new(led)?;
        Ok(Self { led })
    }

    /// Returns a reference to the underlying registration
    pub fn registration(&self) -> &Registration {
        self.led.get_ref()
    }

    pub fn into_inner(self) -> Registration {
        self.led.into_inner()
    }

    /// Waits for the next brightness sample. `Ok(None)` means the stream has ended.
    pub async fn next_brightness(&mut self) -> Result<Option<Brightness>> {
        poll_fn(|cx| self.poll_brightness(cx)).await
    }

    pub fn poll_brightness(&mut self, cx: &mut Context<'_>) -> Poll<Result<Option<Brightness>>> {
        loop {
            let mut guard = ready!(self.led.poll_read_ready(cx))?;

            let mut buf = [0u8; BRIGHTNESS_RECORD_SIZE];
            match guard.try_io(|led| led.get_ref().file().read(&mut buf)) {
                Ok(Ok(len)) => return Poll::Ready(self.led.get_ref().decode(len, buf)),
                Ok(Err(e)) if e.raw_os_error() == Some(libc::ENODEV) => {
                    return Poll::Ready(Ok(None))
                }
                Ok(Err(e)) => return Poll::Ready(Err(Error::from(e))),
                Err(_would_block) => continue,
            }
        }
    }
}

#[cfg(feature = "stream-trait")]
impl futures_core::Stream for BrightnessStream {
    type Item = Result<Brightness>;

    fn poll_next(
        self: std::pin::Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Self::Item>> {
        self.get_mut().poll_brightness(cx).map(Result::transpose)
    }
}
