//! Readiness multiplexing over a set of LED handles.

use std::io;
use std::os::unix::io::BorrowedFd;

use nix::sys::epoll::{Epoll, EpollCreateFlags, EpollEvent, EpollFlags, EpollTimeout};

use crate::nix_err;

/// Identifies a registered handle in the results of [`Poller::wait`].
pub type Token = usize;

/// An interest set: handles registered for readability, and a way to block until some are.
pub trait Poller {
    fn register(&mut self, fd: BorrowedFd<'_>, token: Token) -> io::Result<()>;

    fn deregister(&mut self, fd: BorrowedFd<'_>) -> io::Result<()>;

    /// Blocks without a timeout until at least one registered handle is readable, then appends
    /// the tokens of the readable handles to `ready`.
    ///
    /// A signal delivered while blocked surfaces as [`io::ErrorKind::Interrupted`].
    fn wait(&mut self, ready: &mut Vec<Token>) -> io::Result<()>;
}

impl<P: Poller + ?Sized> Poller for &mut P {
    fn register(&mut self, fd: BorrowedFd<'_>, token: Token) -> io::Result<()> {
        (**self).register(fd, token)
    }

    fn deregister(&mut self, fd: BorrowedFd<'_>) -> io::Result<()> {
        (**self).deregister(fd)
    }

    fn wait(&mut self, ready: &mut Vec<Token>) -> io::Result<()> {
        (**self).wait(ready)
    }
}

const EVENT_CAPACITY: usize = 16;

/// [`Poller`] backed by a level-triggered epoll instance.
pub struct EpollPoller {
    epoll: Epoll,
    events: Vec<EpollEvent>,
}

impl EpollPoller {
    pub fn new() -> io::Result<Self> {
        let epoll = Epoll::new(EpollCreateFlags::EPOLL_CLOEXEC).map_err(nix_err)?;
        Ok(EpollPoller {
            epoll,
            events: vec![EpollEvent::empty(); EVENT_CAPACITY],
        })
    }
}

impl Poller for EpollPoller {
    fn register(&mut self, fd: BorrowedFd<'_>, token: Token) -> io::Result<()> {
        let event = EpollEvent::new(EpollFlags::EPOLLIN, token as u64);
        self.epoll.add(fd, event).map_err(nix_err)
    }

    fn deregister(&mut self, fd: BorrowedFd<'_>) -> io::Result<()> {
        self.epoll.delete(fd).map_err(nix_err)
    }

    fn wait(&mut self, ready: &mut Vec<Token>) -> io::Result<()> {
        let n = self
            .epoll
            .wait(&mut self.events, EpollTimeout::NONE)
            .map_err(nix_err)?;
        ready.extend(self.events[..n].iter().map(|ev| ev.data() as Token));
        Ok(())
    }
}

impl std::fmt::Debug for EpollPoller {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("EpollPoller").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::os::unix::io::AsFd;
    use std::os::unix::net::UnixStream;

    #[test]
    fn reports_readable_tokens() -> io::Result<()> {
        let (a, mut a_peer) = UnixStream::pair()?;
        let (b, mut b_peer) = UnixStream::pair()?;
        let mut poller = EpollPoller::new()?;
        poller.register(a.as_fd(), 0)?;
        poller.register(b.as_fd(), 1)?;

        b_peer.write_all(&[0; 4])?;
        let mut ready = Vec::new();
        poller.wait(&mut ready)?;
        assert_eq!(ready, vec![1]);

        a_peer.write_all(&[0; 4])?;
        ready.clear();
        poller.wait(&mut ready)?;
        ready.sort_unstable();
        assert_eq!(ready, vec![0, 1]);

        poller.deregister(a.as_fd())?;
        poller.deregister(b.as_fd())?;
        Ok(())
    }

    #[test]
    fn deregistering_twice_fails() -> io::Result<()> {
        let (a, _peer) = UnixStream::pair()?;
        let mut poller = EpollPoller::new()?;
        poller.register(a.as_fd(), 0)?;
        poller.deregister(a.as_fd())?;
        let err = poller.deregister(a.as_fd()).unwrap_err();
        assert_eq!(err.raw_os_error(), Some(libc::ENOENT));
        Ok(())
    }
}
