//! Session operations abstraction
//!
//! This module provides the session operations pattern that allows
//! transparent switching between plain TCP and TLS connections.

use super::{Error, Result};
use socket2::{Domain, Protocol, SockAddr, Socket, Type};
use std::io::{self, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::os::fd::AsRawFd;
use std::time::Duration;

/// Session operations trait
///
/// This trait defines the operations that can be performed on a session,
/// abstracting over plain TCP and TLS connections.
pub trait SessionOps {
    /// Poll the session for events
    ///
    /// Returns true if the session is ready for the requested operation
    fn poll(&self, events: PollEvents, timeout: Option<Duration>) -> Result<bool>;

    /// Read data from the session
    fn read(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Write data to the session
    fn write(&mut self, buf: &[u8]) -> Result<usize>;

    /// Flush buffered writes
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    /// Close the session
    fn close(&mut self) -> Result<()>;
}

/// Poll events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollEvents {
    Read,
    Write,
    Both,
}

/// Wait on a raw descriptor with `poll(2)`
pub(crate) fn poll_fd(fd: i32, events: PollEvents, timeout: Option<Duration>) -> Result<bool> {
    use libc::{poll, pollfd, POLLIN, POLLOUT};

    let mut pfd = pollfd {
        fd,
        events: match events {
            PollEvents::Read => POLLIN,
            PollEvents::Write => POLLOUT,
            PollEvents::Both => POLLIN | POLLOUT,
        },
        revents: 0,
    };

    let timeout_ms = timeout
        .map(|d| d.as_millis().min(i32::MAX as u128) as i32)
        .unwrap_or(-1); // -1 = infinite

    // SAFETY: `pfd` is a valid pollfd and the count is 1
    let result = unsafe { poll(&mut pfd as *mut pollfd, 1, timeout_ms) };

    if result < 0 {
        return Err(Error::Io(io::Error::last_os_error()));
    }

    Ok(result > 0)
}

/// Plain file descriptor session operations
pub struct FdSessionOps {
    stream: TcpStream,
    closed: bool,
}

impl FdSessionOps {
    /// Create a new FD session operations from a TCP stream
    pub fn new(stream: TcpStream) -> Self {
        FdSessionOps {
            stream,
            closed: false,
        }
    }

    /// Open a TCP connection with a connect timeout
    ///
    /// Nagle's algorithm is disabled on the returned stream.
    pub fn connect(addr: SocketAddr, timeout: Duration) -> Result<Self> {
        let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;
        socket.set_nodelay(true)?;
        socket.connect_timeout(&SockAddr::from(addr), timeout)?;
        log::debug!("connected to {}", addr);
        Ok(FdSessionOps::new(socket.into()))
    }

    /// Get a reference to the underlying stream
    pub fn stream(&self) -> &TcpStream {
        &self.stream
    }

    /// Get a mutable reference to the underlying stream
    pub fn stream_mut(&mut self) -> &mut TcpStream {
        &mut self.stream
    }

    /// Unwrap, returning the stream
    pub fn into_stream(self) -> TcpStream {
        self.stream
    }
}

impl SessionOps for FdSessionOps {
    fn poll(&self, events: PollEvents, timeout: Option<Duration>) -> Result<bool> {
        poll_fd(self.stream.as_raw_fd(), events, timeout)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.stream.read(buf).map_err(Error::from)
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        self.stream.write(buf).map_err(Error::from)
    }

    fn flush(&mut self) -> Result<()> {
        self.stream.flush().map_err(Error::from)
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        match self.stream.shutdown(Shutdown::Both) {
            // The peer may already have torn the connection down
            Err(e) if e.kind() != io::ErrorKind::NotConnected => return Err(Error::from(e)),
            _ => {}
        }
        self.closed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;
    use std::thread;

    #[test]
    fn test_fd_session_ops() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            stream.write_all(b"Hello").unwrap();
        });

        let mut session = FdSessionOps::connect(addr, Duration::from_secs(1)).unwrap();

        // Poll for read
        assert!(session.poll(PollEvents::Read, Some(Duration::from_secs(1))).unwrap());

        // Read data
        let mut buf = [0u8; 5];
        let n = session.read(&mut buf).unwrap();
        assert_eq!(n, 5);
        assert_eq!(&buf, b"Hello");

        handle.join().unwrap();
    }

    #[test]
    fn test_poll_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = thread::spawn(move || {
            let (_stream, _) = listener.accept().unwrap();
            // Don't send anything
            thread::sleep(Duration::from_millis(500));
        });

        let session = FdSessionOps::new(TcpStream::connect(addr).unwrap());
        assert!(!session.poll(PollEvents::Read, Some(Duration::from_millis(100))).unwrap());

        handle.join().unwrap();
    }

    #[test]
    fn test_close_is_idempotent() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = thread::spawn(move || {
            let _ = listener.accept().unwrap();
        });

        let mut session = FdSessionOps::new(TcpStream::connect(addr).unwrap());
        session.close().unwrap();
        session.close().unwrap();

        handle.join().unwrap();
    }
}
