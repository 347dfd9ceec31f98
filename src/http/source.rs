//! Byte source over a session
//!
//! [`SessionSource`] is the leaf of a decorator chain: it pulls bytes from a
//! [`SessionOps`] implementation, waiting at most as long as the shared
//! [`Timeout`] allows.

use super::session::{PollEvents, SessionOps};
use crate::io::{self, Source, Timeout};
use bytes::BytesMut;
use std::fmt;
use std::sync::Arc;

/// Largest single read issued against the session
const MAX_READ_CHUNK: usize = 8192;

/// A [`Source`] reading from a session
pub struct SessionSource<S: SessionOps> {
    session: S,
    timeout: Arc<Timeout>,
    closed: bool,
}

impl<S: SessionOps> SessionSource<S> {
    /// Create a source with no timeout
    pub fn new(session: S) -> Self {
        SessionSource::with_timeout(session, Timeout::new())
    }

    /// Create a source sharing `timeout`
    pub fn with_timeout(session: S, timeout: Arc<Timeout>) -> Self {
        SessionSource {
            session,
            timeout,
            closed: false,
        }
    }

    /// Get a reference to the underlying session
    pub fn get_ref(&self) -> &S {
        &self.session
    }

    /// Get a mutable reference to the underlying session
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.session
    }
}

impl<S: SessionOps> Source for SessionSource<S> {
    fn read(&mut self, sink: &mut BytesMut, byte_count: usize) -> io::Result<Option<usize>> {
        if byte_count == 0 {
            return Ok(Some(0));
        }

        self.timeout.throw_if_reached()?;
        if !self.session.poll(PollEvents::Read, self.timeout.remaining())? {
            return Err(io::Error::Timeout);
        }

        let start = sink.len();
        let chunk = byte_count.min(MAX_READ_CHUNK);
        sink.resize(start + chunk, 0);

        let n = match self.session.read(&mut sink[start..]) {
            Ok(n) => n,
            Err(e) => {
                sink.truncate(start);
                return Err(e.into());
            }
        };
        sink.truncate(start + n);

        Ok(if n == 0 { None } else { Some(n) })
    }

    fn timeout(&self) -> Arc<Timeout> {
        Arc::clone(&self.timeout)
    }

    fn close(&mut self) -> io::Result<()> {
        if self.closed {
            return Ok(());
        }
        log::debug!("closing {}", self);
        self.session.close()?;
        self.closed = true;
        Ok(())
    }
}

impl<S: SessionOps> fmt::Display for SessionSource<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = std::any::type_name::<S>();
        let session = session.rsplit("::").next().unwrap_or(session);
        write!(f, "SessionSource({})", session)
    }
}
