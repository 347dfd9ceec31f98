//! Composable pull-based byte sources
//!
//! This module provides the streaming seam used by the transport layer once a
//! socket has been configured. A [`Source`] is pulled with [`Source::read`],
//! shares its [`Timeout`] with every decorator layered on top of it and is
//! released with [`Source::close`].
//!
//! # Architecture
//!
//! Decorators are built by composition rather than inheritance:
//!
//! - [`ForwardingSource`] holds exactly one delegate and forwards every call
//! - [`CountingSource`] and [`DeadlineSource`] wrap a `ForwardingSource` and
//!   add behaviour around the forwarded `read`
//! - [`crate::http::SessionSource`] adapts any session into a `Source`
//!
//! # Examples
//!
//! ```no_run
//! use accord::http::{FdSessionOps, SessionSource};
//! use accord::io::{CountingSource, Source};
//! use bytes::BytesMut;
//! use std::net::TcpStream;
//!
//! let stream = TcpStream::connect("127.0.0.1:8080").unwrap();
//! let mut source = CountingSource::new(SessionSource::new(FdSessionOps::new(stream)));
//!
//! let mut sink = BytesMut::new();
//! while let Some(_) = source.read(&mut sink, 4096).unwrap() {}
//! source.close().unwrap();
//! println!("{} read {} bytes", source, source.bytes_read());
//! ```

pub mod decorators;
pub mod forward;
pub mod timeout;

pub use decorators::{CountingSource, DeadlineSource};
pub use forward::ForwardingSource;
pub use timeout::Timeout;

use bytes::BytesMut;
use std::fmt;
use std::sync::Arc;

/// Result type for stream operations
pub type Result<T> = std::result::Result<T, Error>;

/// Stream operation errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Timeout")]
    Timeout,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session error: {0}")]
    Session(#[from] crate::http::Error),
}

/// A pull-based source of bytes
///
/// The `Display` implementation is the source's description. Decorators
/// render as `Name(<delegate description>)` so a chain can be inspected
/// end-to-end.
pub trait Source: fmt::Display {
    /// Read up to `byte_count` bytes, appending them to `sink`
    ///
    /// Returns `Ok(None)` once the source is exhausted.
    fn read(&mut self, sink: &mut BytesMut, byte_count: usize) -> Result<Option<usize>>;

    /// The timeout shared by this source and everything it wraps
    fn timeout(&self) -> Arc<Timeout>;

    /// Release the resources held by this source
    fn close(&mut self) -> Result<()>;
}

impl<S: Source + ?Sized> Source for Box<S> {
    fn read(&mut self, sink: &mut BytesMut, byte_count: usize) -> Result<Option<usize>> {
        (**self).read(sink, byte_count)
    }

    fn timeout(&self) -> Arc<Timeout> {
        (**self).timeout()
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}
