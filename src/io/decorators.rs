//! Stream decorators built on [`ForwardingSource`]

use super::{ForwardingSource, Result, Source, Timeout};
use bytes::BytesMut;
use std::fmt;
use std::sync::Arc;

/// Counts the bytes pulled through it
pub struct CountingSource<S> {
    inner: ForwardingSource<S>,
    bytes_read: u64,
}

impl<S: Source> CountingSource<S> {
    /// Wrap `delegate`
    pub fn new(delegate: S) -> Self {
        CountingSource {
            inner: ForwardingSource::new(delegate),
            bytes_read: 0,
        }
    }

    /// Total bytes read so far
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Get a reference to the delegate
    pub fn delegate(&self) -> &S {
        self.inner.delegate()
    }

    /// Unwrap, returning the delegate
    pub fn into_inner(self) -> S {
        self.inner.into_inner()
    }
}

impl<S: Source> Source for CountingSource<S> {
    fn read(&mut self, sink: &mut BytesMut, byte_count: usize) -> Result<Option<usize>> {
        let read = self.inner.read(sink, byte_count)?;
        if let Some(n) = read {
            self.bytes_read += n as u64;
        }
        Ok(read)
    }

    fn timeout(&self) -> Arc<Timeout> {
        self.inner.timeout()
    }

    fn close(&mut self) -> Result<()> {
        log::trace!("closing {} after {} bytes", self, self.bytes_read);
        self.inner.close()
    }
}

impl<S: Source> fmt::Display for CountingSource<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CountingSource({})", self.inner.delegate())
    }
}

/// Fails reads once the shared deadline has passed
///
/// The check runs before every forwarded read, so a deadline set on any
/// layer of the chain stops the next pull.
pub struct DeadlineSource<S> {
    inner: ForwardingSource<S>,
}

impl<S: Source> DeadlineSource<S> {
    /// Wrap `delegate`
    pub fn new(delegate: S) -> Self {
        DeadlineSource {
            inner: ForwardingSource::new(delegate),
        }
    }

    /// Get a reference to the delegate
    pub fn delegate(&self) -> &S {
        self.inner.delegate()
    }
}

impl<S: Source> Source for DeadlineSource<S> {
    fn read(&mut self, sink: &mut BytesMut, byte_count: usize) -> Result<Option<usize>> {
        self.inner.timeout().throw_if_reached()?;
        self.inner.read(sink, byte_count)
    }

    fn timeout(&self) -> Arc<Timeout> {
        self.inner.timeout()
    }

    fn close(&mut self) -> Result<()> {
        self.inner.close()
    }
}

impl<S: Source> fmt::Display for DeadlineSource<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeadlineSource({})", self.inner.delegate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::forward::tests::MemorySource;
    use crate::io::Error;
    use std::rc::Rc;
    use std::time::{Duration, Instant};

    #[test]
    fn test_counting_source() {
        let mut source = CountingSource::new(MemorySource::new(b"0123456789"));
        let mut sink = BytesMut::new();

        while source.read(&mut sink, 3).unwrap().is_some() {}

        assert_eq!(source.bytes_read(), 10);
        assert_eq!(sink.len(), 10);
    }

    #[test]
    fn test_counting_source_closes_delegate() {
        let inner = MemorySource::new(b"");
        let closes = Rc::clone(&inner.closes);
        let mut source = CountingSource::new(inner);

        source.close().unwrap();
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn test_deadline_source_stops_after_deadline() {
        let mut source = DeadlineSource::new(MemorySource::new(b"abc"));
        let mut sink = BytesMut::new();

        assert_eq!(source.read(&mut sink, 1).unwrap(), Some(1));

        // Set through the outer layer, observed through the delegate's timeout
        source
            .timeout()
            .set_deadline(Instant::now() - Duration::from_millis(1));

        assert!(matches!(source.read(&mut sink, 1), Err(Error::Timeout)));
        assert!(source.delegate().timeout().deadline().is_some());
    }

    #[test]
    fn test_stacked_description() {
        let source = CountingSource::new(DeadlineSource::new(MemorySource::new(b"")));
        assert_eq!(source.to_string(), "CountingSource(DeadlineSource(MemorySource))");
    }
}
