//! Forwarding source
//!
//! [`ForwardingSource`] is the composition seam for stream decorators. It owns
//! one delegate for its whole life and forwards `read`, `timeout` and `close`
//! without buffering or transforming anything.

use super::{Error, Result, Source, Timeout};
use bytes::BytesMut;
use std::fmt;
use std::sync::Arc;

/// A source that forwards every call to one delegate
pub struct ForwardingSource<S> {
    delegate: S,
}

impl<S: Source> ForwardingSource<S> {
    /// Wrap `delegate`
    pub fn new(delegate: S) -> Self {
        ForwardingSource { delegate }
    }

    /// Wrap an optional delegate
    ///
    /// Fails with [`Error::InvalidArgument`] when there is nothing to forward to.
    pub fn try_new(delegate: Option<S>) -> Result<Self> {
        delegate
            .map(ForwardingSource::new)
            .ok_or_else(|| Error::InvalidArgument("delegate == None".to_string()))
    }

    /// Get a reference to the delegate
    pub fn delegate(&self) -> &S {
        &self.delegate
    }

    /// Get a mutable reference to the delegate
    pub fn delegate_mut(&mut self) -> &mut S {
        &mut self.delegate
    }

    /// Unwrap, returning the delegate
    pub fn into_inner(self) -> S {
        self.delegate
    }
}

impl<S: Source> Source for ForwardingSource<S> {
    fn read(&mut self, sink: &mut BytesMut, byte_count: usize) -> Result<Option<usize>> {
        self.delegate.read(sink, byte_count)
    }

    fn timeout(&self) -> Arc<Timeout> {
        self.delegate.timeout()
    }

    fn close(&mut self) -> Result<()> {
        self.delegate.close()
    }
}

impl<S: Source> fmt::Display for ForwardingSource<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ForwardingSource({})", self.delegate)
    }
}

impl<S: Source> fmt::Debug for ForwardingSource<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForwardingSource")
            .field("delegate", &self.delegate.to_string())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// In-memory source that records how often it was closed
    pub(crate) struct MemorySource {
        data: Vec<u8>,
        pos: usize,
        timeout: Arc<Timeout>,
        pub(crate) closes: Rc<Cell<usize>>,
        pub(crate) fail_close: bool,
    }

    impl MemorySource {
        pub(crate) fn new(data: &[u8]) -> Self {
            MemorySource {
                data: data.to_vec(),
                pos: 0,
                timeout: Timeout::new(),
                closes: Rc::new(Cell::new(0)),
                fail_close: false,
            }
        }
    }

    impl Source for MemorySource {
        fn read(&mut self, sink: &mut BytesMut, byte_count: usize) -> Result<Option<usize>> {
            if self.pos == self.data.len() {
                return Ok(None);
            }
            let end = self.data.len().min(self.pos + byte_count);
            sink.extend_from_slice(&self.data[self.pos..end]);
            let n = end - self.pos;
            self.pos = end;
            Ok(Some(n))
        }

        fn timeout(&self) -> Arc<Timeout> {
            Arc::clone(&self.timeout)
        }

        fn close(&mut self) -> Result<()> {
            self.closes.set(self.closes.get() + 1);
            if self.fail_close {
                return Err(Error::Io(std::io::Error::new(
                    std::io::ErrorKind::BrokenPipe,
                    "close failed",
                )));
            }
            Ok(())
        }
    }

    impl fmt::Display for MemorySource {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "MemorySource")
        }
    }

    #[test]
    fn test_read_is_forwarded() {
        let mut source = ForwardingSource::new(MemorySource::new(b"hello world"));
        let mut sink = BytesMut::new();

        assert_eq!(source.read(&mut sink, 5).unwrap(), Some(5));
        assert_eq!(source.read(&mut sink, 100).unwrap(), Some(6));
        assert_eq!(source.read(&mut sink, 100).unwrap(), None);
        assert_eq!(&sink[..], b"hello world");
    }

    #[test]
    fn test_close_is_forwarded_once() {
        let inner = MemorySource::new(b"");
        let closes = Rc::clone(&inner.closes);
        let mut source = ForwardingSource::new(inner);

        source.close().unwrap();
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn test_close_error_is_propagated() {
        let mut inner = MemorySource::new(b"");
        inner.fail_close = true;
        let mut source = ForwardingSource::new(inner);

        let err = source.close().unwrap_err();
        assert!(matches!(err, Error::Io(ref e) if e.kind() == std::io::ErrorKind::BrokenPipe));
    }

    #[test]
    fn test_timeout_is_shared_with_delegate() {
        let source = ForwardingSource::new(MemorySource::new(b""));
        assert!(Arc::ptr_eq(&source.timeout(), &source.delegate().timeout()));
    }

    #[test]
    fn test_missing_delegate_is_rejected() {
        let result = ForwardingSource::<MemorySource>::try_new(None);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));

        let result = ForwardingSource::try_new(Some(MemorySource::new(b"x")));
        assert!(result.is_ok());
    }

    #[test]
    fn test_description_is_nested() {
        let source = ForwardingSource::new(ForwardingSource::new(MemorySource::new(b"")));
        assert_eq!(
            source.to_string(),
            "ForwardingSource(ForwardingSource(MemorySource))"
        );
    }
}
