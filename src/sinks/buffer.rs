//! In-memory sink that can be read back while a collector owns a clone

use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

/// Cloneable byte buffer; every clone appends to the same storage.
///
/// # Example
///
/// ```
/// use relay_logger::SharedBuffer;
/// use std::io::Write;
///
/// let buffer = SharedBuffer::new();
/// let mut writer = buffer.clone();
/// writer.write_all(b"hello\n").unwrap();
/// assert_eq!(buffer.contents(), "hello\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffered bytes as text, with invalid UTF-8 replaced.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock()).into_owned()
    }

    /// Return the contents and clear the buffer.
    pub fn take(&self) -> String {
        let bytes = std::mem::take(&mut *self.bytes.lock());
        String::from_utf8_lossy(&bytes).into_owned()
    }

    pub fn clear(&self) {
        self.bytes.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.bytes.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.lock().is_empty()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_storage() {
        let buffer = SharedBuffer::new();
        let mut a = buffer.clone();
        let mut b = buffer.clone();

        a.write_all(b"one ").unwrap();
        b.write_all(b"two").unwrap();

        assert_eq!(buffer.contents(), "one two");
        assert_eq!(buffer.len(), 7);
    }

    #[test]
    fn test_take_clears() {
        let buffer = SharedBuffer::new();
        buffer.clone().write_all(b"line\n").unwrap();

        assert_eq!(buffer.take(), "line\n");
        assert!(buffer.is_empty());
        assert_eq!(buffer.take(), "");
    }
}
