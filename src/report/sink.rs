//! In-memory report sink.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// A cloneable `Write` sink that keeps everything written to it.
///
/// Clones share one buffer, so a test can hand one clone to a
/// [`Reporter`](super::Reporter) and read the text back from another.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, decoded lossily.
    pub fn contents(&self) -> String {
        let buffer = self.buffer.lock().unwrap_or_else(|e| e.into_inner());
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Written text split into lines.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(String::from).collect()
    }
}

impl Write for MemorySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut buffer = self.buffer.lock().unwrap_or_else(|e| e.into_inner());
        buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
