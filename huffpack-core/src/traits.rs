//! Core traits shared by the codec and its callers.

/// Receives human-readable status strings while a file is processed.
///
/// Observers are purely informational: the codec never inspects what an
/// observer does with a message, and an observer cannot alter control flow.
pub trait StatusObserver {
    /// Called with a status line such as `"building Huffman tree"`.
    fn update(&mut self, status: &str);
}

impl<F: FnMut(&str)> StatusObserver for F {
    fn update(&mut self, status: &str) {
        self(status)
    }
}

/// Observer that discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl StatusObserver for NullObserver {
    fn update(&mut self, _status: &str) {}
}
