//! Codec configuration.

use crate::format::HeaderFormat;

/// Compression parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HuffConfig {
    /// How the tree is stored in the header.
    pub format: HeaderFormat,
    /// Compress even when the output would not be smaller than the input.
    pub force: bool,
}

impl HuffConfig {
    /// Store the 256 symbol counts; the decoder rebuilds the tree.
    ///
    /// Fixed 8256-bit header, so only worthwhile for larger inputs.
    pub const COUNTS: Self = Self {
        format: HeaderFormat::Counts,
        force: false,
    };

    /// Store the tree shape directly.
    ///
    /// Header costs one bit per internal node and ten bits per leaf.
    pub const TREE: Self = Self {
        format: HeaderFormat::Tree,
        force: false,
    };

    /// Create a configuration for the given header format.
    pub fn new(format: HeaderFormat) -> Self {
        Self {
            format,
            force: false,
        }
    }

    /// Set whether compression proceeds without any savings.
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}
