//! Caller-supplied settings for read and write

/// Settings passed explicitly into the read/write entry points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Emit one `debug` event per field with its raw hex and interpreted value
    pub diagnostics: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self { diagnostics: true }
    }
}

impl Options {
    /// Options with per-field diagnostics turned off
    pub fn quiet() -> Self {
        Self { diagnostics: false }
    }
}
