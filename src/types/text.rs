//! Fixed-width character runs

use std::borrow::Cow;
use std::fmt;

/// Fixed-width byte run stored verbatim on the wire
///
/// The format does not guarantee a NUL inside the run, so text is
/// materialized up to the first NUL or the full width, whichever comes first.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedText<const N: usize>([u8; N]);

impl<const N: usize> FixedText<N> {
    /// Width in bytes
    pub const WIDTH: usize = N;

    /// Build from text, NUL-padding to the full width
    ///
    /// Returns `None` if `text` is longer than `N` bytes.
    pub fn from_text(text: &str) -> Option<Self> {
        let bytes = text.as_bytes();
        if bytes.len() > N {
            return None;
        }
        let mut buf = [0u8; N];
        buf[..bytes.len()].copy_from_slice(bytes);
        Some(Self(buf))
    }

    /// Build from exactly `N` raw bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let buf: [u8; N] = bytes.try_into().ok()?;
        Some(Self(buf))
    }

    pub fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }

    /// Text up to the first NUL, lossily decoded
    pub fn to_text(&self) -> Cow<'_, str> {
        let end = self.0.iter().position(|&b| b == 0).unwrap_or(N);
        String::from_utf8_lossy(&self.0[..end])
    }
}

impl<const N: usize> Default for FixedText<N> {
    fn default() -> Self {
        Self([0u8; N])
    }
}

impl<const N: usize> fmt::Debug for FixedText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FixedText").field(&self.to_text()).finish()
    }
}

impl<const N: usize> fmt::Display for FixedText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
