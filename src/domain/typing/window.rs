//! Window identity value object

use std::fmt;

/// Opaque identifier of an OS window.
/// Only equality is meaningful; the representation depends on the
/// focus probe that produced it (an X11 window id, a Win32 handle, a
/// fixed token on platforms without a focus query).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WindowId(String);

impl WindowId {
    /// Create a window identity from a probe-specific representation
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_by_representation() {
        assert_eq!(WindowId::new("0x3a00007"), WindowId::new("0x3a00007"));
        assert_ne!(WindowId::new("0x3a00007"), WindowId::new("0x4200001"));
    }

    #[test]
    fn display() {
        assert_eq!(WindowId::new("12345").to_string(), "12345");
    }
}
