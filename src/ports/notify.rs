//! User-facing notification port.
//!
//! Mutation failures must reach the user without disrupting the rest of
//! the board, so the coordinator reports them here instead of returning
//! them up through rendering paths.

use std::fmt;

/// How loudly a notice should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational, no action needed.
    Info,
    /// Something diverged but the board recovered.
    Warning,
    /// A mutation failed and was rolled back.
    Error,
}

/// A non-blocking, user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Presentation severity.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
}

impl Notice {
    /// An informational notice.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self { severity: Severity::Info, message: message.into() }
    }

    /// A warning notice.
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self { severity: Severity::Warning, message: message.into() }
    }

    /// An error notice.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self { severity: Severity::Error, message: message.into() }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.severity {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{prefix}: {}", self.message)
    }
}

/// Presents notices to the user. Implementations must not block.
pub trait Notifier: Send + Sync {
    /// Delivers one notice.
    fn notify(&self, notice: Notice);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_severity() {
        let notice = Notice::error("could not save");
        assert_eq!(notice.to_string(), "error: could not save");
        assert_eq!(Notice::warning("diverged").to_string(), "warning: diverged");
    }
}
