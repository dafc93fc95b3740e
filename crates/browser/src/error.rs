//! Browser error types
//!
//! [`BrowserError`] covers WebDriver transport failures, protocol errors reported
//! by the driver, wait timeouts, and local driver-service failures.

use std::fmt;

use lifecheck_core::error::LifecheckError;

/// Which half of a two-phase element wait timed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitPhase {
    /// Waiting for the element to exist in the document.
    Present,
    /// Waiting for a located element to become visible.
    Visible,
}

impl fmt::Display for WaitPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Present => write!(f, "present"),
            Self::Visible => write!(f, "visible"),
        }
    }
}

/// Browser automation domain error.
#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    /// HTTP transport to the WebDriver server failed.
    #[error("webdriver http error: {0}")]
    Http(String),

    /// The WebDriver server answered with a protocol error.
    #[error("webdriver error '{error}': {message}")]
    Protocol {
        /// W3C error code, e.g. `no such window`
        error: String,
        /// Driver-supplied message
        message: String,
    },

    /// The driver answered with a body this client does not understand.
    #[error("unexpected webdriver response: {0}")]
    UnexpectedResponse(String),

    /// An element wait ran out of time.
    #[error("timed out after {timeout_ms}ms waiting for element to be {phase}: {locator}")]
    Timeout {
        /// Phase that timed out
        phase: WaitPhase,
        /// Locator being waited for
        locator: String,
        /// Phase timeout in milliseconds
        timeout_ms: u64,
    },

    /// The session was already closed.
    #[error("browser session is closed")]
    NoSession,

    /// The local driver service could not be started or stopped.
    #[error("driver service error: {0}")]
    Service(String),
}

impl From<reqwest::Error> for BrowserError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}

impl From<BrowserError> for LifecheckError {
    fn from(err: BrowserError) -> Self {
        LifecheckError::Browser(err.to_string())
    }
}
