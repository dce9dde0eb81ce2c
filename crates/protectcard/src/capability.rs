//! Optional device capabilities: clipboard, geolocation and share sheet.
//!
//! Each capability is injected as either [`Capability::Available`] with a
//! provider or [`Capability::Unavailable`]. Callers never probe the platform
//! themselves, so a missing capability can be exercised in tests like any
//! other input.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors reported by capability providers.
#[derive(Debug, Error)]
pub enum CapabilityError {
    /// The platform does not offer this capability.
    #[error("{0} is not supported on this device")]
    Unsupported(&'static str),

    /// The user or platform refused access.
    #[error("{0} permission denied")]
    Denied(&'static str),

    /// The capability was reachable but the operation failed.
    #[error("{capability} failed: {message}")]
    Failed {
        /// Which capability failed.
        capability: &'static str,
        /// Description of what went wrong.
        message: String,
    },

    /// The operation did not finish in time.
    #[error("timed out after {0:?}")]
    TimedOut(Duration),
}

impl CapabilityError {
    /// Create a failure for the named capability.
    #[must_use]
    pub fn failed(capability: &'static str, message: impl Into<String>) -> Self {
        Self::Failed {
            capability,
            message: message.into(),
        }
    }
}

/// Result type for capability operations.
pub type Result<T> = std::result::Result<T, CapabilityError>;

/// A geographic position fix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

/// What gets handed to the native share sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharePayload {
    /// Share sheet title.
    pub title: String,
    /// Accompanying text.
    pub text: String,
    /// The shared URL.
    pub url: String,
}

/// Writes text to the system clipboard.
#[async_trait::async_trait]
pub trait ClipboardWriter: Send + Sync {
    /// Replace the clipboard contents with `text`.
    async fn write_text(&self, text: &str) -> Result<()>;
}

/// Produces a single position fix.
#[async_trait::async_trait]
pub trait LocationProvider: Send + Sync {
    /// Request the current position. Implementations should give up after
    /// `timeout`; [`locate`] enforces it regardless.
    async fn current_position(&self, timeout: Duration) -> Result<Coordinates>;
}

/// Hands a payload to the platform share sheet.
#[async_trait::async_trait]
pub trait ShareSurface: Send + Sync {
    /// Open the share sheet. An error covers both failure and user dismissal.
    async fn share(&self, payload: &SharePayload) -> Result<()>;
}

/// An optional capability.
pub enum Capability<T> {
    /// The capability exists and is served by the given provider.
    Available(T),
    /// The capability does not exist on this device.
    Unavailable,
}

impl<T> Capability<T> {
    /// The provider, if available.
    pub fn provider(&self) -> Option<&T> {
        match self {
            Self::Available(provider) => Some(provider),
            Self::Unavailable => None,
        }
    }

    /// Whether the capability is available.
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

impl<T> fmt::Debug for Capability<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available(_) => write!(f, "Available"),
            Self::Unavailable => write!(f, "Unavailable"),
        }
    }
}

/// The full set of capabilities injected into a session.
#[derive(Debug)]
pub struct Capabilities {
    /// Clipboard writer.
    pub clipboard: Capability<Box<dyn ClipboardWriter>>,
    /// Geolocation.
    pub geolocation: Capability<Box<dyn LocationProvider>>,
    /// Native share sheet.
    pub share: Capability<Box<dyn ShareSurface>>,
    /// How long to wait for a position fix.
    pub geolocation_timeout: Duration,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::none()
    }
}

impl Capabilities {
    /// Default wait for a position fix.
    pub const DEFAULT_GEOLOCATION_TIMEOUT: Duration = Duration::from_secs(10);

    /// A device with no optional capabilities.
    #[must_use]
    pub fn none() -> Self {
        Self {
            clipboard: Capability::Unavailable,
            geolocation: Capability::Unavailable,
            share: Capability::Unavailable,
            geolocation_timeout: Self::DEFAULT_GEOLOCATION_TIMEOUT,
        }
    }

    /// Capabilities of a desktop terminal: the system clipboard only.
    #[must_use]
    pub fn desktop() -> Self {
        Self::none().with_clipboard(SystemClipboard)
    }

    /// Provide a clipboard.
    #[must_use]
    pub fn with_clipboard(mut self, clipboard: impl ClipboardWriter + 'static) -> Self {
        self.clipboard = Capability::Available(Box::new(clipboard));
        self
    }

    /// Provide geolocation.
    #[must_use]
    pub fn with_geolocation(mut self, provider: impl LocationProvider + 'static) -> Self {
        self.geolocation = Capability::Available(Box::new(provider));
        self
    }

    /// Provide a share sheet.
    #[must_use]
    pub fn with_share(mut self, surface: impl ShareSurface + 'static) -> Self {
        self.share = Capability::Available(Box::new(surface));
        self
    }

    /// Override the geolocation timeout.
    #[must_use]
    pub fn with_geolocation_timeout(mut self, timeout: Duration) -> Self {
        self.geolocation_timeout = timeout;
        self
    }

    /// Write `text` to the clipboard.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityError::Unsupported`] without a clipboard, or the
    /// provider's error.
    pub async fn copy_text(&self, text: &str) -> Result<()> {
        let clipboard = self
            .clipboard
            .provider()
            .ok_or(CapabilityError::Unsupported("clipboard"))?;
        clipboard.write_text(text).await
    }
}

/// Get a position fix, treating anything slower than `timeout` as failure.
///
/// # Errors
///
/// Returns the provider's error or [`CapabilityError::TimedOut`].
pub async fn locate(provider: &dyn LocationProvider, timeout: Duration) -> Result<Coordinates> {
    if let Ok(result) = tokio::time::timeout(timeout, provider.current_position(timeout)).await {
        result
    } else {
        warn!("Position fix timed out after {timeout:?}");
        Err(CapabilityError::TimedOut(timeout))
    }
}

/// The desktop clipboard, via `clipboard-rs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

#[async_trait::async_trait]
impl ClipboardWriter for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        use clipboard_rs::{Clipboard, ClipboardContext};

        let text = text.to_string();
        let len = text.len();
        tokio::task::spawn_blocking(move || {
            let ctx = ClipboardContext::new()
                .map_err(|e| CapabilityError::failed("clipboard", e.to_string()))?;
            ctx.set_text(text)
                .map_err(|e| CapabilityError::failed("clipboard", e.to_string()))
        })
        .await
        .map_err(|e| CapabilityError::failed("clipboard", e.to_string()))??;

        debug!("Copied {len} bytes to the system clipboard");
        Ok(())
    }
}
