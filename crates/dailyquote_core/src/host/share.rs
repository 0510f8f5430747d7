//! Share and clipboard facility of the host platform.

use std::cell::RefCell;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Title passed to native share sheets.
pub const SHARE_TITLE: &str = "Inspiring Quote";

/// Payload handed to a native share facility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRequest {
    pub title: String,
    pub text: String,
}

impl ShareRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            title: SHARE_TITLE.to_string(),
            text: text.into(),
        }
    }
}

/// Failure reported by the host share or clipboard facility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareError {
    Cancelled,
    Unavailable(String),
    Failed(String),
}

impl Display for ShareError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cancelled => write!(f, "share cancelled by user"),
            Self::Unavailable(message) => write!(f, "share facility unavailable: {message}"),
            Self::Failed(message) => write!(f, "share failed: {message}"),
        }
    }
}

impl Error for ShareError {}

/// Host share facility plus clipboard fallback.
///
/// Calls block until the host resolves them.
pub trait SharePlatform {
    /// Whether a native share sheet exists on this host.
    fn supports_native_share(&self) -> bool;
    fn share(&self, request: &ShareRequest) -> Result<(), ShareError>;
    fn copy_to_clipboard(&self, text: &str) -> Result<(), ShareError>;
}

impl<P: SharePlatform + ?Sized> SharePlatform for &P {
    fn supports_native_share(&self) -> bool {
        (**self).supports_native_share()
    }

    fn share(&self, request: &ShareRequest) -> Result<(), ShareError> {
        (**self).share(request)
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<(), ShareError> {
        (**self).copy_to_clipboard(text)
    }
}

/// Captures share and clipboard payloads instead of delivering them.
///
/// Used where the real delivery happens on the other side of a boundary
/// (the FFI host) and by tests.
#[derive(Debug, Default)]
pub struct CapturingSharePlatform {
    native_share: bool,
    fail_with: Option<ShareError>,
    shared: RefCell<Vec<ShareRequest>>,
    clipboard: RefCell<Option<String>>,
}

impl CapturingSharePlatform {
    /// Host without a native share sheet.
    pub fn clipboard_only() -> Self {
        Self::default()
    }

    /// Host with a native share sheet.
    pub fn with_native_share() -> Self {
        Self {
            native_share: true,
            ..Self::default()
        }
    }

    /// Makes every share and clipboard call fail with `error`.
    pub fn failing(mut self, error: ShareError) -> Self {
        self.fail_with = Some(error);
        self
    }

    pub fn shared(&self) -> Vec<ShareRequest> {
        self.shared.borrow().clone()
    }

    pub fn clipboard(&self) -> Option<String> {
        self.clipboard.borrow().clone()
    }
}

impl SharePlatform for CapturingSharePlatform {
    fn supports_native_share(&self) -> bool {
        self.native_share
    }

    fn share(&self, request: &ShareRequest) -> Result<(), ShareError> {
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        self.shared.borrow_mut().push(request.clone());
        Ok(())
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<(), ShareError> {
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        *self.clipboard.borrow_mut() = Some(text.to_string());
        Ok(())
    }
}
