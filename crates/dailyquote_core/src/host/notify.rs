//! Transient user notices (toasts).
//!
//! Notices are informational; delivering them never affects core state.

use log::info;
use std::cell::RefCell;
use std::time::Duration;

/// Display time for every notice.
pub const NOTICE_DURATION: Duration = Duration::from_millis(2000);

/// Visual style of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeVariant {
    Default,
    Destructive,
}

/// User-facing feedback emitted by lifecycle actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    FavoriteAdded,
    FavoriteRemoved,
    Shared,
    CopiedToClipboard,
    ShareFailed,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Self::FavoriteAdded => "Added to favorites",
            Self::FavoriteRemoved => "Removed from favorites",
            Self::Shared => "Shared successfully",
            Self::CopiedToClipboard => "Quote copied to clipboard",
            Self::ShareFailed => "Unable to share quote",
        }
    }

    pub fn variant(self) -> NoticeVariant {
        match self {
            Self::ShareFailed => NoticeVariant::Destructive,
            _ => NoticeVariant::Default,
        }
    }

    pub fn duration(self) -> Duration {
        NOTICE_DURATION
    }

    /// Stable snake_case code used in logs and FFI envelopes.
    pub fn code(self) -> &'static str {
        match self {
            Self::FavoriteAdded => "favorite_added",
            Self::FavoriteRemoved => "favorite_removed",
            Self::Shared => "shared",
            Self::CopiedToClipboard => "copied_to_clipboard",
            Self::ShareFailed => "share_failed",
        }
    }
}

/// Delivers notices to the presentation layer.
pub trait Notifier {
    fn notify(&self, notice: Notice);
}

/// Writes notices to the log only; for headless hosts.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        info!("event=notice module=host status=ok code={}", notice.code());
    }
}

/// Collects notices in order for later inspection.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: RefCell<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }

    /// Removes and returns the collected notices.
    pub fn drain(&self) -> Vec<Notice> {
        self.notices.borrow_mut().drain(..).collect()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices.borrow().last().copied()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice)
    }
}
