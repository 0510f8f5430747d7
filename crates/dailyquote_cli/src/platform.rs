//! Terminal implementations of the host seams.

use dailyquote_core::{Notice, NoticeVariant, Notifier, ShareError, SharePlatform, ShareRequest};
use std::io::Write;
use std::process::{Command, Stdio};

#[cfg(target_os = "macos")]
const CLIPBOARD_TOOLS: &[(&str, &[&str])] = &[("pbcopy", &[])];
#[cfg(target_os = "windows")]
const CLIPBOARD_TOOLS: &[(&str, &[&str])] = &[("clip", &[])];
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const CLIPBOARD_TOOLS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

/// Copies share text with the first working platform clipboard tool.
///
/// Terminals have no share sheet, so every share falls back to the
/// clipboard.
pub struct ClipboardPlatform;

impl SharePlatform for ClipboardPlatform {
    fn supports_native_share(&self) -> bool {
        false
    }

    fn share(&self, _request: &ShareRequest) -> Result<(), ShareError> {
        Err(ShareError::Unavailable(
            "terminal has no native share sheet".to_string(),
        ))
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<(), ShareError> {
        let mut last_error = String::from("no clipboard tool configured");
        for (program, args) in CLIPBOARD_TOOLS {
            match pipe_to(program, args, text) {
                Ok(()) => return Ok(()),
                Err(err) => last_error = format!("{program}: {err}"),
            }
        }
        Err(ShareError::Unavailable(last_error))
    }
}

fn pipe_to(program: &str, args: &[&str], text: &str) -> std::io::Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    // stdin is dropped before waiting so the tool sees EOF.
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(text.as_bytes()),
        None => Ok(()),
    };
    let status = child.wait()?;
    written?;
    if status.success() {
        Ok(())
    } else {
        Err(std::io::Error::other(format!("exited with {status}")))
    }
}

/// Prints notices to stderr; silent in machine-readable mode.
pub struct TerminalNotifier {
    enabled: bool,
}

impl TerminalNotifier {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: Notice) {
        log::info!("event=notice module=cli status=ok code={}", notice.code());
        if !self.enabled {
            return;
        }
        match notice.variant() {
            NoticeVariant::Default => eprintln!("{}", notice.message()),
            NoticeVariant::Destructive => eprintln!("error: {}", notice.message()),
        }
    }
}
