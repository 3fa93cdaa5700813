//! Clipboard access.
//!
//! The system clipboard is opened lazily on first use so that headless test
//! runs never touch the display server.
//!
//! On X11 and Wayland the clipboard contents are served by the process that
//! set them and vanish when it exits. Since a copy ends the session, Linux
//! copies are handed to a detached `ghscout --serve-clipboard` helper that
//! keeps serving the text until another program takes the clipboard over.
//! The helper dies with the terminal if it receives a hangup first.

use crate::model::ClipboardError;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// Hidden command-line flag that turns the binary into a clipboard server.
pub const SERVE_CLIPBOARD_FLAG: &str = "--serve-clipboard";

/// Somewhere a URL can be copied to.
pub trait Clipboard {
    /// Replace the clipboard contents with `text`.
    ///
    /// # Errors
    ///
    /// Returns `ClipboardError` if the clipboard is unavailable or rejects
    /// the write.
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The desktop clipboard, via `arboard`.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl std::fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemClipboard")
            .field("opened", &self.inner.is_some())
            .finish()
    }
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let clipboard = match self.inner.as_mut() {
            Some(clipboard) => clipboard,
            None => {
                let opened =
                    arboard::Clipboard::new().map_err(|e| ClipboardError(e.to_string()))?;
                debug!("System clipboard opened");
                self.inner.insert(opened)
            }
        };
        clipboard
            .set_text(text.to_owned())
            .map_err(|e| ClipboardError(e.to_string()))?;
        hand_off(text);
        Ok(())
    }
}

#[cfg(target_os = "linux")]
fn hand_off(text: &str) {
    if let Err(err) = spawn_server(text) {
        tracing::warn!(error = %err, "Clipboard helper not started; contents last until exit");
    }
}

#[cfg(not(target_os = "linux"))]
fn hand_off(_text: &str) {}

/// Command that runs the current binary as a clipboard server reading the
/// text from stdin.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn server_command(exe: &Path) -> Command {
    let mut command = Command::new(exe);
    command
        .arg(SERVE_CLIPBOARD_FLAG)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    command
}

#[cfg(target_os = "linux")]
fn spawn_server(text: &str) -> std::io::Result<()> {
    use std::io::Write;

    // Never waited on: the helper is meant to outlive this process.
    let exe = std::env::current_exe()?;
    let mut child = server_command(&exe).spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes())?;
    }
    debug!(pid = child.id(), "Clipboard helper started");
    Ok(())
}

/// Set `text` and keep serving it until another program owns the
/// clipboard. Blocks; this is the body of the clipboard helper process.
///
/// # Errors
///
/// Returns `ClipboardError` if the clipboard cannot be opened or written.
pub fn serve_until_replaced(text: &str) -> Result<(), ClipboardError> {
    let mut clipboard = arboard::Clipboard::new().map_err(|e| ClipboardError(e.to_string()))?;

    #[cfg(target_os = "linux")]
    let served = {
        use arboard::SetExtLinux;
        clipboard.set().wait().text(text.to_owned())
    };
    #[cfg(not(target_os = "linux"))]
    let served = clipboard.set_text(text.to_owned());

    served.map_err(|e| ClipboardError(e.to_string()))
}

/// In-memory clipboard recording every write. Optionally refuses writes.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    copied: Vec<String>,
    refuse: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard whose every write fails.
    pub fn unavailable() -> Self {
        Self {
            copied: Vec::new(),
            refuse: true,
        }
    }

    /// Everything written so far, oldest first.
    pub fn copied(&self) -> &[String] {
        &self.copied
    }

    pub fn last(&self) -> Option<&str> {
        self.copied.last().map(String::as_str)
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.refuse {
            return Err(ClipboardError("clipboard unavailable".to_string()));
        }
        self.copied.push(text.to_owned());
        Ok(())
    }
}
