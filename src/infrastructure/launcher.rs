use crate::domain::{ShopError, ShopResult};
use std::process::{Command, Stdio};
use tracing::info;
use url::Url;

/// Opens a link in a new navigation context. Fire-and-forget.
pub trait LinkOpener {
    fn open(&self, url: &Url) -> ShopResult<()>;
}

/// Hands links to the platform's default URL handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener;

impl SystemOpener {
    fn command(url: &str) -> Command {
        if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", ""]).arg(url);
            cmd
        } else if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(url);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(url);
            cmd
        }
    }
}

impl LinkOpener for SystemOpener {
    fn open(&self, url: &Url) -> ShopResult<()> {
        Self::command(url.as_str())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| ShopError::Opener(e.to_string()))?;
        info!(host = url.host_str().unwrap_or_default(), "opened link");
        Ok(())
    }
}

/// Destination for copied text.
pub trait ClipboardSink {
    fn copy(&mut self, text: &str) -> ShopResult<()>;
}

/// System clipboard via `arboard`, connected lazily on first copy.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl ClipboardSink for SystemClipboard {
    fn copy(&mut self, text: &str) -> ShopResult<()> {
        if self.inner.is_none() {
            let clipboard =
                arboard::Clipboard::new().map_err(|e| ShopError::Clipboard(e.to_string()))?;
            self.inner = Some(clipboard);
        }
        match self.inner.as_mut() {
            Some(clipboard) => clipboard
                .set_text(text.to_string())
                .map_err(|e| ShopError::Clipboard(e.to_string())),
            None => Err(ShopError::Clipboard("not connected".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_opener_targets_platform_handler() {
        let cmd = SystemOpener::command("https://wa.me/1");
        let program = cmd.get_program().to_string_lossy().into_owned();
        assert!(["cmd", "open", "xdg-open"].contains(&program.as_str()));
        assert!(cmd.get_args().any(|arg| arg == "https://wa.me/1"));
    }
}
