use std::io;
use std::path::PathBuf;
use std::process::Command;

use rustpad_core::Host;
use rustpad_settings::FileFilter;
use tracing::{info, warn};

/// Native dialogs, the system clipboard and process spawning.
pub struct GuiHost {
    clipboard: Option<arboard::Clipboard>,
    launch_args: Vec<String>,
}

impl GuiHost {
    /// `launch_args` are forwarded to windows opened with File > New Window.
    pub fn new(launch_args: Vec<String>) -> Self {
        Self {
            clipboard: None,
            launch_args,
        }
    }

    fn clipboard(&mut self) -> Option<&mut arboard::Clipboard> {
        if self.clipboard.is_none() {
            match arboard::Clipboard::new() {
                Ok(clipboard) => self.clipboard = Some(clipboard),
                Err(err) => warn!(%err, "system clipboard unavailable"),
            }
        }
        self.clipboard.as_mut()
    }
}

fn dialog(filters: &[FileFilter]) -> rfd::FileDialog {
    filters
        .iter()
        .fold(rfd::FileDialog::new(), |dialog, filter| {
            dialog.add_filter(filter.name, filter.extensions)
        })
}

impl Host for GuiHost {
    fn pick_open_path(&mut self, filters: &[FileFilter]) -> Option<PathBuf> {
        dialog(filters).pick_file()
    }

    fn pick_save_path(&mut self, filters: &[FileFilter], default_name: &str) -> Option<PathBuf> {
        dialog(filters).set_file_name(default_name).save_file()
    }

    fn spawn_window(&mut self) -> io::Result<()> {
        let exe = std::env::current_exe()?;
        let child = Command::new(exe).args(&self.launch_args).spawn()?;
        info!(pid = child.id(), "spawned new window");
        Ok(())
    }

    fn clipboard_text(&mut self) -> Option<String> {
        let clipboard = self.clipboard()?;
        match clipboard.get_text() {
            Ok(text) => Some(text),
            Err(err) => {
                warn!(%err, "could not read the clipboard");
                None
            }
        }
    }

    fn set_clipboard_text(&mut self, text: String) {
        if let Some(clipboard) = self.clipboard() {
            if let Err(err) = clipboard.set_text(text) {
                warn!(%err, "could not write the clipboard");
            }
        }
    }
}
