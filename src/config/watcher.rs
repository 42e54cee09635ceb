//! Route configuration hot reload.
//!
//! Editors often save by writing a sibling file and renaming it over the
//! original, which replaces the inode a file watch would be attached to.
//! The watch is therefore placed on the containing directory and events
//! are filtered down to the configuration file's name.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::event::{ModifyKind, RenameMode};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::RouterConfig;

/// Watches a route config file and sends every successfully parsed
/// version through a channel.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<RouterConfig>,
}

/// Whether `event` leaves a new version of the file called `name` behind.
fn replaces_file(event: &Event, name: &OsStr) -> bool {
    let relevant = match event.kind {
        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => false,
        EventKind::Create(_) | EventKind::Modify(_) => true,
        _ => false,
    };
    relevant && event.paths.iter().any(|p| p.file_name() == Some(name))
}

impl ConfigWatcher {
    /// Returns the watcher and the receiving end for reloaded configs.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<RouterConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let watcher = Self {
            path: path.to_path_buf(),
            update_tx,
        };
        (watcher, update_rx)
    }

    fn watched_dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }

    /// Start watching in a background thread.
    ///
    /// Dropping the returned watcher stops updates.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let name: OsString = self
            .path
            .file_name()
            .map(OsStr::to_os_string)
            .ok_or_else(|| notify::Error::generic("config path has no file name"))?;
        let dir = self.watched_dir().to_path_buf();
        let tx = self.update_tx;
        let path = self.path;

        let handler = {
            let path = path.clone();
            move |res: notify::Result<Event>| match res {
                Ok(event) if replaces_file(&event, &name) => {
                    tracing::info!(path = ?path, kind = ?event.kind, "Route config changed, reloading");
                    match load_config(&path) {
                        Ok(config) => {
                            let _ = tx.send(config);
                        }
                        Err(e) => tracing::warn!(
                            error = %e,
                            "Failed to reload route config, keeping current routes"
                        ),
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = ?e, "Config watch error"),
            }
        };

        let mut watcher =
            RecommendedWatcher::new(handler, Config::default().with_poll_interval(Duration::from_secs(2)))?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?path, dir = ?dir, "Config watcher started");
        Ok(watcher)
    }
}
