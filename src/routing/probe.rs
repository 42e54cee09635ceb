//! Controller existence probes.
//!
//! Convention routing never lists directories; it only asks whether a
//! controller or a sub-directory with a given name exists. Both questions
//! are relative to the directory accumulated so far (e.g. `Admin/`).

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Answers existence questions for convention routing.
pub trait ExistenceProbe: Send + Sync + std::fmt::Debug {
    /// Is there a controller named `name` inside `directory`?
    fn controller_exists(&self, directory: &str, name: &str) -> bool;

    /// Is there a sub-directory named `segment` inside `directory`?
    fn directory_exists(&self, directory: &str, segment: &str) -> bool;
}

/// A path component that stays inside its parent.
fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && name != "." && !name.contains("..") && !name.contains(['/', '\\'])
}

/// Filesystem-backed probe rooted at the controllers directory.
#[derive(Debug, Clone)]
pub struct FsProbe {
    root: PathBuf,
    extension: String,
}

impl FsProbe {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn join(&self, directory: &str) -> Option<PathBuf> {
        let mut path = self.root.clone();
        for part in directory.split('/').filter(|p| !p.is_empty()) {
            if !is_plain_name(part) {
                return None;
            }
            path.push(part);
        }
        Some(path)
    }
}

impl ExistenceProbe for FsProbe {
    fn controller_exists(&self, directory: &str, name: &str) -> bool {
        if !is_plain_name(name) {
            return false;
        }
        self.join(directory)
            .map(|dir| dir.join(format!("{}.{}", name, self.extension)).is_file())
            .unwrap_or(false)
    }

    fn directory_exists(&self, directory: &str, segment: &str) -> bool {
        if !is_plain_name(segment) {
            return false;
        }
        self.join(directory)
            .map(|dir| dir.join(segment).is_dir())
            .unwrap_or(false)
    }
}

/// In-memory probe over a fixed set of controller and directory paths.
///
/// Paths are written the way the router builds them: `Admin/Users` for a
/// controller, `Admin` or `Admin/Reports` for a directory.
#[derive(Debug, Clone, Default)]
pub struct MemoryProbe {
    controllers: HashSet<String>,
    directories: HashSet<String>,
}

impl MemoryProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_controller(mut self, path: &str) -> Self {
        self.controllers.insert(path.to_string());
        self
    }

    pub fn with_directory(mut self, path: &str) -> Self {
        self.directories.insert(path.trim_end_matches('/').to_string());
        self
    }
}

impl ExistenceProbe for MemoryProbe {
    fn controller_exists(&self, directory: &str, name: &str) -> bool {
        self.controllers.contains(&format!("{directory}{name}"))
    }

    fn directory_exists(&self, directory: &str, segment: &str) -> bool {
        self.directories.contains(&format!("{directory}{segment}"))
    }
}
