//! Shared runtime directory
//!
//! All coordination with panel processes happens through flat files
//! under one directory (`~/.quill` by default). There is no locking;
//! safety rests on single-writer-per-artifact conventions (the editor
//! session writes context, signals and overrides; panels write
//! results and preview state) and on treating every read as the full
//! current value. A read that fails to parse counts as "no data yet",
//! never as an error.

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Handle to the shared runtime directory
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Open (creating if needed) the runtime directory
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Default runtime directory: `~/.quill`
    pub fn default_root() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".quill")
    }

    /// Root directory of the workspace
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of a named artifact
    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Whether an artifact currently exists
    pub fn exists(&self, name: &str) -> bool {
        self.path(name).exists()
    }

    /// Write an artifact through a temp file + rename so readers never
    /// observe a partial write. The protocol tolerates torn reads
    /// anyway; this just narrows the window.
    pub fn write_atomic(&self, name: &str, contents: &str) -> Result<()> {
        let tmp = self.root.join(format!(".{}.tmp", name));
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, self.path(name))?;
        Ok(())
    }

    /// Serialize a record to JSON and write it atomically
    pub fn write_json<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.write_atomic(name, &json)
    }

    /// Read an artifact as a string; absent or unreadable means None
    pub fn read_string(&self, name: &str) -> Option<String> {
        fs::read_to_string(self.path(name)).ok()
    }

    /// Read and parse a JSON artifact; absent or malformed means None
    pub fn read_json<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        let contents = self.read_string(name)?;
        match serde_json::from_str(&contents) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!("Treating malformed artifact {} as absent: {}", name, e);
                None
            }
        }
    }

    /// Best-effort removal of an artifact
    pub fn remove(&self, name: &str) {
        let _ = fs::remove_file(self.path(name));
    }
}
