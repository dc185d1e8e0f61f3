use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Viewer state that survives restarts: who is looking at the book and
/// which group they had open last.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Session {
    pub viewer: String,
    pub last_group_id: Option<String>,
}

impl Session {
    pub fn load(path: &str) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let parent = Path::new(path).parent();
        if let Some(parent) = parent {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(self)?;
        fs::write(path, payload)?;
        Ok(())
    }
}

/// Seam for ending the viewer session. The app only ever talks to this
/// trait, so tests can swap in a stub and the file-backed store stays
/// out of the key-handling code.
pub trait AuthProvider {
    fn logout(&mut self) -> Result<()>;
}

/// File-backed provider: logging out deletes the persisted session.
pub struct SessionAuth {
    path: String,
}

impl SessionAuth {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl AuthProvider for SessionAuth {
    fn logout(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
