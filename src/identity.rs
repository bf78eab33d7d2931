use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct CurrentUser {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl CurrentUser {
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.email,
        }
    }
}

// no automatic sign-in; the active identity changes only through
// explicit login and logout
pub trait IdentityProvider {
    fn current(&self) -> Option<CurrentUser>;
    fn login(&self, user: &CurrentUser) -> Result<(), String>;
    fn logout(&self) -> Result<(), String>;
}

pub struct FileIdentity {
    path: PathBuf,
}

impl FileIdentity {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl IdentityProvider for FileIdentity {
    fn current(&self) -> Option<CurrentUser> {
        let contents = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    fn login(&self, user: &CurrentUser) -> Result<(), String> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| format!("invalid identity path '{}'", self.path.display()))?;
        fs::create_dir_all(parent)
            .map_err(|e| format!("failed to create directory '{}': {e}", parent.display()))?;
        let contents = serde_json::to_string_pretty(user)
            .map_err(|e| format!("failed to encode identity: {e}"))?;
        fs::write(&self.path, contents)
            .map_err(|e| format!("failed to write '{}': {e}", self.path.display()))
    }

    fn logout(&self) -> Result<(), String> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(format!("failed to remove '{}': {e}", self.path.display())),
        }
    }
}
