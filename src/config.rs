//! Session configuration
//!
//! All fields have defaults, so a configuration file only needs to name the
//! values it overrides.

use crate::error::{MinimatError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Default prompt written before each read.
pub const DEFAULT_PROMPT: &str = "minimat> ";

/// Configuration for a calculator session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimatConfig {
    /// Prompt written before each input line
    pub prompt: String,
    /// Store capacity reserved on first insert (doubles when exceeded)
    pub initial_capacity: usize,
    /// Maximum vector name length in characters
    pub max_name_len: usize,
    /// Maximum CSV path length; `.csv` is not appended past this bound
    pub max_path_len: usize,
}

impl Default for MinimatConfig {
    fn default() -> Self {
        MinimatConfig {
            prompt: DEFAULT_PROMPT.to_string(),
            initial_capacity: 4,
            max_name_len: 9,
            max_path_len: 255,
        }
    }
}

impl MinimatConfig {
    /// Read a JSON configuration file
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use minimat::MinimatConfig;
    ///
    /// let config = MinimatConfig::from_json_file("minimat.json").unwrap();
    /// println!("prompt: {}", config.prompt);
    /// ```
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| MinimatError::config(path, e))?;
        let config: MinimatConfig = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| MinimatError::config(path, e))?;
        Ok(config.sanitized())
    }

    fn sanitized(mut self) -> Self {
        self.initial_capacity = self.initial_capacity.max(1);
        self.max_name_len = self.max_name_len.max(1);
        self
    }
}
