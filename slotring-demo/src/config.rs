/*
 * @file config.rs
 * @brief Demo configuration loading
 * @author Kevin Thomas
 * @date 2025
 *
 *
 * MIT License
 *
 * Copyright (c) 2025 Kevin Thomas
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! Demo configuration loaded from JSON with built-in fallbacks.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "SLOTRING_DEMO_CONFIG";

/// Configuration file used when `CONFIG_ENV` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "slotring-demo.json";

/// Parameters for one demo run.
///
/// # Details
/// Every field is optional in the JSON file; missing fields take the
/// values from [`DemoConfig::default`].
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DemoConfig {
    /// Fifo slot count; one slot always stays free.
    pub capacity: usize,
    /// Bytes the producer sends each round.
    pub message: String,
    /// How many times the message is sent.
    pub rounds: usize,
    /// Drop bytes on overflow instead of waiting for space.
    pub drop_on_full: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            capacity: 16,
            message: "Hello from the producer\r\n".to_string(),
            rounds: 8,
            drop_on_full: false,
        }
    }
}

/// Resolves the configuration file path.
///
/// # Returns
/// * `PathBuf` - `$SLOTRING_DEMO_CONFIG` if set, else `slotring-demo.json`
pub fn config_path() -> PathBuf {
    env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Loads the demo configuration.
///
/// # Details
/// Falls back to the defaults, with a warning, when the file is missing
/// or cannot be parsed.
///
/// # Arguments
/// * `path` - JSON configuration file
///
/// # Returns
/// * `DemoConfig` - Loaded or default configuration
pub fn load_config(path: &Path) -> DemoConfig {
    load_config_from_file(path).unwrap_or_else(|err| {
        eprintln!(
            "Warning: Failed to load {}: {:#}. Using default settings.",
            path.display(),
            err
        );
        DemoConfig::default()
    })
}

fn load_config_from_file(path: &Path) -> Result<DemoConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_config(&content)
}

/// Parses a JSON configuration document.
///
/// # Errors
/// Returns an error if the document is not valid JSON for [`DemoConfig`].
pub fn parse_config(content: &str) -> Result<DemoConfig> {
    serde_json::from_str(content).context("Failed to parse demo configuration")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DemoConfig::default();
        assert_eq!(config.capacity, 16);
        assert_eq!(config.rounds, 8);
        assert!(!config.drop_on_full);
        assert!(config.message.starts_with("Hello"));
    }

    #[test]
    fn test_parse_partial_uses_defaults() {
        let config = parse_config(r#"{ "capacity": 4, "drop_on_full": true }"#).unwrap();
        assert_eq!(config.capacity, 4);
        assert!(config.drop_on_full);
        assert_eq!(config.rounds, DemoConfig::default().rounds);
        assert_eq!(config.message, DemoConfig::default().message);
    }

    #[test]
    fn test_parse_rejects_bad_json() {
        assert!(parse_config("{ capacity: ").is_err());
        assert!(parse_config(r#"{ "capacity": "many" }"#).is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = load_config(Path::new("/nonexistent/slotring-demo.json"));
        assert_eq!(config, DemoConfig::default());
    }
}
