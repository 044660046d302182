//! Environment configuration for the `rate-my-brain` binary.
//!
//! Reads `RMB_SEED`, `RMB_SHARE_URL`, `RMB_EXPORT_DIR`; command-line flags
//! override the environment. Logging is configured separately via `RUST_LOG`.

use std::path::PathBuf;

use crate::constants::DEFAULT_SHARE_URL;

/// Default tracing filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "rate_my_brain=warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Seed for every random draw in the session; `None` uses OS entropy.
    pub seed: Option<u64>,
    pub share_url: String,
    pub export_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            share_url: DEFAULT_SHARE_URL.to_string(),
            export_dir: PathBuf::from("."),
        }
    }
}

/// Read `RMB_SEED`. Unparseable values are ignored with a warning.
pub fn seed() -> Option<u64> {
    let raw = std::env::var("RMB_SEED").ok()?;
    match raw.trim().parse() {
        Ok(seed) => Some(seed),
        Err(_) => {
            tracing::warn!(value = %raw, "ignoring invalid RMB_SEED");
            None
        }
    }
}

/// Read `RMB_SHARE_URL` (default [`DEFAULT_SHARE_URL`]).
pub fn share_url() -> String {
    std::env::var("RMB_SHARE_URL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SHARE_URL.to_string())
}

/// Read `RMB_EXPORT_DIR` (default `"."`).
pub fn export_dir() -> PathBuf {
    PathBuf::from(std::env::var("RMB_EXPORT_DIR").unwrap_or_else(|_| ".".to_string()))
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            seed: seed(),
            share_url: share_url(),
            export_dir: export_dir(),
        }
    }

    /// Apply `--seed`, `--share-url`, `--export-dir` on top of `self`.
    /// `args` excludes the program name.
    pub fn with_args<I, S>(mut self, args: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        let mut i = 0;
        while i < args.len() {
            let flag = args[i].as_str();
            let value = args
                .get(i + 1)
                .cloned()
                .ok_or_else(|| format!("missing value for {flag}"));
            match flag {
                "--seed" => {
                    let raw = value?;
                    self.seed = Some(
                        raw.parse()
                            .map_err(|_| format!("invalid --seed value: {raw}"))?,
                    );
                    i += 1;
                }
                "--share-url" => {
                    self.share_url = value?;
                    i += 1;
                }
                "--export-dir" => {
                    self.export_dir = PathBuf::from(value?);
                    i += 1;
                }
                other => return Err(format!("unknown argument: {other}")),
            }
            i += 1;
        }
        Ok(self)
    }
}
