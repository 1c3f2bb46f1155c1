//! Runtime configuration read from the environment

use std::env;
use std::path::PathBuf;

/// Directory the emitted C source and executable are written to
pub const DEFAULT_OUTPUT_DIR: &str = "output";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `CCCP_OUTPUT_DIR`
    pub output_dir: PathBuf,
    /// `CC`: compiler to use instead of searching `PATH`
    pub compiler: Option<PathBuf>,
    /// `CCCP_EMIT_ONLY`: print the C source instead of building it
    pub emit_only: bool,
    /// `CCCP_DEBUG`: verbose logging plus token and AST dumps
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            compiler: None,
            emit_only: false,
            debug: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key → value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let set = |key: &str| lookup(key).filter(|v| !v.is_empty());

        Self {
            output_dir: set("CCCP_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            compiler: set("CC").map(PathBuf::from),
            emit_only: set("CCCP_EMIT_ONLY").is_some_and(|v| v != "0"),
            debug: set("CCCP_DEBUG").is_some_and(|v| v != "0"),
        }
    }
}
