//! CLI argument parsing for per-crate debug flags
//!
//! Supports flags like `--debug-cts-serialization`, `--debug-cts-hal`, etc.
//! to enable debug logging per crate.

use std::collections::BTreeSet;
use std::env;

use crate::KNOWN_CRATES;

/// Per-crate debug logging switches
///
/// # Example
/// ```rust
/// use cts_observability::CrateDebugFlags;
///
/// let flags = CrateDebugFlags::from_args(vec!["--debug-cts-serialization".to_string()]);
/// assert!(flags.is_enabled("cts-serialization"));
/// assert_eq!(flags.to_filter_string("warn"), "cts_serialization=debug,warn");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrateDebugFlags {
    pub enabled_crates: BTreeSet<String>,
}

impl CrateDebugFlags {
    /// Parse debug flags from command-line arguments
    ///
    /// Looks for arguments matching `--debug-{crate-name}` pattern.
    /// Also supports `--debug-all` to enable all crates.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut flags = CrateDebugFlags::default();
        for arg in args {
            if arg == "--debug-all" {
                flags.enable_all();
            } else if let Some(crate_name) = arg.strip_prefix("--debug-") {
                flags.enable(crate_name);
            }
        }
        flags
    }

    /// Build flags from plain crate names; `all` enables every known crate
    pub fn from_crate_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut flags = CrateDebugFlags::default();
        for name in names {
            let name = name.as_ref().trim();
            if name == "all" {
                flags.enable_all();
            } else if !name.is_empty() {
                flags.enable(name);
            }
        }
        flags
    }

    pub fn enable(&mut self, crate_name: &str) {
        self.enabled_crates.insert(crate_name.to_string());
    }

    pub fn enable_all(&mut self) {
        for crate_name in KNOWN_CRATES {
            self.enable(crate_name);
        }
    }

    /// Add every crate enabled in `other`
    pub fn merge(&mut self, other: CrateDebugFlags) {
        self.enabled_crates.extend(other.enabled_crates);
    }

    /// Check if debug is enabled for a specific crate
    pub fn is_enabled(&self, crate_name: &str) -> bool {
        self.enabled_crates.contains(crate_name)
    }

    /// Get all enabled crates, sorted
    pub fn enabled_crates(&self) -> Vec<&String> {
        self.enabled_crates.iter().collect()
    }

    /// Check if debug is enabled for any crate
    pub fn any_enabled(&self) -> bool {
        !self.enabled_crates.is_empty()
    }

    /// Returns `tracing::Level::DEBUG` if enabled, `tracing::Level::INFO` otherwise.
    pub fn log_level(&self, crate_name: &str) -> tracing::Level {
        if self.is_enabled(crate_name) {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Create a tracing filter from debug flags
    ///
    /// Crate names are turned into tracing targets (`cts-hal` -> `cts_hal`) and `base_level`
    /// applies to everything else. Format: `"cts_hal=debug,cts_serialization=debug,info"`.
    pub fn to_filter_string(&self, base_level: &str) -> String {
        self.enabled_crates
            .iter()
            .map(|crate_name| format!("{}=debug", crate_name.replace('-', "_")))
            .chain(std::iter::once(base_level.to_lowercase()))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Helper function to parse debug flags from environment
///
/// Checks both command-line arguments and the `CTS_DEBUG` environment variable.
/// Environment variable format: comma-separated crate names, e.g., "cts-hal,cts-serialization",
/// or `all`.
pub fn parse_debug_flags() -> CrateDebugFlags {
    let mut flags = CrateDebugFlags::from_args(env::args());
    if let Ok(env_var) = env::var("CTS_DEBUG") {
        flags.merge(CrateDebugFlags::from_crate_names(env_var.split(',')));
    }
    flags
}

/// Generate help text for debug flags
pub fn debug_flags_help() -> String {
    format!(
        r#"Debug Flags:
  --debug-all                    Enable debug logging for all crates
  --debug-{{crate-name}}          Enable debug logging for specific crate

Available crates:
  {}

Environment Variable:
  CTS_DEBUG={{crate-name}}[,{{crate-name}}]  Enable debug for crates (comma-separated)
  CTS_DEBUG=all                             Enable debug for all crates

Examples:
  --debug-cts-serialization
  --debug-cts-serialization --debug-cts-hal
  CTS_DEBUG=cts-serialization,cts-hal
"#,
        KNOWN_CRATES.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_crate_flag() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-cts-hal".to_string()]);
        assert!(flags.is_enabled("cts-hal"));
        assert!(!flags.is_enabled("cts-serialization"));
    }

    #[test]
    fn test_other_arguments_are_ignored() {
        let flags = CrateDebugFlags::from_args(vec![
            "cts_player".to_string(),
            "--synthetic".to_string(),
            "--debug-cts-config".to_string(),
        ]);
        assert_eq!(flags.enabled_crates(), vec!["cts-config"]);
    }

    #[test]
    fn test_debug_all() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-all".to_string()]);
        for crate_name in KNOWN_CRATES {
            assert!(flags.is_enabled(crate_name), "{} should be enabled", crate_name);
        }
        assert_eq!(CrateDebugFlags::from_crate_names(["all"]), flags);
    }

    #[test]
    fn test_filter_string() {
        let flags = CrateDebugFlags::from_crate_names(["cts-serialization", " cts-hal ", ""]);
        assert_eq!(flags.to_filter_string("INFO"), "cts_hal=debug,cts_serialization=debug,info");
        assert_eq!(CrateDebugFlags::default().to_filter_string("warn"), "warn");
    }

    #[test]
    fn test_log_level() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-cts-hal".to_string()]);
        assert_eq!(flags.log_level("cts-hal"), tracing::Level::DEBUG);
        assert_eq!(flags.log_level("cts-config"), tracing::Level::INFO);
    }

    #[test]
    fn test_help_lists_crates() {
        let help = debug_flags_help();
        assert!(help.contains("cts-serialization"));
        assert!(help.contains("CTS_DEBUG=all"));
    }
}
