//! Pre-flight checks that decide whether a run should touch anything.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::{LocationCheck, ModeGuard};
use crate::error::{DeplinkError, Result};

use super::ports::VersionProbe;

/// Why a run ended before linking anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The mode variable is unset or has another value.
    ModeMismatch {
        var: String,
        expected: String,
        actual: Option<String>,
    },
    /// The project is itself installed inside a dependency directory.
    InsideModulesDir { cwd: PathBuf, modules_dir: String },
    /// The package manager is too old to keep symlinked dependencies.
    VersionTooLow {
        reported: String,
        found: u64,
        required: u32,
    },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ModeMismatch { var, expected, .. } => {
                write!(f, "{} is not '{}'. Skipping linking.", var, expected)
            }
            Self::InsideModulesDir { cwd, modules_dir } => write!(
                f,
                "{} is inside {}. Skipping linking.",
                cwd.display(),
                modules_dir
            ),
            Self::VersionTooLow {
                reported, required, ..
            } => write!(
                f,
                "Package manager {} is too old, version {} (dots removed) or above is required. Skipping linking.",
                reported, required
            ),
        }
    }
}

/// Skip unless `env[guard.var]` equals `guard.value` exactly.
pub fn check_mode(guard: Option<&ModeGuard>, env: &HashMap<String, String>) -> Option<SkipReason> {
    let guard = guard?;
    let actual = env.get(&guard.var);

    if actual.map(String::as_str) == Some(guard.value.as_str()) {
        return None;
    }

    Some(SkipReason::ModeMismatch {
        var: guard.var.clone(),
        expected: guard.value.clone(),
        actual: actual.cloned(),
    })
}

/// Skip when `cwd` sits inside a dependency directory.
pub fn check_location(check: LocationCheck, modules_dir: &str, cwd: &Path) -> Option<SkipReason> {
    let inside = match check {
        LocationCheck::Off => false,
        LocationCheck::Parent => cwd
            .parent()
            .and_then(Path::file_name)
            .is_some_and(|name| name == modules_dir),
        LocationCheck::Substring => cwd.to_string_lossy().contains(modules_dir),
    };

    inside.then(|| SkipReason::InsideModulesDir {
        cwd: cwd.to_path_buf(),
        modules_dir: modules_dir.to_string(),
    })
}

/// Turn version output into a comparable integer.
///
/// Every `.` is removed and the leading digits are read, so `"5.1.0"` is 510
/// and `"6.14.18"` is 61418. Returns `None` when there are no leading digits.
pub fn parse_version_number(raw: &str) -> Option<u64> {
    let stripped = raw.trim().replace('.', "");
    let digits: String = stripped.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    // Absurdly long digit runs still compare as "new enough"
    Some(digits.parse().unwrap_or(u64::MAX))
}

/// Query the package manager and skip when it is older than `min_version`.
///
/// # Errors
///
/// Returns [`DeplinkError::VersionUndetectable`] when the output has no
/// leading digits, or the probe's error when the query itself fails.
pub fn check_version(probe: &dyn VersionProbe, min_version: u32) -> Result<Option<SkipReason>> {
    let raw = probe.version()?;
    let found = parse_version_number(&raw).ok_or_else(|| DeplinkError::VersionUndetectable {
        output: raw.trim().to_string(),
    })?;

    tracing::debug!("Package manager version {:?} read as {}", raw.trim(), found);

    if found < u64::from(min_version) {
        return Ok(Some(SkipReason::VersionTooLow {
            reported: raw.trim().to_string(),
            found,
            required: min_version,
        }));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linker::mock::MockVersionProbe;

    fn dev_guard() -> ModeGuard {
        ModeGuard {
            var: "NODE_ENV".to_string(),
            value: "dev".to_string(),
        }
    }

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn mode_matches() {
        let guard = dev_guard();
        assert_eq!(check_mode(Some(&guard), &env(&[("NODE_ENV", "dev")])), None);
    }

    #[test]
    fn mode_unset_skips() {
        let guard = dev_guard();
        let skip = check_mode(Some(&guard), &env(&[])).unwrap();
        assert!(matches!(skip, SkipReason::ModeMismatch { actual: None, .. }));
    }

    #[test]
    fn mode_is_exact() {
        let guard = dev_guard();
        assert!(check_mode(Some(&guard), &env(&[("NODE_ENV", "development")])).is_some());
        assert!(check_mode(Some(&guard), &env(&[("NODE_ENV", "DEV")])).is_some());
    }

    #[test]
    fn no_guard_never_skips() {
        assert_eq!(check_mode(None, &env(&[])), None);
    }

    #[test]
    fn parent_check_compares_last_segment() {
        let inside = Path::new("/work/app/node_modules/lib");
        let nested = Path::new("/work/node_modules/app/lib");
        assert!(check_location(LocationCheck::Parent, "node_modules", inside).is_some());
        assert!(check_location(LocationCheck::Parent, "node_modules", nested).is_none());
    }

    #[test]
    fn substring_check_matches_anywhere() {
        let nested = Path::new("/work/node_modules/app/lib");
        let suffixed = Path::new("/work/node_modules_backup/app");
        assert!(check_location(LocationCheck::Substring, "node_modules", nested).is_some());
        assert!(check_location(LocationCheck::Substring, "node_modules", suffixed).is_some());
        assert!(check_location(LocationCheck::Substring, "node_modules", Path::new("/work/app"))
            .is_none());
    }

    #[test]
    fn location_off_never_skips() {
        let inside = Path::new("/work/app/node_modules/lib");
        assert!(check_location(LocationCheck::Off, "node_modules", inside).is_none());
    }

    #[test]
    fn version_numbers_drop_dots() {
        assert_eq!(parse_version_number("5.1.0\n"), Some(510));
        assert_eq!(parse_version_number("5.0.9"), Some(509));
        assert_eq!(parse_version_number("10.2.4"), Some(1024));
        assert_eq!(parse_version_number("7.0.0-beta.1"), Some(700));
    }

    #[test]
    fn version_without_digits_is_none() {
        assert_eq!(parse_version_number("command not found"), None);
        assert_eq!(parse_version_number(""), None);
    }

    #[test]
    fn old_version_skips() {
        let probe = MockVersionProbe::returning("5.0.9\n");
        let skip = check_version(&probe, 510).unwrap().unwrap();
        assert!(matches!(skip, SkipReason::VersionTooLow { found: 509, .. }));
        assert!(skip.to_string().contains("5.0.9"));
    }

    #[test]
    fn minimum_version_proceeds() {
        let probe = MockVersionProbe::returning("5.1.0\n");
        assert_eq!(check_version(&probe, 510).unwrap(), None);
    }

    #[test]
    fn garbage_version_is_fatal() {
        let probe = MockVersionProbe::returning("npm: not found");
        assert!(matches!(
            check_version(&probe, 510),
            Err(DeplinkError::VersionUndetectable { .. })
        ));
    }

    #[test]
    fn failing_probe_propagates() {
        let probe = MockVersionProbe::failing();
        assert!(check_version(&probe, 510).is_err());
    }

    #[test]
    fn skip_reasons_render_notices() {
        let guard = dev_guard();
        let skip = check_mode(Some(&guard), &env(&[])).unwrap();
        assert_eq!(skip.to_string(), "NODE_ENV is not 'dev'. Skipping linking.");
    }
}
