//! Repository specifier parsing.
//!
//! A repository specifier is the source string of a dependency that points at
//! a git repository of the organization:
//!
//! ```text
//! <scheme>://<host>:<org>/<name>.git[#<branch>]
//! ```
//!
//! `<scheme>` may be compound (`git+ssh`) and `<host>` may carry a user
//! (`git@github.com`). The clone URL is everything after `://` up to the
//! optional `#<branch>` fragment.
//!
//! # Example
//!
//! ```
//! use deplink::specifier::SpecifierParser;
//!
//! let parser = SpecifierParser::new("Mindflash").unwrap();
//! let spec = parser
//!     .parse("git+ssh://git@host:Mindflash/foo.git#release-2")
//!     .unwrap();
//! assert_eq!(spec.name, "foo");
//! assert_eq!(spec.clone_url, "git@host:Mindflash/foo.git");
//! assert_eq!(spec.branch.as_deref(), Some("release-2"));
//! ```

use regex::Regex;
use thiserror::Error;

use crate::error::{DeplinkError, Result};

/// A parsed repository specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSpec {
    /// Repository name, used as the sibling directory name.
    pub name: String,
    /// URL handed to `git clone` (transport prefix removed).
    pub clone_url: String,
    /// Branch to check out after cloning.
    pub branch: Option<String>,
}

/// The specifier does not have the `<scheme>://<host>:<org>/<name>.git` shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized repository specifier: {specifier}")]
pub struct UnparseableSpecifier {
    /// The rejected specifier.
    pub specifier: String,
}

/// Parses repository specifiers for one organization.
#[derive(Debug, Clone)]
pub struct SpecifierParser {
    organization: String,
    pattern: Regex,
}

impl SpecifierParser {
    /// Build a parser anchored on `organization`.
    pub fn new(organization: &str) -> Result<Self> {
        if organization.is_empty() {
            return Err(DeplinkError::ConfigValidationError {
                message: "organization must not be empty".to_string(),
            });
        }

        let source = format!(
            r"^[A-Za-z][A-Za-z0-9+.\-]*://(?P<url>[^:/#]+:{org}/(?P<name>[^/#]+?)\.git)(?:#(?P<branch>.+))?$",
            org = regex::escape(organization)
        );
        let pattern = Regex::new(&source).map_err(|e| DeplinkError::ConfigValidationError {
            message: format!("invalid organization pattern: {}", e),
        })?;

        Ok(Self {
            organization: organization.to_string(),
            pattern,
        })
    }

    /// The organization this parser is anchored on.
    pub fn organization(&self) -> &str {
        &self.organization
    }

    /// Parse a specifier.
    pub fn parse(&self, specifier: &str) -> std::result::Result<RepoSpec, UnparseableSpecifier> {
        let caps = self
            .pattern
            .captures(specifier.trim())
            .ok_or_else(|| UnparseableSpecifier {
                specifier: specifier.to_string(),
            })?;

        Ok(RepoSpec {
            name: caps["name"].to_string(),
            clone_url: caps["url"].to_string(),
            branch: caps.name("branch").map(|m| m.as_str().to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> SpecifierParser {
        SpecifierParser::new("Mindflash").unwrap()
    }

    #[test]
    fn parses_with_branch() {
        let spec = parser()
            .parse("git+ssh://git@host:Mindflash/foo.git#release-2")
            .unwrap();
        assert_eq!(
            spec,
            RepoSpec {
                name: "foo".to_string(),
                clone_url: "git@host:Mindflash/foo.git".to_string(),
                branch: Some("release-2".to_string()),
            }
        );
    }

    #[test]
    fn parses_without_branch() {
        let spec = parser()
            .parse("git+ssh://git@github.com:Mindflash/mf-logger.git")
            .unwrap();
        assert_eq!(spec.name, "mf-logger");
        assert_eq!(spec.clone_url, "git@github.com:Mindflash/mf-logger.git");
        assert_eq!(spec.branch, None);
    }

    #[test]
    fn accepts_plain_ssh_scheme() {
        let spec = parser()
            .parse("ssh://git@github.com:Mindflash/api.git#v1.2.0")
            .unwrap();
        assert_eq!(spec.name, "api");
        assert_eq!(spec.branch.as_deref(), Some("v1.2.0"));
    }

    #[test]
    fn branch_may_contain_slashes() {
        let spec = parser()
            .parse("git+ssh://git@github.com:Mindflash/api.git#feature/login")
            .unwrap();
        assert_eq!(spec.branch.as_deref(), Some("feature/login"));
    }

    #[test]
    fn name_with_dots_keeps_them() {
        let spec = parser()
            .parse("git+ssh://git@github.com:Mindflash/socket.io-client.git")
            .unwrap();
        assert_eq!(spec.name, "socket.io-client");
    }

    #[test]
    fn rejects_version_range() {
        let err = parser().parse("^4.17.21").unwrap_err();
        assert_eq!(err.specifier, "^4.17.21");
    }

    #[test]
    fn rejects_other_organization() {
        assert!(parser()
            .parse("git+ssh://git@github.com:Other/foo.git")
            .is_err());
    }

    #[test]
    fn rejects_missing_git_suffix() {
        assert!(parser()
            .parse("git+ssh://git@github.com:Mindflash/foo")
            .is_err());
    }

    #[test]
    fn rejects_shorthand_without_scheme() {
        assert!(parser().parse("github.com:Mindflash/foo.git").is_err());
    }

    #[test]
    fn rejects_empty_branch_fragment() {
        assert!(parser()
            .parse("git+ssh://git@github.com:Mindflash/foo.git#")
            .is_err());
    }

    #[test]
    fn organization_is_escaped() {
        let parser = SpecifierParser::new("my.org").unwrap();
        assert!(parser.parse("ssh://git@h:myxorg/foo.git").is_err());
        assert!(parser.parse("ssh://git@h:my.org/foo.git").is_ok());
        assert_eq!(parser.organization(), "my.org");
    }

    #[test]
    fn empty_organization_is_rejected() {
        assert!(SpecifierParser::new("").is_err());
    }
}
