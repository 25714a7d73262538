//! Output mode.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show everything, including per-dependency detail.
    Verbose,
    /// Show status lines and the closing banner.
    #[default]
    Normal,
    /// Show per-dependency failures and the summary only.
    Quiet,
    /// Show nothing except errors.
    Silent,
}

impl OutputMode {
    /// Check if this mode shows detail lines.
    pub fn shows_detail(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Check if this mode shows status messages.
    pub fn shows_status(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }

    /// Check if this mode shows the closing summary.
    pub fn shows_summary(&self) -> bool {
        !matches!(self, Self::Silent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_mode_shows_detail() {
        assert!(OutputMode::Verbose.shows_detail());
        assert!(!OutputMode::Normal.shows_detail());
        assert!(!OutputMode::Quiet.shows_detail());
        assert!(!OutputMode::Silent.shows_detail());
    }

    #[test]
    fn output_mode_shows_status() {
        assert!(OutputMode::Verbose.shows_status());
        assert!(OutputMode::Normal.shows_status());
        assert!(!OutputMode::Quiet.shows_status());
        assert!(!OutputMode::Silent.shows_status());
    }

    #[test]
    fn output_mode_shows_summary() {
        assert!(OutputMode::Quiet.shows_summary());
        assert!(!OutputMode::Silent.shows_summary());
    }

    #[test]
    fn output_mode_default() {
        assert_eq!(OutputMode::default(), OutputMode::Normal);
    }
}
