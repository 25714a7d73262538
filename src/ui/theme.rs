//! Visual theme and styling.

use console::Style;

/// deplink's visual theme.
#[derive(Debug, Clone)]
pub struct DeplinkTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (red bold, like skip notices).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for the run header (magenta underline).
    pub header: Style,
    /// Style for the ratio and banner of a complete run (magenta).
    pub banner_success: Style,
    /// Style for the ratio and banner of an incomplete run (red).
    pub banner_failure: Style,
}

impl Default for DeplinkTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl DeplinkTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().red().bold(),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            header: Style::new().magenta().underlined(),
            banner_success: Style::new().magenta(),
            banner_failure: Style::new().red(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            header: Style::new(),
            banner_success: Style::new(),
            banner_failure: Style::new(),
        }
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message.
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format the run header.
    pub fn format_header(&self, title: &str) -> String {
        format!("{}", self.header.apply_to(title))
    }

    /// Format the `linked / total` ratio.
    pub fn format_ratio(&self, linked: usize, total: usize) -> String {
        let ratio = format!("{} / {} linked", linked, total);
        if linked == total {
            format!("{}", self.success.apply_to(ratio))
        } else {
            format!("{}", self.error.apply_to(ratio))
        }
    }

    /// Format a closing banner.
    pub fn format_banner(&self, banner: &str, complete: bool) -> String {
        let style = if complete {
            &self.banner_success
        } else {
            &self.banner_failure
        };
        format!("{}", style.apply_to(banner))
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_formats_success() {
        let theme = DeplinkTheme::plain();
        let msg = theme.format_success("mf-logger");
        assert_eq!(msg, "✓ mf-logger");
    }

    #[test]
    fn theme_formats_warning() {
        let theme = DeplinkTheme::plain();
        let msg = theme.format_warning("Skipping linking.");
        assert!(msg.contains("⚠"));
        assert!(msg.contains("Skipping linking."));
    }

    #[test]
    fn theme_formats_error() {
        let theme = DeplinkTheme::plain();
        let msg = theme.format_error("api wasn't linked");
        assert_eq!(msg, "✗ api wasn't linked");
    }

    #[test]
    fn theme_formats_ratio() {
        let theme = DeplinkTheme::plain();
        assert_eq!(theme.format_ratio(2, 3), "2 / 3 linked");
        assert_eq!(theme.format_ratio(0, 0), "0 / 0 linked");
    }

    #[test]
    fn theme_formats_banner_verbatim() {
        let theme = DeplinkTheme::plain();
        let banner = "  _\n |_|\n";
        assert_eq!(theme.format_banner(banner, true), banner);
        assert_eq!(theme.format_banner(banner, false), banner);
    }

    #[test]
    fn default_impl_matches_new() {
        let default = DeplinkTheme::default();
        let new = DeplinkTheme::new();
        assert_eq!(default.format_success("test"), new.format_success("test"));
    }
}
