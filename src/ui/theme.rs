//! Terminal styling for CLI output

use owo_colors::Style;
use std::sync::OnceLock;
use crate::models::ClaimStatus;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Styles for message kinds and claim statuses
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub header: Style,
    pub success: Style,
    pub error: Style,
    pub warn: Style,
    pub label: Style,
    pub muted: Style,
    pending: Style,
    completed: Style,
    cancelled: Style,
}

impl Theme {
    /// Every style is plain when `colored` is false
    pub fn new(colored: bool) -> Self {
        let pick = |style: Style| if colored { style } else { Style::new() };
        Self {
            header: pick(Style::new().green().bold()),
            success: pick(Style::new().green().bold()),
            error: pick(Style::new().red().bold()),
            warn: pick(Style::new().yellow().bold()),
            label: pick(Style::new().cyan()),
            muted: pick(Style::new().bright_black()),
            pending: pick(Style::new().yellow()),
            completed: pick(Style::new().green()),
            cancelled: pick(Style::new().red().strikethrough()),
        }
    }

    /// Color only on an interactive stdout, and never when NO_COLOR is set
    pub fn detect() -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self::new(!no_color && console::Term::stdout().is_term())
    }

    pub fn status(&self, status: ClaimStatus) -> Style {
        match status {
            ClaimStatus::Pending => self.pending,
            ClaimStatus::Completed => self.completed,
            ClaimStatus::Cancelled => self.cancelled,
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_theme_has_no_styling() {
        let plain = Theme::new(false);
        assert!(plain.header.is_plain());
        assert!(plain.muted.is_plain());
        for status in ClaimStatus::all() {
            assert!(plain.status(*status).is_plain());
        }
    }

    #[test]
    fn test_statuses_are_told_apart_when_colored() {
        let colored = Theme::new(true);
        let pending = colored.status(ClaimStatus::Pending);
        let completed = colored.status(ClaimStatus::Completed);
        let cancelled = colored.status(ClaimStatus::Cancelled);
        assert!(!pending.is_plain());
        assert_ne!(pending, completed);
        assert_ne!(completed, cancelled);
        assert_ne!(pending, cancelled);
    }
}
