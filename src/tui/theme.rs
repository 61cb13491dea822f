//! Semantic color themes for the TUI.
//!
//! Screens never pick concrete colors; they ask the theme for a role
//! (`accent`, `error`, `text_muted`) and the active palette supplies it.
//! The palette follows the `ui.theme_mode` config setting. `Auto`
//! re-detects the OS preference on every event-loop pass, so switching
//! the system theme takes effect while the app is running.

use ratatui::style::Color;

use crate::config::ThemeMode;

/// Color roles used by every screen and popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Borders, titles, and chrome
    pub primary: Color,
    /// Selections, focus, and the highlighted wizard step
    pub accent: Color,
    /// Confirmations ("Application submitted", "Signed in as ...")
    pub success: Color,
    /// Errors and the blocking error overlay
    pub error: Color,
    /// Cautions ("already applied", premium-gate hints)
    pub warning: Color,

    /// Body text
    pub text: Color,
    /// Labels and secondary content
    pub text_secondary: Color,
    /// Help hints and disabled items
    pub text_muted: Color,

    /// Screen background
    pub background: Color,
    /// Selected-row background
    pub highlight_bg: Color,
    /// Panels, cards, and the chat popup
    pub surface: Color,

    /// Focused field marker
    pub active: Color,
    /// Unfocused field marker
    pub inactive: Color,
}

impl Theme {
    /// Detects the OS dark/light preference and picks the matching palette.
    #[must_use]
    pub fn detect() -> Self {
        match dark_light::detect() {
            Ok(dark_light::Mode::Light) => Self::light(),
            // Dark, unspecified, and detection failure all land on dark
            Ok(dark_light::Mode::Dark | dark_light::Mode::Unspecified) | Err(_) => Self::dark(),
        }
    }

    /// Resolves the palette for a configured mode.
    #[must_use]
    pub fn from_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Auto => Self::detect(),
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    /// Palette for dark terminal backgrounds. Indigo chrome, violet accent.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            primary: Color::Rgb(129, 140, 248),
            accent: Color::Rgb(196, 181, 253),
            success: Color::Rgb(74, 222, 128),
            error: Color::Rgb(248, 113, 113),
            warning: Color::Rgb(250, 204, 21),

            text: Color::White,
            text_secondary: Color::Gray,
            text_muted: Color::DarkGray,

            background: Color::Rgb(17, 17, 27),
            highlight_bg: Color::Rgb(49, 50, 68),
            surface: Color::Rgb(30, 30, 46),

            active: Color::Rgb(196, 181, 253),
            inactive: Color::Gray,
        }
    }

    /// Palette for light terminal backgrounds. The accents are deepened so
    /// they hold contrast against white.
    #[must_use]
    pub const fn light() -> Self {
        Self {
            primary: Color::Rgb(67, 56, 202),
            accent: Color::Rgb(109, 40, 217),
            success: Color::Rgb(21, 128, 61),
            error: Color::Rgb(185, 28, 28),
            warning: Color::Rgb(180, 83, 9),

            text: Color::Black,
            text_secondary: Color::Rgb(55, 65, 81),
            text_muted: Color::Rgb(156, 163, 175),

            background: Color::White,
            highlight_bg: Color::Rgb(224, 231, 255),
            surface: Color::Rgb(243, 244, 246),

            active: Color::Rgb(109, 40, 217),
            inactive: Color::Rgb(209, 213, 219),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::detect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_palette_contrast() {
        let theme = Theme::dark();
        assert_eq!(theme.text, Color::White);
        assert_ne!(theme.background, theme.surface);
        assert_ne!(theme.success, theme.error);
    }

    #[test]
    fn test_light_palette_contrast() {
        let theme = Theme::light();
        assert_eq!(theme.text, Color::Black);
        assert_eq!(theme.background, Color::White);
        assert_ne!(theme.highlight_bg, theme.background);
    }

    #[test]
    fn test_light_accents_are_not_bright() {
        // Bright terminal yellows and cyans wash out on white
        let theme = Theme::light();
        assert_ne!(theme.accent, Color::Yellow);
        assert_ne!(theme.warning, Color::Yellow);
        assert_ne!(theme.primary, Color::Cyan);
    }

    #[test]
    fn test_from_mode_honors_fixed_settings() {
        assert_eq!(Theme::from_mode(ThemeMode::Dark), Theme::dark());
        assert_eq!(Theme::from_mode(ThemeMode::Light), Theme::light());
    }

    #[test]
    fn test_from_mode_auto_matches_detection() {
        assert_eq!(Theme::from_mode(ThemeMode::Auto), Theme::detect());
    }

    #[test]
    fn test_role_colors_are_distinct() {
        let theme = Theme::dark();
        assert_ne!(theme.primary, theme.accent);
        assert_ne!(theme.text, theme.text_muted);
        assert_ne!(theme.active, theme.inactive);
    }
}
