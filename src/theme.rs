//! Theme colors for the garage UI.
//! Defaults follow the dark workshop palette; any of them can be overridden
//! from the `[theme]` table of the config file.

use ratatui::style::Color;

use crate::config::ThemeOverrides;

/// Theme colors for the UI
#[derive(Debug, Clone)]
pub struct Theme {
    pub accent: Color,      // Focused borders, highlighted option
    pub build: Color,       // Build button (green)
    pub clear: Color,       // Clear button (orange-red)
    pub warning: Color,     // Incomplete selection, load failures
    pub text: Color,        // Primary text
    pub text_dim: Color,    // Hints, empty selectors
    pub bg: Color,          // Window background
    pub panel: Color,       // Display region background, picture placeholder
    pub bg_selected: Color, // Selection background in the picker
    pub inactive: Color,    // Unfocused borders
    pub header: Color,      // Title text
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Rgb(100, 181, 246),
            build: Color::Rgb(76, 175, 80),  // #4CAF50
            clear: Color::Rgb(255, 87, 51),  // #FF5733
            warning: Color::Rgb(250, 179, 135),
            text: Color::Rgb(255, 255, 255),
            text_dim: Color::Rgb(147, 153, 178),
            bg: Color::Rgb(30, 30, 30),      // #1e1e1e
            panel: Color::Rgb(37, 37, 37),   // #252525
            bg_selected: Color::Rgb(69, 71, 90),
            inactive: Color::Rgb(88, 91, 112),
            header: Color::Rgb(255, 255, 255),
        }
    }
}

impl Theme {
    /// Default palette with the configured overrides applied
    pub fn load(overrides: &ThemeOverrides) -> Self {
        let mut theme = Self::default();

        let slots: [(&Option<String>, &mut Color, &str); 5] = [
            (&overrides.accent, &mut theme.accent, "accent"),
            (&overrides.build, &mut theme.build, "build"),
            (&overrides.clear, &mut theme.clear, "clear"),
            (&overrides.text, &mut theme.text, "text"),
            (&overrides.background, &mut theme.bg, "background"),
        ];

        for (value, color, name) in slots {
            let Some(value) = value else { continue };
            match parse_hex_color(value) {
                Some(parsed) => *color = parsed,
                None => tracing::warn!("Ignoring invalid theme color {} = {:?}", name, value),
            }
        }

        theme
    }
}

/// Parse a hex color string (#RRGGBB or #RGB)
pub fn parse_hex_color(s: &str) -> Option<Color> {
    let s = s.trim().trim_start_matches('#');

    if !s.is_ascii() {
        return None;
    }

    if s.len() == 6 {
        let r = u8::from_str_radix(&s[0..2], 16).ok()?;
        let g = u8::from_str_radix(&s[2..4], 16).ok()?;
        let b = u8::from_str_radix(&s[4..6], 16).ok()?;
        Some(Color::Rgb(r, g, b))
    } else if s.len() == 3 {
        let r = u8::from_str_radix(&s[0..1], 16).ok()? * 17;
        let g = u8::from_str_radix(&s[1..2], 16).ok()? * 17;
        let b = u8::from_str_radix(&s[2..3], 16).ok()? * 17;
        Some(Color::Rgb(r, g, b))
    } else {
        None
    }
}
