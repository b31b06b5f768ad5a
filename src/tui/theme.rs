use ratatui::style::Color;

use crate::model::UiConfig;
use crate::model::task::TaskStatus;

/// Colors used by the TUI. Each slot can be overridden from `[ui.colors]`
/// under the same name.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    /// Focused borders, key names, the cursor marker
    pub accent: Color,
    /// Placeholders, hints, unfocused borders, finished rows
    pub muted: Color,
    /// Border of delete confirmations
    pub danger: Color,
    pub pending: Color,
    pub completed: Color,
    pub selection_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x16, 0x18, 0x21),
            text: Color::Rgb(0xC8, 0xCC, 0xD8),
            text_bright: Color::Rgb(0xF2, 0xF4, 0xF8),
            accent: Color::Rgb(0x5F, 0xB3, 0xF0),
            muted: Color::Rgb(0x6B, 0x72, 0x88),
            danger: Color::Rgb(0xE0, 0x5A, 0x5A),
            pending: Color::Rgb(0xE8, 0xB0, 0x4A),
            completed: Color::Rgb(0x6C, 0xC6, 0x7E),
            selection_bg: Color::Rgb(0x26, 0x2C, 0x3D),
        }
    }
}

/// `#RRGGBB` to an RGB color
fn parse_hex_color(value: &str) -> Option<Color> {
    let digits = value.strip_prefix('#')?;
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let rgb = u32::from_str_radix(digits, 16).ok()?;
    Some(Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8))
}

impl Theme {
    /// Default theme with the `[ui.colors]` overrides applied. Unknown
    /// slots and malformed values are skipped with a warning.
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();
        for (key, value) in &ui.colors {
            match (theme.slot_mut(key), parse_hex_color(value)) {
                (Some(slot), Some(color)) => *slot = color,
                (None, _) => tracing::warn!(key = %key, "ignoring unknown color slot"),
                (_, None) => tracing::warn!(key = %key, value = %value, "ignoring invalid color"),
            }
        }
        theme
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut Color> {
        Some(match key {
            "background" => &mut self.background,
            "text" => &mut self.text,
            "text_bright" => &mut self.text_bright,
            "accent" => &mut self.accent,
            "muted" => &mut self.muted,
            "danger" => &mut self.danger,
            "pending" => &mut self.pending,
            "completed" => &mut self.completed,
            "selection_bg" => &mut self.selection_bg,
            _ => return None,
        })
    }

    pub fn status_color(&self, status: TaskStatus) -> Color {
        match status {
            TaskStatus::Pending => self.pending,
            TaskStatus::Completed => self.completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors() {
        assert_eq!(parse_hex_color("#FF4400"), Some(Color::Rgb(0xFF, 0x44, 0x00)));
        assert_eq!(parse_hex_color("#0a0b0c"), Some(Color::Rgb(0x0A, 0x0B, 0x0C)));
        assert_eq!(parse_hex_color("FF4400"), None);
        assert_eq!(parse_hex_color("#FF44"), None);
        assert_eq!(parse_hex_color("#+FFFFF"), None);
        assert_eq!(parse_hex_color("#ZZZZZZ"), None);
    }

    #[test]
    fn overrides_apply_per_slot() {
        let mut ui = UiConfig::default();
        ui.colors.insert("background".into(), "#000000".into());
        ui.colors.insert("completed".into(), "not a color".into());
        ui.colors.insert("sparkle".into(), "#123456".into());

        let theme = Theme::from_config(&ui);
        let defaults = Theme::default();
        assert_eq!(theme.background, Color::Rgb(0, 0, 0));
        assert_eq!(theme.completed, defaults.completed);
        assert_eq!(theme.accent, defaults.accent);
    }

    #[test]
    fn status_colors_differ() {
        let theme = Theme::default();
        assert_eq!(theme.status_color(TaskStatus::Pending), theme.pending);
        assert_eq!(theme.status_color(TaskStatus::Completed), theme.completed);
        assert_ne!(theme.pending, theme.completed);
    }
}
