use ratatui::style::{Color, Modifier, Style};

/// Panel palette. The default "lich-king" theme is a frost palette:
/// midnight black, ice blue, steel gray, pale blue, blood crimson.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    pub bg: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub panel_border: Color,
    pub alert: Color,
    pub bar: Color,
    pub title: Color,
    pub selection_fg: Color,
    pub selection_bg: Color,
    pub footer_bg: Color,
    pub pill_key_fg: Color,
    pub pill_key_bg: Color,
    pub tooltip_fg: Color,
    pub tooltip_bg: Color,
    pub tooltip_border: Color,
}

impl Theme {
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "dark" => Self::dark(),
            _ => Self::lich_king(),
        }
    }

    pub fn lich_king() -> Self {
        Theme {
            name: "lich-king",
            bg: Color::Rgb(0x0A, 0x00, 0x1F),
            text_primary: Color::Rgb(0x81, 0xA1, 0xC1),
            text_secondary: Color::Rgb(0x4C, 0x56, 0x6A),
            panel_border: Color::Rgb(0x4C, 0x56, 0x6A),
            alert: Color::Rgb(0xC4, 0x1E, 0x3A),
            bar: Color::Rgb(0x8F, 0xBC, 0xBB),
            title: Color::Rgb(0x81, 0xA1, 0xC1),
            selection_fg: Color::Rgb(0x0A, 0x00, 0x1F),
            selection_bg: Color::Rgb(0x81, 0xA1, 0xC1),
            footer_bg: Color::Rgb(0x4C, 0x56, 0x6A),
            pill_key_fg: Color::Rgb(0x0A, 0x00, 0x1F),
            pill_key_bg: Color::Rgb(0x8F, 0xBC, 0xBB),
            tooltip_fg: Color::Rgb(0x0A, 0x00, 0x1F),
            tooltip_bg: Color::Rgb(0x4C, 0x56, 0x6A),
            tooltip_border: Color::Rgb(0x81, 0xA1, 0xC1),
        }
    }

    pub fn dark() -> Self {
        Theme {
            name: "dark",
            bg: Color::Rgb(0x11, 0x11, 0x18),
            text_primary: Color::Rgb(0xCD, 0xD6, 0xF4),
            text_secondary: Color::Rgb(0x6C, 0x70, 0x86),
            panel_border: Color::Rgb(0x45, 0x47, 0x5A),
            alert: Color::Rgb(0xF3, 0x8B, 0xA8),
            bar: Color::Rgb(0x89, 0xB4, 0xFA),
            title: Color::Rgb(0xCD, 0xD6, 0xF4),
            selection_fg: Color::Rgb(0x11, 0x11, 0x18),
            selection_bg: Color::Rgb(0x89, 0xB4, 0xFA),
            footer_bg: Color::Rgb(0x31, 0x32, 0x44),
            pill_key_fg: Color::Rgb(0x11, 0x11, 0x18),
            pill_key_bg: Color::Rgb(0x89, 0xB4, 0xFA),
            tooltip_fg: Color::Rgb(0x11, 0x11, 0x18),
            tooltip_bg: Color::Rgb(0x6C, 0x70, 0x86),
            tooltip_border: Color::Rgb(0x89, 0xB4, 0xFA),
        }
    }

    pub fn title_style(&self) -> Style {
        Style::default().fg(self.title).add_modifier(Modifier::BOLD)
    }

    pub fn label_style(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    pub fn bar_style(&self) -> Style {
        Style::default().fg(self.bar)
    }

    pub fn alert_style(&self) -> Style {
        Style::default().fg(self.alert)
    }

    /// Border style for a panel, switching to the alert color when the
    /// panel's flag is raised.
    pub fn border_style(&self, alert: bool) -> Style {
        if alert {
            Style::default().fg(self.alert)
        } else {
            Style::default().fg(self.panel_border)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_name_falls_back_to_lich_king() {
        assert_eq!(Theme::from_name("no-such-theme").name, "lich-king");
        assert_eq!(Theme::from_name("DARK").name, "dark");
    }

    #[test]
    fn alert_border_uses_alert_color() {
        let theme = Theme::lich_king();
        assert_eq!(theme.border_style(true).fg, Some(theme.alert));
        assert_eq!(theme.border_style(false).fg, Some(theme.panel_border));
    }
}
