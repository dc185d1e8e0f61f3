use ratatui::style::Color;

/// Palette injected once at startup; render code never picks named colors
/// on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub text: Color,
    pub text_muted: Color,
    pub dim: Color,
    pub accent: Color,
    pub error: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub border: Color,
    pub surface_bright: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            text: Color::Rgb(220, 220, 220),
            text_muted: Color::Rgb(170, 170, 170),
            dim: Color::Rgb(140, 140, 140),
            accent: Color::Rgb(80, 160, 160),
            error: Color::Rgb(200, 80, 80),
            positive: Color::Rgb(110, 180, 110),
            negative: Color::Rgb(200, 110, 90),
            warning: Color::Rgb(210, 170, 80),
            border: Color::Rgb(60, 70, 80),
            surface_bright: Color::Rgb(28, 36, 44),
        }
    }

    pub fn light() -> Self {
        Self {
            text: Color::Rgb(30, 30, 30),
            text_muted: Color::Rgb(90, 90, 90),
            dim: Color::Rgb(130, 130, 130),
            accent: Color::Rgb(20, 110, 110),
            error: Color::Rgb(170, 40, 40),
            positive: Color::Rgb(30, 130, 60),
            negative: Color::Rgb(170, 70, 40),
            warning: Color::Rgb(160, 120, 20),
            border: Color::Rgb(180, 180, 180),
            surface_bright: Color::Rgb(235, 238, 240),
        }
    }

    /// Resolves a configured theme name. Unknown names fall back to the
    /// dark palette rather than failing startup.
    pub fn named(name: &str) -> Self {
        match name {
            "dark" => Self::dark(),
            "light" => Self::light(),
            other => {
                tracing::warn!("unknown theme \"{other}\", using dark");
                Self::dark()
            }
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_resolves_both_palettes() {
        assert_ne!(Theme::named("light"), Theme::named("dark"));
    }

    #[test]
    fn unknown_name_falls_back_to_dark() {
        assert_eq!(Theme::named("solarized"), Theme::dark());
    }
}
