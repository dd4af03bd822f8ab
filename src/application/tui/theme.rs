use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Debug, Clone)]
pub struct ThemeColors {
    // State colors
    pub selected_bg: Color,
    pub range_bg: Color,
    pub today: Color,
    pub focused: Color,
    pub dimmed: Color,

    // UI elements
    pub border: Color,
    pub header: Color,
    pub weekend: Color,

    // Text
    pub help: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "Dark".to_string(),
            colors: ThemeColors {
                selected_bg: Color::Rgb(40, 40, 40),
                range_bg: Color::Rgb(28, 48, 72),
                today: Color::Yellow,
                focused: Color::White,
                dimmed: Color::DarkGray,

                border: Color::Cyan,
                header: Color::Cyan,
                weekend: Color::Rgb(150, 150, 150),

                help: Color::Cyan,
                error: Color::LightRed,
            },
        }
    }

    pub fn light() -> Self {
        Self {
            name: "Light".to_string(),
            colors: ThemeColors {
                selected_bg: Color::Rgb(220, 220, 220),
                range_bg: Color::Rgb(200, 220, 245),
                today: Color::Blue,
                focused: Color::Black,
                dimmed: Color::Gray,

                border: Color::Blue,
                header: Color::Blue,
                weekend: Color::DarkGray,

                help: Color::Blue,
                error: Color::Red,
            },
        }
    }

    pub fn minimal() -> Self {
        Self {
            name: "Minimal".to_string(),
            colors: ThemeColors {
                selected_bg: Color::Rgb(40, 40, 40),
                range_bg: Color::Rgb(40, 40, 40),
                today: Color::White,
                focused: Color::White,
                dimmed: Color::DarkGray,

                border: Color::White,
                header: Color::White,
                weekend: Color::DarkGray,

                help: Color::Gray,
                error: Color::White,
            },
        }
    }

    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            "minimal" => Self::minimal(),
            _ => Self::dark(), // default
        }
    }

    pub fn available_themes() -> Vec<String> {
        vec!["dark".to_string(), "light".to_string(), "minimal".to_string()]
    }
}
