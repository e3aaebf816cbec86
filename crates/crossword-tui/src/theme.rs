use crossterm::style::Color;

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color
    pub bg: Color,
    /// Default text color
    pub fg: Color,
    /// Blocked (non-letter) cell background
    pub blocked_bg: Color,
    /// Open cell background
    pub cell_bg: Color,
    /// Clue number color
    pub number: Color,
    /// Player letter color when no feedback is shown
    pub filled: Color,
    /// Focused cell background
    pub selected_bg: Color,
    /// Cells of the focused word
    pub highlight_bg: Color,
    /// Wrong letter color
    pub error: Color,
    /// Correct letter / solved color
    pub success: Color,
    /// Timer/info text color
    pub info: Color,
    /// Key binding text color
    pub key: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb { r: 20, g: 22, b: 30 },
            fg: Color::Rgb { r: 230, g: 230, b: 240 },
            blocked_bg: Color::Rgb { r: 10, g: 10, b: 14 },
            cell_bg: Color::Rgb { r: 45, g: 48, b: 62 },
            number: Color::Rgb { r: 140, g: 150, b: 180 },
            filled: Color::Rgb { r: 80, g: 180, b: 255 },
            selected_bg: Color::Rgb { r: 70, g: 90, b: 140 },
            highlight_bg: Color::Rgb { r: 55, g: 62, b: 85 },
            error: Color::Rgb { r: 255, g: 90, b: 90 },
            success: Color::Rgb { r: 90, g: 255, b: 130 },
            info: Color::Rgb { r: 160, g: 165, b: 185 },
            key: Color::Rgb { r: 255, g: 210, b: 100 },
        }
    }

    pub fn high_contrast() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            blocked_bg: Color::Black,
            cell_bg: Color::Rgb { r: 40, g: 40, b: 40 },
            number: Color::Grey,
            filled: Color::Cyan,
            selected_bg: Color::Blue,
            highlight_bg: Color::Rgb { r: 70, g: 70, b: 70 },
            error: Color::Red,
            success: Color::Green,
            info: Color::Grey,
            key: Color::Yellow,
        }
    }
}
