use ratatui::style::Color;

// Backgrounds
pub const BG_DARK: Color = Color::Rgb(16, 13, 13);
pub const BG_BAR: Color = Color::Rgb(26, 19, 19);
pub const BG_SURFACE: Color = Color::Rgb(34, 24, 24);
pub const BG_HIGHLIGHT: Color = Color::Rgb(56, 34, 32);

// Primary accent (Ansible red)
pub const ACCENT: Color = Color::Rgb(228, 79, 60);

// Text
pub const TEXT: Color = Color::Rgb(230, 222, 220);
pub const TEXT_DIM: Color = Color::Rgb(155, 135, 132);
pub const TEXT_MUTED: Color = Color::Rgb(100, 80, 78);

// Semantic
pub const GREEN: Color = Color::Rgb(52, 211, 153);
pub const RED: Color = Color::Rgb(248, 113, 113);
pub const YELLOW: Color = Color::Rgb(251, 191, 36);
pub const CYAN: Color = Color::Rgb(103, 232, 249);
