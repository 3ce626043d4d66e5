use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub comment: Color,   // Grey
    pub connector: Color, // Orange
    pub type_name: Color, // Cyan for labels
    pub border_focused: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),
    comment: Color::Rgb(108, 112, 134),
    connector: Color::Rgb(250, 179, 135),
    type_name: Color::Rgb(148, 226, 213),
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
};
