use crate::domain::TaskState;
use crate::persistence::ThemeVariant;
use ratatui::style::{Color, Modifier, Style};

fn text_color(variant: ThemeVariant) -> Color {
    match variant {
        ThemeVariant::Light => Color::Black,
        ThemeVariant::Dark => Color::White,
    }
}

fn dim_color(variant: ThemeVariant) -> Color {
    match variant {
        ThemeVariant::Light => Color::DarkGray,
        ThemeVariant::Dark => Color::Gray,
    }
}

/// Default text style
pub fn default_style(variant: ThemeVariant) -> Style {
    Style::default().fg(text_color(variant))
}

/// Selected row highlight style
pub fn selected_style(_variant: ThemeVariant) -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::LightCyan)
        .add_modifier(Modifier::BOLD)
}

/// Running indicator style
pub fn running_style(_variant: ThemeVariant) -> Style {
    Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD)
}

/// Style for a task's lifecycle tag
pub fn state_style(variant: ThemeVariant, state: TaskState) -> Style {
    match state {
        TaskState::Active => Style::default().fg(Color::Cyan),
        TaskState::Finished => Style::default().fg(Color::Green),
        TaskState::Dropped => Style::default().fg(dim_color(variant)),
    }
}

/// Title style for panes
pub fn title_style(variant: ThemeVariant) -> Style {
    let color = match variant {
        ThemeVariant::Light => Color::Blue,
        ThemeVariant::Dark => Color::Cyan,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style(variant: ThemeVariant) -> Style {
    Style::default().fg(dim_color(variant))
}

/// Border style for the pane owning the selection keys
pub fn focused_border_style(variant: ThemeVariant) -> Style {
    let color = match variant {
        ThemeVariant::Light => Color::Blue,
        ThemeVariant::Dark => Color::Cyan,
    };
    Style::default().fg(color)
}

/// Modal background style
pub fn modal_bg_style(variant: ThemeVariant) -> Style {
    match variant {
        ThemeVariant::Light => Style::default().bg(Color::White).fg(Color::Black),
        ThemeVariant::Dark => Style::default().bg(Color::DarkGray).fg(Color::White),
    }
}

/// Modal title and key style
pub fn modal_title_style(variant: ThemeVariant) -> Style {
    let color = match variant {
        ThemeVariant::Light => Color::Magenta,
        ThemeVariant::Dark => Color::Yellow,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Keybinding hint style
pub fn hint_style(variant: ThemeVariant) -> Style {
    Style::default().fg(dim_color(variant))
}

/// Error message style
pub fn error_style(_variant: ThemeVariant) -> Style {
    Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
}
