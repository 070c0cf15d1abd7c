use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    pub header_area: Rect,
    pub tasks_area: Rect,
    pub sessions_area: Rect,
    pub hints_area: Rect,
}

/// Create the main layout
/// - Top bar: filters and clock (1 row)
/// - Main area: task list (60%) | session list (40%)
/// - Bottom bar: keybinding hints (1 row)
pub fn create_layout(area: Rect) -> MainLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Hints bar
        ])
        .split(area);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60), // Task pane
            Constraint::Percentage(40), // Session pane
        ])
        .split(main_chunks[1]);

    MainLayout {
        header_area: main_chunks[0],
        tasks_area: content[0],
        sessions_area: content[1],
        hints_area: main_chunks[2],
    }
}

/// Create centered modal area (forms, pickers and confirmations)
pub fn create_modal_area(area: Rect) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Length(12),
            Constraint::Percentage(30),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_layout() {
        let area = Rect::new(0, 0, 100, 50);
        let layout = create_layout(area);

        assert_eq!(layout.header_area.height, 1);
        assert_eq!(layout.hints_area.height, 1);
        assert!(layout.tasks_area.height > 0);
        assert!(layout.sessions_area.height > 0);
        // The task pane is the wider of the two
        assert!(layout.tasks_area.width > layout.sessions_area.width);
    }

    #[test]
    fn test_create_modal_area() {
        let area = Rect::new(0, 0, 100, 50);
        let modal = create_modal_area(area);

        assert!(modal.width < area.width);
        assert!(modal.height < area.height);
        assert_eq!(modal.height, 12);
    }
}
