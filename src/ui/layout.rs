use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    pub tabs_area: Rect,
    pub body_area: Rect,
    pub toast_area: Rect,
    pub keybindings_area: Rect,
}

/// Create the main layout
/// - Top bar: view tabs (1 row)
/// - Body: the active view
/// - Toast line (1 row)
/// - Bottom bar: keybindings (1 row)
pub fn create_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tabs
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Toast
            Constraint::Length(1), // Keybindings
        ])
        .split(area);

    MainLayout {
        tabs_area: chunks[0],
        body_area: chunks[1],
        toast_area: chunks[2],
        keybindings_area: chunks[3],
    }
}

/// Create centered modal area with a fixed height
pub fn create_modal_area(area: Rect, height: u16) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Length(height),
            Constraint::Percentage(25),
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

        assert_eq!(layout.tabs_area.height, 1);
        assert_eq!(layout.toast_area.height, 1);
        assert_eq!(layout.keybindings_area.height, 1);
        assert_eq!(layout.body_area.height, 47);
        assert_eq!(layout.keybindings_area.y, 49);
    }

    #[test]
    fn test_create_modal_area() {
        let area = Rect::new(0, 0, 100, 50);
        let modal = create_modal_area(area, 10);

        assert!(modal.width < area.width);
        assert_eq!(modal.height, 10);
    }
}
