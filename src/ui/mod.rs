mod ad_gate;
mod item_detail;
mod menu_list;

use crate::app::App;
use crate::modal::ModalId;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

/// Top-level render dispatch. The list surface is always painted in full;
/// open overlays draw on top of it, the ad gate last.
pub fn render(app: &App, frame: &mut Frame) {
    menu_list::render(app, frame);

    if app.modals.is_open(ModalId::ItemDetail) {
        item_detail::render(app, frame);
    }
    if app.modals.is_open(ModalId::AdGate) {
        ad_gate::render(app, frame);
    }
}

/// Create a centered rectangle using percentage of parent area.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
