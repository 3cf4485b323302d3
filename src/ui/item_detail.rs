use crate::app::App;
use ratatui::{
    Frame,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Item-detail overlay. Shows the resolved image reference plus the
/// item's display fields, as captured when the row was activated.
pub fn render(app: &App, frame: &mut Frame) {
    let detail = match app.modals.detail() {
        Some(d) => d,
        None => return,
    };
    let th = app.theme;

    let area = super::centered_rect(60, 50, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::styled(
            format!(" [image] {}", detail.image),
            Style::default().fg(th.dim()),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(" {}", detail.name),
            Style::default().fg(th.text()).add_modifier(Modifier::BOLD),
        )),
    ];
    if let Some(desc) = &detail.desc {
        lines.push(Line::from(Span::styled(
            format!(" {desc}"),
            Style::default().fg(th.dim()),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(" {}", detail.price),
        Style::default().fg(th.price()).add_modifier(Modifier::BOLD),
    )));

    let popup = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(th.accent()))
            .title(" Item ")
            .title_bottom(
                Line::from(" Esc or x to close ").style(Style::default().fg(th.dim())),
            ),
    );
    frame.render_widget(popup, area);
}
