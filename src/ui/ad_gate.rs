use crate::app::App;
use ratatui::{
    Frame,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Advertisement overlay, shown on every startup once the menu loads.
pub fn render(app: &App, frame: &mut Frame) {
    let th = app.theme;

    let area = super::centered_rect(50, 40, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            " Today at the house",
            Style::default().fg(th.accent()).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            " Ask about the daily combo: three tacos and a drink.",
            Style::default().fg(th.text()),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                " Enter",
                Style::default().fg(th.accent()).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" Continue   ", Style::default().fg(th.dim())),
            Span::styled(
                "Esc/x",
                Style::default().fg(th.accent()).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" Close", Style::default().fg(th.dim())),
        ]),
    ];

    let popup = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(th.accent()))
            .title(" House Special "),
    );
    frame.render_widget(popup, area);
}
