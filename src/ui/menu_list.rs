use crate::app::{App, InputMode};
use crate::menu::format_price;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();
    let th = app.theme;

    // Layout: header(3) + search(3) + list(min) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    // ── Header ──
    let header_text = format!(" Menu   [{} items]", app.item_count());
    let header = Paragraph::new(header_text)
        .style(Style::default().fg(th.accent()).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(th.dim())),
        );
    frame.render_widget(header, chunks[0]);

    // ── Search bar ──
    let search_style = match app.input_mode {
        InputMode::Editing => Style::default().fg(th.accent()),
        InputMode::Normal => Style::default().fg(th.dim()),
    };
    let search_label = if app.input_mode == InputMode::Editing {
        " Search (Enter to apply, Esc to cancel): "
    } else {
        " Search (/): "
    };
    let search_text = format!("{}{}", search_label, app.query);
    let search_bar = Paragraph::new(search_text).style(search_style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(search_style)
            .title(" Search "),
    );
    frame.render_widget(search_bar, chunks[1]);

    if app.input_mode == InputMode::Editing {
        let cursor_x = chunks[1].x + search_label.len() as u16 + app.query.width() as u16;
        let cursor_y = chunks[1].y + 1;
        frame.set_cursor_position((cursor_x, cursor_y));
    }

    // ── Menu body ──
    if let Some(message) = &app.load_error {
        render_error_notice(app, frame, chunks[2], message);
    } else {
        render_sections(app, frame, chunks[2]);
    }

    // ── Status bar ──
    let key = |label: &'static str| {
        Span::styled(
            label,
            Style::default().fg(th.accent()).add_modifier(Modifier::BOLD),
        )
    };
    let status_line = Line::from(vec![
        key(" ↑↓"),
        Span::raw(" Navigate  "),
        key("/"),
        Span::raw(" Search  "),
        key("Enter"),
        Span::raw(" Detail  "),
        key("t"),
        Span::raw(" Theme  "),
        key("q"),
        Span::raw(" Quit  "),
        Span::styled(&app.status_msg, Style::default().fg(th.dim())),
    ]);
    frame.render_widget(Paragraph::new(status_line), chunks[3]);
}

/// Static notice painted in place of the menu when the load failed.
fn render_error_notice(app: &App, frame: &mut Frame, area: Rect, message: &str) {
    let th = app.theme;
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(th.text()),
        )),
        Line::from(""),
        Line::from(Span::styled(
            " Check that the menu document exists and is valid JSON.",
            Style::default().fg(th.dim()),
        )),
    ];
    let notice = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ratatui::style::Color::Red))
            .title(" Error "),
    );
    frame.render_widget(notice, area);
}

fn render_sections(app: &App, frame: &mut Frame, area: Rect) {
    let th = app.theme;
    let currency = app
        .menu
        .as_ref()
        .map(|m| m.currency.as_str())
        .unwrap_or(crate::menu::DEFAULT_CURRENCY);

    let mut rows: Vec<ListItem> = Vec::new();
    let mut selected_row = None;
    let mut flat = 0usize;

    for section in &app.view {
        let hint = section.hint.as_deref().unwrap_or("");
        rows.push(ListItem::new(Line::from(vec![
            Span::styled(
                format!("{} ", section.title),
                Style::default().fg(th.accent()).add_modifier(Modifier::BOLD),
            ),
            Span::styled(hint.to_string(), Style::default().fg(th.dim())),
        ])));

        for item in &section.items {
            if flat == app.selected {
                selected_row = Some(rows.len());
            }

            let price = format_price(item.price.as_ref(), currency);
            let text_width = (area.width as usize).saturating_sub(price.width() + 8);
            let mut spans = vec![Span::styled(
                format!("  {}", truncate_str(&item.name, text_width)),
                Style::default().fg(th.text()),
            )];
            if let Some(desc) = &item.desc {
                let remaining = text_width.saturating_sub(item.name.width() + 3);
                if remaining > 1 {
                    spans.push(Span::styled(
                        format!("  {}", truncate_str(desc, remaining)),
                        Style::default().fg(th.dim()),
                    ));
                }
            }
            spans.push(Span::styled(
                format!("  {price}"),
                Style::default().fg(th.price()),
            ));
            rows.push(ListItem::new(Line::from(spans)));
            flat += 1;
        }
    }

    let list_widget = List::new(rows)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(th.dim()))
                .title(" Sections ")
                .title_bottom(
                    Line::from(format!(" {} sections ", app.view.len()))
                        .alignment(Alignment::Right),
                ),
        )
        .highlight_style(
            Style::default()
                .bg(th.highlight_bg())
                .fg(th.highlight_fg())
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let mut list_state = ListState::default();
    list_state.select(selected_row);
    frame.render_stateful_widget(list_widget, area, &mut list_state);
}

/// Truncate a string to `max_width` display columns, adding "…" if cut.
fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut out = String::new();
    let budget = max_width.saturating_sub(1);
    for c in s.chars() {
        if out.width() + c.width().unwrap_or(0) > budget {
            break;
        }
        out.push(c);
    }
    out.push('…');
    out
}
