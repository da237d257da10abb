use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use crate::mail_list::MailListView;
use crate::terminal::state::UiState;

pub fn render(f: &mut Frame, ui: &mut UiState, view: &MailListView, tag: &str) {
    let [left, right] =
        Layout::horizontal([Constraint::Percentage(35), Constraint::Percentage(65)])
            .margin(1)
            .areas(f.area());

    // LEFT: list
    let list_block = Block::default()
        .title(format!(" {tag} ({}) ", view.rows().len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let items: Vec<ListItem> = view
        .rows()
        .iter()
        .map(|row| {
            let marker = if row.checked { "[x] " } else { "[ ] " };
            let subject_style = if row.selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            let head = Line::from(vec![
                Span::raw(marker),
                Span::styled(row.subject.clone(), subject_style),
            ]);
            let meta = Line::from(Span::styled(
                format!("    {}  {}", row.from, row.formatted_date),
                Style::default().fg(Color::Gray),
            ));
            ListItem::new(Text::from(vec![head, meta]))
        })
        .collect();

    let list = List::new(items)
        .block(list_block)
        .highlight_symbol("➜ ")
        .highlight_style(Style::default().fg(Color::Green));

    f.render_stateful_widget(list, left, &mut ui.cursor);

    // RIGHT: opened mail
    let body_title = match &ui.opened {
        Some(m) => format!(" {} ", m.subject),
        None => " Mail ".to_string(),
    };
    let body_block = Block::default()
        .title(body_title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let body_text = match &ui.opened {
        Some(m) => m.body.clone(),
        None => "No mail open.\nEnter opens the mail under the cursor.".to_string(),
    };

    let p = Paragraph::new(body_text)
        .block(body_block)
        .wrap(Wrap { trim: false })
        .scroll((ui.body_scroll, 0));

    f.render_widget(p, right);

    // Footer hints + status
    let [_, footer] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(f.area());

    let keycap = Style::default().add_modifier(Modifier::BOLD);
    let mut spans = vec![
        Span::styled("j/k", keycap),
        Span::raw(" move  "),
        Span::styled("Enter", keycap),
        Span::raw(" open  "),
        Span::styled("Space", keycap),
        Span::raw(" check  "),
        Span::styled("x", keycap),
        Span::raw(" checked  "),
        Span::styled("q", keycap),
        Span::raw(" quit"),
    ];
    if ui.has_checked {
        spans.push(Span::raw("  "));
        spans.push(Span::styled("●", Style::default().fg(Color::Green)));
    }
    if !ui.notice.is_empty() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            ui.notice.clone(),
            Style::default().fg(Color::Cyan),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), footer);
}
