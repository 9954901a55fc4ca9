use crate::app::{App, BannerKind, Tab};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Tabs},
    Frame,
};

mod dialogs;
mod okr_view;
mod todo_view;
pub(crate) mod utils;

pub use utils::truncate_chars;

pub fn render(frame: &mut Frame, app: &mut App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, app, root[0]);
    render_banner(frame, app, root[1]);
    match app.tab {
        Tab::Daily => todo_view::render_todo_view(frame, app, root[2]),
        Tab::Okr => okr_view::render_okr_view(frame, app, root[2]),
    }
    render_footer(frame, app, root[3]);

    if app.dialog.is_some() {
        dialogs::render_dialog(frame, app);
    }
}

fn render_header(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(40)])
        .split(area);

    let selected = match app.tab {
        Tab::Daily => 0,
        Tab::Okr => 1,
    };
    let tabs = Tabs::new(vec![" Daily ", " OKR "])
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(tabs, chunks[0]);

    let busy = app.is_loading || app.nl_in_flight;
    let throbber = throbber_widgets_tui::Throbber::default()
        .label(app.api_url.clone())
        .style(Style::default().fg(Color::DarkGray))
        .throbber_style(Style::default().fg(Color::Yellow))
        .throbber_set(throbber_widgets_tui::BRAILLE_SIX)
        .use_type(if busy {
            throbber_widgets_tui::WhichUse::Spin
        } else {
            throbber_widgets_tui::WhichUse::Full
        });
    let throbber_area = Rect {
        height: 1,
        ..chunks[1]
    };
    frame.render_stateful_widget(throbber, throbber_area, &mut app.throbber_state);
}

fn render_banner(frame: &mut Frame, app: &App, area: Rect) {
    let Some(banner) = &app.banner else {
        return;
    };
    let color = match banner.kind {
        BannerKind::Success => Color::Green,
        BannerKind::Error => Color::Red,
    };
    let paragraph = Paragraph::new(Line::from(Span::styled(
        banner.message.clone(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let hints: &[(&str, &str)] = match app.tab {
        Tab::Daily => &[
            ("a", "add"),
            ("n", "sentence"),
            ("e", "edit"),
            ("space", "toggle"),
            ("d", "delete"),
            ("s/p/f", "filter"),
            ("0", "reset"),
            ("c", "category"),
            ("r", "refresh"),
            ("tab", "OKR"),
            ("q", "quit"),
        ],
        Tab::Okr => &[
            ("n", "objective"),
            ("a", "key result"),
            ("e", "rename"),
            ("space", "toggle"),
            ("d", "delete"),
            ("tab", "daily"),
            ("q", "quit"),
        ],
    };
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, label) in hints {
        spans.push(Span::styled(
            format!(" {key}"),
            Style::default().fg(Color::Yellow),
        ));
        spans.push(Span::styled(
            format!(" {label} "),
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Bordered block for overlays, drawn after clearing `area`.
fn dialog_block(frame: &mut Frame, area: Rect, title: &str) -> Block<'static> {
    frame.render_widget(Clear, area);
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(title.to_string())
        .padding(Padding::horizontal(1))
}
