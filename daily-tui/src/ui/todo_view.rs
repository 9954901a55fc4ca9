use daily_api::{iso_date, Todo, TodoPriority, TodoStatus};
use ratatui::widgets::{List, ListItem, ListState};

use super::utils::truncate_chars;
use super::*;

const DESCRIPTION_PREVIEW_CHARS: usize = 60;

pub fn render_todo_view(frame: &mut Frame, app: &App, body: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(0)])
        .split(body);

    render_sidebar(frame, app, columns[0]);

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(columns[1]);
    render_filter_bar(frame, app, main[0]);
    render_todo_list(frame, app, main[1]);
}

fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Categories ")
        .padding(Padding::horizontal(1));

    let categories = app.categories.all();
    if categories.is_empty() {
        let hint = Paragraph::new(Line::from(Span::styled(
            "None yet [c] to add",
            Style::default().fg(Color::DarkGray),
        )))
        .block(block);
        frame.render_widget(hint, area);
        return;
    }

    let lines: Vec<Line> = categories
        .iter()
        .enumerate()
        .map(|(i, category)| {
            let active = app.filter.category_id == Some(category.id);
            let style = if active {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let key = if i < 9 {
                format!("{} ", i + 1)
            } else {
                "  ".to_string()
            };
            Line::from(vec![
                Span::styled(key, Style::default().fg(Color::DarkGray)),
                Span::styled(category.name.clone(), style),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_filter_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status = app.filter.status.map_or("All", |s| s.label());
    let priority = app.filter.priority.map_or("All", |p| p.label());
    let category = app
        .filter
        .category_id
        .and_then(|id| app.categories.name_of(id))
        .unwrap_or("All");

    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White);
    let line = Line::from(vec![
        Span::styled(" Status ", label),
        Span::styled(status.to_string(), value),
        Span::styled("  Priority ", label),
        Span::styled(priority.to_string(), value),
        Span::styled("  Category ", label),
        Span::styled(category.to_string(), value),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_todo_list(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Todos ({}) ", app.visible_todos.len()));

    if app.visible_todos.is_empty() {
        let message = if app.todos.all().is_empty() {
            "No todos yet. Press [a] to add one or [n] to describe one in a sentence."
        } else {
            "No todos match the current filters. Press [0] to reset."
        };
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(message, Style::default().fg(Color::DarkGray))),
        ])
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .iter_visible_todos()
        .map(|todo| ListItem::new(todo_lines(todo)))
        .collect();
    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    );
    let mut state = ListState::default().with_selected(Some(app.todo_cursor));
    frame.render_stateful_widget(list, area, &mut state);
}

fn todo_lines(todo: &Todo) -> Vec<Line<'static>> {
    let done = todo.status.is_done();
    let checkbox = match todo.status {
        TodoStatus::Done => "[x] ",
        TodoStatus::InProgress => "[~] ",
        TodoStatus::Pending => "[ ] ",
    };
    let title_style = if done {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(Color::White)
    };

    let mut first = vec![
        Span::styled(checkbox, Style::default().fg(status_color(todo.status))),
        Span::styled(todo.title.clone(), title_style),
        Span::raw("  "),
        badge(todo.status.label(), status_color(todo.status)),
        badge(todo.priority.label(), priority_color(todo.priority)),
    ];
    if let Some(due) = &todo.due_date {
        first.push(badge(&format!("due {}", iso_date::format(due)), Color::Cyan));
    }
    if let Some(name) = &todo.category_name {
        first.push(badge(name, Color::Magenta));
    }

    let mut lines = vec![Line::from(first)];
    if let Some(description) = todo.description.as_deref().filter(|d| !d.is_empty()) {
        lines.push(Line::from(Span::styled(
            format!("    {}", truncate_chars(description, DESCRIPTION_PREVIEW_CHARS)),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines
}

fn badge(text: &str, color: Color) -> Span<'static> {
    Span::styled(format!("[{text}] "), Style::default().fg(color))
}

fn status_color(status: TodoStatus) -> Color {
    match status {
        TodoStatus::Pending => Color::White,
        TodoStatus::InProgress => Color::Yellow,
        TodoStatus::Done => Color::Green,
    }
}

fn priority_color(priority: TodoPriority) -> Color {
    match priority {
        TodoPriority::Low => Color::DarkGray,
        TodoPriority::Medium => Color::Blue,
        TodoPriority::High => Color::Red,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn todo_lines_show_badges_and_truncated_description() {
        let todo: Todo = serde_json::from_value(serde_json::json!({
            "id": 1,
            "title": "Write report",
            "description": "x".repeat(80),
            "status": "in_progress",
            "priority": "high",
            "due_date": "2025-06-01",
            "category_id": 2,
            "category_name": "Study"
        }))
        .unwrap();

        let lines = todo_lines(&todo);
        let head = text_of(&lines[0]);
        assert!(head.starts_with("[~] Write report"));
        assert!(head.contains("[In progress]"));
        assert!(head.contains("[High]"));
        assert!(head.contains("[due 2025-06-01]"));
        assert!(head.contains("[Study]"));
        assert_eq!(text_of(&lines[1]), format!("    {}…", "x".repeat(60)));
    }

    #[test]
    fn uncategorized_todo_has_no_category_badge() {
        let todo: Todo = serde_json::from_value(serde_json::json!({
            "id": 1,
            "title": "Loose",
            "status": "pending",
            "priority": "low"
        }))
        .unwrap();

        let lines = todo_lines(&todo);
        assert_eq!(lines.len(), 1);
        assert_eq!(text_of(&lines[0]), "[ ] Loose  [Pending] [Low] ");
    }
}
