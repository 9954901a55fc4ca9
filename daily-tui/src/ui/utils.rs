use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
};

use crate::app::TextInput;

/// Helper function to create a centered rectangle
pub fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((r.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((r.height.saturating_sub(height)) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((r.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((r.width.saturating_sub(width)) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// First `max` characters of `text`, with an ellipsis when anything was cut.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}

/// Spans for a text input, with a block cursor when focused.
pub fn input_spans(input: &TextInput, focused: bool) -> Vec<Span<'static>> {
    let text_style = Style::default().fg(Color::White);
    if !focused {
        return vec![Span::styled(input.value.clone(), text_style)];
    }
    let (before, after) = input.split_at_cursor();
    let mut rest = after.chars();
    let under_cursor = rest.next().map(String::from).unwrap_or_else(|| " ".into());
    vec![
        Span::styled(before.to_string(), text_style),
        Span::styled(
            under_cursor,
            text_style.add_modifier(Modifier::REVERSED),
        ),
        Span::styled(rest.as_str().to_string(), text_style),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_adds_ellipsis_only_when_cut() {
        assert_eq!(truncate_chars("short", 20), "short");
        assert_eq!(truncate_chars("exactly five", 12), "exactly five");
        assert_eq!(truncate_chars("abcdef", 3), "abc…");
        assert_eq!(truncate_chars("完成季度目标评审", 4), "完成季度…");
    }

    #[test]
    fn focused_input_marks_cursor_cell() {
        let mut input = TextInput::from_str("abc");
        input.move_left();
        let spans = input_spans(&input, true);
        let texts: Vec<&str> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(texts, vec!["ab", "c", ""]);

        input.end();
        let spans = input_spans(&input, true);
        assert_eq!(spans[1].content, " ");
    }
}
