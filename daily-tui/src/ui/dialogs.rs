use crate::app::{DeleteTarget, Dialog, TextInput, TodoForm, TodoFormField};
use daily_api::Category;

use super::utils::{centered_rect, input_spans};
use super::*;

pub fn render_dialog(frame: &mut Frame, app: &mut App) {
    let Some(dialog) = &app.dialog else {
        return;
    };
    match dialog {
        Dialog::TodoForm(form) => render_todo_form(frame, form, app.categories.all()),
        Dialog::NewCategory(input) => {
            render_prompt(frame, " New Category ", "Name", input, "Enter add · Esc cancel");
        }
        Dialog::NaturalLanguage(input) => {
            let hint = if app.nl_in_flight {
                "Parsing…"
            } else {
                "e.g. \"Finish the slides by Friday, high priority\" · Enter create · Esc cancel"
            };
            let area = render_prompt(frame, " Describe a Task ", "Sentence", input, hint);
            if app.nl_in_flight {
                let throbber = throbber_widgets_tui::Throbber::default()
                    .throbber_style(Style::default().fg(Color::Yellow))
                    .throbber_set(throbber_widgets_tui::BRAILLE_SIX)
                    .use_type(throbber_widgets_tui::WhichUse::Spin);
                let spot = Rect {
                    x: area.x + area.width.saturating_sub(4),
                    y: area.y,
                    width: 2,
                    height: 1,
                };
                frame.render_stateful_widget(throbber, spot, &mut app.throbber_state);
            }
        }
        Dialog::ObjectiveForm {
            objective_id,
            title,
        } => {
            let heading = if objective_id.is_some() {
                " Rename Objective "
            } else {
                " New Objective "
            };
            render_prompt(frame, heading, "Title", title, "Enter save · Esc cancel");
        }
        Dialog::KeyResultForm { content, .. } => {
            render_prompt(
                frame,
                " New Key Result ",
                "Key result",
                content,
                "Enter add · Esc cancel",
            );
        }
        Dialog::ConfirmDelete(target) => render_confirm_delete(frame, target),
    }
}

/// Single-line input dialog. Returns the dialog area.
fn render_prompt(frame: &mut Frame, title: &str, label: &str, input: &TextInput, hint: &str) -> Rect {
    let width = frame.area().width.saturating_sub(4).min(72);
    let area = centered_rect(width, 7, frame.area());
    let block = dialog_block(frame, area, title);

    let mut field = vec![Span::styled(
        format!("{label}: "),
        Style::default().fg(Color::Yellow),
    )];
    field.extend(input_spans(input, true));

    let text = vec![
        Line::from(""),
        Line::from(field),
        Line::from(""),
        Line::from(Span::styled(
            hint.to_string(),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(text).block(block), area);
    area
}

fn render_todo_form(frame: &mut Frame, form: &TodoForm, categories: &[Category]) {
    let width = frame.area().width.saturating_sub(4).min(72);
    let area = centered_rect(width, 14, frame.area());
    let title = if form.editing.is_some() {
        " Edit Todo "
    } else {
        " New Todo "
    };
    let block = dialog_block(frame, area, title);

    let category = form
        .category_id
        .and_then(|id| categories.iter().find(|c| c.id == id))
        .map_or("None", |c| c.name.as_str());

    let text_row = |label: &str, field: TodoFormField, input: &TextInput| {
        let focused = form.focused == field;
        let mut spans = vec![label_span(label, focused)];
        spans.extend(input_spans(input, focused));
        Line::from(spans)
    };
    let choice_row = |label: &str, field: TodoFormField, value: &str| {
        let focused = form.focused == field;
        let value = if focused {
            format!("‹ {value} ›")
        } else {
            value.to_string()
        };
        Line::from(vec![
            label_span(label, focused),
            Span::styled(value, Style::default().fg(Color::White)),
        ])
    };

    let mut lines = vec![
        Line::from(""),
        text_row("Title", TodoFormField::Title, &form.title),
        text_row("Description", TodoFormField::Description, &form.description),
        choice_row("Status", TodoFormField::Status, form.status.label()),
        choice_row("Priority", TodoFormField::Priority, form.priority.label()),
        text_row("Due (YYYY-MM-DD)", TodoFormField::DueDate, &form.due_date),
        choice_row("Category", TodoFormField::Category, category),
        Line::from(""),
    ];
    match &form.error {
        Some(error) => lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        ))),
        None => lines.push(Line::from("")),
    }
    lines.push(Line::from(Span::styled(
        "Tab next field · ←/→ change · Enter save · Esc cancel",
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn label_span(label: &str, focused: bool) -> Span<'static> {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Span::styled(format!("{label:<18}"), style)
}

fn render_confirm_delete(frame: &mut Frame, target: &DeleteTarget) {
    let area = centered_rect(56, 9, frame.area());
    frame.render_widget(Clear, area);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            truncate_chars(target.label(), 48),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[y] Yes", Style::default().fg(Color::Red)),
            Span::raw("    "),
            Span::styled("[n] No", Style::default().fg(Color::White)),
        ]),
    ];

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(target.prompt())
                .padding(Padding::horizontal(1)),
        )
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
