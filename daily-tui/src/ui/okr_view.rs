use crate::app::OkrRow;

use super::*;

pub fn render_okr_view(frame: &mut Frame, app: &App, body: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Objectives & Key Results ")
        .padding(Padding::horizontal(1));

    if app.okr.objectives().is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No objectives yet. Press [n] to set your first one.",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(empty, body);
        return;
    }

    let (lines, selected_line) = okr_lines(app);
    let inner_height = body.height.saturating_sub(2) as usize;
    let scroll = selected_line.saturating_sub(inner_height.saturating_sub(1));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((scroll as u16, 0));
    frame.render_widget(paragraph, body);
}

/// Lines for every objective card, plus the line index of the selected row.
fn okr_lines(app: &App) -> (Vec<Line<'static>>, usize) {
    let selected = app.selected_okr_row();
    let highlight = |line: Line<'static>, is_selected: bool| {
        if is_selected {
            line.style(Style::default().bg(Color::DarkGray))
        } else {
            line
        }
    };

    let mut lines = Vec::new();
    let mut selected_line = 0;
    for (i, objective) in app.okr.objectives().iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }

        let is_selected = selected
            == Some(&OkrRow::Objective {
                objective_id: objective.id.clone(),
            });
        if is_selected {
            selected_line = lines.len();
        }
        let progress = format!(
            "  {}/{}",
            objective.done_count(),
            objective.key_results.len()
        );
        lines.push(highlight(
            Line::from(vec![
                Span::styled(
                    objective.title.clone(),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(progress, Style::default().fg(Color::DarkGray)),
            ]),
            is_selected,
        ));

        if objective.key_results.is_empty() {
            lines.push(Line::from(Span::styled(
                "  No key results yet. Press [a] to add one.",
                Style::default().fg(Color::DarkGray),
            )));
            continue;
        }

        for kr in &objective.key_results {
            let is_selected = selected
                == Some(&OkrRow::KeyResult {
                    objective_id: objective.id.clone(),
                    kr_id: kr.id.clone(),
                });
            if is_selected {
                selected_line = lines.len();
            }
            let (checkbox, style) = if kr.done {
                (
                    "  [x] ",
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT),
                )
            } else {
                ("  [ ] ", Style::default().fg(Color::White))
            };
            lines.push(highlight(
                Line::from(vec![
                    Span::styled(checkbox, Style::default().fg(Color::Green)),
                    Span::styled(kr.content.clone(), style),
                ]),
                is_selected,
            ));
        }
    }
    (lines, selected_line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::test_app;

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn cards_show_progress_and_empty_hint() {
        let (mut app, _rx) = test_app();
        let ship = app.okr.create_objective("Ship v1").unwrap().unwrap();
        app.okr.add_key_result(&ship, "Write docs").unwrap();
        let kr = app.okr.add_key_result(&ship, "Fix bugs").unwrap().unwrap();
        app.okr.toggle_key_result(&ship, &kr).unwrap();
        app.okr.create_objective("Learn Rust").unwrap();
        app.rebuild_okr_rows();
        app.okr_cursor = 2;

        let (lines, selected_line) = okr_lines(&app);
        let texts: Vec<String> = lines.iter().map(text_of).collect();
        assert_eq!(
            texts,
            vec![
                "Ship v1  1/2",
                "  [ ] Write docs",
                "  [x] Fix bugs",
                "",
                "Learn Rust  0/0",
                "  No key results yet. Press [a] to add one.",
            ]
        );
        assert_eq!(selected_line, 2);
    }
}
