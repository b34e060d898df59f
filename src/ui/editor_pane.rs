use crate::app::input::FieldInput;
use crate::app::state::*;
use crate::bridge::editor::{EditorInstance, EDITOR_MOUNT};
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::block::Padding;
use ratatui::widgets::{Block, Borders, Paragraph};
use serde_json::Value;
use unicode_width::UnicodeWidthStr;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.focus == FocusPanel::Editor;
    let (border_style, border_type) = if focused {
        (Theme::border_focused(), Theme::border_type_focused())
    } else {
        (Theme::border(), Theme::border_type())
    };

    let editor = state.bridge.editor();
    let title = match (state.bridge.pending(), editor) {
        (Some((_, data_type)), _) => {
            let frame_idx = (state.tick_count % SPINNER.len() as u64) as usize;
            format!(" loading {} {} ", data_type, SPINNER[frame_idx])
        }
        (None, Some(ed)) => {
            let heading = ed
                .schema()
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or(ed.data_type());
            format!(" {} ", heading)
        }
        (None, None) => format!(" {} ", EDITOR_MOUNT),
    };

    let block = Block::default()
        .title(title)
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style)
        .padding(Padding::horizontal(1));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(editor) = editor else {
        let hint = if state.gdb.is_some() {
            "Select an entry to edit it."
        } else {
            ""
        };
        frame.render_widget(Paragraph::new(hint).style(Theme::description()), inner);
        return;
    };

    let input = state.input.as_ref().filter(|_| focused);
    let form = form_lines(editor, focused, input);
    if form.lines.is_empty() {
        frame.render_widget(
            Paragraph::new("This entry has no editable fields.").style(Theme::description()),
            inner,
        );
        return;
    }

    let offset = form.cursor_line.saturating_sub(inner.height.saturating_sub(1) as usize);
    frame.render_widget(
        Paragraph::new(form.lines).scroll((offset as u16, 0)),
        inner,
    );

    if let (Some(input), Some(prefix)) = (input, form.input_prefix) {
        let x = inner.x + (prefix + input.cursor_column()) as u16;
        let y = inner.y + (form.cursor_line - offset) as u16;
        if inner.height > 0 && inner.width > 0 {
            frame.set_cursor_position((x.min(inner.right() - 1), y));
        }
    }
}

struct FormLines {
    lines: Vec<Line<'static>>,
    /// Row of the field under the cursor.
    cursor_line: usize,
    /// Display width before the value on the cursor row, when editing.
    input_prefix: Option<usize>,
}

fn form_lines(editor: &EditorInstance, focused: bool, input: Option<&FieldInput>) -> FormLines {
    let compact = editor.options().compact;
    let mut lines = Vec::new();
    let mut cursor_line = 0;
    let mut input_prefix = None;

    for (i, field) in editor.fields().iter().enumerate() {
        let at_cursor = i == editor.cursor();
        if at_cursor {
            cursor_line = lines.len();
        }

        let marker = if at_cursor && focused { "› " } else { "  " };
        let label = if field.required {
            format!("{}*: ", field.title)
        } else {
            format!("{}: ", field.title)
        };
        let label_style = if at_cursor && focused {
            Theme::field_label().add_modifier(Modifier::BOLD)
        } else {
            Theme::field_label()
        };

        let editing = input.filter(|inp| at_cursor && inp.field == i);
        let value_span = match editing {
            Some(inp) => {
                input_prefix = Some(marker.width() + label.width());
                Span::styled(inp.text.clone(), Theme::input_text().patch(Theme::field_cursor()))
            }
            None => Span::styled(display_value(editor.field_value(i)), Theme::field_value()),
        };

        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(label, label_style),
            value_span,
        ]));

        if let Some(err) = editor.error_for(i) {
            lines.push(Line::from(Span::styled(
                format!("    ✗ {}", err.message),
                Theme::error_message(),
            )));
        }
        if !compact {
            if let Some(desc) = &field.description {
                lines.push(Line::from(Span::styled(
                    format!("    {}", desc),
                    Theme::description(),
                )));
            }
        }
    }

    FormLines {
        lines,
        cursor_line,
        input_prefix,
    }
}

fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
