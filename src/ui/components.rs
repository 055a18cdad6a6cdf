use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, Wrap},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::db::{CellValue, QueryResult};
use crate::ui::{is_sql_keyword, App, Focus, Theme};

const MAX_CELL_WIDTH: usize = 40;

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(app.sidebar_width), Constraint::Min(0)])
        .split(chunks[1]);

    draw_sidebar(frame, app, main_chunks[0]);
    draw_main_panel(frame, app, main_chunks[1]);

    draw_status_bar(frame, app, chunks[2]);
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let table = app
        .session
        .selected_table()
        .map(|t| format!(" | {}", t))
        .unwrap_or_default();
    let header_text = format!(" litelens | {}{}", app.source, table);
    let header = Paragraph::new(header_text).style(app.theme.header());
    frame.render_widget(header, area);
}

fn draw_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let focused = app.focus == Focus::Tables;
    let tables = app.session.tables();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style(focused))
        .title(format!(" Tables ({}) ", tables.len()))
        .title_style(theme.title_style(focused));

    if tables.is_empty() {
        let text = Paragraph::new("No tables").style(theme.muted()).block(block);
        frame.render_widget(text, area);
        return;
    }

    let items: Vec<ListItem> = tables
        .iter()
        .map(|name| {
            let style = if app.session.selected_table() == Some(name.as_str()) {
                Style::default()
                    .fg(theme.text_accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text_primary)
            };
            ListItem::new(format!(" {}", name)).style(style)
        })
        .collect();

    let list = List::new(items).block(block).highlight_style(theme.selected());
    let mut state = ListState::default().with_selected(Some(app.sidebar_selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_main_panel(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(35), // SQL editor
            Constraint::Length(3),      // Filter
            Constraint::Min(0),         // Results
            Constraint::Length(1),      // Error line
        ])
        .split(area);

    draw_sql_editor(frame, app, chunks[0]);
    draw_filter(frame, app, chunks[1]);
    draw_results(frame, app, chunks[2]);
    draw_error_line(frame, app, chunks[3]);
}

fn draw_sql_editor(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let focused = app.focus == Focus::Sql;
    let editor = &app.sql_editor;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style(focused))
        .title(" SQL ")
        .title_style(theme.title_style(focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let visible_height = inner.height as usize;
    let scroll = (editor.cursor_y + 1).saturating_sub(visible_height.max(1));

    let lines: Vec<Line> = editor
        .lines
        .iter()
        .skip(scroll)
        .take(visible_height)
        .map(|line| highlight_sql_line(line, theme))
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);

    if focused {
        let x = inner.x + cursor_column(editor.current_line(), editor.cursor_x);
        let y = inner.y + (editor.cursor_y - scroll) as u16;
        if y < inner.y + inner.height {
            frame.set_cursor_position((x, y));
        }
    }
}

fn draw_filter(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let focused = app.focus == Focus::Filter;
    let input = &app.filter_input;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style(focused))
        .title(" Filter (WHERE) ")
        .title_style(theme.title_style(focused));
    let inner = block.inner(area);

    let paragraph = if input.is_empty() && !focused {
        Paragraph::new("e.g. id > 10").style(theme.muted())
    } else {
        Paragraph::new(input.current_line().to_string())
            .style(Style::default().fg(theme.text_primary))
    };
    frame.render_widget(paragraph.block(block), area);

    if focused {
        let x = inner.x + cursor_column(input.current_line(), input.cursor_x);
        frame.set_cursor_position((x, inner.y));
    }
}

fn draw_results(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let focused = app.focus == Focus::Results;
    let result = app.session.result();

    let title = if result.columns.is_empty() {
        " Results ".to_string()
    } else {
        let time_ms = result.execution_time.as_secs_f64() * 1000.0;
        format!(
            " Results - {} rows x {} cols ({:.2}ms) ",
            result.row_count,
            result.columns.len(),
            time_ms
        )
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style(focused))
        .title(title)
        .title_style(theme.title_style(focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if result.columns.is_empty() {
        let text = Paragraph::new("Select a table or type a SELECT statement.")
            .style(theme.muted());
        frame.render_widget(text, inner);
    } else {
        draw_result_table(frame, app, result, inner);
    }
}

fn draw_result_table(frame: &mut Frame, app: &App, result: &QueryResult, area: Rect) {
    let theme = &app.theme;

    let col_widths: Vec<Constraint> = result
        .columns
        .iter()
        .map(|col| Constraint::Length((col.max_width.min(MAX_CELL_WIDTH) + 2) as u16))
        .collect();

    let header_cells: Vec<Cell> = result
        .columns
        .iter()
        .map(|col| {
            Cell::from(truncate_to_width(&col.name, MAX_CELL_WIDTH)).style(
                Style::default()
                    .fg(theme.text_primary)
                    .add_modifier(Modifier::BOLD),
            )
        })
        .collect();
    let header = Row::new(header_cells)
        .style(Style::default().bg(theme.bg_secondary))
        .height(1);

    // Header takes one line
    let visible_height = area.height.saturating_sub(1).max(1) as usize;
    let start_row = app
        .result_scroll_y
        .max((app.result_selected_row + 1).saturating_sub(visible_height))
        .min(app.result_selected_row);

    let rows: Vec<Row> = result
        .rows
        .iter()
        .enumerate()
        .skip(start_row)
        .take(visible_height)
        .map(|(row_idx, row)| {
            let cells: Vec<Cell> = row
                .iter()
                .map(|cell| {
                    let style = if row_idx == app.result_selected_row && app.focus == Focus::Results
                    {
                        Style::default().bg(theme.bg_highlight).fg(theme.text_primary)
                    } else if matches!(cell, CellValue::Null) {
                        Style::default().fg(theme.text_muted)
                    } else {
                        Style::default().fg(theme.text_primary)
                    };
                    Cell::from(truncate_to_width(&cell.display(), MAX_CELL_WIDTH)).style(style)
                })
                .collect();
            Row::new(cells).height(1)
        })
        .collect();

    let table = Table::new(rows, &col_widths).header(header);
    frame.render_widget(table, area);
}

fn draw_error_line(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let line = match app.session.error() {
        Some(err) => Line::from(vec![
            Span::styled(
                format!(" {}: ", err.category()),
                theme.status_error().add_modifier(Modifier::BOLD),
            ),
            Span::styled(err.to_string(), theme.status_error()),
        ]),
        None => Line::from(""),
    };
    frame.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }), area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let (left_text, left_style) = if app.session.error().is_some() {
        (
            " Last change failed, showing previous result".to_string(),
            Style::default().fg(theme.error).bg(theme.bg_secondary),
        )
    } else {
        (
            format!(" {} tables", app.session.tables().len()),
            Style::default().fg(theme.success).bg(theme.bg_secondary),
        )
    };

    let right_text = "Tab Focus | F5 Reload | Ctrl+Q/D Quit ";

    let left_len = left_text.width() as u16;
    let right_len = right_text.width() as u16;
    let padding = area.width.saturating_sub(left_len + right_len);

    let status_line = Line::from(vec![
        Span::styled(left_text, left_style),
        Span::styled(
            " ".repeat(padding as usize),
            Style::default().bg(theme.bg_secondary),
        ),
        Span::styled(
            right_text,
            Style::default().fg(theme.text_muted).bg(theme.bg_secondary),
        ),
    ]);
    frame.render_widget(Paragraph::new(status_line), area);
}

fn highlight_sql_line<'a>(line: &str, theme: &Theme) -> Line<'a> {
    let base = Style::default().fg(theme.text_primary);
    let mut spans = Vec::new();
    let mut word = String::new();
    let mut in_string = false;
    let mut literal = String::new();

    for c in line.chars() {
        if in_string {
            literal.push(c);
            if c == '\'' {
                spans.push(Span::styled(
                    std::mem::take(&mut literal),
                    base.fg(theme.success),
                ));
                in_string = false;
            }
        } else if c.is_alphanumeric() || c == '_' {
            word.push(c);
        } else {
            if !word.is_empty() {
                spans.push(word_span(&std::mem::take(&mut word), theme, base));
            }
            if c == '\'' {
                in_string = true;
                literal.push(c);
            } else {
                spans.push(Span::styled(c.to_string(), base));
            }
        }
    }
    if !word.is_empty() {
        spans.push(word_span(&word, theme, base));
    }
    if !literal.is_empty() {
        spans.push(Span::styled(literal, base.fg(theme.success)));
    }
    Line::from(spans)
}

fn word_span<'a>(word: &str, theme: &Theme, base: Style) -> Span<'a> {
    let style = if is_sql_keyword(word) {
        base.fg(theme.syntax_keyword).add_modifier(Modifier::BOLD)
    } else {
        base
    };
    Span::styled(word.to_string(), style)
}

/// Terminal column of the character at `cursor_x`.
fn cursor_column(line: &str, cursor_x: usize) -> u16 {
    line.chars()
        .take(cursor_x)
        .map(|c| c.width().unwrap_or(0))
        .sum::<usize>() as u16
}

fn truncate_to_width(text: &str, max: usize) -> String {
    let mut width = 0;
    text.chars()
        .take_while(|c| {
            width += c.width().unwrap_or(0);
            width <= max
        })
        .collect()
}
