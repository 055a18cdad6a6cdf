use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::editor::TextBuffer;

use super::App;

/// Apply a key to a text field. Returns `false` for keys the field ignores.
fn edit_buffer(buffer: &mut TextBuffer, key: KeyEvent, multiline: bool) -> bool {
    match key.code {
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            buffer.insert_char(c)
        }
        KeyCode::Enter if multiline => buffer.insert_newline(),
        KeyCode::Backspace => buffer.backspace(),
        KeyCode::Delete => buffer.delete(),
        KeyCode::Left => buffer.move_left(),
        KeyCode::Right => buffer.move_right(),
        KeyCode::Up if multiline => buffer.move_up(),
        KeyCode::Down if multiline => buffer.move_down(),
        KeyCode::Home => buffer.move_to_line_start(),
        KeyCode::End => buffer.move_to_line_end(),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            buffer.clear();
            buffer.modified = true;
        }
        _ => return false,
    }
    true
}

impl App<'_> {
    /// Every edit of the SQL text runs it.
    pub(super) fn handle_sql_input(&mut self, key: KeyEvent) -> Result<()> {
        if edit_buffer(&mut self.sql_editor, key, true) && self.sql_editor.modified {
            self.sql_editor.modified = false;
            let sql = self.sql_editor.text();
            self.session.edit_sql(&sql);
            self.reset_results_view();
        }
        Ok(())
    }

    /// Every edit of the filter re-runs the selected table with it.
    pub(super) fn handle_filter_input(&mut self, key: KeyEvent) -> Result<()> {
        if edit_buffer(&mut self.filter_input, key, false) && self.filter_input.modified {
            self.filter_input.modified = false;
            let predicate = self.filter_input.text();
            self.session.set_filter(&predicate);
            if self.sql_editor.text() != self.session.sql() {
                self.sql_editor.set_text(self.session.sql());
            }
            self.reset_results_view();
        }
        Ok(())
    }
}
