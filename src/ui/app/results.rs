use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use super::App;

const PAGE_ROWS: usize = 20;

impl App<'_> {
    pub(super) fn handle_results_input(&mut self, key: KeyEvent) -> Result<()> {
        let last_row = self.session.result().rows.len().saturating_sub(1);
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.result_selected_row = self.result_selected_row.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.result_selected_row = (self.result_selected_row + 1).min(last_row);
            }
            KeyCode::PageUp => {
                self.result_selected_row = self.result_selected_row.saturating_sub(PAGE_ROWS);
            }
            KeyCode::PageDown => {
                self.result_selected_row = (self.result_selected_row + PAGE_ROWS).min(last_row);
            }
            KeyCode::Home => {
                self.result_selected_row = 0;
            }
            KeyCode::End => {
                self.result_selected_row = last_row;
            }
            _ => return Ok(()),
        }
        self.auto_scroll_results();
        Ok(())
    }

    /// Keep the selected row inside the visible window.
    pub(crate) fn auto_scroll_results(&mut self) {
        let visible = PAGE_ROWS;
        if self.result_selected_row < self.result_scroll_y {
            self.result_scroll_y = self.result_selected_row;
        } else if self.result_selected_row >= self.result_scroll_y + visible {
            self.result_scroll_y = self.result_selected_row + 1 - visible;
        }
    }

    pub(crate) fn reset_results_view(&mut self) {
        self.result_selected_row = 0;
        self.result_scroll_y = 0;
    }
}
