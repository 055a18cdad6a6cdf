use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use super::{App, Focus};

impl App<'_> {
    pub(super) fn handle_sidebar_input(&mut self, key: KeyEvent) -> Result<()> {
        let count = self.session.tables().len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                if self.sidebar_selected > 0 {
                    self.sidebar_selected -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.sidebar_selected < count.saturating_sub(1) {
                    self.sidebar_selected += 1;
                }
            }
            KeyCode::Home => {
                self.sidebar_selected = 0;
            }
            KeyCode::End => {
                self.sidebar_selected = count.saturating_sub(1);
            }
            KeyCode::Enter => {
                if let Some(name) = self.session.tables().get(self.sidebar_selected).cloned() {
                    self.open_table(&name);
                }
            }
            KeyCode::Right => {
                self.focus = Focus::Sql;
            }
            _ => {}
        }
        Ok(())
    }
}
