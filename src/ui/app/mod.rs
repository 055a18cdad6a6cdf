mod editor;
mod results;
mod sidebar;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::config::AppConfig;
use crate::db::Database;
use crate::editor::TextBuffer;
use crate::session::Session;
use crate::ui::Theme;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Focus {
    Tables,
    Sql,
    Filter,
    Results,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Tables => Focus::Sql,
            Focus::Sql => Focus::Filter,
            Focus::Filter => Focus::Results,
            Focus::Results => Focus::Tables,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Focus::Tables => Focus::Results,
            Focus::Sql => Focus::Tables,
            Focus::Filter => Focus::Sql,
            Focus::Results => Focus::Filter,
        }
    }
}

pub struct App<'db> {
    pub theme: Theme,
    pub focus: Focus,
    /// Shown in the header, usually the database path.
    pub source: String,

    pub session: Session<'db>,

    // Sidebar
    pub sidebar_width: u16,
    pub sidebar_selected: usize,

    // Inputs
    pub sql_editor: TextBuffer,
    pub filter_input: TextBuffer,

    // Results
    pub result_scroll_y: usize,
    pub result_selected_row: usize,
}

impl<'db> App<'db> {
    pub fn new(database: &'db dyn Database, source: String, config: &AppConfig) -> Self {
        Self {
            theme: Theme::named(config.theme),
            focus: Focus::Tables,
            source,

            session: Session::new(database),

            sidebar_width: config.sidebar_width,
            sidebar_selected: 0,

            sql_editor: TextBuffer::new(),
            filter_input: TextBuffer::new(),

            result_scroll_y: 0,
            result_selected_row: 0,
        }
    }

    /// Select `name` in the sidebar and show its rows.
    pub fn open_table(&mut self, name: &str) {
        if let Some(idx) = self.session.tables().iter().position(|t| t == name) {
            self.sidebar_selected = idx;
        }
        self.session.select_table(name);
        self.sync_inputs();
        self.reset_results_view();
    }

    pub fn handle_input(&mut self, key: KeyEvent) -> Result<()> {
        // Global shortcuts
        match key.code {
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return Ok(());
            }
            KeyCode::BackTab => {
                self.focus = self.focus.previous();
                return Ok(());
            }
            KeyCode::F(5) => {
                self.refresh_tables();
                return Ok(());
            }
            KeyCode::Esc if self.focus != Focus::Tables => {
                self.focus = Focus::Tables;
                return Ok(());
            }
            _ => {}
        }

        match self.focus {
            Focus::Tables => self.handle_sidebar_input(key),
            Focus::Sql => self.handle_sql_input(key),
            Focus::Filter => self.handle_filter_input(key),
            Focus::Results => self.handle_results_input(key),
        }
    }

    pub fn refresh_tables(&mut self) {
        self.session.refresh_tables();
        let count = self.session.tables().len();
        if self.sidebar_selected >= count {
            self.sidebar_selected = count.saturating_sub(1);
        }
    }

    /// Mirror the session's SQL and filter text into the input fields.
    pub(crate) fn sync_inputs(&mut self) {
        if self.sql_editor.text() != self.session.sql() {
            self.sql_editor.set_text(self.session.sql());
        }
        if self.filter_input.text() != self.session.filter() {
            self.filter_input.set_text(self.session.filter());
        }
    }
}
