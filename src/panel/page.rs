//! The visible surface the panel drives: the user list, the selected-user info
//! panel, the edit/delete buttons, the edit form and the two name inputs.
//! Front ends render a `Page`; they never mutate it behind the controller.

use crate::model::User;
use std::fmt;

pub const PLACEHOLDER_TEXT: &str = "No users found or error loading users.";
pub const NO_SELECTION_TEXT: &str = "No user selected.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListRow {
    User { user: User, selected: bool },
    /// Shown for an empty or failed fetch. Not selectable.
    Placeholder,
}

impl ListRow {
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            ListRow::User { user, .. } => user.to_string(),
            ListRow::Placeholder => PLACEHOLDER_TEXT.to_string(),
        }
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match self {
            ListRow::User { user, .. } => Some(user),
            ListRow::Placeholder => None,
        }
    }

    #[must_use]
    pub fn is_selected(&self) -> bool {
        matches!(self, ListRow::User { selected: true, .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub rows: Vec<ListRow>,
    pub info: String,
    pub edit_enabled: bool,
    pub delete_enabled: bool,
    pub edit_form_visible: bool,
    pub new_user_name: String,
    pub edit_name: String,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            info: NO_SELECTION_TEXT.to_string(),
            edit_enabled: false,
            delete_enabled: false,
            edit_form_visible: false,
            new_user_name: String::new(),
            edit_name: String::new(),
        }
    }
}

impl Page {
    /// Replaces every row. An empty slice renders the placeholder.
    pub fn render_users(&mut self, users: &[User]) {
        if users.is_empty() {
            self.render_placeholder();
            return;
        }

        self.rows = users
            .iter()
            .cloned()
            .map(|user| ListRow::User {
                user,
                selected: false,
            })
            .collect();
    }

    pub fn render_placeholder(&mut self) {
        self.rows = vec![ListRow::Placeholder];
    }

    /// Marks `index` as the only selected row.
    pub fn mark_selected(&mut self, index: usize) {
        for (position, row) in self.rows.iter_mut().enumerate() {
            if let ListRow::User { selected, .. } = row {
                *selected = position == index;
            }
        }
    }

    /// Updates the info panel and the edit/delete buttons for `user`.
    pub fn show_selection(&mut self, user: Option<&User>) {
        self.info = match user {
            Some(user) => format!("Selected user: ID {}, Name: {}", user.id, user.name),
            None => NO_SELECTION_TEXT.to_string(),
        };
        self.edit_enabled = user.is_some();
        self.delete_enabled = user.is_some();
    }

    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.rows.iter().filter(|row| row.is_selected()).count()
    }

    #[must_use]
    pub fn row_index_of(&self, id: u64) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| row.user().is_some_and(|user| user.id == id))
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Users:")?;
        for row in &self.rows {
            let marker = if row.is_selected() { '>' } else { ' ' };
            writeln!(f, " {marker} {}", row.text())?;
        }
        writeln!(f, "{}", self.info)?;

        let state = |enabled: bool| if enabled { "on" } else { "off" };
        write!(
            f,
            "[edit: {}] [delete: {}]",
            state(self.edit_enabled),
            state(self.delete_enabled)
        )?;
        if self.edit_form_visible {
            write!(f, "\nEditing name: {}", self.edit_name)?;
        }
        Ok(())
    }
}
