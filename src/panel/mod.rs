//! The UserPanel controller.
//!
//! A `UserPanel` owns its state (`users`, `selected`) and the [`Page`] it
//! renders into. Every backend call is awaited in place and dependent steps
//! (create then refresh, delete then refresh) are sequenced explicitly. All
//! operations take `&mut self`, so one panel never has two actions in flight.
//!
//! A mutation counts as finished once the backend answers, whatever the
//! status; the follow-up refresh then shows the backend's view. Transport and
//! decoding failures are logged and leave the page as it was.

pub mod client;
pub mod config;
pub mod errors;
pub mod page;
pub mod prompt;
pub mod terminal;

#[cfg(test)]
mod testing;

pub use client::{HttpUsersApi, UsersApi};
pub use config::PanelConfig;
pub use errors::AppError;
pub use page::{ListRow, Page};
pub use prompt::{Prompt, ScriptedPrompt};

use crate::model::User;
use tracing::{debug, error, info, warn};

pub const EMPTY_NAME_ALERT: &str = "Please enter a user name";

/// What an operation ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Preconditions not met; nothing was sent.
    Skipped,
    /// The user declined the confirmation prompt.
    Cancelled,
    /// The backend answered and the follow-up ran.
    Completed,
    /// The request never got an answer (or the answer was unreadable).
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPanelState {
    /// As last fetched; render-only.
    pub users: Vec<User>,
    pub selected: Option<User>,
}

#[derive(Debug)]
pub struct UserPanel<A, P> {
    api: A,
    prompt: P,
    state: UserPanelState,
    page: Page,
}

impl<A: UsersApi, P: Prompt> UserPanel<A, P> {
    pub fn new(api: A, prompt: P) -> Self {
        Self {
            api,
            prompt,
            state: UserPanelState::default(),
            page: Page::default(),
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn state(&self) -> &UserPanelState {
        &self.state
    }

    pub fn selected(&self) -> Option<&User> {
        self.state.selected.as_ref()
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    pub fn prompt_mut(&mut self) -> &mut P {
        &mut self.prompt
    }

    /// Initial load, run once the page is ready.
    pub async fn init(&mut self) {
        self.refresh_list().await;
    }

    /// Re-fetches the list and re-renders every row.
    ///
    /// A failed fetch renders the placeholder. The selection is left alone
    /// either way.
    pub async fn refresh_list(&mut self) -> Outcome {
        match self.api.list_users().await {
            Ok(users) => {
                debug!("rendering {} users", users.len());
                self.state.users = users;
                self.page.render_users(&self.state.users);
                Outcome::Completed
            }
            Err(err) => {
                error!("Error fetching users: {err}");
                self.state.users.clear();
                self.page.render_placeholder();
                Outcome::Failed
            }
        }
    }

    /// Selects the user shown at `index`. Placeholder and out-of-range rows
    /// are ignored.
    pub fn select(&mut self, index: usize) -> Outcome {
        let Some(user) = self.page.rows.get(index).and_then(ListRow::user).cloned() else {
            return Outcome::Skipped;
        };

        self.page.mark_selected(index);
        self.page.show_selection(Some(&user));
        self.page.edit_form_visible = false;
        self.state.selected = Some(user);

        Outcome::Completed
    }

    /// Selects the rendered row showing user `id`.
    pub fn select_id(&mut self, id: u64) -> Outcome {
        match self.page.row_index_of(id) {
            Some(index) => self.select(index),
            None => Outcome::Skipped,
        }
    }

    pub fn set_new_user_name(&mut self, value: &str) {
        self.page.new_user_name = value.to_string();
    }

    pub fn set_edit_name(&mut self, value: &str) {
        self.page.edit_name = value.to_string();
    }

    /// Creates a user from the new-user input.
    ///
    /// A blank name raises the alert and sends nothing. The input is cleared
    /// and the list refreshed once the backend answers.
    pub async fn create_user(&mut self) -> Outcome {
        let name = self.page.new_user_name.trim().to_string();
        if name.is_empty() {
            self.prompt.alert(EMPTY_NAME_ALERT);
            return Outcome::Skipped;
        }

        match self.api.create_user(&name).await {
            Ok(user) => info!(id = user.id, "User created"),
            Err(err) if err.is_response() => warn!("Create user rejected: {err}"),
            Err(err) => {
                error!("Error creating user: {err}");
                return Outcome::Failed;
            }
        }

        self.page.new_user_name.clear();
        self.refresh_list().await;
        Outcome::Completed
    }

    /// Opens the edit form pre-filled with the selected user's name.
    pub fn begin_edit(&mut self) -> Outcome {
        let Some(user) = &self.state.selected else {
            return Outcome::Skipped;
        };

        self.page.edit_name = user.name.clone();
        self.page.edit_form_visible = true;
        Outcome::Completed
    }

    /// Saves the edit form for the selected user.
    ///
    /// The in-memory selection keeps its old name until the user reselects.
    pub async fn save_edit(&mut self) -> Outcome {
        let name = self.page.edit_name.trim().to_string();
        let Some(id) = self.state.selected.as_ref().map(|user| user.id) else {
            return Outcome::Skipped;
        };
        if name.is_empty() {
            return Outcome::Skipped;
        }

        match self.api.update_user(id, &name).await {
            Ok(user) => info!(id = user.id, "User updated"),
            Err(err) if err.is_response() => warn!("Update user rejected: {err}"),
            Err(err) => {
                error!("Error updating user: {err}");
                return Outcome::Failed;
            }
        }

        self.page.edit_form_visible = false;
        self.refresh_list().await;
        Outcome::Completed
    }

    pub fn cancel_edit(&mut self) {
        self.page.edit_form_visible = false;
    }

    /// Deletes the selected user after confirmation, then clears the
    /// selection and refreshes.
    pub async fn delete_selected(&mut self) -> Outcome {
        let Some(user) = self.state.selected.clone() else {
            return Outcome::Skipped;
        };

        let question = format!("Are you sure you want to delete user \"{}\"?", user.name);
        if !self.prompt.confirm(&question) {
            return Outcome::Cancelled;
        }

        match self.api.delete_user(user.id).await {
            Ok(ack) => info!(id = user.id, "{}", ack.message),
            // Answered but refused (e.g. already gone): the selection is
            // still cleared, matching the refreshed list.
            Err(err) if err.is_response() => warn!("Delete user rejected: {err}"),
            Err(err) => {
                error!("Error deleting user: {err}");
                return Outcome::Failed;
            }
        }

        self.state.selected = None;
        self.page.show_selection(None);
        self.refresh_list().await;
        Outcome::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{Call, FakeUsersApi};
    use super::*;
    use crate::panel::page::{NO_SELECTION_TEXT, PLACEHOLDER_TEXT};

    fn panel(names: &[&str]) -> UserPanel<FakeUsersApi, ScriptedPrompt> {
        UserPanel::new(FakeUsersApi::with_users(names), ScriptedPrompt::answering(true))
    }

    async fn loaded(names: &[&str]) -> UserPanel<FakeUsersApi, ScriptedPrompt> {
        let mut panel = panel(names);
        panel.init().await;
        panel.api().clear_calls();
        panel
    }

    #[tokio::test]
    async fn refresh_renders_one_row_per_user() {
        let panel = loaded(&["Alice", "Bob", "Charlie"]).await;
        let texts: Vec<String> = panel.page().rows.iter().map(ListRow::text).collect();
        assert_eq!(
            texts,
            vec![
                "ID: 1, Name: Alice",
                "ID: 2, Name: Bob",
                "ID: 3, Name: Charlie"
            ]
        );
        assert_eq!(panel.state().users.len(), 3);
    }

    #[tokio::test]
    async fn empty_list_renders_unselectable_placeholder() {
        let mut panel = loaded(&[]).await;
        assert_eq!(panel.page().rows, vec![ListRow::Placeholder]);
        assert_eq!(panel.page().rows[0].text(), PLACEHOLDER_TEXT);
        assert_eq!(panel.select(0), Outcome::Skipped);
        assert_eq!(panel.selected(), None);
    }

    #[tokio::test]
    async fn failed_fetch_renders_placeholder_and_keeps_selection() {
        let mut panel = loaded(&["Alice"]).await;
        panel.select(0);

        panel.api().fail_list(Some(AppError::Http {
            status: 500,
            message: "boom".to_string(),
        }));
        assert_eq!(panel.refresh_list().await, Outcome::Failed);

        assert_eq!(panel.page().rows, vec![ListRow::Placeholder]);
        assert!(panel.state().users.is_empty());
        assert_eq!(panel.selected().map(|user| user.id), Some(1));
    }

    #[tokio::test]
    async fn selecting_a_then_b_marks_only_b() {
        let mut panel = loaded(&["Alice", "Bob"]).await;
        assert_eq!(panel.select(0), Outcome::Completed);
        assert_eq!(panel.select(1), Outcome::Completed);

        assert_eq!(panel.page().selected_count(), 1);
        assert!(panel.page().rows[1].is_selected());
        assert_eq!(panel.selected().map(|user| user.name.as_str()), Some("Bob"));
        assert_eq!(panel.page().info, "Selected user: ID 2, Name: Bob");
        assert!(panel.page().edit_enabled);
        assert!(panel.page().delete_enabled);
        assert!(panel.api().calls().is_empty());
    }

    #[tokio::test]
    async fn selecting_hides_open_edit_form() {
        let mut panel = loaded(&["Alice", "Bob"]).await;
        panel.select(0);
        panel.begin_edit();
        assert!(panel.page().edit_form_visible);

        panel.select(1);
        assert!(!panel.page().edit_form_visible);
    }

    #[tokio::test]
    async fn select_out_of_range_or_unknown_id_is_ignored() {
        let mut panel = loaded(&["Alice"]).await;
        assert_eq!(panel.select(5), Outcome::Skipped);
        assert_eq!(panel.select_id(42), Outcome::Skipped);
        assert_eq!(panel.select_id(1), Outcome::Completed);
        assert_eq!(panel.selected().map(|user| user.id), Some(1));
    }

    #[tokio::test]
    async fn blank_names_alert_and_send_nothing() {
        let mut panel = loaded(&["Alice"]).await;
        for name in ["", "   "] {
            panel.set_new_user_name(name);
            assert_eq!(panel.create_user().await, Outcome::Skipped);
        }

        assert!(panel.api().calls().is_empty());
        assert_eq!(panel.prompt().alerts, vec![EMPTY_NAME_ALERT, EMPTY_NAME_ALERT]);
        assert_eq!(panel.page().rows.len(), 1);
    }

    #[tokio::test]
    async fn create_posts_trimmed_name_then_refreshes_once() {
        let mut panel = loaded(&[]).await;
        panel.set_new_user_name("  Alice ");
        assert_eq!(panel.create_user().await, Outcome::Completed);

        assert_eq!(
            panel.api().calls(),
            vec![Call::Create("Alice".to_string()), Call::List]
        );
        assert_eq!(panel.api().list_calls(), 1);
        assert!(panel.page().new_user_name.is_empty());
        assert_eq!(panel.selected(), None);

        let alices = panel
            .page()
            .rows
            .iter()
            .filter(|row| row.user().is_some_and(|user| user.name == "Alice"))
            .count();
        assert_eq!(alices, 1);
    }

    #[tokio::test]
    async fn create_transport_failure_skips_refresh() {
        let mut panel = loaded(&["Alice"]).await;
        panel
            .api()
            .fail_mutations(Some(AppError::Network("offline".to_string())));
        panel.set_new_user_name("Bob");

        assert_eq!(panel.create_user().await, Outcome::Failed);
        assert_eq!(panel.api().calls(), vec![Call::Create("Bob".to_string())]);
        assert_eq!(panel.page().new_user_name, "Bob");
    }

    #[tokio::test]
    async fn create_answered_with_error_still_refreshes() {
        let mut panel = loaded(&["Alice"]).await;
        panel.api().fail_mutations(Some(AppError::Http {
            status: 400,
            message: "Missing name in request body".to_string(),
        }));
        panel.set_new_user_name("Bob");

        assert_eq!(panel.create_user().await, Outcome::Completed);
        assert_eq!(panel.api().list_calls(), 1);
        assert!(panel.page().new_user_name.is_empty());
    }

    #[tokio::test]
    async fn begin_edit_without_selection_is_noop() {
        let mut panel = loaded(&["Alice"]).await;
        assert_eq!(panel.begin_edit(), Outcome::Skipped);
        assert!(!panel.page().edit_form_visible);
    }

    #[tokio::test]
    async fn begin_edit_prefills_selected_name() {
        let mut panel = loaded(&["Alice"]).await;
        panel.select(0);
        assert_eq!(panel.begin_edit(), Outcome::Completed);
        assert!(panel.page().edit_form_visible);
        assert_eq!(panel.page().edit_name, "Alice");
    }

    #[tokio::test]
    async fn save_edit_with_blank_name_keeps_form_open() {
        let mut panel = loaded(&["Alice"]).await;
        panel.select(0);
        panel.begin_edit();
        panel.set_edit_name("   ");

        assert_eq!(panel.save_edit().await, Outcome::Skipped);
        assert!(panel.api().calls().is_empty());
        assert!(panel.page().edit_form_visible);
    }

    #[tokio::test]
    async fn save_edit_without_selection_is_noop() {
        let mut panel = loaded(&["Alice"]).await;
        panel.set_edit_name("Alicia");
        assert_eq!(panel.save_edit().await, Outcome::Skipped);
        assert!(panel.api().calls().is_empty());
    }

    #[tokio::test]
    async fn save_edit_puts_then_refreshes_leaving_selection_stale() {
        let mut panel = loaded(&["Alice", "Bob"]).await;
        panel.select(1);
        panel.begin_edit();
        panel.set_edit_name(" Robert ");

        assert_eq!(panel.save_edit().await, Outcome::Completed);
        assert_eq!(
            panel.api().calls(),
            vec![Call::Update(2, "Robert".to_string()), Call::List]
        );
        assert!(!panel.page().edit_form_visible);
        assert_eq!(panel.page().rows[1].text(), "ID: 2, Name: Robert");
        assert_eq!(panel.selected().map(|user| user.name.as_str()), Some("Bob"));
    }

    #[tokio::test]
    async fn save_edit_transport_failure_keeps_form_open() {
        let mut panel = loaded(&["Alice", "Bob"]).await;
        panel.select(1);
        panel.begin_edit();
        panel.set_edit_name("Robert");
        panel
            .api()
            .fail_mutations(Some(AppError::Timeout("timed out".to_string())));

        assert_eq!(panel.save_edit().await, Outcome::Failed);
        assert_eq!(
            panel.api().calls(),
            vec![Call::Update(2, "Robert".to_string())]
        );
        assert!(panel.page().edit_form_visible);
        assert_eq!(panel.page().edit_name, "Robert");
        assert_eq!(panel.selected().map(|user| user.id), Some(2));
    }

    #[tokio::test]
    async fn save_edit_answered_with_error_still_refreshes() {
        let mut panel = loaded(&["Alice", "Bob"]).await;
        panel.select(1);
        panel.begin_edit();
        panel.set_edit_name("Robert");
        panel.api().fail_mutations(Some(AppError::Http {
            status: 404,
            message: "User not found".to_string(),
        }));

        assert_eq!(panel.save_edit().await, Outcome::Completed);
        assert_eq!(
            panel.api().calls(),
            vec![Call::Update(2, "Robert".to_string()), Call::List]
        );
        assert!(!panel.page().edit_form_visible);
        assert_eq!(panel.page().rows[1].text(), "ID: 2, Name: Bob");
    }

    #[tokio::test]
    async fn cancel_edit_only_hides_form() {
        let mut panel = loaded(&["Alice"]).await;
        panel.select(0);
        panel.begin_edit();
        panel.cancel_edit();

        assert!(!panel.page().edit_form_visible);
        assert_eq!(panel.selected().map(|user| user.id), Some(1));
        assert!(panel.api().calls().is_empty());
    }

    #[tokio::test]
    async fn delete_without_selection_sends_nothing() {
        let mut panel = loaded(&["Alice"]).await;
        assert_eq!(panel.delete_selected().await, Outcome::Skipped);
        assert!(panel.api().calls().is_empty());
        assert!(panel.prompt().confirmations.is_empty());
    }

    #[tokio::test]
    async fn delete_confirmed_clears_selection_and_refreshes() {
        let mut panel = loaded(&["Alice", "Bob"]).await;
        panel.select(0);

        assert_eq!(panel.delete_selected().await, Outcome::Completed);
        assert_eq!(panel.api().calls(), vec![Call::Delete(1), Call::List]);
        assert_eq!(
            panel.prompt().confirmations,
            vec!["Are you sure you want to delete user \"Alice\"?"]
        );
        assert_eq!(panel.selected(), None);
        assert_eq!(panel.page().info, NO_SELECTION_TEXT);
        assert!(!panel.page().edit_enabled);
        assert!(!panel.page().delete_enabled);
        assert_eq!(panel.page().rows.len(), 1);
    }

    #[tokio::test]
    async fn delete_declined_changes_nothing() {
        let mut panel = UserPanel::new(
            FakeUsersApi::with_users(&["Alice"]),
            ScriptedPrompt::answering(false),
        );
        panel.init().await;
        panel.api().clear_calls();
        panel.select(0);

        assert_eq!(panel.delete_selected().await, Outcome::Cancelled);
        assert!(panel.api().calls().is_empty());
        assert_eq!(panel.selected().map(|user| user.id), Some(1));
        assert!(panel.page().delete_enabled);
    }

    #[tokio::test]
    async fn delete_transport_failure_keeps_selection() {
        let mut panel = loaded(&["Alice"]).await;
        panel.select(0);
        panel
            .api()
            .fail_mutations(Some(AppError::Timeout("slow".to_string())));

        assert_eq!(panel.delete_selected().await, Outcome::Failed);
        assert_eq!(panel.api().calls(), vec![Call::Delete(1)]);
        assert_eq!(panel.selected().map(|user| user.id), Some(1));
        assert!(panel.page().delete_enabled);
    }
}
