//! TUI application state machine.
//!
//! Owns the latest snapshot, the filter toggles, the selection, the delete
//! confirmation flow, and the action-error banner. Key handling returns
//! [`AppCommand`]s for the main loop to execute; dispatch outcomes come
//! back as [`ActionReport`]s so every state mutation happens on the app's
//! own thread of control.

use crossterm::event::{KeyCode, KeyEvent};
use podhelm_common::types::{Container, ContainerId};
use podhelm_core::dispatch::{ActionOutcome, ActionRequest, CommitOptions, LifecycleAction};
use podhelm_core::{DeleteFlow, DeleteFlowState, EmptyReason, ListingRow, listing};

use crate::poll::Snapshot;

/// Dismissible banner for failed start/stop/restart/commit actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    /// Headline, e.g. `Failed to stop container web`.
    pub message: String,
    /// Optional daemon-supplied error detail.
    pub detail: Option<String>,
}

/// What the keyboard currently edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    /// Keys drive selection and lifecycle actions.
    Normal,
    /// Keys edit the text filter.
    Filter,
    /// Keys edit the target image name for a commit.
    Commit {
        /// Image name being typed.
        image_name: String,
    },
}

/// Work the main loop performs on behalf of the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    /// Dispatch a lifecycle action and report its outcome back.
    Dispatch {
        /// Locally-known record of the target.
        container: Container,
        /// The request to dispatch.
        request: ActionRequest,
        /// Verb for banner composition (`start`, `stop`, ...).
        verb: &'static str,
        /// Whether the outcome feeds the delete flow instead of the banner.
        feeds_delete_flow: bool,
    },
}

/// A dispatch completion, delivered back to the app loop.
#[derive(Debug, Clone)]
pub struct ActionReport {
    /// Container the action targeted.
    pub target: ContainerId,
    /// Display name, for banner composition.
    pub names: String,
    /// Verb for banner composition.
    pub verb: &'static str,
    /// Whether the outcome feeds the delete flow.
    pub feeds_delete_flow: bool,
    /// The normalized outcome.
    pub outcome: ActionOutcome,
}

/// Root application state for the console.
#[derive(Debug)]
pub struct App {
    /// Whether the app should continue running.
    pub running: bool,
    /// Latest listing/statistics snapshot.
    pub snapshot: Snapshot,
    /// Keep only running containers visible.
    pub only_show_running: bool,
    /// Case-insensitive substring filter on name or image.
    pub text_filter: String,
    /// Index of the selected row within the visible set.
    pub selected_index: usize,
    /// Current keyboard mode.
    pub input_mode: InputMode,
    /// The delete confirmation flow.
    pub delete_flow: DeleteFlow,
    /// Action-error banner, if one is showing.
    pub banner: Option<Banner>,
}

impl App {
    /// Creates the application state with initial filter settings.
    #[must_use]
    pub fn new(only_show_running: bool, text_filter: String) -> Self {
        Self {
            running: true,
            snapshot: Snapshot::default(),
            only_show_running,
            text_filter,
            selected_index: 0,
            input_mode: InputMode::Normal,
            delete_flow: DeleteFlow::new(),
            banner: None,
        }
    }

    /// The currently visible rows under the active filters.
    #[must_use]
    pub fn visible_rows(&self) -> Vec<ListingRow<'_>> {
        listing::select(
            &self.snapshot.containers,
            &self.snapshot.stats,
            self.only_show_running,
            &self.text_filter,
        )
    }

    /// Caption to show when the visible set is empty.
    #[must_use]
    pub fn empty_caption(&self) -> &'static str {
        let reason: EmptyReason = listing::empty_reason(self.only_show_running, &self.text_filter);
        reason.caption()
    }

    /// The selected container, cloned out of the visible set.
    #[must_use]
    pub fn selected_container(&self) -> Option<Container> {
        self.visible_rows()
            .get(self.selected_index)
            .map(|row| row.container.clone())
    }

    /// Absorbs a fresh snapshot and keeps the selection in bounds.
    pub fn on_snapshot(&mut self, snapshot: Snapshot) {
        self.snapshot = snapshot;
        self.clamp_selection();
    }

    /// Absorbs a dispatch completion.
    ///
    /// Delete-path outcomes go to the state machine (which drops stale
    /// ones); anything else that failed becomes the banner.
    pub fn on_report(&mut self, report: ActionReport) {
        if report.feeds_delete_flow {
            self.delete_flow.apply_outcome(&report.target, report.outcome);
            return;
        }
        match report.outcome {
            ActionOutcome::Success => {}
            ActionOutcome::Conflict { reason } => {
                self.banner = Some(Banner {
                    message: format!("Failed to {} container {}", report.verb, report.names),
                    detail: Some(reason),
                });
            }
            ActionOutcome::Failure { reason } => {
                self.banner = Some(Banner {
                    message: format!("Failed to {} container {}", report.verb, report.names),
                    detail: reason,
                });
            }
        }
    }

    /// Handles one key press, possibly producing work for the main loop.
    pub fn on_key(&mut self, key: KeyEvent) -> Option<AppCommand> {
        match &mut self.input_mode {
            InputMode::Filter => {
                self.on_filter_key(key);
                None
            }
            InputMode::Commit { .. } => self.on_commit_key(key),
            InputMode::Normal => self.on_normal_key(key),
        }
    }

    fn on_filter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => self.text_filter.push(c),
            KeyCode::Backspace => {
                let _ = self.text_filter.pop();
            }
            KeyCode::Esc => {
                self.text_filter.clear();
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => self.input_mode = InputMode::Normal,
            _ => {}
        }
        self.clamp_selection();
    }

    fn on_commit_key(&mut self, key: KeyEvent) -> Option<AppCommand> {
        let InputMode::Commit { image_name } = &mut self.input_mode else {
            return None;
        };
        match key.code {
            KeyCode::Char(c) => {
                image_name.push(c);
                None
            }
            KeyCode::Backspace => {
                let _ = image_name.pop();
                None
            }
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                None
            }
            KeyCode::Enter => {
                let image_name = image_name.clone();
                self.input_mode = InputMode::Normal;
                let container = self.selected_container()?;
                let options = CommitOptions {
                    image_name,
                    ..CommitOptions::default()
                };
                Some(AppCommand::Dispatch {
                    request: ActionRequest::new(
                        LifecycleAction::Commit(options),
                        container.id.clone(),
                    ),
                    container,
                    verb: "commit",
                    feeds_delete_flow: false,
                })
            }
            _ => None,
        }
    }

    fn on_normal_key(&mut self, key: KeyEvent) -> Option<AppCommand> {
        // An open confirmation prompt captures the keyboard.
        if !matches!(self.delete_flow.state(), DeleteFlowState::Idle) {
            match key.code {
                KeyCode::Char('y') | KeyCode::Enter => return self.confirm_delete(),
                KeyCode::Char('n') | KeyCode::Esc => self.delete_flow.cancel(),
                _ => {}
            }
            return None;
        }

        match key.code {
            KeyCode::Char('q') => {
                self.running = false;
                None
            }
            KeyCode::Esc => {
                self.banner = None;
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_index = self.selected_index.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected_index += 1;
                self.clamp_selection();
                None
            }
            KeyCode::Char('o') => {
                self.only_show_running = !self.only_show_running;
                self.clamp_selection();
                None
            }
            KeyCode::Char('/') => {
                self.input_mode = InputMode::Filter;
                None
            }
            KeyCode::Char('s') => self.lifecycle_command(LifecycleAction::Start, false, "start"),
            KeyCode::Char('t') => self.lifecycle_command(LifecycleAction::Stop, false, "stop"),
            KeyCode::Char('T') => self.lifecycle_command(LifecycleAction::Stop, true, "stop"),
            KeyCode::Char('e') => {
                self.lifecycle_command(LifecycleAction::Restart, false, "restart")
            }
            KeyCode::Char('E') => self.lifecycle_command(LifecycleAction::Restart, true, "restart"),
            KeyCode::Char('d') => {
                if let Some(container) = self.selected_container() {
                    self.delete_flow.request_delete(container);
                }
                None
            }
            KeyCode::Char('c') => {
                if let Some(container) = self.selected_container() {
                    self.input_mode = InputMode::Commit {
                        image_name: format!("{}-snapshot", container.names),
                    };
                }
                None
            }
            _ => None,
        }
    }

    /// Builds a dispatch command for the selected container, honoring the
    /// status consistency the listing promises: start is offered to
    /// stopped containers, stop/restart to running ones.
    fn lifecycle_command(
        &self,
        action: LifecycleAction,
        force: bool,
        verb: &'static str,
    ) -> Option<AppCommand> {
        let container = self.selected_container()?;
        let offered = match action {
            LifecycleAction::Start => !container.is_running(),
            LifecycleAction::Stop | LifecycleAction::Restart => container.is_running(),
            LifecycleAction::Delete
            | LifecycleAction::ForceDelete
            | LifecycleAction::Commit(_) => true,
        };
        if !offered {
            return None;
        }
        let request = if force {
            ActionRequest::forced(action, container.id.clone())
        } else {
            ActionRequest::new(action, container.id.clone())
        };
        Some(AppCommand::Dispatch {
            request,
            container,
            verb,
            feeds_delete_flow: false,
        })
    }

    fn confirm_delete(&mut self) -> Option<AppCommand> {
        let request = self.delete_flow.confirm()?;
        let container = self.delete_flow.pending_container()?.clone();
        Some(AppCommand::Dispatch {
            request,
            container,
            verb: "delete",
            feeds_delete_flow: true,
        })
    }

    fn clamp_selection(&mut self) {
        let visible = self.visible_rows().len();
        self.selected_index = self.selected_index.min(visible.saturating_sub(1));
    }
}
