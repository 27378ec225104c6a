use std::path::Path;

use crate::{
    api,
    board::{AddInput, Command, EditInput, ListSide, SubItemInput, Transition},
    constants::PULSE_SETTINGS,
    domain::ItemId,
    images, storage,
};

use super::{App, CardRow, PendingAction, Screen, UiMode};

impl App {
    pub(super) fn submit_board(&mut self, command: Command) {
        if let Some(prompt) = self.board.state.confirmation_for(&command) {
            self.confirm_prompt = prompt;
            self.pending_action = Some(PendingAction::Board(command));
            self.ui_mode = UiMode::Confirm;
            self.render_needed = true;
            return;
        }
        self.dispatch_board(command);
    }

    pub(super) fn dispatch_board(&mut self, command: Command) {
        let transition = self.board.dispatch(command);
        self.apply_transition(transition);
    }

    fn apply_transition(&mut self, transition: Transition) {
        if let Transition::Mutated { pulse, focus } = transition {
            if !pulse.is_empty() {
                self.pulse_ids = pulse;
                self.pulse_frames = PULSE_SETTINGS.duration_frames;
            }
            if let Some(id) = focus {
                self.focus_card(&id);
            }
        }
        self.clamp_board_focus();
        self.clamp_folder_index();
        self.render_needed = true;
    }

    pub(super) fn resolve_confirm(&mut self, accepted: bool) {
        let pending = self.pending_action.take();
        self.ui_mode = UiMode::Normal;
        self.confirm_prompt = String::new();
        self.render_needed = true;

        let Some(action) = pending else {
            return;
        };
        match action {
            PendingAction::Board(command) => {
                let finish_drag = matches!(command, Command::DragDrop { .. });
                if accepted {
                    self.dispatch_board(command);
                }
                if finish_drag {
                    self.dispatch_board(Command::DragEnd);
                }
            }
            PendingAction::Logout => {
                if accepted {
                    self.perform_logout();
                }
            }
        }
    }

    pub(super) fn toggle_selection_mode(&mut self, side: ListSide) {
        let command = if self.board.state.selecting(side) {
            Command::CancelSelection(side)
        } else {
            Command::EnterSelection(side)
        };
        self.focus_side = side;
        self.clamp_board_focus();
        self.submit_board(command);
    }

    pub(super) fn toggle_pick(&mut self) {
        if let Some(id) = self.focused_id() {
            self.submit_board(Command::ToggleSelect(self.focus_side, id));
        }
    }

    pub(super) fn delete_selected(&mut self) {
        let side = self.board.state.selection().unwrap_or(self.focus_side);
        self.submit_board(Command::DeleteSelected(side));
    }

    pub(super) fn move_focused(&mut self, delta: isize) {
        if let Some(id) = self.focused_id() {
            self.submit_board(Command::MoveVertical {
                list: self.focus_side,
                id,
                delta,
            });
        }
    }

    pub(super) fn cross_focused(&mut self, from: ListSide) {
        if self.focus_side != from {
            return;
        }
        if let Some(id) = self.focused_id() {
            self.submit_board(Command::MoveAcross { list: from, id });
        }
    }

    pub(super) fn activate_focused(&mut self) {
        let Some(id) = self.focused_id() else {
            return;
        };
        if self.board.state.selecting(self.focus_side) {
            self.toggle_pick();
        } else if self.board.state.edit_mode() {
            self.open_edit_modal(id);
        } else if self.focus_side == ListSide::Active {
            self.open_folder_screen(id);
        }
    }

    pub(super) fn click_card(&mut self, row: CardRow) {
        if self.board.state.selecting(row.side) {
            self.submit_board(Command::ToggleSelect(row.side, row.id));
        } else if self.board.state.edit_mode() {
            self.open_edit_modal(row.id);
        } else if row.side == ListSide::Active {
            self.open_folder_screen(row.id);
        }
    }

    pub(super) fn escape_board(&mut self) {
        if let Some(side) = self.board.state.selection() {
            self.submit_board(Command::CancelSelection(side));
        } else if self.board.state.edit_mode() {
            self.submit_board(Command::ToggleEditMode);
        }
    }

    pub(super) fn open_folder_screen(&mut self, id: ItemId) {
        if self.board.state.folder(&id).is_none() {
            return;
        }
        self.open_folder = Some(id);
        self.folder_index = 0;
        self.screen = Screen::Folder;
        self.render_needed = true;
    }

    pub(super) fn leave_folder_screen(&mut self) {
        self.open_folder = None;
        self.folder_index = 0;
        self.screen = Screen::Board;
        self.render_needed = true;
    }

    pub(super) fn save_category_modal(&mut self) {
        let name = std::mem::take(&mut self.input_name);
        let typed_path = std::mem::take(&mut self.input_path);
        let upload = self.pending_upload.take();
        let editing = self.editing_id.take();
        self.ui_mode = UiMode::Normal;

        match editing {
            Some(id) => {
                self.submit_board(Command::SaveEdit {
                    id,
                    input: EditInput {
                        name,
                        typed_path,
                        upload,
                    },
                });
            }
            None => {
                self.submit_board(Command::Add(AddInput {
                    name,
                    typed_path,
                    upload,
                }));
                let len = self.board.state.active.len();
                if len > 0 {
                    self.focus_side = ListSide::Active;
                    self.focus_index = len - 1;
                }
            }
        }
    }

    pub(super) fn save_sub_item_modal(&mut self) {
        let (Some(folder), Some(sub)) = (self.open_folder.clone(), self.editing_sub.take()) else {
            self.close_modal();
            return;
        };
        let input = SubItemInput {
            name: std::mem::take(&mut self.input_name),
            description: std::mem::take(&mut self.input_description),
            inclusions_text: std::mem::take(&mut self.input_inclusions),
        };
        self.ui_mode = UiMode::Normal;
        self.submit_board(Command::SaveSubItemDetail { folder, sub, input });
    }

    pub(super) fn add_sub_item(&mut self) {
        let Some(folder) = self.open_folder.clone() else {
            return;
        };
        self.submit_board(Command::AddSubItem { folder: folder.clone() });
        if let Some(item) = self.board.state.folder(&folder) {
            self.folder_index = item.items.len().saturating_sub(1);
        }
    }

    pub(super) fn remove_selected_sub_item(&mut self) {
        let Some(folder) = self.open_folder.clone() else {
            return;
        };
        let Some(sub) = self
            .board
            .state
            .folder(&folder)
            .and_then(|item| item.items.get(self.folder_index))
            .map(|sub| sub.id.clone())
        else {
            return;
        };
        self.submit_board(Command::RemoveSubItem { folder, sub });
    }

    pub(super) fn attach_upload(&mut self) {
        let path = self.input_path.trim().to_string();
        if path.is_empty() {
            self.board
                .notifier
                .error("Type a file path to attach first.");
            self.render_needed = true;
            return;
        }
        match images::encode_image_file(Path::new(&path)) {
            Ok(data_url) => {
                self.pending_upload = Some(data_url);
                self.board.notifier.success("Image attached.");
            }
            Err(e) => self.board.notifier.error(&e.to_string()),
        }
        self.render_needed = true;
    }

    pub(super) fn attempt_login(&mut self) {
        if self.login_email.is_empty() || self.login_password.is_empty() {
            self.board.notifier.error("Please fill in all fields");
            self.render_needed = true;
            return;
        }

        match self.api.login(&self.login_email, &self.login_password) {
            Ok(session) => {
                if let Err(e) = api::save_session(&storage::get_auth_session_path(), &session) {
                    self.board
                        .notifier
                        .error(&format!("Could not save session: {}", e));
                }
                self.session = Some(session);
                self.login_password.clear();
                self.screen = Screen::Dashboard;
                self.board.notifier.success("Login successful!");
            }
            Err(e) => self.board.notifier.error(&e.to_string()),
        }
        self.render_needed = true;
    }

    pub(super) fn open_logout_confirm(&mut self) {
        self.confirm_prompt = "Are you sure you want to logout?".to_string();
        self.pending_action = Some(PendingAction::Logout);
        self.ui_mode = UiMode::Confirm;
        self.render_needed = true;
    }

    pub(super) fn perform_logout(&mut self) {
        if let Err(e) = api::clear_session(&storage::get_auth_session_path()) {
            self.board
                .notifier
                .error(&format!("Could not clear session: {}", e));
        }
        self.session = None;
        self.screen = Screen::Login;
        self.login_email.clear();
        self.login_password.clear();
        self.login_focus = 0;
        self.board.notifier.success("Logged out successfully");
        self.render_needed = true;
    }

    pub(super) fn refresh_customers(&mut self) {
        self.customers = self.api.customers(&self.customers_query);
        self.customer_index = 0;
        self.customer_detail = None;
    }

    pub(super) fn refresh_catalog(&mut self) {
        self.packages = self.api.packages(&self.catalog_query, None);
        self.addons = self.api.addons(&self.catalog_query);
        self.catalog_index = 0;
    }
}
