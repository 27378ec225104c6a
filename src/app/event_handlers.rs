use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::board::{Command, ListSide};

use super::{App, CatalogTab, Screen, UiMode, ui_helpers};

impl App {
    pub(super) fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.render_needed = true;

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }

        match self.ui_mode {
            UiMode::Confirm => {
                self.handle_confirm_key(key);
                false
            }
            UiMode::CategoryModal => {
                self.handle_category_modal_key(key);
                false
            }
            UiMode::SubItemModal => {
                self.handle_sub_item_modal_key(key);
                false
            }
            UiMode::Normal => self.handle_screen_key(key),
        }
    }

    fn handle_screen_key(&mut self, key: KeyEvent) -> bool {
        if self.screen == Screen::Login {
            return self.handle_login_key(key);
        }

        if self.typing_search && matches!(self.screen, Screen::Customers | Screen::Catalog) {
            self.handle_search_key(key);
            return false;
        }

        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('1') => {
                self.switch_screen(Screen::Dashboard);
                return false;
            }
            KeyCode::Char('2') => {
                self.switch_screen(Screen::Customers);
                return false;
            }
            KeyCode::Char('3') => {
                self.switch_screen(Screen::Catalog);
                return false;
            }
            KeyCode::Char('4') => {
                self.switch_screen(Screen::Board);
                return false;
            }
            KeyCode::Char('l') => {
                self.open_logout_confirm();
                return false;
            }
            _ => {}
        }

        match self.screen {
            Screen::Customers => self.handle_customers_key(key),
            Screen::Catalog => self.handle_catalog_key(key),
            Screen::Board => self.handle_board_key(key),
            Screen::Folder => self.handle_folder_key(key),
            Screen::Dashboard | Screen::Login => {}
        }
        false
    }

    fn switch_screen(&mut self, screen: Screen) {
        if self.screen == Screen::Folder {
            self.open_folder = None;
            self.folder_index = 0;
        }
        if self.drag_active {
            self.dispatch_board(Command::DragEnd);
        }
        self.drag_origin = None;
        self.drag_active = false;
        self.hover_target = None;
        self.typing_search = false;
        self.screen = screen;
    }

    fn handle_login_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => return true,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.login_focus = (self.login_focus + 1) % 2;
            }
            KeyCode::Enter => self.attempt_login(),
            KeyCode::Backspace => {
                self.login_field_mut().pop();
            }
            KeyCode::Char(c) => self.login_field_mut().push(c),
            _ => {}
        }
        false
    }

    fn login_field_mut(&mut self) -> &mut String {
        if self.login_focus == 0 {
            &mut self.login_email
        } else {
            &mut self.login_password
        }
    }

    fn handle_board_key(&mut self, key: KeyEvent) {
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Up if alt => self.move_focused(-1),
            KeyCode::Down if alt => self.move_focused(1),
            KeyCode::Up => self.step_focus(-1),
            KeyCode::Down => self.step_focus(1),
            KeyCode::Right if ctrl => self.cross_focused(ListSide::Active),
            KeyCode::Left if ctrl => self.cross_focused(ListSide::Archived),
            KeyCode::Char('s') => self.toggle_selection_mode(ListSide::Active),
            KeyCode::Char('S') => self.toggle_selection_mode(ListSide::Archived),
            KeyCode::Char(' ') => self.toggle_pick(),
            KeyCode::Char('a') => self.submit_board(Command::ArchiveSelected),
            KeyCode::Char('r') => self.submit_board(Command::RestoreSelected),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Char('e') => self.submit_board(Command::ToggleEditMode),
            KeyCode::Char('n') => self.open_add_modal(),
            KeyCode::Enter => self.activate_focused(),
            KeyCode::Esc => self.escape_board(),
            _ => {}
        }
    }

    fn handle_folder_key(&mut self, key: KeyEvent) {
        let len = self
            .open_folder
            .as_ref()
            .and_then(|id| self.board.state.folder(id))
            .map_or(0, |folder| folder.items.len());

        match key.code {
            KeyCode::Up => self.folder_index = ui_helpers::wrap_prev_index(self.folder_index, len),
            KeyCode::Down => {
                self.folder_index = ui_helpers::wrap_next_index(self.folder_index, len);
            }
            KeyCode::Char('n') => self.add_sub_item(),
            KeyCode::Enter => self.open_sub_item_modal(),
            KeyCode::Char('d') | KeyCode::Delete => self.remove_selected_sub_item(),
            KeyCode::Esc => self.leave_folder_screen(),
            _ => {}
        }
    }

    fn handle_customers_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('/') => self.typing_search = true,
            KeyCode::Up => {
                self.customer_index =
                    ui_helpers::wrap_prev_index(self.customer_index, self.customers.len());
            }
            KeyCode::Down => {
                self.customer_index =
                    ui_helpers::wrap_next_index(self.customer_index, self.customers.len());
            }
            KeyCode::Enter => {
                if let Some(customer) = self.customers.get(self.customer_index) {
                    self.customer_detail = self.api.customer(customer.id);
                }
            }
            KeyCode::Esc => {
                if self.customer_detail.is_some() {
                    self.customer_detail = None;
                } else if !self.customers_query.is_empty() {
                    self.customers_query.clear();
                    self.refresh_customers();
                }
            }
            _ => {}
        }
    }

    fn handle_catalog_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('/') => self.typing_search = true,
            KeyCode::Tab | KeyCode::BackTab => {
                self.catalog_tab = match self.catalog_tab {
                    CatalogTab::Packages => CatalogTab::Addons,
                    CatalogTab::Addons => CatalogTab::Packages,
                };
                self.catalog_index = 0;
            }
            KeyCode::Up => {
                self.catalog_index =
                    ui_helpers::wrap_prev_index(self.catalog_index, self.catalog_len());
            }
            KeyCode::Down => {
                self.catalog_index =
                    ui_helpers::wrap_next_index(self.catalog_index, self.catalog_len());
            }
            KeyCode::Esc => {
                if !self.catalog_query.is_empty() {
                    self.catalog_query.clear();
                    self.refresh_catalog();
                }
            }
            _ => {}
        }
    }

    fn catalog_len(&self) -> usize {
        match self.catalog_tab {
            CatalogTab::Packages => self.packages.len(),
            CatalogTab::Addons => self.addons.len(),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        let cleared = match key.code {
            KeyCode::Esc => {
                self.typing_search = false;
                true
            }
            KeyCode::Enter => {
                self.typing_search = false;
                false
            }
            KeyCode::Backspace => {
                self.search_query_mut().pop();
                false
            }
            KeyCode::Char(c) => {
                self.search_query_mut().push(c);
                false
            }
            _ => return,
        };
        if cleared {
            self.search_query_mut().clear();
        }
        match self.screen {
            Screen::Customers => self.refresh_customers(),
            Screen::Catalog => self.refresh_catalog(),
            _ => {}
        }
    }

    fn search_query_mut(&mut self) -> &mut String {
        if self.screen == Screen::Customers {
            &mut self.customers_query
        } else {
            &mut self.catalog_query
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => self.resolve_confirm(true),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => self.resolve_confirm(false),
            _ => {}
        }
    }

    fn handle_category_modal_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => self.close_modal(),
            KeyCode::Enter => self.save_category_modal(),
            KeyCode::Tab | KeyCode::Down => self.input_focus = (self.input_focus + 1) % 2,
            KeyCode::BackTab | KeyCode::Up => self.input_focus = (self.input_focus + 1) % 2,
            KeyCode::Char('o') if ctrl => self.attach_upload(),
            KeyCode::Backspace => {
                self.category_field_mut().pop();
            }
            KeyCode::Char(c) => self.category_field_mut().push(c),
            _ => {}
        }
    }

    fn category_field_mut(&mut self) -> &mut String {
        if self.input_focus == 0 {
            &mut self.input_name
        } else {
            &mut self.input_path
        }
    }

    fn handle_sub_item_modal_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => self.close_modal(),
            KeyCode::Char('s') if ctrl => self.save_sub_item_modal(),
            KeyCode::Tab => self.input_focus = (self.input_focus + 1) % 3,
            KeyCode::BackTab => self.input_focus = (self.input_focus + 2) % 3,
            KeyCode::Enter => {
                if self.input_focus == 2 {
                    self.input_inclusions.push('\n');
                } else {
                    self.input_focus += 1;
                }
            }
            KeyCode::Backspace => {
                self.sub_item_field_mut().pop();
            }
            KeyCode::Char(c) => self.sub_item_field_mut().push(c),
            _ => {}
        }
    }

    fn sub_item_field_mut(&mut self) -> &mut String {
        match self.input_focus {
            0 => &mut self.input_name,
            1 => &mut self.input_description,
            _ => &mut self.input_inclusions,
        }
    }
}
