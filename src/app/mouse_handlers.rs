use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::board::{Command, ListSide, insert_index};

use super::{App, CardRow, PendingAction, Screen, UiMode, side_slot, ui_helpers};

impl App {
    pub(super) fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.ui_mode != UiMode::Normal || self.screen != Screen::Board {
            return;
        }
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.board_mouse_down(mouse.column, mouse.row);
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.board_mouse_drag(mouse.column, mouse.row);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.board_mouse_up(mouse.column, mouse.row);
            }
            MouseEventKind::ScrollUp => self.board_mouse_scroll(mouse.column, mouse.row, -1),
            MouseEventKind::ScrollDown => self.board_mouse_scroll(mouse.column, mouse.row, 1),
            _ => {}
        }
    }

    fn board_mouse_down(&mut self, x: u16, y: u16) {
        let Some(row) = self.row_at(x, y) else {
            return;
        };
        self.focus_side = row.side;
        self.focus_index = row.index;
        self.drag_origin = Some(row);
        self.drag_active = false;
        self.render_needed = true;
    }

    fn board_mouse_drag(&mut self, x: u16, y: u16) {
        let Some(origin) = self.drag_origin.clone() else {
            return;
        };

        if !self.drag_active {
            if y == origin.rect.y {
                return;
            }
            self.drag_active = true;
            self.dispatch_board(Command::DragStart {
                list: origin.side,
                id: origin.id.clone(),
                index: origin.index,
            });
        }

        let Some(target) = self.panel_at(x, y) else {
            self.hover_target = None;
            self.render_needed = true;
            return;
        };
        let midpoints = self.side_midpoints(target);
        let slot = insert_index(y, &midpoints);
        self.hover_target = Some((target, slot));
        self.render_needed = true;
    }

    fn board_mouse_up(&mut self, x: u16, y: u16) {
        let Some(origin) = self.drag_origin.take() else {
            return;
        };
        let was_drag = self.drag_active;
        self.drag_active = false;
        self.hover_target = None;
        self.render_needed = true;

        if !was_drag {
            self.click_card(origin);
            return;
        }

        let Some(target) = self.panel_at(x, y) else {
            self.dispatch_board(Command::DragEnd);
            return;
        };
        let midpoints = self.side_midpoints(target);
        let command = Command::DragDrop {
            target,
            pointer_y: y,
            midpoints,
        };
        if let Some(prompt) = self.board.state.confirmation_for(&command) {
            self.confirm_prompt = prompt;
            self.pending_action = Some(PendingAction::Board(command));
            self.ui_mode = UiMode::Confirm;
            return;
        }
        self.dispatch_board(command);
        self.dispatch_board(Command::DragEnd);
    }

    fn board_mouse_scroll(&mut self, x: u16, y: u16, delta: isize) {
        let Some(side) = self.panel_at(x, y) else {
            return;
        };
        let len = self.board.state.list(side).len();
        if len == 0 {
            return;
        }
        let current = if self.focus_side == side {
            self.focus_index.min(len - 1)
        } else {
            0
        };
        self.focus_side = side;
        self.focus_index = if delta < 0 {
            ui_helpers::wrap_prev_index(current, len)
        } else {
            ui_helpers::wrap_next_index(current, len)
        };
        self.render_needed = true;
    }

    fn row_at(&self, x: u16, y: u16) -> Option<CardRow> {
        self.card_rows
            .iter()
            .find(|row| y == row.rect.y && x >= row.rect.x && x < row.rect.x + row.rect.width)
            .cloned()
    }

    fn panel_at(&self, x: u16, y: u16) -> Option<ListSide> {
        for side in [ListSide::Active, ListSide::Archived] {
            let inner = self.panel_inners[side_slot(side)];
            if x >= inner.x
                && x < inner.x + inner.width
                && y >= inner.y
                && y < inner.y + inner.height
            {
                return Some(side);
            }
        }
        None
    }

    fn side_midpoints(&self, side: ListSide) -> Vec<u16> {
        let slot = side_slot(side);
        ui_helpers::virtual_midpoints(
            self.panel_inners[slot].y,
            self.scrolls[slot],
            self.board.state.list(side).len(),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf, time::SystemTime};

    use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
    use ratatui::layout::Rect;

    use crate::{
        board::{Board, ListSide},
        domain::ItemId,
        storage::FileKvStore,
    };

    use super::super::{App, CardRow, Screen, side_slot, toasts::ToastBar};

    fn unique_store_dir() -> PathBuf {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        PathBuf::from(format!("/tmp/darkroom_mouse_{}", now))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn board_app(dir: &PathBuf) -> App {
        let mut app = App::from_parts(
            Board::open(FileKvStore::new(dir.clone()), ToastBar::new()),
            None,
        );
        app.screen = Screen::Board;
        app.panel_inners = [Rect::new(1, 2, 40, 6), Rect::new(1, 10, 40, 6)];
        cache_card_rows(&mut app);
        app
    }

    fn cache_card_rows(app: &mut App) {
        app.card_rows.clear();
        for side in [ListSide::Active, ListSide::Archived] {
            let inner = app.panel_inners[side_slot(side)];
            let ids: Vec<ItemId> = app
                .board
                .state
                .list(side)
                .iter()
                .map(|item| item.id.clone())
                .collect();
            for (index, id) in ids.into_iter().enumerate() {
                app.card_rows.push(CardRow {
                    side,
                    index,
                    id,
                    rect: Rect::new(inner.x, inner.y + index as u16, inner.width, 1),
                });
            }
        }
    }

    fn active_ids(app: &App) -> Vec<ItemId> {
        app.board
            .state
            .active
            .iter()
            .map(|item| item.id.clone())
            .collect()
    }

    #[test]
    fn test_release_off_both_panels_cancels_the_drag() {
        let dir = unique_store_dir();
        let mut app = board_app(&dir);
        let before = active_ids(&app);

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 5, 2));
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 5, 3));
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 5, 20));

        assert_eq!(active_ids(&app), before);
        assert!(app.board.state.archived.is_empty());
        assert!(app.board.state.dragging().is_none());
        assert!(app.drag_origin.is_none());
        assert!(!app.drag_active);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_hover_clears_between_the_panels() {
        let dir = unique_store_dir();
        let mut app = board_app(&dir);

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 5, 2));
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 5, 11));
        assert_eq!(app.hover_target, Some((ListSide::Archived, 0)));

        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 5, 9));
        assert_eq!(app.hover_target, None);

        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 5, 9));
        assert_eq!(active_ids(&app).len(), 3);
        assert!(app.board.state.archived.is_empty());
        assert!(app.board.state.dragging().is_none());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_release_on_a_panel_still_drops() {
        let dir = unique_store_dir();
        let mut app = board_app(&dir);
        let first = active_ids(&app)[0].clone();

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 5, 2));
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 5, 11));
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 5, 11));

        assert_eq!(app.board.state.active.len(), 2);
        assert_eq!(app.board.state.archived.len(), 1);
        assert_eq!(
            app.board.state.archived[0].id,
            first.with_archive_prefix()
        );
        assert!(app.board.state.dragging().is_none());

        fs::remove_dir_all(&dir).ok();
    }
}
