use crate::domain::ItemId;

use super::{BoardState, ListSide, Transition};

impl BoardState {
    pub(super) fn enter_selection(&mut self, side: ListSide) -> Transition {
        self.selection = Some(side);
        self.selected.clear();
        Transition::Updated
    }

    pub(super) fn toggle_select(&mut self, side: ListSide, id: ItemId) -> Transition {
        if !self.selecting(side) || self.position(side, &id).is_none() {
            return Transition::Ignored;
        }
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
        Transition::Updated
    }

    pub(super) fn cancel_selection(&mut self, side: ListSide) -> Transition {
        if !self.selecting(side) {
            return Transition::Ignored;
        }
        self.exit_selection();
        Transition::Updated
    }

    pub(super) fn exit_selection(&mut self) {
        self.selection = None;
        self.selected.clear();
    }
}
