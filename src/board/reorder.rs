use crate::domain::ItemId;

use super::{BoardState, DragPayload, ListSide, Transition};

pub fn insert_index(pointer_y: u16, midpoints: &[u16]) -> usize {
    midpoints
        .iter()
        .position(|&midpoint| pointer_y < midpoint)
        .unwrap_or(midpoints.len())
}

impl BoardState {
    pub(super) fn drag_start(&mut self, list: ListSide, id: ItemId, index: usize) -> Transition {
        let payload = DragPayload {
            id: id.clone(),
            from: list,
            idx: index,
        };
        self.drag_channel = serde_json::to_string(&payload).ok();
        self.dragging = Some(id);
        Transition::Updated
    }

    pub fn drag_payload(&self) -> Option<DragPayload> {
        serde_json::from_str(self.drag_channel.as_deref()?).ok()
    }

    pub(super) fn drag_drop(
        &mut self,
        target: ListSide,
        pointer_y: u16,
        midpoints: &[u16],
    ) -> Transition {
        let Some(payload) = self.drag_payload() else {
            return Transition::Ignored;
        };

        if payload.from == target {
            return self.reorder_dropped(target, &payload.id, insert_index(pointer_y, midpoints));
        }

        match target {
            ListSide::Archived => self.archive_one(&payload.id),
            ListSide::Active => self.restore_one(&payload.id),
        }
    }

    fn reorder_dropped(&mut self, side: ListSide, id: &ItemId, insert_at: usize) -> Transition {
        let Some(index) = self.position(side, id) else {
            return Transition::Ignored;
        };
        let list = self.list_mut(side);
        let item = list.remove(index);
        let slot = insert_at.min(list.len());
        list.insert(slot, item);
        Transition::moved(vec![id.clone()])
    }

    pub(super) fn drag_end(&mut self) -> Transition {
        if self.drag_channel.is_none() && self.dragging.is_none() {
            return Transition::Ignored;
        }
        self.drag_channel = None;
        self.dragging = None;
        Transition::Updated
    }

    pub(super) fn move_vertical(
        &mut self,
        side: ListSide,
        id: &ItemId,
        delta: isize,
    ) -> Transition {
        let Some(index) = self.position(side, id) else {
            return Transition::Ignored;
        };
        let list = self.list_mut(side);
        let target = index.saturating_add_signed(delta).min(list.len() - 1);
        if target == index {
            return Transition::Ignored;
        }
        let item = list.remove(index);
        list.insert(target, item);
        Transition::refocused(id.clone())
    }

    pub(super) fn move_across(&mut self, side: ListSide, id: &ItemId) -> Transition {
        match side {
            ListSide::Active => self.archive_one(id),
            ListSide::Archived => self.restore_one(id),
        }
    }
}
