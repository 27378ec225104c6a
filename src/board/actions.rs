use crate::domain::{CategoryItem, ItemId, now_millis};

use super::{BoardState, ListSide, Transition};

impl BoardState {
    pub(super) fn archive_selected(&mut self) -> Transition {
        if !self.selecting(ListSide::Active) || self.selected.is_empty() {
            return Transition::Rejected(
                "Please select at least one package to archive.".to_string(),
            );
        }

        let selected = std::mem::take(&mut self.selected);
        let (moved, kept): (Vec<CategoryItem>, Vec<CategoryItem>) = self
            .active
            .drain(..)
            .partition(|item| selected.contains(&item.id));
        self.active = kept;
        let mut pulsed = Vec::with_capacity(moved.len());
        for mut item in moved {
            item.id = item.id.with_archive_prefix();
            pulsed.push(item.id.clone());
            self.archived.push(item);
        }

        self.selection = None;
        Transition::moved(pulsed)
    }

    pub(super) fn restore_selected(&mut self) -> Transition {
        if !self.selecting(ListSide::Archived) || self.selected.is_empty() {
            return Transition::Rejected(
                "Please select at least one archived package to restore.".to_string(),
            );
        }

        let selected = std::mem::take(&mut self.selected);
        let (moved, kept): (Vec<CategoryItem>, Vec<CategoryItem>) = self
            .archived
            .drain(..)
            .partition(|item| selected.contains(&item.id));
        self.archived = kept;
        let mut pulsed = Vec::with_capacity(moved.len());
        for mut item in moved {
            item.id = self.vacant_restore_id(&item.id);
            pulsed.push(item.id.clone());
            self.active.push(item);
        }

        self.selection = None;
        Transition::moved(pulsed)
    }

    pub(super) fn delete_selected(&mut self, side: ListSide) -> Transition {
        if !self.selecting(side) || self.selected.is_empty() {
            return Transition::Rejected(
                match side {
                    ListSide::Active => "Please select at least one package to delete.",
                    ListSide::Archived => "Please select at least one archived package to delete.",
                }
                .to_string(),
            );
        }

        let selected = std::mem::take(&mut self.selected);
        self.list_mut(side)
            .retain(|item| !selected.contains(&item.id));

        self.selection = None;
        Transition::mutated()
    }

    pub(super) fn archive_one(&mut self, id: &ItemId) -> Transition {
        let Some(index) = self.position(ListSide::Active, id) else {
            return Transition::Ignored;
        };
        let mut item = self.active.remove(index);
        item.id = item.id.with_archive_prefix();
        let moved_id = item.id.clone();
        self.archived.push(item);
        Transition::moved(vec![moved_id])
    }

    pub(super) fn restore_one(&mut self, id: &ItemId) -> Transition {
        let Some(index) = self.position(ListSide::Archived, id) else {
            return Transition::Ignored;
        };
        let mut item = self.archived.remove(index);
        item.id = self.vacant_restore_id(&item.id);
        let moved_id = item.id.clone();
        self.active.push(item);
        Transition::moved(vec![moved_id])
    }

    fn vacant_restore_id(&self, id: &ItemId) -> ItemId {
        let stripped = id.without_archive_prefix();
        if !self.id_taken(&stripped) {
            return stripped;
        }
        let mut token = now_millis();
        loop {
            let candidate = ItemId::new(format!("{}-{}", stripped, token));
            if !self.id_taken(&candidate) {
                return candidate;
            }
            token += 1;
        }
    }
}
