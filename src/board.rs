use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
    domain::{CatalogSnapshot, CategoryItem, ItemId},
    storage::{KvStore, SnapshotGateway},
};

mod actions;
mod command;
mod editing;
mod reorder;
mod selection;

pub use command::{AddInput, Command, DragPayload, EditInput, SubItemInput, Transition};
pub use reorder::insert_index;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ListSide {
    #[serde(rename = "pkg")]
    Active,
    #[serde(rename = "arch")]
    Archived,
}

impl ListSide {
    pub fn other(self) -> ListSide {
        match self {
            ListSide::Active => ListSide::Archived,
            ListSide::Archived => ListSide::Active,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ListSide::Active => "Package Category",
            ListSide::Archived => "Archives",
        }
    }
}

pub struct BoardState {
    pub active: Vec<CategoryItem>,
    pub archived: Vec<CategoryItem>,
    selection: Option<ListSide>,
    selected: HashSet<ItemId>,
    edit_mode: bool,
    drag_channel: Option<String>,
    dragging: Option<ItemId>,
}

impl BoardState {
    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Self {
        BoardState {
            active: snapshot.active,
            archived: snapshot.archived,
            selection: None,
            selected: HashSet::new(),
            edit_mode: false,
            drag_channel: None,
            dragging: None,
        }
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            active: self.active.clone(),
            archived: self.archived.clone(),
        }
    }

    pub fn apply(&mut self, command: Command) -> Transition {
        match command {
            Command::EnterSelection(side) => self.enter_selection(side),
            Command::ToggleSelect(side, id) => self.toggle_select(side, id),
            Command::CancelSelection(side) => self.cancel_selection(side),
            Command::ArchiveSelected => self.archive_selected(),
            Command::RestoreSelected => self.restore_selected(),
            Command::DeleteSelected(side) => self.delete_selected(side),
            Command::Add(input) => self.add_category(input),
            Command::ToggleEditMode => self.toggle_edit_mode(),
            Command::SaveEdit { id, input } => self.save_edit(&id, input),
            Command::DragStart { list, id, index } => self.drag_start(list, id, index),
            Command::DragDrop {
                target,
                pointer_y,
                midpoints,
            } => self.drag_drop(target, pointer_y, &midpoints),
            Command::DragEnd => self.drag_end(),
            Command::MoveVertical { list, id, delta } => self.move_vertical(list, &id, delta),
            Command::MoveAcross { list, id } => self.move_across(list, &id),
            Command::AddSubItem { folder } => self.add_sub_item(&folder),
            Command::SaveSubItemDetail { folder, sub, input } => {
                self.save_sub_item_detail(&folder, &sub, input)
            }
            Command::RemoveSubItem { folder, sub } => self.remove_sub_item(&folder, &sub),
        }
    }

    pub fn list(&self, side: ListSide) -> &[CategoryItem] {
        match side {
            ListSide::Active => &self.active,
            ListSide::Archived => &self.archived,
        }
    }

    fn list_mut(&mut self, side: ListSide) -> &mut Vec<CategoryItem> {
        match side {
            ListSide::Active => &mut self.active,
            ListSide::Archived => &mut self.archived,
        }
    }

    pub fn item(&self, side: ListSide, id: &ItemId) -> Option<&CategoryItem> {
        self.list(side).iter().find(|item| &item.id == id)
    }

    fn position(&self, side: ListSide, id: &ItemId) -> Option<usize> {
        self.list(side).iter().position(|item| &item.id == id)
    }

    pub fn locate(&self, id: &ItemId) -> Option<(ListSide, usize)> {
        if let Some(index) = self.position(ListSide::Active, id) {
            return Some((ListSide::Active, index));
        }
        self.position(ListSide::Archived, id)
            .map(|index| (ListSide::Archived, index))
    }

    pub fn folder(&self, id: &ItemId) -> Option<&CategoryItem> {
        self.item(ListSide::Active, id)
            .or_else(|| self.item(ListSide::Archived, id))
    }

    fn folder_mut(&mut self, id: &ItemId) -> Option<&mut CategoryItem> {
        let (side, index) = self.locate(id)?;
        Some(&mut self.list_mut(side)[index])
    }

    fn id_taken(&self, id: &ItemId) -> bool {
        self.active
            .iter()
            .chain(self.archived.iter())
            .any(|item| &item.id == id)
    }

    pub fn selection(&self) -> Option<ListSide> {
        self.selection
    }

    pub fn selecting(&self, side: ListSide) -> bool {
        self.selection == Some(side)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_selected(&self, id: &ItemId) -> bool {
        self.selected.contains(id)
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn dragging(&self) -> Option<&ItemId> {
        self.dragging.as_ref()
    }
}

pub trait Notifier {
    fn toast(&mut self, message: &str);
}

pub struct Board<S: KvStore, N: Notifier> {
    pub state: BoardState,
    pub notifier: N,
    gateway: SnapshotGateway<S>,
}

impl<S: KvStore, N: Notifier> Board<S, N> {
    pub fn open(store: S, notifier: N) -> Self {
        let mut gateway = SnapshotGateway::new(store);
        let state = BoardState::from_snapshot(gateway.load());
        Board {
            state,
            notifier,
            gateway,
        }
    }

    pub fn dispatch(&mut self, command: Command) -> Transition {
        let transition = self.state.apply(command);
        match &transition {
            Transition::Mutated { .. } => self.persist(),
            Transition::Rejected(message) => self.notifier.toast(message),
            _ => {}
        }
        transition
    }

    pub fn dispatch_with(
        &mut self,
        command: Command,
        decide: impl FnOnce(&str) -> bool,
    ) -> Transition {
        if let Some(prompt) = self.state.confirmation_for(&command) {
            if !decide(&prompt) {
                return Transition::Ignored;
            }
        }
        self.dispatch(command)
    }

    pub fn persist(&mut self) {
        self.gateway.save(&self.state.snapshot());
    }
}
