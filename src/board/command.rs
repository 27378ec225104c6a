use serde::{Deserialize, Serialize};

use crate::{constants::BOARD_SETTINGS, domain::ItemId};

use super::{BoardState, ListSide};

#[derive(Clone, PartialEq, Debug)]
pub enum Command {
    EnterSelection(ListSide),
    ToggleSelect(ListSide, ItemId),
    CancelSelection(ListSide),
    ArchiveSelected,
    RestoreSelected,
    DeleteSelected(ListSide),
    Add(AddInput),
    ToggleEditMode,
    SaveEdit {
        id: ItemId,
        input: EditInput,
    },
    DragStart {
        list: ListSide,
        id: ItemId,
        index: usize,
    },
    DragDrop {
        target: ListSide,
        pointer_y: u16,
        midpoints: Vec<u16>,
    },
    DragEnd,
    MoveVertical {
        list: ListSide,
        id: ItemId,
        delta: isize,
    },
    MoveAcross {
        list: ListSide,
        id: ItemId,
    },
    AddSubItem {
        folder: ItemId,
    },
    SaveSubItemDetail {
        folder: ItemId,
        sub: ItemId,
        input: SubItemInput,
    },
    RemoveSubItem {
        folder: ItemId,
        sub: ItemId,
    },
}

#[derive(Clone, PartialEq, Debug)]
pub enum Transition {
    Ignored,
    Updated,
    Mutated {
        pulse: Vec<ItemId>,
        focus: Option<ItemId>,
    },
    Rejected(String),
}

impl Transition {
    pub(super) fn mutated() -> Transition {
        Transition::Mutated {
            pulse: Vec::new(),
            focus: None,
        }
    }

    pub(super) fn moved(pulse: Vec<ItemId>) -> Transition {
        Transition::Mutated { pulse, focus: None }
    }

    pub(super) fn refocused(id: ItemId) -> Transition {
        Transition::Mutated {
            pulse: Vec::new(),
            focus: Some(id),
        }
    }

    pub fn changed_collections(&self) -> bool {
        matches!(self, Transition::Mutated { .. })
    }
}

#[derive(Clone, PartialEq, Debug, Default)]
pub struct AddInput {
    pub name: String,
    pub typed_path: String,
    pub upload: Option<String>,
}

#[derive(Clone, PartialEq, Debug, Default)]
pub struct EditInput {
    pub name: String,
    pub typed_path: String,
    pub upload: Option<String>,
}

#[derive(Clone, PartialEq, Debug, Default)]
pub struct SubItemInput {
    pub name: String,
    pub description: String,
    pub inclusions_text: String,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct DragPayload {
    pub id: ItemId,
    pub from: ListSide,
    pub idx: usize,
}

impl BoardState {
    pub fn confirmation_for(&self, command: &Command) -> Option<String> {
        match command {
            Command::DeleteSelected(side) => {
                if !self.selecting(*side) || self.selected.is_empty() {
                    return None;
                }
                Some(
                    match side {
                        ListSide::Active => {
                            "Delete the selected package(s)? This action cannot be undone."
                        }
                        ListSide::Archived => {
                            "Delete the selected archived package(s)? This cannot be undone."
                        }
                    }
                    .to_string(),
                )
            }
            Command::DragDrop { target, .. } if BOARD_SETTINGS.confirm_cross_move => {
                let payload = self.drag_payload()?;
                if payload.from == *target {
                    return None;
                }
                Some("Move this folder between Package Category and Archives?".to_string())
            }
            Command::MoveAcross { list, .. } if BOARD_SETTINGS.confirm_cross_move => Some(
                match list {
                    ListSide::Active => "Move to Archives?",
                    ListSide::Archived => "Restore to Package Category?",
                }
                .to_string(),
            ),
            Command::RemoveSubItem { .. } => {
                Some("Remove this item from the package list?".to_string())
            }
            _ => None,
        }
    }
}
