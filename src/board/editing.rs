use crate::{
    constants::{DEFAULT_CATEGORY_NAME, DEFAULT_SUB_ITEM_NAME, PLACEHOLDER_IMAGE},
    domain::{CategoryItem, ItemId, SubItem, now_millis, slug_id, sub_item_id},
    images,
};

use super::{AddInput, BoardState, EditInput, SubItemInput, Transition};

impl BoardState {
    pub(super) fn toggle_edit_mode(&mut self) -> Transition {
        self.edit_mode = !self.edit_mode;
        Transition::Updated
    }

    pub(super) fn add_category(&mut self, input: AddInput) -> Transition {
        let trimmed = input.name.trim();
        let name = if trimmed.is_empty() {
            DEFAULT_CATEGORY_NAME.to_string()
        } else {
            trimmed.to_string()
        };
        let img = images::resolve_new_image(input.upload.as_deref(), &input.typed_path);

        self.active.push(CategoryItem {
            id: slug_id(&name, now_millis()),
            name,
            img,
            items: Vec::new(),
        });
        Transition::mutated()
    }

    pub(super) fn save_edit(&mut self, id: &ItemId, input: EditInput) -> Transition {
        let Some((side, index)) = self.locate(id) else {
            return Transition::Ignored;
        };

        let item = &mut self.list_mut(side)[index];
        let trimmed = input.name.trim();
        if !trimmed.is_empty() {
            item.name = trimmed.to_string();
        }
        item.img =
            images::resolve_edit_image(input.upload.as_deref(), &input.typed_path, &item.img);

        self.exit_selection();
        Transition::mutated()
    }

    pub(super) fn add_sub_item(&mut self, folder: &ItemId) -> Transition {
        let id = sub_item_id(folder, now_millis());
        let Some(folder_item) = self.folder_mut(folder) else {
            return Transition::Ignored;
        };
        folder_item.items.push(SubItem {
            id,
            name: DEFAULT_SUB_ITEM_NAME.to_string(),
            img: PLACEHOLDER_IMAGE.to_string(),
            description: String::new(),
            inclusions: Vec::new(),
        });
        Transition::mutated()
    }

    pub(super) fn save_sub_item_detail(
        &mut self,
        folder: &ItemId,
        sub: &ItemId,
        input: SubItemInput,
    ) -> Transition {
        let Some(folder_item) = self.folder_mut(folder) else {
            return Transition::Ignored;
        };
        let Some(entry) = folder_item.items.iter_mut().find(|item| &item.id == sub) else {
            return Transition::Ignored;
        };

        entry.name = input.name.trim().to_string();
        entry.description = input.description.trim().to_string();
        entry.inclusions = input
            .inclusions_text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Transition::mutated()
    }

    pub(super) fn remove_sub_item(&mut self, folder: &ItemId, sub: &ItemId) -> Transition {
        let Some(folder_item) = self.folder_mut(folder) else {
            return Transition::Ignored;
        };
        let Some(index) = folder_item.items.iter().position(|item| &item.id == sub) else {
            return Transition::Ignored;
        };
        folder_item.items.remove(index);
        Transition::mutated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        board::{Command, ListSide},
        domain::CatalogSnapshot,
    };

    fn seeded_state() -> BoardState {
        BoardState::from_snapshot(CatalogSnapshot::seeded())
    }

    #[test]
    fn test_add_without_an_image_takes_the_placeholder() {
        let mut state = seeded_state();

        state.apply(Command::Add(AddInput {
            name: "Spring".to_string(),
            typed_path: String::new(),
            upload: None,
        }));

        let added = state.active.last().unwrap();
        assert_eq!(added.name, "Spring");
        assert_eq!(added.img, PLACEHOLDER_IMAGE);
        assert!(added.id.as_str().starts_with("spring-"));
        assert!(added.items.is_empty());
    }

    #[test]
    fn test_add_qualifies_a_bare_filename() {
        let mut state = seeded_state();

        state.apply(Command::Add(AddInput {
            name: "Summer Shoot".to_string(),
            typed_path: "summer.png".to_string(),
            upload: None,
        }));

        let added = state.active.last().unwrap();
        assert_eq!(added.img, "images/packagelist/summer.png");
        assert!(added.id.as_str().starts_with("summer-shoot-"));
    }

    #[test]
    fn test_add_blank_name_falls_back_to_the_default() {
        let mut state = seeded_state();

        state.apply(Command::Add(AddInput {
            name: "   ".to_string(),
            typed_path: String::new(),
            upload: None,
        }));

        let added = state.active.last().unwrap();
        assert_eq!(added.name, DEFAULT_CATEGORY_NAME);
        assert!(added.id.as_str().starts_with("new-package-"));
    }

    #[test]
    fn test_add_prefers_the_upload_over_the_typed_path() {
        let mut state = seeded_state();

        state.apply(Command::Add(AddInput {
            name: "Prom".to_string(),
            typed_path: "prom.png".to_string(),
            upload: Some("data:image/png;base64,AAAA".to_string()),
        }));

        assert_eq!(state.active.last().unwrap().img, "data:image/png;base64,AAAA");
    }

    #[test]
    fn test_edit_with_a_blank_name_keeps_the_old_one() {
        let mut state = seeded_state();
        let id = state.active[0].id.clone();
        let old_name = state.active[0].name.clone();
        let old_img = state.active[0].img.clone();

        state.apply(Command::SaveEdit {
            id: id.clone(),
            input: EditInput {
                name: "  ".to_string(),
                typed_path: String::new(),
                upload: None,
            },
        });

        assert_eq!(state.active[0].name, old_name);
        assert_eq!(state.active[0].img, old_img);
    }

    #[test]
    fn test_edit_takes_a_typed_path_verbatim() {
        let mut state = seeded_state();
        let id = state.active[0].id.clone();

        state.apply(Command::SaveEdit {
            id,
            input: EditInput {
                name: "Regulars".to_string(),
                typed_path: "covers/regular.png".to_string(),
                upload: None,
            },
        });

        assert_eq!(state.active[0].name, "Regulars");
        assert_eq!(state.active[0].img, "covers/regular.png");
    }

    #[test]
    fn test_edit_leaves_selection_mode() {
        let mut state = seeded_state();
        let id = state.active[0].id.clone();
        state.apply(Command::EnterSelection(ListSide::Active));
        state.apply(Command::ToggleSelect(ListSide::Active, id.clone()));

        state.apply(Command::SaveEdit {
            id,
            input: EditInput::default(),
        });

        assert!(state.selection().is_none());
        assert_eq!(state.selected_count(), 0);
    }

    #[test]
    fn test_edit_reaches_archived_cards_too() {
        let mut state = seeded_state();
        let id = state.active[0].id.clone();
        state.apply(Command::MoveAcross {
            list: ListSide::Active,
            id,
        });
        let archived_id = state.archived[0].id.clone();

        state.apply(Command::SaveEdit {
            id: archived_id,
            input: EditInput {
                name: "Shelved".to_string(),
                typed_path: String::new(),
                upload: None,
            },
        });

        assert_eq!(state.archived[0].name, "Shelved");
    }

    #[test]
    fn test_add_sub_item_fills_the_defaults() {
        let mut state = seeded_state();
        let folder = state.active[0].id.clone();

        let transition = state.apply(Command::AddSubItem {
            folder: folder.clone(),
        });

        assert!(transition.changed_collections());
        let items = &state.active[0].items;
        assert_eq!(items.len(), 1);
        assert!(
            items[0]
                .id
                .as_str()
                .starts_with(&format!("{}-pkg-", folder))
        );
        assert_eq!(items[0].name, DEFAULT_SUB_ITEM_NAME);
        assert_eq!(items[0].img, PLACEHOLDER_IMAGE);
        assert!(items[0].inclusions.is_empty());
    }

    #[test]
    fn test_sub_item_detail_parses_inclusions_by_line() {
        let mut state = seeded_state();
        let folder = state.active[0].id.clone();
        state.apply(Command::AddSubItem {
            folder: folder.clone(),
        });
        let sub = state.active[0].items[0].id.clone();

        state.apply(Command::SaveSubItemDetail {
            folder: folder.clone(),
            sub: sub.clone(),
            input: SubItemInput {
                name: " Half Day ".to_string(),
                description: " Four hours of coverage ".to_string(),
                inclusions_text: "  4x6 prints \n\n USB drive \n   ".to_string(),
            },
        });

        let entry = &state.active[0].items[0];
        assert_eq!(entry.name, "Half Day");
        assert_eq!(entry.description, "Four hours of coverage");
        assert_eq!(entry.inclusions, vec!["4x6 prints", "USB drive"]);
    }

    #[test]
    fn test_sub_item_name_may_be_saved_empty() {
        let mut state = seeded_state();
        let folder = state.active[0].id.clone();
        state.apply(Command::AddSubItem {
            folder: folder.clone(),
        });
        let sub = state.active[0].items[0].id.clone();

        state.apply(Command::SaveSubItemDetail {
            folder,
            sub,
            input: SubItemInput::default(),
        });

        assert_eq!(state.active[0].items[0].name, "");
    }

    #[test]
    fn test_remove_sub_item_deletes_only_that_entry() {
        let mut state = seeded_state();
        let folder = state.active[0].id.clone();
        for token in [1, 2] {
            state.active[0].items.push(SubItem {
                id: sub_item_id(&folder, token),
                name: format!("Item {}", token),
                img: PLACEHOLDER_IMAGE.to_string(),
                description: String::new(),
                inclusions: Vec::new(),
            });
        }
        let first = state.active[0].items[0].id.clone();

        let transition = state.apply(Command::RemoveSubItem {
            folder: folder.clone(),
            sub: first.clone(),
        });

        assert!(transition.changed_collections());
        assert_eq!(state.active[0].items.len(), 1);
        assert_ne!(state.active[0].items[0].id, first);
    }

    #[test]
    fn test_sub_item_ops_ignore_missing_folders() {
        let mut state = seeded_state();

        let transition = state.apply(Command::AddSubItem {
            folder: ItemId::new("no-such-folder"),
        });

        assert_eq!(transition, Transition::Ignored);
    }
}
