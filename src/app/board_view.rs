use ratatui::prelude::{Line, Span};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::board::ListSide;
use crate::constants::UNTITLED_LABEL;
use crate::domain::{CategoryItem, ItemId};

use super::{App, CardRow, Screen, side_slot, ui_helpers, view_style};

impl App {
    pub(super) fn render_board(&mut self, f: &mut Frame, area: Rect) {
        let panels = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        self.render_board_panel(f, panels[0], ListSide::Active);
        self.render_board_panel(f, panels[1], ListSide::Archived);
    }

    fn render_board_panel(&mut self, f: &mut Frame, area: Rect, side: ListSide) {
        let items = self.board.state.list(side).to_vec();
        let selecting = self.board.state.selecting(side);
        let focused_panel = self.focus_side == side;

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(view_style::panel_border(side, focused_panel || selecting))
            .title(Line::from(vec![
                Span::styled(
                    format!(" {} ", side.label()),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("{} ", items.len()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
        if selecting {
            block = block.title(
                Line::from(Span::styled(
                    format!(" {} selected ", self.board.state.selected_count()),
                    Style::default()
                        .fg(view_style::side_accent(side))
                        .add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Right),
            );
        } else if self.board.state.edit_mode() {
            block = block.title(
                Line::from(Span::styled(
                    " edit mode ",
                    Style::default().fg(Color::Red),
                ))
                .alignment(Alignment::Right),
            );
        }

        let inner = block.inner(area);
        f.render_widget(block, area);
        self.panel_inners[side_slot(side)] = inner;

        let visible = inner.height as usize;
        let mut scroll = self.scrolls[side_slot(side)].min(items.len().saturating_sub(1));
        if focused_panel && !items.is_empty() && visible > 0 {
            let fi = self.focus_index.min(items.len() - 1);
            if fi < scroll {
                scroll = fi;
            } else if fi >= scroll + visible {
                scroll = fi + 1 - visible;
            }
        }
        self.scrolls[side_slot(side)] = scroll;

        let hover_slot = match self.hover_target {
            Some((hover_side, slot)) if hover_side == side => Some(slot),
            _ => None,
        };

        if items.is_empty() {
            if inner.height == 0 {
                return;
            }
            let text = if hover_slot.is_some() {
                Span::styled("▸ drop here", Style::default().fg(Color::Green))
            } else {
                view_style::hint_span(match side {
                    ListSide::Active => "No packages yet. Press n to add one.",
                    ListSide::Archived => "No archived packages.",
                })
            };
            let row = Rect::new(inner.x + 1, inner.y, inner.width.saturating_sub(1), 1);
            f.render_widget(Paragraph::new(Line::from(text)), row);
            return;
        }

        let dragging = self.board.state.dragging().cloned();
        for (i, item) in items.iter().enumerate().skip(scroll).take(visible) {
            let rect = Rect::new(inner.x, inner.y + (i - scroll) as u16, inner.width, 1);
            self.card_rows.push(CardRow {
                side,
                index: i,
                id: item.id.clone(),
                rect,
            });

            let gutter = match hover_slot {
                Some(slot) if slot == i => "▸ ",
                Some(slot) if slot == items.len() && i + 1 == items.len() => "▾ ",
                _ => "  ",
            };
            let style = self.card_style(item, side, i, dragging.as_ref());
            let highlighted = style != Style::default();
            let line = self.card_line(item, side, selecting, gutter, highlighted);
            f.render_widget(Paragraph::new(line).style(style), rect);
        }
    }

    fn card_style(
        &self,
        item: &CategoryItem,
        side: ListSide,
        index: usize,
        dragging: Option<&ItemId>,
    ) -> Style {
        if self.pulse_ids.contains(&item.id) {
            return view_style::pulse_style();
        }
        if dragging == Some(&item.id) {
            return Style::default().add_modifier(Modifier::DIM);
        }
        if self.focus_side == side && self.focus_index == index {
            return view_style::focus_style(side);
        }
        Style::default()
    }

    fn card_line(
        &self,
        item: &CategoryItem,
        side: ListSide,
        selecting: bool,
        gutter: &'static str,
        highlighted: bool,
    ) -> Line<'static> {
        let (name_style, count_style, img_style) = if highlighted {
            (
                Style::default().add_modifier(Modifier::BOLD),
                Style::default(),
                Style::default(),
            )
        } else {
            (
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
                Style::default().fg(Color::Cyan),
                Style::default().fg(Color::DarkGray),
            )
        };

        let mut spans = vec![Span::styled(gutter, Style::default().fg(Color::Green))];
        if selecting {
            let mark = if self.board.state.is_selected(&item.id) {
                "[x] "
            } else {
                "[ ] "
            };
            spans.push(Span::styled(
                mark,
                Style::default().fg(view_style::side_accent(side)),
            ));
        }
        spans.push(Span::styled(item.display_name().to_string(), name_style));
        if !item.items.is_empty() {
            spans.push(Span::styled(
                format!("  {} items", item.items.len()),
                count_style,
            ));
        }
        spans.push(Span::styled(
            format!("  · {}", ui_helpers::image_label(&item.img)),
            img_style,
        ));
        Line::from(spans)
    }

    pub(super) fn render_folder(&mut self, f: &mut Frame, area: Rect) {
        let Some(folder) = self
            .open_folder
            .clone()
            .and_then(|id| self.board.state.folder(&id).cloned())
        else {
            self.screen = Screen::Board;
            self.render_board(f, area);
            return;
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .title(Line::from(vec![
                Span::styled(
                    format!(" {} ", folder.display_name()),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("{} items ", folder.items.len()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
        let inner = block.inner(area);
        f.render_widget(block, area);

        if folder.items.is_empty() {
            if inner.height == 0 {
                return;
            }
            let row = Rect::new(inner.x + 1, inner.y, inner.width.saturating_sub(1), 1);
            f.render_widget(
                Paragraph::new(Line::from(view_style::hint_span(
                    "No items yet. Press n to add one.",
                ))),
                row,
            );
            return;
        }

        let visible = inner.height as usize;
        let index = self.folder_index.min(folder.items.len() - 1);
        let scroll = if visible > 0 && index >= visible {
            index + 1 - visible
        } else {
            0
        };

        for (i, sub) in folder.items.iter().enumerate().skip(scroll).take(visible) {
            let rect = Rect::new(inner.x, inner.y + (i - scroll) as u16, inner.width, 1);
            let selected = i == index;

            let name = if sub.name.is_empty() {
                UNTITLED_LABEL.to_string()
            } else {
                sub.name.clone()
            };
            let (name_style, desc_style, count_style) = if selected {
                (
                    Style::default().add_modifier(Modifier::BOLD),
                    Style::default(),
                    Style::default(),
                )
            } else {
                (
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                    Style::default().fg(Color::DarkGray),
                    Style::default().fg(Color::Cyan),
                )
            };

            let mut spans = vec![Span::raw(" "), Span::styled(name, name_style)];
            if !sub.description.is_empty() {
                spans.push(Span::styled(
                    format!("  {}", ui_helpers::truncate_label(&sub.description, 48)),
                    desc_style,
                ));
            }
            if !sub.inclusions.is_empty() {
                spans.push(Span::styled(
                    format!("  · {} inclusions", sub.inclusions.len()),
                    count_style,
                ));
            }

            let style = if selected {
                view_style::focus_style(ListSide::Active)
            } else {
                Style::default()
            };
            f.render_widget(Paragraph::new(Line::from(spans)).style(style), rect);
        }
    }
}
