use ratatui::prelude::{Line, Span};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use super::{App, view_style};

impl App {
    pub(super) fn render_category_modal(&mut self, f: &mut Frame, size: Rect) {
        let rect = self.modal_rect(size);
        let title = if self.editing_id.is_some() {
            " Edit Package "
        } else {
            " New Package "
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .title(
                Line::from(Span::styled(
                    title,
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Center),
            )
            .title_bottom(
                Line::from(view_style::hint_span(
                    " enter save · tab field · ctrl+o attach · esc cancel ",
                ))
                .alignment(Alignment::Center),
            );
        let inner = block.inner(rect);
        f.render_widget(Clear, rect);
        f.render_widget(block, rect);

        let upload_line = match &self.pending_upload {
            Some(data) => Line::from(Span::styled(
                format!("attached upload ({} KB)", data.len() / 1024),
                Style::default().fg(Color::Green),
            )),
            None => Line::from(view_style::hint_span(
                "ctrl+o attaches the file at the typed path",
            )),
        };

        let lines = vec![
            Line::from(view_style::hint_span("Name")),
            view_style::input_line(&self.input_name, self.input_focus == 0),
            Line::default(),
            Line::from(view_style::hint_span("Image path")),
            view_style::input_line(&self.input_path, self.input_focus == 1),
            Line::default(),
            upload_line,
        ];
        f.render_widget(Paragraph::new(lines), inner);
    }

    pub(super) fn render_sub_item_modal(&mut self, f: &mut Frame, size: Rect) {
        let rect = self.modal_rect_ratio(size, 2, 3);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .title(
                Line::from(Span::styled(
                    " Edit Item ",
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Center),
            )
            .title_bottom(
                Line::from(view_style::hint_span(
                    " ctrl+s save · tab field · enter new line · esc cancel ",
                ))
                .alignment(Alignment::Center),
            );
        let inner = block.inner(rect);
        f.render_widget(Clear, rect);
        f.render_widget(block, rect);

        let mut lines = vec![
            Line::from(view_style::hint_span("Name")),
            view_style::input_line(&self.input_name, self.input_focus == 0),
            Line::default(),
            Line::from(view_style::hint_span("Description")),
            view_style::input_line(&self.input_description, self.input_focus == 1),
            Line::default(),
            Line::from(view_style::hint_span("Inclusions (one per line)")),
        ];
        let focused = self.input_focus == 2;
        let rows: Vec<&str> = self.input_inclusions.split('\n').collect();
        let count = rows.len();
        for (i, row) in rows.into_iter().enumerate() {
            lines.push(view_style::input_line(row, focused && i + 1 == count));
        }
        f.render_widget(Paragraph::new(lines), inner);
    }

    pub(super) fn render_confirm_modal(&mut self, f: &mut Frame, size: Rect) {
        let rect = self.modal_rect(size);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Red))
            .title(
                Line::from(Span::styled(
                    " Confirm ",
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Center),
            );
        let inner = block.inner(rect);
        f.render_widget(Clear, rect);
        f.render_widget(block, rect);

        let body = Paragraph::new(vec![
            Line::default(),
            Line::from(Span::raw(self.confirm_prompt.clone())),
            Line::default(),
            Line::from(vec![
                Span::styled(
                    "[y] ",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("confirm    "),
                Span::styled(
                    "[n] ",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::raw("cancel"),
            ]),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        f.render_widget(body, inner);
    }
}
