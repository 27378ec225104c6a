use ratatui::prelude::{Line, Span};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::api::PopularPackage;

use super::{App, Screen, UiMode, ui_helpers, view_style};

impl App {
    pub(super) fn draw_frame(&mut self, f: &mut Frame) {
        let size = f.size();
        self.card_rows.clear();

        if self.screen == Screen::Login {
            self.render_login(f, size);
            let footer = Rect::new(0, size.height.saturating_sub(1), size.width, 1);
            self.render_status_line(f, footer);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(size);

        self.render_header(f, chunks[0]);
        match self.screen {
            Screen::Dashboard => self.render_dashboard(f, chunks[1]),
            Screen::Customers => self.render_customers(f, chunks[1]),
            Screen::Catalog => self.render_catalog(f, chunks[1]),
            Screen::Board => self.render_board(f, chunks[1]),
            Screen::Folder => self.render_folder(f, chunks[1]),
            Screen::Login => {}
        }
        self.render_status_line(f, chunks[2]);

        match self.ui_mode {
            UiMode::CategoryModal => self.render_category_modal(f, size),
            UiMode::SubItemModal => self.render_sub_item_modal(f, size),
            UiMode::Confirm => self.render_confirm_modal(f, size),
            UiMode::Normal => {}
        }
    }

    fn render_header(&mut self, f: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                " darkroom ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
        ];

        let tabs = [
            ("1 dashboard", Screen::Dashboard),
            ("2 customers", Screen::Customers),
            ("3 catalog", Screen::Catalog),
            ("4 packages", Screen::Board),
        ];
        for (i, (label, screen)) in tabs.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            let active = self.screen == *screen
                || (*screen == Screen::Board && self.screen == Screen::Folder);
            spans.push(view_style::tab_label_span(label, active));
        }

        let mut right_spans = Vec::new();
        if let Some(session) = &self.session {
            right_spans.push(Span::styled(
                session.user.name.clone(),
                Style::default().fg(Color::White),
            ));
            right_spans.push(Span::raw(" "));
            right_spans.push(Span::styled(
                session.user.role.label().to_string(),
                Style::default()
                    .fg(view_style::role_color(session.user.role))
                    .add_modifier(Modifier::BOLD),
            ));
            right_spans.push(Span::raw(" "));
        }

        let left_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
        let right_width: usize = right_spans.iter().map(|s| s.content.chars().count()).sum();
        let total = area.width as usize;
        if left_width + right_width < total {
            spans.push(Span::raw(" ".repeat(total - left_width - right_width)));
        }
        spans.extend(right_spans);

        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_status_line(&mut self, f: &mut Frame, area: Rect) {
        if let Some(toast) = self.board.notifier.current() {
            let line = Line::from(vec![
                Span::raw(" "),
                Span::styled(
                    toast.text.clone(),
                    Style::default()
                        .fg(view_style::toast_color(toast.kind))
                        .add_modifier(Modifier::BOLD),
                ),
            ]);
            f.render_widget(Paragraph::new(line), area);
            return;
        }

        let line = Line::from(vec![Span::raw(" "), view_style::hint_span(self.footer_hint())]);
        f.render_widget(Paragraph::new(line), area);
    }

    fn footer_hint(&self) -> &'static str {
        match self.screen {
            Screen::Login => "enter sign in · tab switch field · esc quit",
            Screen::Dashboard => "1-4 screens · l logout · q quit",
            Screen::Customers => "/ search · ↑↓ move · enter details · esc back · q quit",
            Screen::Catalog => "/ search · tab packages/addons · ↑↓ move · q quit",
            Screen::Folder => "n new item · ↑↓ move · enter edit · d remove · esc back",
            Screen::Board => {
                if self.board.state.selection().is_some() {
                    "space pick · a archive · r restore · d delete · esc done"
                } else if self.board.state.edit_mode() {
                    "enter or click a card to edit it · esc done"
                } else {
                    "n new · e edit · s/S select · a/r/d bulk · enter open · alt+↑↓ reorder · ctrl+←→ move"
                }
            }
        }
    }

    fn render_login(&mut self, f: &mut Frame, size: Rect) {
        let area = self.modal_rect_ratio(size, 1, 2);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .title(
                Line::from(Span::styled(
                    " darkroom · staff sign in ",
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Center),
            );
        let inner = block.inner(area);
        f.render_widget(block, area);

        let email_focused = self.login_focus == 0;
        let lines = vec![
            Line::default(),
            Line::from(view_style::hint_span("Email")),
            view_style::input_line(&self.login_email, email_focused),
            Line::default(),
            Line::from(view_style::hint_span("Password")),
            view_style::input_line(&ui_helpers::mask_secret(&self.login_password), !email_focused),
        ];
        f.render_widget(Paragraph::new(lines), inner);
    }

    fn render_dashboard(&mut self, f: &mut Frame, area: Rect) {
        let stats = self.api.dashboard_stats();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(1)])
            .split(area);

        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(rows[0]);

        self.render_stat_cell(
            f,
            cells[0],
            "Total Customers",
            stats.total_customers.to_string(),
            Color::Cyan,
        );
        self.render_stat_cell(
            f,
            cells[1],
            "Total Bookings",
            stats.total_bookings.to_string(),
            Color::Green,
        );
        self.render_stat_cell(
            f,
            cells[2],
            "Revenue",
            ui_helpers::format_money(stats.revenue),
            Color::Yellow,
        );

        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);

        self.render_popular_panel(f, halves[0], stats.popular_packages);
        self.render_recommendations_panel(f, halves[1]);
    }

    fn render_stat_cell(
        &self,
        f: &mut Frame,
        area: Rect,
        label: &str,
        value: String,
        color: Color,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", label));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let middle = Rect::new(inner.x, inner.y + inner.height / 2, inner.width, 1);
        let line = Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        f.render_widget(Paragraph::new(line).alignment(Alignment::Center), middle);
    }

    fn render_popular_panel(&self, f: &mut Frame, area: Rect, popular: &[PopularPackage]) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Popular Packages ");
        let inner = block.inner(area);
        f.render_widget(block, area);

        let name_width = 24usize;
        let mut lines = Vec::new();
        for entry in popular {
            let name = ui_helpers::truncate_label(entry.name, name_width);
            let pad = name_width.saturating_sub(name.chars().count());
            let price = self
                .api
                .package(entry.package_id)
                .map(|pkg| ui_helpers::format_money(pkg.price.into()))
                .unwrap_or_default();
            lines.push(Line::from(vec![
                Span::styled(name, Style::default().fg(Color::White)),
                Span::raw(" ".repeat(pad + 2)),
                Span::styled(
                    format!("{} bookings", entry.bookings),
                    Style::default().fg(Color::Green),
                ),
                Span::raw("  "),
                Span::styled(price, Style::default().fg(Color::Yellow)),
            ]));
        }
        f.render_widget(Paragraph::new(lines), inner);
    }

    fn render_recommendations_panel(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Recommended ");
        let inner = block.inner(area);
        f.render_widget(block, area);

        let mut lines = Vec::new();
        for rec in self.api.recommendations() {
            lines.push(Line::from(Span::styled(
                rec.name,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                format!("  {}", rec.reason),
                Style::default().fg(Color::DarkGray),
            )));
        }
        f.render_widget(Paragraph::new(lines), inner);
    }
}
