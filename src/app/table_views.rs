use ratatui::prelude::{Line, Span};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use super::{App, CatalogTab, ui_helpers, view_style};

impl App {
    pub(super) fn render_customers(&mut self, f: &mut Frame, area: Rect) {
        let (table_area, detail_area) = if self.customer_detail.is_some() {
            let halves = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(area);
            (halves[0], Some(halves[1]))
        } else {
            (area, None)
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(Line::from(vec![
                Span::styled(
                    " Customers ",
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("{} ", self.customers.len()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
        if let Some(search) = self.search_title(&self.customers_query) {
            block = block.title(search.alignment(Alignment::Right));
        }
        let inner = block.inner(table_area);
        f.render_widget(block, table_area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);

        let header = Line::from(Span::styled(
            format!(
                " {}{}{}{}{}",
                ui_helpers::pad_cell("Name", 20),
                ui_helpers::pad_cell("Email", 26),
                ui_helpers::pad_cell("Contact", 15),
                ui_helpers::pad_cell("Consent", 9),
                "Bookings",
            ),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ));
        f.render_widget(Paragraph::new(header), rows[0]);

        if self.customers.is_empty() {
            f.render_widget(
                Paragraph::new(Line::from(view_style::hint_span(" No matches."))),
                rows[1],
            );
        } else {
            let index = self
                .customer_index
                .min(self.customers.len().saturating_sub(1));
            let items: Vec<ListItem> = self
                .customers
                .iter()
                .enumerate()
                .map(|(i, customer)| {
                    let consent = if customer.consent { "yes" } else { "no" };
                    let left = format!(
                        " {}{}{}",
                        ui_helpers::pad_cell(customer.name, 20),
                        ui_helpers::pad_cell(customer.email, 26),
                        ui_helpers::pad_cell(customer.contact, 15),
                    );
                    if i == index {
                        ListItem::new(Line::from(Span::raw(format!(
                            "{}{}{}",
                            left,
                            ui_helpers::pad_cell(consent, 9),
                            customer.bookings,
                        ))))
                        .style(Style::default().fg(Color::Black).bg(Color::Cyan))
                    } else {
                        ListItem::new(Line::from(vec![
                            Span::raw(left),
                            view_style::consent_span(customer.consent),
                            Span::raw(format!(
                                "{}{}",
                                " ".repeat(9usize.saturating_sub(consent.chars().count())),
                                customer.bookings,
                            )),
                        ]))
                    }
                })
                .collect();

            let mut list_state = ListState::default();
            list_state.select(Some(index));
            let list = List::new(items).highlight_style(Style::default());
            f.render_stateful_widget(list, rows[1], &mut list_state);
        }

        if let Some(detail_area) = detail_area {
            self.render_customer_detail(f, detail_area);
        }
    }

    fn render_customer_detail(&self, f: &mut Frame, area: Rect) {
        let Some(detail) = &self.customer_detail else {
            return;
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Customer ");
        let inner = block.inner(area);
        f.render_widget(block, area);

        let mut lines = vec![
            Line::from(Span::styled(
                detail.customer.name,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(view_style::hint_span(detail.customer.email)),
            Line::from(view_style::hint_span(detail.customer.contact)),
            Line::from(view_style::hint_span(detail.address)),
            Line::default(),
            Line::from(vec![
                Span::raw("Marketing consent: "),
                view_style::consent_span(detail.customer.consent),
            ]),
            Line::from(Span::raw(format!("Bookings: {}", detail.customer.bookings))),
            Line::default(),
            Line::from(Span::styled(
                "History",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
        ];
        if detail.history.is_empty() {
            lines.push(Line::from(view_style::hint_span("No bookings yet.")));
        }
        for booking in detail.history {
            lines.push(Line::from(vec![
                Span::styled(booking.date, Style::default().fg(Color::DarkGray)),
                Span::raw(format!("  {}  ", booking.package)),
                Span::styled(
                    ui_helpers::format_money(booking.amount.into()),
                    Style::default().fg(Color::Yellow),
                ),
            ]));
        }
        f.render_widget(Paragraph::new(lines), inner);
    }

    pub(super) fn render_catalog(&mut self, f: &mut Frame, area: Rect) {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        let packages_active = self.catalog_tab == CatalogTab::Packages;
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(Line::from(vec![
                Span::raw(" "),
                view_style::tab_label_span("Packages", packages_active),
                Span::styled(" · ", Style::default().fg(Color::DarkGray)),
                view_style::tab_label_span("Addons", !packages_active),
                Span::raw(" "),
            ]));
        if let Some(search) = self.search_title(&self.catalog_query) {
            block = block.title(search.alignment(Alignment::Right));
        }
        let inner = block.inner(halves[0]);
        f.render_widget(block, halves[0]);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);

        let label = match self.catalog_tab {
            CatalogTab::Packages => "Package",
            CatalogTab::Addons => "Addon",
        };
        let header = Line::from(Span::styled(
            format!(
                " {}{}{}",
                ui_helpers::pad_cell(label, 24),
                ui_helpers::pad_cell("Category", 12),
                "Price",
            ),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ));
        f.render_widget(Paragraph::new(header), rows[0]);

        let entries: Vec<(String, String, u32)> = match self.catalog_tab {
            CatalogTab::Packages => self
                .packages
                .iter()
                .map(|p| (p.name.to_string(), p.category.to_string(), p.price))
                .collect(),
            CatalogTab::Addons => self
                .addons
                .iter()
                .map(|a| (a.name.to_string(), a.category.to_string(), a.price))
                .collect(),
        };

        if entries.is_empty() {
            f.render_widget(
                Paragraph::new(Line::from(view_style::hint_span(" No matches."))),
                rows[1],
            );
        } else {
            let index = self.catalog_index.min(entries.len() - 1);
            let items: Vec<ListItem> = entries
                .iter()
                .enumerate()
                .map(|(i, (name, category, price))| {
                    let text = format!(
                        " {}{}{}",
                        ui_helpers::pad_cell(name, 24),
                        ui_helpers::pad_cell(category, 12),
                        ui_helpers::format_money((*price).into()),
                    );
                    if i == index {
                        ListItem::new(Line::from(Span::raw(text)))
                            .style(Style::default().fg(Color::Black).bg(Color::Cyan))
                    } else {
                        ListItem::new(Line::from(Span::raw(text)))
                    }
                })
                .collect();

            let mut list_state = ListState::default();
            list_state.select(Some(index));
            let list = List::new(items).highlight_style(Style::default());
            f.render_stateful_widget(list, rows[1], &mut list_state);
        }

        self.render_catalog_detail(f, halves[1]);
    }

    fn render_catalog_detail(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Details ");
        let inner = block.inner(area);
        f.render_widget(block, area);

        let mut lines = Vec::new();
        match self.catalog_tab {
            CatalogTab::Packages => {
                let Some(pkg) = self.packages.get(self.catalog_index) else {
                    return;
                };
                lines.push(Line::from(Span::styled(
                    pkg.name,
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(vec![
                    Span::styled(
                        ui_helpers::format_money(pkg.price.into()),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  {}", pkg.category),
                        Style::default().fg(Color::Cyan),
                    ),
                ]));
                lines.push(Line::default());
                lines.push(Line::from(Span::raw(pkg.description)));
                lines.push(Line::default());
                lines.push(Line::from(Span::styled(
                    "Inclusions",
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )));
                for inclusion in pkg.inclusions {
                    lines.push(Line::from(view_style::hint_span(&format!(
                        "· {}",
                        inclusion
                    ))));
                }
            }
            CatalogTab::Addons => {
                let Some(addon) = self.addons.get(self.catalog_index) else {
                    return;
                };
                lines.push(Line::from(Span::styled(
                    addon.name,
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(vec![
                    Span::styled(
                        ui_helpers::format_money(addon.price.into()),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  {}", addon.category),
                        Style::default().fg(Color::Cyan),
                    ),
                ]));
                lines.push(Line::default());
                lines.push(Line::from(Span::raw(addon.description)));
            }
        }
        f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }

    fn search_title(&self, query: &str) -> Option<Line<'static>> {
        if !self.typing_search && query.is_empty() {
            return None;
        }
        let caret = if self.typing_search { "▏" } else { "" };
        Some(Line::from(Span::styled(
            format!(" / {}{} ", query, caret),
            Style::default().fg(Color::Yellow),
        )))
    }
}
