use ratatui::{
    prelude::{Line, Span},
    style::{Color, Modifier, Style},
};

use crate::api::StaffRole;
use crate::board::ListSide;

use super::toasts::ToastKind;

pub(super) fn side_accent(side: ListSide) -> Color {
    match side {
        ListSide::Active => Color::Cyan,
        ListSide::Archived => Color::Yellow,
    }
}

pub(super) fn panel_border(side: ListSide, engaged: bool) -> Style {
    if engaged {
        Style::default().fg(side_accent(side))
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

pub(super) fn focus_style(side: ListSide) -> Style {
    Style::default().fg(Color::Black).bg(side_accent(side))
}

pub(super) fn pulse_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Green)
        .add_modifier(Modifier::BOLD)
}

pub(super) fn toast_color(kind: ToastKind) -> Color {
    match kind {
        ToastKind::Info => Color::Cyan,
        ToastKind::Success => Color::Green,
        ToastKind::Error => Color::Red,
    }
}

pub(super) fn role_color(role: StaffRole) -> Color {
    match role {
        StaffRole::Admin => Color::Magenta,
        StaffRole::Staff => Color::Blue,
    }
}

pub(super) fn tab_label_span(label: &str, active: bool) -> Span<'static> {
    let style = if active {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    Span::styled(label.to_string(), style)
}

pub(super) fn hint_span(text: &str) -> Span<'static> {
    Span::styled(text.to_string(), Style::default().fg(Color::DarkGray))
}

pub(super) fn input_line(value: &str, focused: bool) -> Line<'static> {
    let text = if focused {
        format!(" {}▏", value)
    } else {
        format!(" {}", value)
    };
    let style = if focused {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Gray)
    };
    Line::from(Span::styled(text, style))
}

pub(super) fn consent_span(consent: bool) -> Span<'static> {
    if consent {
        Span::styled("yes", Style::default().fg(Color::Green))
    } else {
        Span::styled("no", Style::default().fg(Color::Red))
    }
}
