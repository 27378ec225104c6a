use crate::board::Notifier;
use crate::constants::TOAST_SETTINGS;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum ToastKind {
    Info,
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub(super) struct Toast {
    pub(super) text: String,
    pub(super) kind: ToastKind,
    frames_left: i32,
}

pub(super) struct ToastBar {
    current: Option<Toast>,
}

impl ToastBar {
    pub(super) fn new() -> Self {
        ToastBar { current: None }
    }

    pub(super) fn info(&mut self, text: &str) {
        self.show(text, ToastKind::Info);
    }

    pub(super) fn success(&mut self, text: &str) {
        self.show(text, ToastKind::Success);
    }

    pub(super) fn error(&mut self, text: &str) {
        self.show(text, ToastKind::Error);
    }

    fn show(&mut self, text: &str, kind: ToastKind) {
        self.current = Some(Toast {
            text: text.to_string(),
            kind,
            frames_left: TOAST_SETTINGS.ttl_frames,
        });
    }

    pub(super) fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    pub(super) fn tick(&mut self) -> bool {
        let Some(toast) = self.current.as_mut() else {
            return false;
        };
        toast.frames_left -= 1;
        if toast.frames_left <= 0 {
            self.current = None;
            return true;
        }
        false
    }
}

impl Notifier for ToastBar {
    fn toast(&mut self, message: &str) {
        self.error(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_expires_after_ttl() {
        let mut bar = ToastBar::new();
        bar.info("saved");
        assert_eq!(bar.current().map(|t| t.kind), Some(ToastKind::Info));

        for _ in 0..TOAST_SETTINGS.ttl_frames - 1 {
            assert!(!bar.tick());
            assert!(bar.current().is_some());
        }
        assert!(bar.tick());
        assert!(bar.current().is_none());
    }

    #[test]
    fn test_new_toast_replaces_and_restarts() {
        let mut bar = ToastBar::new();
        bar.success("first");
        for _ in 0..10 {
            bar.tick();
        }
        bar.error("second");
        let toast = bar.current().cloned();
        assert_eq!(
            toast.as_ref().map(|t| t.text.as_str()),
            Some("second")
        );
        assert_eq!(toast.map(|t| t.frames_left), Some(TOAST_SETTINGS.ttl_frames));
    }

    #[test]
    fn test_notifier_messages_surface_as_errors() {
        let mut bar = ToastBar::new();
        bar.toast("Please select at least one package to archive.");
        assert_eq!(bar.current().map(|t| t.kind), Some(ToastKind::Error));
    }

    #[test]
    fn test_tick_without_toast_is_quiet() {
        let mut bar = ToastBar::new();
        assert!(!bar.tick());
    }
}
