use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};

use crate::{
    api::{self, AddonRecord, AuthSession, Customer, CustomerDetail, MockCatalog, PackageRecord},
    board::{Board, Command, ListSide},
    constants::TIME_SETTINGS,
    domain::ItemId,
    images,
    storage::{self, FileKvStore},
};

mod board_actions;
mod board_view;
mod event_handlers;
mod modal_views;
mod mouse_handlers;
mod render_views;
mod table_views;
mod toasts;
mod ui_helpers;
mod view_style;

use self::toasts::ToastBar;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Screen {
    Login,
    Dashboard,
    Customers,
    Catalog,
    Board,
    Folder,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum UiMode {
    Normal,
    CategoryModal,
    SubItemModal,
    Confirm,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CatalogTab {
    Packages,
    Addons,
}

#[derive(Clone, Debug, PartialEq)]
enum PendingAction {
    Board(Command),
    Logout,
}

#[derive(Clone, Debug)]
struct CardRow {
    side: ListSide,
    index: usize,
    id: ItemId,
    rect: Rect,
}

struct App {
    board: Board<FileKvStore, ToastBar>,
    api: MockCatalog,
    session: Option<AuthSession>,
    screen: Screen,
    ui_mode: UiMode,

    focus_side: ListSide,
    focus_index: usize,
    scrolls: [usize; 2],
    panel_inners: [Rect; 2],
    card_rows: Vec<CardRow>,
    drag_origin: Option<CardRow>,
    drag_active: bool,
    hover_target: Option<(ListSide, usize)>,
    pulse_ids: Vec<ItemId>,
    pulse_frames: i32,

    pending_action: Option<PendingAction>,
    confirm_prompt: String,
    editing_id: Option<ItemId>,
    editing_sub: Option<ItemId>,
    input_focus: usize,
    input_name: String,
    input_path: String,
    input_description: String,
    input_inclusions: String,
    pending_upload: Option<String>,

    open_folder: Option<ItemId>,
    folder_index: usize,

    login_email: String,
    login_password: String,
    login_focus: usize,

    customers_query: String,
    customers: Vec<Customer>,
    customer_index: usize,
    customer_detail: Option<CustomerDetail>,

    catalog_query: String,
    catalog_tab: CatalogTab,
    packages: Vec<PackageRecord>,
    addons: Vec<AddonRecord>,
    catalog_index: usize,
    typing_search: bool,

    render_needed: bool,
}

fn side_slot(side: ListSide) -> usize {
    match side {
        ListSide::Active => 0,
        ListSide::Archived => 1,
    }
}

impl App {
    fn new() -> Self {
        let board = Board::open(FileKvStore::open_default(), ToastBar::new());
        let session = api::load_session(&storage::get_auth_session_path());
        Self::from_parts(board, session)
    }

    fn from_parts(board: Board<FileKvStore, ToastBar>, session: Option<AuthSession>) -> Self {
        let api = MockCatalog::instant();
        let screen = if session.is_some() {
            Screen::Dashboard
        } else {
            Screen::Login
        };

        let customers = api.customers("");
        let packages = api.packages("", None);
        let addons = api.addons("");

        let mut app = Self {
            board,
            api,
            session,
            screen,
            ui_mode: UiMode::Normal,
            focus_side: ListSide::Active,
            focus_index: 0,
            scrolls: [0, 0],
            panel_inners: [Rect::default(), Rect::default()],
            card_rows: Vec::new(),
            drag_origin: None,
            drag_active: false,
            hover_target: None,
            pulse_ids: Vec::new(),
            pulse_frames: 0,
            pending_action: None,
            confirm_prompt: String::new(),
            editing_id: None,
            editing_sub: None,
            input_focus: 0,
            input_name: String::new(),
            input_path: String::new(),
            input_description: String::new(),
            input_inclusions: String::new(),
            pending_upload: None,
            open_folder: None,
            folder_index: 0,
            login_email: String::new(),
            login_password: String::new(),
            login_focus: 0,
            customers_query: String::new(),
            customers,
            customer_index: 0,
            customer_detail: None,
            catalog_query: String::new(),
            catalog_tab: CatalogTab::Packages,
            packages,
            addons,
            catalog_index: 0,
            typing_search: false,
            render_needed: true,
        };

        app.clamp_board_focus();
        app
    }

    fn tick(&mut self) {
        if self.pulse_frames > 0 {
            self.pulse_frames -= 1;
            if self.pulse_frames == 0 {
                self.pulse_ids.clear();
            }
            self.render_needed = true;
        }
        if self.board.notifier.tick() {
            self.render_needed = true;
        }
    }

    fn focused_id(&self) -> Option<ItemId> {
        self.board
            .state
            .list(self.focus_side)
            .get(self.focus_index)
            .map(|item| item.id.clone())
    }

    fn focus_card(&mut self, id: &ItemId) {
        if let Some((side, index)) = self.board.state.locate(id) {
            self.focus_side = side;
            self.focus_index = index;
        }
    }

    fn clamp_board_focus(&mut self) {
        let len = self.board.state.list(self.focus_side).len();
        if len == 0 {
            let other = self.focus_side.other();
            if !self.board.state.list(other).is_empty() {
                self.focus_side = other;
            }
            self.focus_index = 0;
            return;
        }
        self.focus_index = self.focus_index.min(len - 1);
    }

    fn clamp_folder_index(&mut self) {
        let len = self
            .open_folder
            .as_ref()
            .and_then(|id| self.board.state.folder(id))
            .map_or(0, |folder| folder.items.len());
        self.folder_index = self.folder_index.min(len.saturating_sub(1));
    }

    fn step_focus(&mut self, delta: isize) {
        let active_len = self.board.state.active.len();
        let archived_len = self.board.state.archived.len();
        let total = active_len + archived_len;
        if total == 0 {
            return;
        }

        let flat = match self.focus_side {
            ListSide::Active => self.focus_index.min(active_len.saturating_sub(1)),
            ListSide::Archived => {
                active_len + self.focus_index.min(archived_len.saturating_sub(1))
            }
        };
        let next = (flat as isize + delta).rem_euclid(total as isize) as usize;

        if next < active_len {
            self.focus_side = ListSide::Active;
            self.focus_index = next;
        } else {
            self.focus_side = ListSide::Archived;
            self.focus_index = next - active_len;
        }
    }

    fn open_add_modal(&mut self) {
        self.ui_mode = UiMode::CategoryModal;
        self.editing_id = None;
        self.input_focus = 0;
        self.input_name = String::new();
        self.input_path = String::new();
        self.pending_upload = None;
        self.render_needed = true;
    }

    fn open_edit_modal(&mut self, id: ItemId) {
        let Some((side, _)) = self.board.state.locate(&id) else {
            return;
        };
        let Some(item) = self.board.state.item(side, &id) else {
            return;
        };
        self.input_name = item.name.clone();
        self.input_path = images::editor_prefill(&item.img).to_string();
        self.ui_mode = UiMode::CategoryModal;
        self.editing_id = Some(id);
        self.input_focus = 0;
        self.pending_upload = None;
        self.render_needed = true;
    }

    fn open_sub_item_modal(&mut self) {
        let Some(folder) = self
            .open_folder
            .as_ref()
            .and_then(|id| self.board.state.folder(id))
        else {
            return;
        };
        let Some(sub) = folder.items.get(self.folder_index) else {
            return;
        };
        self.editing_sub = Some(sub.id.clone());
        self.input_name = sub.name.clone();
        self.input_description = sub.description.clone();
        self.input_inclusions = sub.inclusions.join("\n");
        self.ui_mode = UiMode::SubItemModal;
        self.input_focus = 0;
        self.render_needed = true;
    }

    fn close_modal(&mut self) {
        self.ui_mode = UiMode::Normal;
        self.editing_id = None;
        self.editing_sub = None;
        self.input_focus = 0;
        self.input_name = String::new();
        self.input_path = String::new();
        self.input_description = String::new();
        self.input_inclusions = String::new();
        self.pending_upload = None;
        self.render_needed = true;
    }

    fn modal_rect(&self, terminal_size: Rect) -> Rect {
        self.modal_rect_ratio(terminal_size, 1, 3)
    }

    fn modal_rect_ratio(&self, terminal_size: Rect, numerator: u16, denominator: u16) -> Rect {
        let target_width = terminal_size.width.saturating_mul(numerator) / denominator;
        let target_height = (terminal_size.height.saturating_mul(numerator) / denominator).max(10);

        let max_width = terminal_size.width.saturating_sub(2).max(1);
        let max_height = terminal_size.height.saturating_sub(2).max(1);

        let modal_width = target_width.clamp(1, max_width);
        let modal_height = target_height.clamp(1, max_height);

        let modal_x = (terminal_size.width.saturating_sub(modal_width)) / 2;
        let modal_y = (terminal_size.height.saturating_sub(modal_height)) / 2;

        Rect::new(modal_x, modal_y, modal_width, modal_height)
    }
}

pub fn run_ui() -> Result<(), io::Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();

    let tick_rate = Duration::from_millis(TIME_SETTINGS.tick_ms);
    let render_rate = Duration::from_millis(1000 / TIME_SETTINGS.target_fps);
    let mut last_tick = Instant::now();
    let mut last_render = Instant::now();

    loop {
        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }

        if last_render.elapsed() >= render_rate && app.render_needed {
            terminal.draw(|f| {
                app.draw_frame(f);
            })?;
            app.render_needed = false;
            last_render = Instant::now();
        }

        if event::poll(Duration::from_millis(1))? {
            match event::read()? {
                Event::Key(key) => {
                    if app.handle_key(key) {
                        break;
                    }
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                Event::Resize(_, _) => app.render_needed = true,
                _ => {}
            }
        }
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
