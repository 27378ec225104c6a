pub const SNAPSHOT_KEY: &str = "packages_v1";

pub const ARCHIVE_PREFIX: &str = "arch-";

pub const PLACEHOLDER_IMAGE: &str = "images/placeholder.jpg";
pub const IMAGE_PATH_PREFIX: &str = "images/";
pub const CATEGORY_IMAGE_DIR: &str = "images/packagelist/";
pub const DATA_URL_PREFIX: &str = "data:";

pub const DEFAULT_CATEGORY_NAME: &str = "New Package";
pub const UNTITLED_LABEL: &str = "Untitled";
pub const DEFAULT_SUB_ITEM_NAME: &str = "New item";

pub const DEFAULT_CATEGORIES: [DefaultCategory; 3] = [
    DefaultCategory {
        id: "regularcover",
        name: "Regular Packages",
        img: "images/packagelist/package1.png",
    },
    DefaultCategory {
        id: "yearbookcover",
        name: "Yearbook Packages",
        img: "images/packagelist/package2.png",
    },
    DefaultCategory {
        id: "xmascover",
        name: "Xmas Packages",
        img: "images/packagelist/package3.png",
    },
];

pub const BOARD_SETTINGS: BoardSettings = BoardSettings {
    confirm_cross_move: false,
};

pub const TIME_SETTINGS: TimeSettings = TimeSettings {
    tick_ms: 40,
    target_fps: 24,
};

pub const PULSE_SETTINGS: PulseSettings = PulseSettings {
    duration_frames: 10,
};

pub const TOAST_SETTINGS: ToastSettings = ToastSettings { ttl_frames: 72 };

pub const MOCK_LATENCY: LatencySettings = LatencySettings {
    min_ms: 300,
    max_ms: 800,
};

pub struct DefaultCategory {
    pub id: &'static str,
    pub name: &'static str,
    pub img: &'static str,
}

pub struct BoardSettings {
    pub confirm_cross_move: bool,
}

pub struct TimeSettings {
    pub tick_ms: u64,
    pub target_fps: u64,
}

pub struct PulseSettings {
    pub duration_frames: i32,
}

pub struct ToastSettings {
    pub ttl_frames: i32,
}

pub struct LatencySettings {
    pub min_ms: u64,
    pub max_ms: u64,
}
