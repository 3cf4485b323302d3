use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ratatui::style::Color;

/// Key the active theme is persisted under.
pub const THEME_KEY: &str = "theme";

/// Key recorded when the advertisement "continue" action fires. Written
/// but never read back: the ad overlay shows on every startup.
pub const AD_SEEN_KEY: &str = "ad_seen_v1";

/// The two display themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse a persisted identifier. Anything but the two valid names is
    /// treated as absent.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    // ── Palette ──

    pub fn text(self) -> Color {
        match self {
            Self::Light => Color::Black,
            Self::Dark => Color::White,
        }
    }

    pub fn dim(self) -> Color {
        match self {
            Self::Light => Color::Gray,
            Self::Dark => Color::DarkGray,
        }
    }

    pub fn accent(self) -> Color {
        match self {
            Self::Light => Color::Blue,
            Self::Dark => Color::Cyan,
        }
    }

    pub fn price(self) -> Color {
        match self {
            Self::Light => Color::Magenta,
            Self::Dark => Color::Yellow,
        }
    }

    pub fn highlight_bg(self) -> Color {
        match self {
            Self::Light => Color::Blue,
            Self::Dark => Color::DarkGray,
        }
    }

    pub fn highlight_fg(self) -> Color {
        Color::White
    }
}

/// Host-local key/value storage. Injectable so theme and ad state can be
/// exercised in tests without touching the real state file.
pub trait StateStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// Resolve the theme at startup.
///
/// A valid persisted value wins; otherwise the host's ambient preference
/// is the default. The resolved theme is written back in both cases.
pub fn init(store: &mut dyn StateStore, ambient: Theme) -> Theme {
    let resolved = store
        .get(THEME_KEY)
        .as_deref()
        .and_then(Theme::parse)
        .unwrap_or(ambient);
    store.set(THEME_KEY, resolved.as_str());
    resolved
}

/// Flip to the other theme and persist the choice.
pub fn toggle(store: &mut dyn StateStore, current: Theme) -> Theme {
    let next = current.toggled();
    store.set(THEME_KEY, next.as_str());
    next
}

/// Ambient display preference of the hosting terminal.
///
/// Follows the `COLORFGBG` convention ("<fg>;<bg>", light backgrounds are
/// 7 or 15). Absent or unparseable values default to dark.
pub fn ambient_preference() -> Theme {
    ambient_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
}

fn ambient_from_colorfgbg(value: Option<&str>) -> Theme {
    let bg = value
        .and_then(|v| v.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok());
    match bg {
        Some(7) | Some(15) => Theme::Light,
        _ => Theme::Dark,
    }
}

/// `StateStore` backed by a JSON map on disk.
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`, treating a missing or corrupt file as
    /// empty.
    pub fn open(path: &Path) -> Self {
        let values = std::fs::read(path)
            .ok()
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
            .unwrap_or_default();
        Self {
            path: path.to_path_buf(),
            values,
        }
    }

    fn persist(&self) {
        if let Ok(json) = serde_json::to_vec_pretty(&self.values) {
            // Preference storage is best-effort; a read-only disk must not
            // take the session down.
            let _ = std::fs::write(&self.path, json);
        }
    }
}

impl StateStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        self.persist();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MemStore(BTreeMap<String, String>);

    impl StateStore for MemStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key).cloned()
        }

        fn set(&mut self, key: &str, value: &str) {
            self.0.insert(key.to_string(), value.to_string());
        }
    }

    #[test]
    fn init_prefers_a_valid_stored_value() {
        let mut store = MemStore::default();
        store.set(THEME_KEY, "light");
        assert_eq!(init(&mut store, Theme::Dark), Theme::Light);
    }

    #[test]
    fn init_falls_back_to_ambient_when_absent_or_corrupt() {
        let mut store = MemStore::default();
        assert_eq!(init(&mut store, Theme::Light), Theme::Light);

        store.set(THEME_KEY, "solarized");
        assert_eq!(init(&mut store, Theme::Dark), Theme::Dark);
    }

    #[test]
    fn toggle_round_trips_through_the_store() {
        let mut store = MemStore::default();
        let first = init(&mut store, Theme::Dark);
        assert_eq!(first, Theme::Dark);

        let flipped = toggle(&mut store, first);
        assert_eq!(flipped, Theme::Light);

        // A later startup sees the toggled value, not the default.
        assert_eq!(init(&mut store, Theme::Dark), Theme::Light);
    }

    #[test]
    fn ambient_follows_colorfgbg() {
        assert_eq!(ambient_from_colorfgbg(Some("0;15")), Theme::Light);
        assert_eq!(ambient_from_colorfgbg(Some("15;default;0")), Theme::Dark);
        assert_eq!(ambient_from_colorfgbg(Some("garbage")), Theme::Dark);
        assert_eq!(ambient_from_colorfgbg(None), Theme::Dark);
    }

    #[test]
    fn file_store_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut store = FileStore::open(&path);
        store.set(THEME_KEY, "light");
        store.set(AD_SEEN_KEY, "true");

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get(THEME_KEY).as_deref(), Some("light"));
        assert_eq!(reopened.get(AD_SEEN_KEY).as_deref(), Some("true"));
    }

    #[test]
    fn file_store_tolerates_a_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, b"not json").unwrap();

        let store = FileStore::open(&path);
        assert_eq!(store.get(THEME_KEY), None);
    }
}
