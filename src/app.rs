use std::path::PathBuf;

use crate::filter::filter_menu;
use crate::loader::LoadError;
use crate::menu::{Item, MenuDocument, Section, format_price, resolve_image};
use crate::modal::{ItemDetails, ModalController};
use crate::theme::{self, AD_SEEN_KEY, StateStore, Theme};

/// Input mode for the search bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Main application state.
pub struct App {
    store: Box<dyn StateStore>,
    pub theme: Theme,

    pub menu: Option<MenuDocument>,
    pub menu_dir: Option<PathBuf>,
    pub load_error: Option<String>,

    pub query: String,
    pub input_mode: InputMode,
    pub view: Vec<Section>,
    pub selected: usize,

    pub modals: ModalController,
    pub should_quit: bool,
    pub status_msg: String,
}

impl App {
    pub fn new(store: Box<dyn StateStore>) -> Self {
        Self {
            store,
            theme: Theme::Dark,
            menu: None,
            menu_dir: None,
            load_error: None,
            query: String::new(),
            input_mode: InputMode::Normal,
            view: Vec::new(),
            selected: 0,
            modals: ModalController::new(),
            should_quit: false,
            status_msg: "Loading menu...".to_string(),
        }
    }

    /// Resolve and apply the persisted theme (startup).
    pub fn init_theme(&mut self) {
        self.theme = theme::init(self.store.as_mut(), theme::ambient_preference());
    }

    pub fn toggle_theme(&mut self) {
        self.theme = theme::toggle(self.store.as_mut(), self.theme);
        self.status_msg = format!("Theme: {}", self.theme.as_str());
    }

    /// Install the loaded document and paint the unfiltered view.
    pub fn set_menu(&mut self, doc: MenuDocument, menu_dir: Option<PathBuf>) {
        self.menu = Some(doc);
        self.menu_dir = menu_dir;
        self.load_error = None;
        self.apply_filter();
    }

    /// Record a failed load. The session stays up and renders the notice
    /// in place of the menu.
    pub fn set_load_error(&mut self, err: &LoadError) {
        self.load_error = Some(err.user_message());
        self.menu = None;
        self.view.clear();
        self.status_msg = "Menu unavailable".to_string();
    }

    /// Re-run the filter against the current query and reset selection.
    pub fn apply_filter(&mut self) {
        let Some(menu) = &self.menu else {
            return;
        };
        self.view = filter_menu(menu, &self.query);
        self.selected = 0;
        self.status_msg = format!(
            "{} items in {} sections for \"{}\"",
            self.item_count(),
            self.view.len(),
            if self.query.trim().is_empty() {
                "all"
            } else {
                self.query.trim()
            }
        );
    }

    pub fn item_count(&self) -> usize {
        self.view.iter().map(|s| s.items.len()).sum()
    }

    /// The item the selection currently points at, with its section.
    pub fn selected_item(&self) -> Option<(&Section, &Item)> {
        let mut index = self.selected;
        for section in &self.view {
            if index < section.items.len() {
                return Some((section, &section.items[index]));
            }
            index -= section.items.len();
        }
        None
    }

    pub fn list_next(&mut self) {
        let count = self.item_count();
        if count > 0 && self.selected + 1 < count {
            self.selected += 1;
        }
    }

    pub fn list_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn list_home(&mut self) {
        self.selected = 0;
    }

    pub fn list_end(&mut self) {
        self.selected = self.item_count().saturating_sub(1);
    }

    pub fn list_page_down(&mut self) {
        let count = self.item_count();
        if count > 0 {
            self.selected = (self.selected + 10).min(count - 1);
        }
    }

    pub fn list_page_up(&mut self) {
        self.selected = self.selected.saturating_sub(10);
    }

    /// Open the item-detail overlay for the selected row.
    pub fn open_selected_detail(&mut self) {
        let currency = self
            .menu
            .as_ref()
            .map(|m| m.currency.clone())
            .unwrap_or_else(|| crate::menu::DEFAULT_CURRENCY.to_string());

        let Some((_, item)) = self.selected_item() else {
            return;
        };

        let menu_dir = self.menu_dir.clone();
        let image = resolve_image(item.img.as_deref(), |src| match &menu_dir {
            // Local menus can be probed on disk; remote references are
            // taken at face value.
            Some(dir) => dir.join(src).exists(),
            None => true,
        });

        let payload = ItemDetails {
            image,
            name: item.name.clone(),
            desc: item.desc.clone(),
            price: format_price(item.price.as_ref(), &currency),
        };
        self.modals.open_detail(payload);
    }

    /// The ad overlay's continue action: dismisses it once per run and
    /// records the (never consulted) seen marker.
    pub fn ad_continue(&mut self) {
        if self.modals.ad_continue() {
            self.store.set(AD_SEEN_KEY, "true");
        }
    }

    pub fn search_push(&mut self, c: char) {
        self.query.push(c);
        self.apply_filter();
    }

    pub fn search_pop(&mut self) {
        self.query.pop();
        self.apply_filter();
    }

    pub fn clear_search(&mut self) {
        if !self.query.is_empty() {
            self.query.clear();
            self.apply_filter();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modal::ModalId;
    use serde_json::json;
    use std::collections::BTreeMap;

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

    fn tacos_doc() -> MenuDocument {
        serde_json::from_value(json!({
            "sections": [{
                "title": "Tacos",
                "items": [
                    {"name": "Al Pastor", "price": 85},
                    {"name": "Suadero", "price": 0}
                ]
            }]
        }))
        .unwrap()
    }

    fn app_with_menu() -> App {
        let mut app = App::new(Box::new(MemStore::default()));
        app.set_menu(tacos_doc(), None);
        app
    }

    #[test]
    fn empty_query_shows_everything() {
        let app = app_with_menu();
        assert_eq!(app.view.len(), 1);
        assert_eq!(app.item_count(), 2);
    }

    #[test]
    fn query_reduces_and_keeps_the_section() {
        let mut app = app_with_menu();
        for c in "pastor".chars() {
            app.search_push(c);
        }
        assert_eq!(app.view.len(), 1);
        assert_eq!(app.view[0].title, "Tacos");
        assert_eq!(app.item_count(), 1);
        assert_eq!(app.view[0].items[0].name, "Al Pastor");
    }

    #[test]
    fn unmatched_query_clears_the_view() {
        let mut app = app_with_menu();
        for c in "sushi".chars() {
            app.search_push(c);
        }
        assert!(app.view.is_empty());
        assert_eq!(app.item_count(), 0);
        assert!(app.selected_item().is_none());
    }

    #[test]
    fn selection_clamps_at_the_ends() {
        let mut app = app_with_menu();
        app.list_prev();
        assert_eq!(app.selected, 0);
        app.list_next();
        app.list_next();
        assert_eq!(app.selected, 1);
        app.list_home();
        assert_eq!(app.selected, 0);
        app.list_end();
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn detail_payload_carries_formatted_fields() {
        let mut app = app_with_menu();
        app.open_selected_detail();

        let detail = app.modals.detail().unwrap();
        assert_eq!(detail.name, "Al Pastor");
        assert_eq!(detail.price, "$85");
        // No img reference in the document: placeholder applies.
        assert_eq!(detail.image, crate::menu::PLACEHOLDER_IMG);
        assert!(app.modals.scroll_locked());
    }

    #[test]
    fn zero_price_renders_as_zero_not_empty() {
        let mut app = app_with_menu();
        app.list_next();
        app.open_selected_detail();
        assert_eq!(app.modals.detail().unwrap().price, "$0");
    }

    #[test]
    fn ad_continue_records_the_inert_marker() {
        let mut app = app_with_menu();
        app.modals.open_ad();
        app.ad_continue();
        assert!(!app.modals.is_open(ModalId::AdGate));
        assert_eq!(app.store.get(AD_SEEN_KEY).as_deref(), Some("true"));

        // Firing again neither closes anything nor rewrites the marker.
        app.store.set(AD_SEEN_KEY, "probe");
        app.ad_continue();
        assert_eq!(app.store.get(AD_SEEN_KEY).as_deref(), Some("probe"));
    }

    #[test]
    fn load_error_replaces_the_menu() {
        let mut app = app_with_menu();
        let err = LoadError::Status(reqwest::StatusCode::NOT_FOUND);
        app.set_load_error(&err);
        assert!(app.menu.is_none());
        assert!(app.view.is_empty());
        assert!(app.load_error.as_deref().unwrap().contains("404"));
    }
}
