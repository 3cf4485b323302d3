use std::collections::HashSet;

/// Identifies one of the two overlay surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalId {
    ItemDetail,
    AdGate,
}

/// Display payload for the item-detail overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDetails {
    pub image: String,
    pub name: String,
    pub desc: Option<String>,
    pub price: String,
}

/// Open/close state for both overlays plus the shared scroll lock.
///
/// The lock is a single page-level resource: it is held while the set of
/// open overlays is non-empty and released only when the set empties, so
/// closing one of two open overlays never unlocks the other.
#[derive(Debug, Default)]
pub struct ModalController {
    open: HashSet<ModalId>,
    detail: Option<ItemDetails>,
    ad_continue_used: bool,
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the item-detail overlay with the given payload.
    pub fn open_detail(&mut self, payload: ItemDetails) {
        self.detail = Some(payload);
        self.open.insert(ModalId::ItemDetail);
    }

    /// Open the advertisement overlay.
    pub fn open_ad(&mut self) {
        self.open.insert(ModalId::AdGate);
    }

    /// Close an overlay. Total: closing an already-closed overlay is a no-op.
    pub fn close(&mut self, id: ModalId) {
        self.open.remove(&id);
        if id == ModalId::ItemDetail {
            self.detail = None;
        }
    }

    /// The ad overlay's "continue" affordance. Fires at most once per run;
    /// returns whether this call was the one that fired.
    pub fn ad_continue(&mut self) -> bool {
        if self.ad_continue_used {
            return false;
        }
        self.ad_continue_used = true;
        self.close(ModalId::AdGate);
        true
    }

    pub fn is_open(&self, id: ModalId) -> bool {
        self.open.contains(&id)
    }

    /// Whether background scrolling is currently suppressed.
    pub fn scroll_locked(&self) -> bool {
        !self.open.is_empty()
    }

    /// The overlay that should receive key events, if any. The ad gate is
    /// drawn on top of the item detail, so it wins when both are open.
    pub fn active(&self) -> Option<ModalId> {
        if self.is_open(ModalId::AdGate) {
            Some(ModalId::AdGate)
        } else if self.is_open(ModalId::ItemDetail) {
            Some(ModalId::ItemDetail)
        } else {
            None
        }
    }

    pub fn detail(&self) -> Option<&ItemDetails> {
        self.detail.as_ref()
    }
}
