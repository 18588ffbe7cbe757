use super::slide::Slide;

/// Short label shown for one slide in the navigator list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideLabel {
    pub stage: String,
    pub title: String,
}

impl SlideLabel {
    pub fn new(stage: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            stage: stage.into(),
            title: title.into(),
        }
    }

    pub fn for_slide(slide: &Slide, index: usize) -> Self {
        Self {
            stage: slide.stage_label(index),
            title: slide.title_label(index),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Closed,
    Open,
}

/// Document-level listeners the panel holds while open. Tracked explicitly
/// so repeated open/close cycles can be shown not to leak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalListener {
    OutsideClick,
    EscapeKey,
}

/// Floating jump-to-slide panel. The navigator only reports the selected
/// index; actually navigating the deck is the caller's job.
pub struct SlideNavigator {
    entries: Vec<SlideLabel>,
    active: usize,
    state: PanelState,
    listeners: Vec<GlobalListener>,
}

impl Default for SlideNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl SlideNavigator {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            active: 0,
            state: PanelState::Closed,
            listeners: Vec::new(),
        }
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == PanelState::Open
    }

    pub fn entries(&self) -> &[SlideLabel] {
        &self.entries
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn global_listeners(&self) -> &[GlobalListener] {
        &self.listeners
    }

    /// Replaces the displayed list; the active highlight is untouched.
    pub fn update_slides(&mut self, entries: Vec<SlideLabel>) {
        self.entries = entries;
    }

    /// Moves the highlight only; never triggers navigation.
    pub fn set_active(&mut self, index: usize) {
        self.active = index;
    }

    pub fn open(&mut self) {
        if self.is_open() {
            return;
        }
        self.state = PanelState::Open;
        self.listeners = vec![GlobalListener::OutsideClick, GlobalListener::EscapeKey];
    }

    pub fn close(&mut self) {
        if !self.is_open() {
            return;
        }
        self.state = PanelState::Closed;
        self.listeners.clear();
    }

    pub fn toggle(&mut self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    /// A click on a list entry: closes the panel and hands the target index
    /// back for the caller to navigate with. Unknown entries are ignored.
    pub fn select(&mut self, index: usize) -> Option<usize> {
        if index >= self.entries.len() {
            return None;
        }
        self.close();
        Some(index)
    }

    pub fn handle_escape(&mut self) {
        self.close();
    }

    /// A document-level pointer event; closes unless it landed inside the
    /// panel.
    pub fn handle_outside_click(&mut self, inside_panel: bool) {
        if !inside_panel {
            self.close();
        }
    }
}
