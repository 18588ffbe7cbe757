use serde::{Deserialize, Serialize};

use super::events::{DeckEvent, EventEmitter, SubscriberId};
use super::navigator::SlideLabel;
use super::slide::Slide;

/// How out-of-range navigation requests are normalized. Presentation
/// surfaces wrap past either end; authoring surfaces stop at the edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavPolicy {
    Wrap,
    Clamp,
}

/// The ordered slide sequence plus the pointer to the visible slide.
/// Requests are forgiving: out-of-range indexes are normalized per the
/// policy and operations on an empty deck are silent no-ops.
pub struct Deck {
    slides: Vec<Slide>,
    active: usize,
    policy: NavPolicy,
    emitter: EventEmitter,
}

impl Deck {
    pub fn new(policy: NavPolicy) -> Self {
        Self {
            slides: Vec::new(),
            active: 0,
            policy,
            emitter: EventEmitter::new(),
        }
    }

    pub fn with_slides(policy: NavPolicy, slides: Vec<Slide>) -> Self {
        let mut deck = Self::new(policy);
        deck.slides = slides;
        deck
    }

    pub fn policy(&self) -> NavPolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn slide_mut(&mut self, index: usize) -> Option<&mut Slide> {
        self.slides.get_mut(index)
    }

    /// Raw position pointer. After `replace_slides` it may point past the
    /// end until the caller re-clamps with a `show` call.
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// The one visible slide, if any slide exists and the pointer is in
    /// range.
    pub fn active_slide(&self) -> Option<&Slide> {
        self.slides.get(self.active)
    }

    pub fn is_visible(&self, index: usize) -> bool {
        !self.slides.is_empty() && index == self.active
    }

    /// Counter text for the deck chrome: `"{current} / {total}"`, or
    /// `"0 / 0"` for an empty deck.
    pub fn counter(&self) -> String {
        let total = self.slides.len();
        let current = if total == 0 { 0 } else { self.active + 1 };
        format!("{} / {}", current, total)
    }

    /// Makes exactly one slide visible. Empty decks ignore the request;
    /// out-of-range indexes wrap or clamp per the policy.
    pub fn show(&mut self, index: isize) {
        let n = self.slides.len();
        if n == 0 {
            return;
        }

        let effective = match self.policy {
            NavPolicy::Wrap => (index.rem_euclid(n as isize)) as usize,
            NavPolicy::Clamp => index.clamp(0, n as isize - 1) as usize,
        };

        self.active = effective;
        self.emitter.emit(DeckEvent::SlideShown { index: effective });
    }

    pub fn navigate(&mut self, delta: isize) {
        self.show(self.active as isize + delta);
    }

    /// Swaps in a new slide sequence (the host re-scanned its surface).
    /// No index guarantee survives; callers must follow up with `show`.
    pub fn replace_slides(&mut self, slides: Vec<Slide>) {
        self.slides = slides;
        self.emitter.emit(DeckEvent::SlidesReplaced {
            count: self.slides.len(),
        });
    }

    /// Appends a slide and navigates to it, as the "add slide" control
    /// does.
    pub fn add_slide(&mut self, slide: Slide) {
        self.slides.push(slide);
        let index = self.slides.len() - 1;
        self.emitter.emit(DeckEvent::SlideAdded { index });
        self.show(index as isize);
    }

    /// Removes a slide, keeping exactly one slide visible afterwards when
    /// any remain. Unknown indexes are ignored.
    pub fn remove_slide(&mut self, index: usize) -> Option<Slide> {
        if index >= self.slides.len() {
            return None;
        }
        let removed = self.slides.remove(index);
        self.emitter.emit(DeckEvent::SlideRemoved { index });
        if !self.slides.is_empty() {
            let target = self.active.min(self.slides.len() - 1);
            self.show(target as isize);
        }
        Some(removed)
    }

    /// Navigator labels for every slide, with positional fallbacks.
    pub fn slide_labels(&self) -> Vec<SlideLabel> {
        self.slides
            .iter()
            .enumerate()
            .map(|(index, slide)| SlideLabel::for_slide(slide, index))
            .collect()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&DeckEvent) + 'static) -> SubscriberId {
        self.emitter.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.emitter.unsubscribe(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn deck_of(policy: NavPolicy, n: usize) -> Deck {
        let slides = (0..n)
            .map(|i| Slide::new().with_title(format!("Slide {}", i + 1)))
            .collect();
        Deck::with_slides(policy, slides)
    }

    #[test]
    fn test_wrap_past_the_end() {
        let mut deck = deck_of(NavPolicy::Wrap, 3);
        deck.show(3);
        assert_eq!(deck.active_index(), 0);

        deck.show(-1);
        assert_eq!(deck.active_index(), 2);

        deck.show(0);
        deck.navigate(-1);
        assert_eq!(deck.active_index(), 2);
    }

    #[test]
    fn test_clamp_at_the_edges() {
        let mut deck = deck_of(NavPolicy::Clamp, 3);
        deck.show(3);
        assert_eq!(deck.active_index(), 2);

        deck.show(-1);
        assert_eq!(deck.active_index(), 0);

        deck.navigate(-1);
        assert_eq!(deck.active_index(), 0);
    }

    #[test]
    fn test_exactly_one_visible() {
        let mut deck = deck_of(NavPolicy::Wrap, 4);
        deck.show(2);
        let visible: Vec<usize> = (0..deck.len()).filter(|i| deck.is_visible(*i)).collect();
        assert_eq!(visible, vec![2]);
    }

    #[test]
    fn test_empty_deck_is_safe() {
        let mut deck = Deck::new(NavPolicy::Wrap);
        deck.show(5);
        deck.navigate(-3);
        assert_eq!(deck.active_index(), 0);
        assert_eq!(deck.active_slide(), None);
        assert_eq!(deck.counter(), "0 / 0");
        assert!(!deck.is_visible(0));
    }

    #[test]
    fn test_counter_text() {
        let mut deck = deck_of(NavPolicy::Wrap, 3);
        deck.show(1);
        assert_eq!(deck.counter(), "2 / 3");
    }

    #[test]
    fn test_add_slide_shows_it() {
        let mut deck = deck_of(NavPolicy::Clamp, 2);
        deck.add_slide(Slide::new());
        assert_eq!(deck.active_index(), 2);
        assert_eq!(deck.counter(), "3 / 3");
    }

    #[test]
    fn test_remove_slide_keeps_one_visible() {
        let mut deck = deck_of(NavPolicy::Clamp, 3);
        deck.show(2);
        deck.remove_slide(2);
        assert_eq!(deck.active_index(), 1);
        assert!(deck.remove_slide(7).is_none());
    }

    #[test]
    fn test_events_reach_subscribers() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut deck = deck_of(NavPolicy::Wrap, 2);
        let id = deck.subscribe(move |event| sink.borrow_mut().push(*event));
        deck.show(1);
        deck.unsubscribe(id);
        deck.show(0);

        assert_eq!(&*seen.borrow(), &[DeckEvent::SlideShown { index: 1 }]);
    }

    #[test]
    fn test_independent_decks_coexist() {
        let mut a = deck_of(NavPolicy::Wrap, 3);
        let mut b = deck_of(NavPolicy::Clamp, 5);
        a.show(2);
        b.show(4);
        assert_eq!(a.active_index(), 2);
        assert_eq!(b.active_index(), 4);
    }
}
