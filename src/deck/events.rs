/// Deck mutations observers can watch for. The navigator overlay keeps its
/// highlight in sync off `SlideShown`; autosave hosts mirror state off the
/// mutation events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckEvent {
    SlideShown { index: usize },
    SlideAdded { index: usize },
    SlideRemoved { index: usize },
    SlidesReplaced { count: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

type Listener = Box<dyn FnMut(&DeckEvent)>;

/// Explicit subscribe/unsubscribe observer list for deck mutations.
#[derive(Default)]
pub struct EventEmitter {
    next_id: u64,
    listeners: Vec<(SubscriberId, Listener)>,
}

impl EventEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&DeckEvent) + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false when the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(entry, _)| *entry != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: DeckEvent) {
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_subscribe_and_emit() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut emitter = EventEmitter::new();
        emitter.subscribe(move |event| sink.borrow_mut().push(*event));
        emitter.emit(DeckEvent::SlideShown { index: 2 });

        assert_eq!(&*seen.borrow(), &[DeckEvent::SlideShown { index: 2 }]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let seen = Rc::new(RefCell::new(0usize));
        let sink = Rc::clone(&seen);

        let mut emitter = EventEmitter::new();
        let id = emitter.subscribe(move |_| *sink.borrow_mut() += 1);
        emitter.emit(DeckEvent::SlidesReplaced { count: 1 });

        assert!(emitter.unsubscribe(id));
        assert!(!emitter.unsubscribe(id));
        emitter.emit(DeckEvent::SlidesReplaced { count: 2 });

        assert_eq!(*seen.borrow(), 1);
        assert_eq!(emitter.subscriber_count(), 0);
    }
}
