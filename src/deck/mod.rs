mod events;
mod navigator;
mod slide;
mod store;

pub use events::{DeckEvent, EventEmitter, SubscriberId};
pub use navigator::{GlobalListener, PanelState, SlideLabel, SlideNavigator};
pub use slide::{Block, Slide};
pub use store::{Deck, NavPolicy};
