//! The seam between popups/forms and the event loop.

use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use crate::tui::Theme;

/// A self-contained piece of UI: it owns its state, consumes keys, and
/// draws itself into whatever area the parent hands it.
///
/// Anything the parent must react to (a submitted login form, a closed
/// overlay) comes back as `Some(Event)`; keys the component absorbs on
/// its own return `None`. The auth form, chat popup, and help overlay
/// all speak this trait, which is what lets `AppState` route popup input
/// without knowing which popup is open.
pub trait Component {
    /// What this component reports back to the parent
    type Event;

    /// Consume one key press.
    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event>;

    /// Draw into `area` using the active palette.
    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme);
}
