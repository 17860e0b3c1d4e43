//! Board event listeners
//!
//! The board pushes [`BoardEvent`]s to every registered listener synchronously, at the
//! point of emission. Listeners are shared handles so the controller can keep reading
//! the state its listener mutates.

use std::cell::RefCell;
use std::rc::Rc;

use crate::types::BoardEvent;

/// Receiver of board events.
///
/// Implementations must not call back into the board that is dispatching.
pub trait BoardListener {
    fn on_lines_cleared(&mut self, count: u32);
    fn on_game_over(&mut self);
}

/// Shared handle registered with [`Board::subscribe`](crate::Board::subscribe)
pub type ListenerHandle = Rc<RefCell<dyn BoardListener>>;

pub(crate) fn dispatch(listeners: &[ListenerHandle], event: BoardEvent) {
    for listener in listeners {
        let mut listener = listener.borrow_mut();
        match event {
            BoardEvent::LinesCleared(count) => listener.on_lines_cleared(count),
            BoardEvent::GameOver => listener.on_game_over(),
        }
    }
}

/// Listener that keeps every event it receives, in order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<BoardEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a log already wrapped in a shareable handle
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn events(&self) -> &[BoardEvent] {
        &self.events
    }

    pub fn take(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.events)
    }

    /// Total lines reported across all `LinesCleared` events
    pub fn lines_cleared(&self) -> u32 {
        self.events
            .iter()
            .map(|e| match e {
                BoardEvent::LinesCleared(n) => *n,
                BoardEvent::GameOver => 0,
            })
            .sum()
    }

    pub fn game_overs(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, BoardEvent::GameOver))
            .count()
    }
}

impl BoardListener for EventLog {
    fn on_lines_cleared(&mut self, count: u32) {
        self.events.push(BoardEvent::LinesCleared(count));
    }

    fn on_game_over(&mut self) {
        self.events.push(BoardEvent::GameOver);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_reaches_every_listener_in_order() {
        let a = EventLog::shared();
        let b = EventLog::shared();
        let listeners: Vec<ListenerHandle> =
            vec![a.clone() as ListenerHandle, b.clone() as ListenerHandle];

        dispatch(&listeners, BoardEvent::LinesCleared(2));
        dispatch(&listeners, BoardEvent::GameOver);

        let expected = [BoardEvent::LinesCleared(2), BoardEvent::GameOver];
        assert_eq!(a.borrow().events(), &expected);
        assert_eq!(b.borrow().events(), &expected);
    }

    #[test]
    fn event_log_totals() {
        let mut log = EventLog::new();
        log.on_lines_cleared(1);
        log.on_lines_cleared(3);
        log.on_game_over();
        assert_eq!(log.lines_cleared(), 4);
        assert_eq!(log.game_overs(), 1);
        assert_eq!(log.take().len(), 3);
        assert!(log.events().is_empty());
    }
}
