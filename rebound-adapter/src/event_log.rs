use std::cell::RefCell;
use std::rc::Rc;

use rebound::scroller::{EVENT_NAMES, FLICK};
use rebound::{Point, ScrollEvent, Scroller, Surface};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoggedEvent {
    pub name: &'static str,
    /// The position carried by the event, if any.
    pub position: Option<Point>,
}

/// Records coordinator events in dispatch order.
///
/// Clones share the same record.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<LoggedEvent>>>,
}

impl EventLog {
    /// Records every coordinator event except `flick`.
    ///
    /// A `flick` listener changes how quick, short drags resolve; use
    /// [`EventLog::attach_events`] to record it deliberately.
    pub fn attach<S: Surface>(scroller: &Scroller<S>) -> Self {
        let names: Vec<&'static str> = EVENT_NAMES.iter().copied().filter(|n| *n != FLICK).collect();
        Self::attach_events(scroller, &names)
    }

    pub fn attach_events<S: Surface>(scroller: &Scroller<S>, names: &[&'static str]) -> Self {
        let log = Self::default();
        for &name in names {
            let events = Rc::clone(&log.events);
            scroller.hooks().subscribe(name, move |event: &ScrollEvent| {
                events.borrow_mut().push(LoggedEvent {
                    name,
                    position: event.position(),
                });
            });
        }
        log
    }

    pub fn events(&self) -> Vec<LoggedEvent> {
        self.events.borrow().clone()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.events.borrow().iter().map(|e| e.name).collect()
    }

    pub fn count(&self, name: &str) -> usize {
        self.events.borrow().iter().filter(|e| e.name == name).count()
    }

    pub fn last(&self, name: &str) -> Option<LoggedEvent> {
        self.events.borrow().iter().rev().find(|e| e.name == name).copied()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}
