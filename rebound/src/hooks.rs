use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

/// The answer a hook listener gives for the operation it observed.
///
/// `Veto` is the only cancellation signal in the engine: the first listener that vetoes
/// stops dispatch, and the caller declines the operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Decision {
    #[default]
    Proceed,
    Veto,
}

impl Decision {
    pub fn is_veto(self) -> bool {
        self == Self::Veto
    }
}

impl From<()> for Decision {
    fn from((): ()) -> Self {
        Self::Proceed
    }
}

/// Identifies a registered listener for [`HookBus::off`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Callback<P> = Rc<RefCell<dyn FnMut(&P) -> Decision>>;

struct Listener<P> {
    id: ListenerId,
    once: bool,
    callback: Callback<P>,
}

impl<P> Clone for Listener<P> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            once: self.once,
            callback: Rc::clone(&self.callback),
        }
    }
}

/// A typed publish/subscribe registry with short-circuit veto.
///
/// Every bus is declared with the event names it carries. Registering or triggering an
/// undeclared name is reported as a warning; registration still happens, triggering is
/// dropped.
///
/// All methods take `&self`: a listener holding a shared handle to the bus may register or
/// remove listeners while a dispatch is running. Such changes never affect the dispatch in
/// progress, which runs over a snapshot taken when it started.
pub struct HookBus<P> {
    declared: RefCell<Vec<&'static str>>,
    events: RefCell<Vec<(&'static str, Vec<Listener<P>>)>>,
    next_id: Cell<u64>,
}

impl<P> HookBus<P> {
    pub fn new(names: &[&'static str]) -> Self {
        Self {
            declared: RefCell::new(names.to_vec()),
            events: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
        }
    }

    /// Adds names to the set of declared events.
    pub fn declare(&self, names: &[&'static str]) {
        let mut declared = self.declared.borrow_mut();
        for name in names {
            if !declared.contains(name) {
                declared.push(name);
            }
        }
    }

    pub fn is_declared(&self, event: &str) -> bool {
        self.declared.borrow().iter().any(|n| *n == event)
    }

    pub fn event_names(&self) -> Vec<&'static str> {
        self.declared.borrow().clone()
    }

    fn check_declared(&self, event: &str) -> bool {
        let ok = self.is_declared(event);
        if !ok {
            rwarn!(
                event,
                declared = ?self.declared.borrow(),
                "HookBus: unknown event type"
            );
        }
        ok
    }

    fn insert(&self, event: &'static str, once: bool, callback: Callback<P>) -> ListenerId {
        self.check_declared(event);
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let listener = Listener { id, once, callback };
        let mut events = self.events.borrow_mut();
        match events.iter_mut().find(|(name, _)| *name == event) {
            Some((_, list)) => list.push(listener),
            None => events.push((event, alloc::vec![listener])),
        }
        id
    }

    /// Registers `f` for `event` and returns its id.
    pub fn subscribe<F, R>(&self, event: &'static str, mut f: F) -> ListenerId
    where
        F: FnMut(&P) -> R + 'static,
        R: Into<Decision>,
        P: 'static,
    {
        self.insert(event, false, Rc::new(RefCell::new(move |p: &P| f(p).into())))
    }

    /// Registers `f` to run only on the next `event`.
    pub fn subscribe_once<F, R>(&self, event: &'static str, mut f: F) -> ListenerId
    where
        F: FnMut(&P) -> R + 'static,
        R: Into<Decision>,
        P: 'static,
    {
        self.insert(event, true, Rc::new(RefCell::new(move |p: &P| f(p).into())))
    }

    /// Chaining form of [`HookBus::subscribe`].
    pub fn on<F, R>(&self, event: &'static str, f: F) -> &Self
    where
        F: FnMut(&P) -> R + 'static,
        R: Into<Decision>,
        P: 'static,
    {
        self.subscribe(event, f);
        self
    }

    /// Chaining form of [`HookBus::subscribe_once`].
    pub fn once<F, R>(&self, event: &'static str, f: F) -> &Self
    where
        F: FnMut(&P) -> R + 'static,
        R: Into<Decision>,
        P: 'static,
    {
        self.subscribe_once(event, f);
        self
    }

    /// Removes listeners.
    ///
    /// - `off(None, None)` removes everything.
    /// - `off(Some(event), None)` removes every listener of `event`.
    /// - `off(Some(event), Some(id))` removes one listener of `event`.
    /// - `off(None, Some(id))` removes the listener wherever it is registered.
    pub fn off(&self, event: Option<&str>, id: Option<ListenerId>) -> &Self {
        if let Some(event) = event {
            self.check_declared(event);
        }
        let mut events = self.events.borrow_mut();
        match (event, id) {
            (None, None) => events.clear(),
            (Some(event), None) => {
                if let Some((_, list)) = events.iter_mut().find(|(name, _)| *name == event) {
                    list.clear();
                }
            }
            (Some(event), Some(id)) => {
                if let Some((_, list)) = events.iter_mut().find(|(name, _)| *name == event) {
                    list.retain(|l| l.id != id);
                }
            }
            (None, Some(id)) => {
                for (_, list) in events.iter_mut() {
                    list.retain(|l| l.id != id);
                }
            }
        }
        self
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.events
            .borrow()
            .iter()
            .find(|(name, _)| *name == event)
            .map_or(0, |(_, list)| list.len())
    }

    /// Dispatches `payload` to the listeners of `event` in registration order.
    ///
    /// Returns `Decision::Veto` as soon as a listener vetoes; later listeners do not run.
    pub fn trigger(&self, event: &str, payload: &P) -> Decision {
        if !self.check_declared(event) {
            return Decision::Proceed;
        }

        let snapshot: Vec<Listener<P>> = {
            let mut events = self.events.borrow_mut();
            let Some((_, list)) = events.iter_mut().find(|(name, _)| *name == event) else {
                return Decision::Proceed;
            };
            list.clone()
        };

        for listener in snapshot {
            if listener.once && !self.take(listener.id) {
                continue;
            }
            let Ok(mut callback) = listener.callback.try_borrow_mut() else {
                rwarn!(event, "HookBus: listener re-entered during its own dispatch; skipped");
                continue;
            };
            if (*callback)(payload).is_veto() {
                rtrace!(event, "HookBus: vetoed");
                return Decision::Veto;
            }
        }
        Decision::Proceed
    }

    /// Removes a listener before its one invocation. `false` when a nested dispatch already
    /// consumed it.
    fn take(&self, id: ListenerId) -> bool {
        let mut events = self.events.borrow_mut();
        for (_, list) in events.iter_mut() {
            if let Some(index) = list.iter().position(|l| l.id == id) {
                list.remove(index);
                return true;
            }
        }
        false
    }

    /// Clears every registration and declaration.
    pub fn destroy(&self) {
        self.events.borrow_mut().clear();
        self.declared.borrow_mut().clear();
    }
}

impl<P> fmt::Debug for HookBus<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let events = self.events.borrow();
        f.debug_struct("HookBus")
            .field("declared", &self.declared.borrow())
            .field(
                "listeners",
                &events
                    .iter()
                    .map(|(name, list)| (*name, list.len()))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
