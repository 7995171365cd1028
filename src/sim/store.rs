//! Observable state store
//!
//! Holds the current [`GameState`] snapshot and notifies subscribers with
//! `(next, previous)` on every transition. Notification is synchronous and
//! depth-first: a handler that calls `set_state` triggers a full nested pass
//! before the outer pass continues.
//!
//! The subscriber list is snapshotted at the start of each pass. Handlers
//! removed during a pass are skipped if they have not run yet; handlers added
//! during a pass are first called on the next transition.
//!
//! Handlers are infallible. A panicking handler unwinds out of `set_state`
//! and the remaining handlers of that pass do not run (fail-fast).

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use super::state::{GameState, StatePatch};

/// Shared immutable snapshot; readers keep it as long as they like
pub type Snapshot = Rc<GameState>;

type Handler = dyn Fn(&Snapshot, &Snapshot);

/// Opaque subscription handle returned by [`StateStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscription {
    id: SubscriptionId,
    handler: Rc<Handler>,
}

/// Versioned publish/subscribe container for the game state
///
/// All methods take `&self` so handlers holding an `Rc<StateStore>` (or a
/// `Weak`) can write back into the store while it is notifying.
pub struct StateStore {
    current: RefCell<Snapshot>,
    version: Cell<u64>,
    next_id: Cell<u64>,
    subscriptions: RefCell<Vec<Subscription>>,
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new(GameState::default())
    }
}

impl fmt::Debug for StateStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateStore")
            .field("state", &*self.current.borrow())
            .field("version", &self.version.get())
            .field("subscribers", &self.subscriptions.borrow().len())
            .finish()
    }
}

impl StateStore {
    pub fn new(initial: GameState) -> Self {
        Self {
            current: RefCell::new(Rc::new(initial)),
            version: Cell::new(0),
            next_id: Cell::new(1),
            subscriptions: RefCell::new(Vec::new()),
        }
    }

    /// Current snapshot
    pub fn state(&self) -> Snapshot {
        self.current.borrow().clone()
    }

    /// Number of transitions applied so far
    pub fn version(&self) -> u64 {
        self.version.get()
    }

    /// Merge `patch` into the current snapshot and notify subscribers
    pub fn set_state(&self, patch: StatePatch) {
        let prev = self.state();
        let next = Rc::new(prev.merged(&patch));
        self.commit(next, prev);
    }

    /// Compute the patch from the current snapshot, then apply it
    pub fn update_state<F>(&self, update: F)
    where
        F: FnOnce(&GameState) -> StatePatch,
    {
        let prev = self.state();
        let patch = update(&*prev);
        let next = Rc::new(prev.merged(&patch));
        self.commit(next, prev);
    }

    fn commit(&self, next: Snapshot, prev: Snapshot) {
        *self.current.borrow_mut() = Rc::clone(&next);
        self.version.set(self.version.get() + 1);

        let pass: Vec<(SubscriptionId, Rc<Handler>)> = self
            .subscriptions
            .borrow()
            .iter()
            .map(|s| (s.id, Rc::clone(&s.handler)))
            .collect();

        for (id, handler) in pass {
            if self.is_subscribed(id) {
                handler(&next, &prev);
            }
        }
    }

    /// Register a handler; it runs on every later transition
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&Snapshot, &Snapshot) + 'static,
    {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.subscriptions.borrow_mut().push(Subscription {
            id,
            handler: Rc::new(handler),
        });
        id
    }

    /// Remove a subscription. Unknown or already-removed ids are a no-op.
    ///
    /// Returns whether a subscription was removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subs = self.subscriptions.borrow_mut();
        let before = subs.len();
        subs.retain(|s| s.id != id);
        subs.len() != before
    }

    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.subscriptions.borrow().iter().any(|s| s.id == id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.borrow().len()
    }
}
