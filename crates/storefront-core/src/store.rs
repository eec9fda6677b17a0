//! # Store Module
//!
//! A mutable state container with synchronous publish/subscribe.
//!
//! ## Delivery Guarantees
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Store<T> Delivery                                    │
//! │                                                                         │
//! │  set(v1) ──► current = v1 ──► listener A(v1), listener B(v1)           │
//! │  set(v2) ──► current = v2 ──► listener A(v2), listener B(v2)           │
//! │                                                                         │
//! │  subscribe(C) ──► C(v2) immediately (replay latest)                    │
//! │                                                                         │
//! │  set(v3) ──► A(v3), B(v3), C(v3)                                       │
//! │                                                                         │
//! │  • Every value a listener sees is a complete value passed to set()     │
//! │  • Delivery happens before set() returns, in subscription order        │
//! │  • The lock is released before listeners run, so a listener may call   │
//! │    current() without deadlocking                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Single Writer
//! The ordering above holds for one writer at a time. Two threads calling
//! `set` concurrently may deliver their values in the opposite order to the
//! one `current()` ends up holding. Callers that write from several threads
//! must serialize the writes themselves; the cart does this by owning its
//! store inside a `CartLedger` that is only mutated through `&mut self`.
//!
//! ## Usage
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use storefront_core::store::Store;
//!
//! let store = Store::new(0u32);
//! store.set(5);
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//! let subscription = store.subscribe(move |value: &u32| sink.lock().unwrap().push(*value));
//!
//! store.set(6);
//! subscription.unsubscribe();
//! store.set(7);
//!
//! assert_eq!(*seen.lock().unwrap(), vec![5, 6]);
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Shared<T> {
    current: T,
    listeners: Vec<(u64, Listener<T>)>,
    next_id: u64,
}

/// Shared state holder that broadcasts every change to its subscribers.
///
/// Cloning a `Store` yields another handle to the same state.
pub struct Store<T> {
    shared: Arc<Mutex<Shared<T>>>,
}

impl<T: Clone> Store<T> {
    /// Creates a store holding `initial`.
    pub fn new(initial: T) -> Self {
        Store {
            shared: Arc::new(Mutex::new(Shared {
                current: initial,
                listeners: Vec::new(),
                next_id: 0,
            })),
        }
    }

    /// Returns a copy of the current value.
    pub fn current(&self) -> T {
        lock(&self.shared).current.clone()
    }

    /// Replaces the current value and notifies every subscriber.
    ///
    /// Listeners run after the lock is released, so concurrent `set` calls
    /// must be serialized by the caller (see the module docs).
    pub fn set(&self, value: T) {
        let listeners = {
            let mut shared = lock(&self.shared);
            shared.current = value.clone();
            shared
                .listeners
                .iter()
                .map(|(_, listener)| Arc::clone(listener))
                .collect::<Vec<_>>()
        };

        for listener in listeners {
            listener(&value);
        }
    }

    /// Derives the next value from the current one and publishes it.
    ///
    /// Not atomic: the read and the write are separate critical sections.
    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        let next = f(&self.current());
        self.set(next);
    }

    /// Registers `listener` and immediately replays the current value to it.
    ///
    /// The returned handle removes the listener when
    /// [`Subscription::unsubscribe`] is called. Dropping the handle keeps the
    /// listener registered.
    pub fn subscribe<F>(&self, listener: F) -> Subscription<T>
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let listener: Listener<T> = Arc::new(listener);
        let (id, current) = {
            let mut shared = lock(&self.shared);
            let id = shared.next_id;
            shared.next_id += 1;
            shared.listeners.push((id, Arc::clone(&listener)));
            (id, shared.current.clone())
        };

        listener(&current);

        Subscription {
            id,
            shared: Arc::downgrade(&self.shared),
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        lock(&self.shared).listeners.len()
    }
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Store {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shared = lock(&self.shared);
        f.debug_struct("Store")
            .field("current", &shared.current)
            .field("subscribers", &shared.listeners.len())
            .finish()
    }
}

impl<T: Clone + Default> Default for Store<T> {
    fn default() -> Self {
        Store::new(T::default())
    }
}

// =============================================================================
// Subscription Handle
// =============================================================================

/// Handle returned by [`Store::subscribe`].
#[must_use = "keep the subscription to be able to unsubscribe later"]
pub struct Subscription<T> {
    id: u64,
    shared: Weak<Mutex<Shared<T>>>,
}

impl<T> Subscription<T> {
    /// Stops delivery to this subscription's listener.
    ///
    /// A no-op if the store has already been dropped.
    pub fn unsubscribe(self) {
        if let Some(shared) = self.shared.upgrade() {
            lock(&shared).listeners.retain(|(id, _)| *id != self.id);
        }
    }
}

impl<T> fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

/// Poisoning is ignored: `current` is only ever replaced by a complete value.
fn lock<T>(shared: &Mutex<Shared<T>>) -> MutexGuard<'_, Shared<T>> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

// =============================================================================
// Unit Tests
// =============================================================================
