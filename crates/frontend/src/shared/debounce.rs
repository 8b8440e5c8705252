//! Trailing-edge debounce
//!
//! Only the last call of a burst runs, `delay_ms` after that call, with that
//! call's arguments. Earlier calls of the burst are dropped. Each key has its
//! own burst.

use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::collections::HashMap;
use std::hash::Hash;
use std::rc::Rc;

/// Pending arguments plus a generation counter.
/// A timer armed for an older generation finds nothing to take.
#[derive(Debug)]
pub struct DebounceSlot<A> {
    pending: Option<A>,
    generation: u64,
}

impl<A> Default for DebounceSlot<A> {
    fn default() -> Self {
        Self {
            pending: None,
            generation: 0,
        }
    }
}

impl<A> DebounceSlot<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `args`, superseding whatever was pending
    pub fn trigger(&mut self, args: A) -> u64 {
        self.generation += 1;
        self.pending = Some(args);
        self.generation
    }

    pub fn take_if_current(&mut self, generation: u64) -> Option<A> {
        if generation == self.generation {
            self.pending.take()
        } else {
            None
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// One [`DebounceSlot`] per key; a call under one key never supersedes another
#[derive(Debug)]
pub struct KeyedDebounce<K, A> {
    slots: HashMap<K, DebounceSlot<A>>,
}

impl<K, A> Default for KeyedDebounce<K, A> {
    fn default() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash, A> KeyedDebounce<K, A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&mut self, key: K, args: A) -> u64 {
        self.slots.entry(key).or_default().trigger(args)
    }

    pub fn take_if_current(&mut self, key: &K, generation: u64) -> Option<A> {
        self.slots
            .get_mut(key)
            .and_then(|slot| slot.take_if_current(generation))
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.slots.get(key).is_some_and(DebounceSlot::is_pending)
    }
}

/// Wrap `f` so that a burst of calls under one key collapses into one
pub fn debounce_keyed<K, A, F>(delay_ms: u32, f: F) -> impl Fn(K, A)
where
    K: Eq + Hash + Clone + 'static,
    A: 'static,
    F: Fn(K, A) + 'static,
{
    let slots = Rc::new(RefCell::new(KeyedDebounce::new()));
    let f = Rc::new(f);

    move |key: K, args: A| {
        let generation = slots.borrow_mut().trigger(key.clone(), args);
        let slots = Rc::clone(&slots);
        let f = Rc::clone(&f);
        Timeout::new(delay_ms, move || {
            let ready = slots.borrow_mut().take_if_current(&key, generation);
            if let Some(args) = ready {
                f(key, args);
            }
        })
        .forget();
    }
}
