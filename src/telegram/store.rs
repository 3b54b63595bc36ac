//! Bounded user → score-target cache behind the webhook router. The real
//! deployment sits in front of one bot, so a small in-memory map with
//! oldest-first eviction covers it.

use std::collections::{HashMap, VecDeque};

use crate::telegram::ScoreContext;

pub const DEFAULT_STORE_CAPACITY: usize = 1024;

/// Where the router remembers each user's latest game message.
pub trait ContextStore {
    /// Remember `context` for `user_id`, replacing any previous entry.
    fn put(&mut self, user_id: i64, context: ScoreContext);
    fn get(&self, user_id: i64) -> Option<&ScoreContext>;
}

/// In-memory store that forgets the oldest users once full. Re-putting an
/// existing user keeps the user's original place in the eviction queue.
#[derive(Debug)]
pub struct MemoryContextStore {
    capacity: usize,
    entries: HashMap<i64, ScoreContext>,
    order: VecDeque<i64>,
}

impl MemoryContextStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_STORE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MemoryContextStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextStore for MemoryContextStore {
    fn put(&mut self, user_id: i64, context: ScoreContext) {
        if self.entries.insert(user_id, context).is_none() {
            self.order.push_back(user_id);
            if self.order.len() > self.capacity {
                if let Some(oldest) = self.order.pop_front() {
                    self.entries.remove(&oldest);
                }
            }
        }
    }

    fn get(&self, user_id: i64) -> Option<&ScoreContext> {
        self.entries.get(&user_id)
    }
}
