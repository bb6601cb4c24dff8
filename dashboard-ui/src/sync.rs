//! Keeping views in step with the server.
//!
//! Mutation sites bump an [`Invalidation`] generation once the server has
//! confirmed the change. Read views remember the generation they last
//! fetched in a [`CacheKey`] and fetch again whenever it moves.
//!
//! Fetches may overlap (a refresh can start while an older one is still in
//! flight). Each fetch takes a [`FetchTicket`] from the view's [`FetchGuard`]
//! and may only apply its result while that ticket is still the newest one,
//! so the last fetch issued wins. A [`Liveness`] flag is cleared when a view
//! unmounts so late responses never touch disposed state.

use std::cell::Cell;
use std::rc::Rc;

/// Generation counter bumped after every confirmed mutation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Invalidation {
    generation: u64,
}

impl Invalidation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

/// The generation a view last fetched against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheKey {
    fetched: Option<u64>,
}

impl CacheKey {
    pub fn needs_refresh(&self, generation: u64) -> bool {
        self.fetched != Some(generation)
    }

    pub fn mark(&mut self, generation: u64) {
        self.fetched = Some(generation);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Issues fetch tickets; only the newest ticket may apply its result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchGuard {
    issued: u64,
}

impl FetchGuard {
    pub fn begin(&mut self) -> FetchTicket {
        self.issued += 1;
        FetchTicket(self.issued)
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.issued
    }
}

/// Shared alive/disposed flag between a mounted view and its requests.
#[derive(Debug, Clone)]
pub struct Liveness(Rc<Cell<bool>>);

impl Liveness {
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    pub fn is_alive(&self) -> bool {
        self.0.get()
    }

    pub fn dispose(&self) {
        self.0.set(false);
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Liveness {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_follows_invalidation() {
        let mut invalidation = Invalidation::new();
        let mut key = CacheKey::default();
        assert!(key.needs_refresh(invalidation.generation()));

        key.mark(invalidation.generation());
        assert!(!key.needs_refresh(invalidation.generation()));

        invalidation.invalidate();
        assert!(key.needs_refresh(invalidation.generation()));
    }

    #[test]
    fn only_newest_ticket_is_current() {
        let mut guard = FetchGuard::default();
        let first = guard.begin();
        let second = guard.begin();
        assert!(!guard.is_current(first));
        assert!(guard.is_current(second));
    }

    #[test]
    fn disposing_is_seen_by_every_clone() {
        let liveness = Liveness::new();
        let held_by_request = liveness.clone();
        liveness.dispose();
        assert!(!held_by_request.is_alive());
    }
}
