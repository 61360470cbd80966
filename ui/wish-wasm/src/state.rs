use std::cell::{Cell, RefCell};

use wt_api_types::Wish;

/// The most recently loaded wish list.
///
/// Only a completed load replaces the list, and it replaces it whole, so the
/// list region and the ornaments always show one server snapshot. When loads
/// overlap, whichever resolves last wins.
#[derive(Default)]
pub struct WishState {
    wishes: RefCell<Vec<Wish>>,
    revision: Cell<u64>,
}

impl WishState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Vec<Wish> {
        self.wishes.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.wishes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.wishes.borrow().is_empty()
    }

    /// Swap in a freshly loaded list; returns the new revision.
    pub fn replace(&self, wishes: Vec<Wish>) -> u64 {
        *self.wishes.borrow_mut() = wishes;
        let next = self.revision.get() + 1;
        self.revision.set(next);
        next
    }

    /// Number of completed loads so far.
    pub fn revision(&self) -> u64 {
        self.revision.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wt_api_types::{Timestamp, WishColor};

    fn wish(text: &str) -> Wish {
        Wish {
            id: None,
            text: text.to_owned(),
            color: WishColor::Blue,
            created_at: Timestamp::EpochMillis(0),
        }
    }

    #[test]
    fn starts_empty() {
        let state = WishState::new();
        assert!(state.is_empty());
        assert_eq!(state.revision(), 0);
    }

    #[test]
    fn replace_swaps_whole_list() {
        let state = WishState::new();
        assert_eq!(state.replace(vec![wish("a"), wish("b")]), 1);
        assert_eq!(state.replace(vec![wish("c")]), 2);
        let texts: Vec<_> = state.snapshot().into_iter().map(|w| w.text).collect();
        assert_eq!(texts, ["c"]);
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn replacing_with_empty_list_clears() {
        let state = WishState::new();
        state.replace(vec![wish("a")]);
        state.replace(Vec::new());
        assert!(state.is_empty());
        assert_eq!(state.revision(), 2);
    }
}
