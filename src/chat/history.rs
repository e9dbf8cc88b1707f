//! In-memory display history for one console session. Never persisted.

use std::collections::VecDeque;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => f.write_str("user"),
            Role::Assistant => f.write_str("assistant"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

/// Bounded turn log; the oldest turn is dropped once `cap` is reached.
#[derive(Debug, Clone)]
pub struct ChatHistory {
    turns: VecDeque<Turn>,
    cap: usize,
}

impl ChatHistory {
    pub fn new(cap: usize) -> Self {
        Self { turns: VecDeque::with_capacity(cap.min(1024)), cap }
    }

    pub fn push(&mut self, role: Role, content: impl Into<String>) {
        if self.cap == 0 {
            return;
        }
        if self.turns.len() == self.cap {
            self.turns.pop_front();
        }
        self.turns.push_back(Turn { role, content: content.into() });
    }

    pub fn turns(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order() {
        let mut h = ChatHistory::new(10);
        h.push(Role::User, "hi");
        h.push(Role::Assistant, "hello");
        let turns: Vec<_> = h.turns().collect();
        assert_eq!(turns[0].role, Role::User);
        assert_eq!(turns[1].content, "hello");
    }

    #[test]
    fn drops_oldest_at_cap() {
        let mut h = ChatHistory::new(2);
        h.push(Role::User, "one");
        h.push(Role::Assistant, "two");
        h.push(Role::User, "three");
        assert_eq!(h.len(), 2);
        let contents: Vec<_> = h.turns().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, vec!["two", "three"]);
    }

    #[test]
    fn zero_cap_records_nothing() {
        let mut h = ChatHistory::new(0);
        h.push(Role::User, "ignored");
        assert!(h.is_empty());
    }
}
