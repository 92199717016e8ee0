//! Placeholder tokens
//!
//! Tokens name the parameters a statement references. A builder hands them
//! out from a monotonically increasing counter; tokens merged in from a
//! nested builder keep their original name as the origin and take a fresh
//! slot from the parent counter, so every name stays unique in the parent.

use std::fmt;

/// Placeholder token, rendered into statement text as `:name`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Token {
    /// Token allocated by the builder itself: `_n`
    Local(u32),
    /// Token renamed during a sub-query merge: `sub<origin>_<slot>`
    Merged { origin: Box<Token>, slot: u32 },
}

impl Token {
    /// Token name as it appears in the parameter table
    pub fn name(&self) -> String {
        self.to_string()
    }

    /// Placeholder text, `:` followed by the token name
    pub fn placeholder(&self) -> String {
        format!(":{}", self)
    }

    /// Rename this token into a parent namespace using a freshly allocated slot
    pub fn merged(self, slot: u32) -> Token {
        Token::Merged {
            origin: Box::new(self),
            slot,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Local(n) => write!(f, "_{}", n),
            Token::Merged { origin, slot } => write!(f, "sub{}_{}", origin, slot),
        }
    }
}

/// Per-builder token allocator
#[derive(Debug, Clone, Default)]
pub struct TokenCounter {
    next: u32,
}

impl TokenCounter {
    pub fn new() -> Self {
        Self { next: 0 }
    }

    /// Allocate the next slot id
    pub fn next_slot(&mut self) -> u32 {
        let slot = self.next;
        self.next += 1;
        slot
    }

    /// Allocate the next local token
    pub fn next_token(&mut self) -> Token {
        Token::Local(self.next_slot())
    }

    /// Number of slots handed out since creation or the last reset
    pub fn allocated(&self) -> u32 {
        self.next
    }

    pub fn reset(&mut self) {
        self.next = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_token_names() {
        assert_eq!(Token::Local(0).name(), "_0");
        assert_eq!(Token::Local(12).placeholder(), ":_12");
    }

    #[test]
    fn test_merged_token_names() {
        let merged = Token::Local(0).merged(5);
        assert_eq!(merged.name(), "sub_0_5");

        let twice = merged.merged(9);
        assert_eq!(twice.name(), "subsub_0_5_9");
    }

    #[test]
    fn test_counter_is_monotonic_until_reset() {
        let mut counter = TokenCounter::new();
        assert_eq!(counter.next_token(), Token::Local(0));
        assert_eq!(counter.next_token(), Token::Local(1));
        assert_eq!(counter.next_slot(), 2);
        assert_eq!(counter.allocated(), 3);

        counter.reset();
        assert_eq!(counter.allocated(), 0);
        assert_eq!(counter.next_token(), Token::Local(0));
    }
}
