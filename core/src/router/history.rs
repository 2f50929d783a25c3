//! Navigation history
//!
//! Entries store application paths without the base prefix. The router
//! applies the base when producing hrefs.

/// One committed navigation in the history stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Application path including query and hash
    pub full_path: String,
}

/// Navigation history with a cursor for back and forward traversal
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<HistoryEntry>,
    position: Option<usize>,
    max_entries: usize,
}

impl History {
    /// Create an empty history.
    ///
    /// `max_history` bounds how many previous entries are kept; the
    /// current entry is always retained.
    pub fn new(max_history: usize) -> Self {
        Self {
            entries: Vec::new(),
            position: None,
            max_entries: max_history.saturating_add(1),
        }
    }

    /// Current entry, if any navigation has been committed
    pub fn location(&self) -> Option<&str> {
        self.position
            .and_then(|pos| self.entries.get(pos))
            .map(|entry| entry.full_path.as_str())
    }

    /// Push a new entry, discarding any forward entries
    pub fn push(&mut self, full_path: impl Into<String>) {
        if let Some(pos) = self.position {
            self.entries.truncate(pos + 1);
        }

        self.entries.push(HistoryEntry {
            full_path: full_path.into(),
        });

        // Trim history if it exceeds max size
        if self.entries.len() > self.max_entries {
            let excess = self.entries.len() - self.max_entries;
            self.entries.drain(..excess);
        }

        self.position = Some(self.entries.len() - 1);
    }

    /// Rewrite the current entry in place
    pub fn replace(&mut self, full_path: impl Into<String>) {
        match self.position.and_then(|pos| self.entries.get_mut(pos)) {
            Some(entry) => entry.full_path = full_path.into(),
            None => self.push(full_path),
        }
    }

    /// Entry `delta` steps away from the current one, without moving
    pub fn peek(&self, delta: isize) -> Option<&str> {
        let target = self.target(delta)?;
        self.entries.get(target).map(|entry| entry.full_path.as_str())
    }

    /// Move the cursor by `delta` steps, returning the new current entry
    pub fn go(&mut self, delta: isize) -> Option<&str> {
        let target = self.target(delta)?;
        self.position = Some(target);
        self.entries.get(target).map(|entry| entry.full_path.as_str())
    }

    /// Check if we can go back
    pub fn can_go_back(&self) -> bool {
        self.target(-1).is_some()
    }

    /// Check if we can go forward
    pub fn can_go_forward(&self) -> bool {
        self.target(1).is_some()
    }

    /// All entries, oldest first
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    fn target(&self, delta: isize) -> Option<usize> {
        if delta == 0 {
            return None;
        }
        let target = self.position?.checked_add_signed(delta)?;
        (target < self.entries.len()).then_some(target)
    }
}
