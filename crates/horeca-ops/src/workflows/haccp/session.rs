/// Entries accepted during the current operator session.
///
/// Owned by whoever holds the session (the operations service); dropping or clearing it
/// forgets the entries but never touches the row store.
#[derive(Debug, Clone)]
pub struct SessionRegister<T> {
    entries: Vec<T>,
}

impl<T> Default for SessionRegister<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> SessionRegister<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: T) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Empties the register and reports how many entries were dropped.
    pub fn clear(&mut self) -> usize {
        let cleared = self.entries.len();
        self.entries.clear();
        cleared
    }
}
