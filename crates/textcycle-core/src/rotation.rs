//! Rotation state over a list of overlay strings.

/// Cycles through an ordered list of strings.
///
/// `index` always points at the item the next [`Rotator::advance`] call returns.
/// While the list is non-empty it stays within `0..items.len()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rotator {
    items: Vec<String>,
    index: usize,
}

impl Rotator {
    pub fn new(items: Vec<String>) -> Self {
        Self { items, index: 0 }
    }

    /// Return the item at the current position and step to the next one.
    ///
    /// Returns `None` for an empty list; the position is left untouched.
    pub fn advance(&mut self) -> Option<&str> {
        if self.items.is_empty() {
            return None;
        }

        let current = self.index;
        self.index = (current + 1) % self.items.len();
        Some(self.items[current].as_str())
    }

    /// Item the next `advance` would return, without moving.
    pub fn peek(&self) -> Option<&str> {
        self.items.get(self.index).map(String::as_str)
    }

    /// Rewind to the first item.
    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Replace the list and rewind.
    pub fn set_items(&mut self, items: Vec<String>) {
        self.items = items;
        self.reset();
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn position(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
