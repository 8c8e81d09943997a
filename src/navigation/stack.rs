//! LIFO stack of named UI contexts.
//!
//! Each entry pairs a name with the region (view or overlay) it shows. A
//! name appears at most once.

/// A stack of `(name, region)` entries. The last entry is on top.
#[derive(Debug)]
pub struct NavigationStack<R> {
    entries: Vec<(String, R)>,
}

impl<R> Default for NavigationStack<R> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<R> NavigationStack<R> {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(n, _)| n == name)
    }

    /// Push an entry on top.
    ///
    /// An existing entry with the same name is removed first, so the new
    /// region replaces it.
    pub fn push(&mut self, name: impl Into<String>, region: R) {
        let name = name.into();
        if let Some(idx) = self.position(&name) {
            self.entries.remove(idx);
        }
        self.entries.push((name, region));
    }

    /// Pop the top entry and return its name.
    ///
    /// Returns `None` on an empty stack.
    pub fn pop(&mut self) -> Option<String> {
        self.entries.pop().map(|(name, _)| name)
    }

    /// Pop the top entry and return it.
    pub fn pop_entry(&mut self) -> Option<(String, R)> {
        self.entries.pop()
    }

    /// Bring `name` to the top, keeping its region and the relative order
    /// of the other entries. Pushes `region` if the name is not present.
    ///
    /// The region is only built when it is needed.
    pub fn switch_to(&mut self, name: &str, region: impl FnOnce() -> R) {
        match self.position(name) {
            Some(idx) => {
                let entry = self.entries.remove(idx);
                self.entries.push(entry);
            }
            None => self.entries.push((name.to_string(), region())),
        }
    }

    /// Name of the top entry.
    pub fn top(&self) -> Option<&str> {
        self.entries.last().map(|(n, _)| n.as_str())
    }

    /// Region of the top entry.
    pub fn top_region(&self) -> Option<&R> {
        self.entries.last().map(|(_, r)| r)
    }

    /// Mutable region of the top entry.
    pub fn top_region_mut(&mut self) -> Option<&mut R> {
        self.entries.last_mut().map(|(_, r)| r)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Entry names, bottom to top.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Entries, bottom to top.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&str, &R)> {
        self.entries.iter().map(|(n, r)| (n.as_str(), r))
    }

    /// Mutable entries, bottom to top.
    pub fn iter_mut(&mut self) -> impl DoubleEndedIterator<Item = (&str, &mut R)> {
        self.entries.iter_mut().map(|(n, r)| (n.as_str(), r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names<R>(stack: &NavigationStack<R>) -> Vec<&str> {
        stack.names().collect()
    }

    #[test]
    fn test_pop_order_is_lifo() {
        let mut stack = NavigationStack::new();
        stack.push("a", 1);
        stack.push("b", 2);
        stack.push("c", 3);

        assert_eq!(stack.pop(), Some("c".to_string()));
        assert_eq!(stack.top_region(), Some(&2));
        assert_eq!(stack.pop(), Some("b".to_string()));
        assert_eq!(stack.pop(), Some("a".to_string()));
        assert_eq!(stack.pop(), None);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_push_then_pop_restores_stack() {
        let mut stack = NavigationStack::new();
        stack.push("dashboard", 1);
        stack.push("messages", 2);
        let before: Vec<String> = stack.names().map(String::from).collect();

        stack.push("overlay", 9);
        stack.pop();

        assert_eq!(names(&stack), before);
    }

    #[test]
    fn test_empty_stack() {
        let mut stack: NavigationStack<()> = NavigationStack::new();
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.top(), None);
        assert!(stack.top_region().is_none());
    }

    #[test]
    fn test_push_same_name_replaces() {
        let mut stack = NavigationStack::new();
        stack.push("a", 1);
        stack.push("b", 2);
        stack.push("a", 3);

        assert_eq!(names(&stack), vec!["b", "a"]);
        assert_eq!(stack.top_region(), Some(&3));
    }

    #[test]
    fn test_switch_to_existing_keeps_len_and_region() {
        let mut stack = NavigationStack::new();
        stack.push("a", 1);
        stack.push("b", 2);
        stack.push("c", 3);

        stack.switch_to("a", || 100);

        assert_eq!(stack.len(), 3);
        assert_eq!(names(&stack), vec!["b", "c", "a"]);
        assert_eq!(stack.top_region(), Some(&1));
    }

    #[test]
    fn test_switch_to_missing_pushes() {
        let mut stack = NavigationStack::new();
        stack.push("a", 1);
        stack.switch_to("b", || 2);

        assert_eq!(stack.len(), 2);
        assert_eq!(stack.top(), Some("b"));
        assert!(stack.contains("a"));
        assert!(!stack.contains("c"));
    }

    #[test]
    fn test_switch_to_top_is_noop() {
        let mut stack = NavigationStack::new();
        stack.push("a", 1);
        stack.push("b", 2);
        stack.switch_to("b", || unreachable!());
        assert_eq!(names(&stack), vec!["a", "b"]);
    }

    #[test]
    fn test_top_region_mut() {
        let mut stack = NavigationStack::new();
        stack.push("a", 1);
        if let Some(region) = stack.top_region_mut() {
            *region = 5;
        }
        assert_eq!(stack.pop_entry(), Some(("a".to_string(), 5)));
    }
}
