//! Named, priority-ordered route storage.
//!
//! Iteration runs in **priority order** (higher value first). Among equal
//! priorities the most recently registered entry comes first, so a route
//! added later can shadow a more generic one added earlier.

#[derive(Debug)]
struct Entry<T> {
    name: String,
    priority: i32,
    serial: u64,
    value: T,
}

#[derive(Debug)]
pub(crate) struct PriorityList<T> {
    entries: Vec<Entry<T>>,
    serial: u64,
}

impl<T> Default for PriorityList<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            serial: 0,
        }
    }
}

impl<T> PriorityList<T> {
    /// Insert (or replace) a named entry.
    pub(crate) fn insert(&mut self, name: impl Into<String>, value: T, priority: i32) {
        let name = name.into();
        self.remove(&name);

        self.serial += 1;
        self.entries.push(Entry {
            name,
            priority,
            serial: self.serial,
            value,
        });
        self.entries
            .sort_by(|a, b| b.priority.cmp(&a.priority).then(b.serial.cmp(&a.serial)));
    }

    pub(crate) fn remove(&mut self, name: &str) -> Option<T> {
        let index = self.entries.iter().position(|e| e.name == name)?;
        Some(self.entries.remove(index).value)
    }

    pub(crate) fn get(&self, name: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| &e.value)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|e| (e.name.as_str(), &e.value))
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
