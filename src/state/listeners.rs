#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Ordered observer list. Listeners run in registration order.
pub struct Listeners<T> {
    next_id: u64,
    entries: Vec<(ListenerId, Box<dyn FnMut(T)>)>,
}

impl<T: Copy> Listeners<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, listener: impl FnMut(T) + 'static) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.entries.push((id, Box::new(listener)));
        id
    }

    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn notify(&mut self, value: T) {
        for (_, listener) in &mut self.entries {
            listener(value);
        }
    }
}

impl<T: Copy> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy> std::fmt::Debug for Listeners<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn notify_reaches_every_listener_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::new();
        for tag in ["a", "b"] {
            let seen = Rc::clone(&seen);
            listeners.add(move |value: bool| seen.borrow_mut().push((tag, value)));
        }

        listeners.notify(true);
        assert_eq!(*seen.borrow(), vec![("a", true), ("b", true)]);
    }

    #[test]
    fn removed_listener_is_not_called() {
        let calls = Rc::new(RefCell::new(0));
        let mut listeners = Listeners::new();
        let calls_for_listener = Rc::clone(&calls);
        let id = listeners.add(move |_: bool| *calls_for_listener.borrow_mut() += 1);

        assert!(listeners.remove(id));
        assert!(!listeners.remove(id));
        listeners.notify(false);
        assert_eq!(*calls.borrow(), 0);
        assert!(listeners.is_empty());
    }

    #[test]
    fn debug_reports_listener_count() {
        let mut listeners = Listeners::new();
        listeners.add(|_: bool| {});
        assert_eq!(listeners.len(), 1);
        assert_eq!(format!("{listeners:?}"), "Listeners { len: 1 }");
    }
}
