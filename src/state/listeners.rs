//! Post-navigation listener registry.
//!
//! A registry belongs to exactly one widget. Listeners carry no payload:
//! they receive the widget's owner and re-query whatever state they need.
//!
//! # Caller obligations
//!
//! Listeners run synchronously, in registration order, after the widget has
//! applied its own navigation. A listener must not navigate the widget that
//! notified it; that recursion is not guarded. While notification is in
//! progress the registry is detached from its widget: listeners added from
//! inside a listener run from the next notification on, and removals made
//! from inside a listener are applied when the registry is reattached.

use std::fmt;

/// Handle returned by [`Listeners::add`], used to remove the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback<T> = Box<dyn FnMut(&mut T)>;

/// Ordered zero-payload callbacks observing one widget.
pub struct Listeners<T> {
    next_id: u64,
    entries: Vec<(ListenerId, Callback<T>)>,
    /// Ids currently detached for notification.
    in_flight: Vec<ListenerId>,
    /// Removals of in-flight ids, applied on reattach.
    pending_removals: Vec<ListenerId>,
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
            in_flight: Vec::new(),
            pending_removals: Vec::new(),
        }
    }
}

impl<T> fmt::Debug for Listeners<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("ids", &self.entries.iter().map(|(id, _)| *id).collect::<Vec<_>>())
            .finish()
    }
}

impl<T> Listeners<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback; it runs after every later notification.
    pub fn add<F>(&mut self, callback: F) -> ListenerId
    where
        F: FnMut(&mut T) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    /// Unregister a callback. Returns false if `id` was not registered.
    ///
    /// Removing a listener that is detached for notification is deferred
    /// until [`reattach`](Self::reattach); it still runs to the end of the
    /// current notification.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(existing, _)| *existing != id);
        if self.entries.len() != before {
            return true;
        }
        if self.in_flight.contains(&id) && !self.pending_removals.contains(&id) {
            self.pending_removals.push(id);
            return true;
        }
        false
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Invoke every listener in registration order.
    pub fn notify(&mut self, target: &mut T) {
        for (_, callback) in self.entries.iter_mut() {
            callback(target);
        }
    }

    /// Take the registered listeners out, leaving an empty registry that
    /// keeps issuing fresh ids.
    pub fn detach(&mut self) -> Listeners<T> {
        let detached = std::mem::take(self);
        self.next_id = detached.next_id;
        self.in_flight = detached.entries.iter().map(|(id, _)| *id).collect();
        detached
    }

    /// Put detached listeners back ahead of any added since
    /// [`detach`](Self::detach), dropping those removed in the meantime.
    pub fn reattach(&mut self, mut detached: Listeners<T>) {
        let added = std::mem::take(self);
        detached
            .entries
            .retain(|(id, _)| !added.pending_removals.contains(id));
        detached.next_id = detached.next_id.max(added.next_id);
        detached.entries.extend(added.entries);
        *self = detached;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Log(Vec<&'static str>);

    #[test]
    fn notifies_in_registration_order() {
        let mut listeners = Listeners::<Log>::new();
        listeners.add(|log| log.0.push("first"));
        listeners.add(|log| log.0.push("second"));
        listeners.add(|log| log.0.push("third"));

        let mut log = Log::default();
        listeners.notify(&mut log);

        assert_eq!(log.0, vec!["first", "second", "third"]);
    }

    #[test]
    fn removed_listener_stops_firing_others_continue() {
        let mut listeners = Listeners::<Log>::new();
        listeners.add(|log| log.0.push("a"));
        let b = listeners.add(|log| log.0.push("b"));
        listeners.add(|log| log.0.push("c"));

        let mut log = Log::default();
        listeners.notify(&mut log);
        assert!(listeners.remove(b));
        listeners.notify(&mut log);

        assert_eq!(log.0, vec!["a", "b", "c", "a", "c"]);
    }

    #[test]
    fn removing_unknown_id_is_false() {
        let mut listeners = Listeners::<Log>::new();
        let id = listeners.add(|_| {});
        assert!(listeners.remove(id));
        assert!(!listeners.remove(id));
        assert!(listeners.is_empty());
    }

    #[test]
    fn ids_stay_unique_across_detach() {
        let mut listeners = Listeners::<Log>::new();
        let first = listeners.add(|log| log.0.push("old"));

        let detached = listeners.detach();
        let added = listeners.add(|log| log.0.push("new"));
        listeners.reattach(detached);

        assert_ne!(first, added);
        assert_eq!(listeners.len(), 2);
        let mut log = Log::default();
        listeners.notify(&mut log);
        assert_eq!(log.0, vec!["old", "new"]);
    }

    #[test]
    fn removal_while_detached_applies_on_reattach() {
        let mut listeners = Listeners::<Log>::new();
        let first = listeners.add(|log| log.0.push("first"));
        listeners.add(|log| log.0.push("second"));

        let mut detached = listeners.detach();
        assert!(listeners.remove(first));
        assert!(!listeners.remove(first));
        let mut log = Log::default();
        detached.notify(&mut log);
        listeners.reattach(detached);

        assert_eq!(log.0, vec!["first", "second"]);
        assert_eq!(listeners.len(), 1);
        log.0.clear();
        listeners.notify(&mut log);
        assert_eq!(log.0, vec!["second"]);
    }
}
