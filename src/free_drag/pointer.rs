use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use egui::Pos2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
}

/// One raw pointer signal, in document coordinates (points).
#[derive(Debug)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub pos: Pos2,
    default_prevented: Cell<bool>,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, pos: Pos2) -> Self {
        Self {
            kind,
            pos,
            default_prevented: Cell::new(false),
        }
    }

    pub fn down(pos: Pos2) -> Self {
        Self::new(PointerEventKind::Down, pos)
    }

    pub fn moved(pos: Pos2) -> Self {
        Self::new(PointerEventKind::Move, pos)
    }

    pub fn up(pos: Pos2) -> Self {
        Self::new(PointerEventKind::Up, pos)
    }

    /// Ask the host to skip its own handling of this event (text selection, widget drags, ...).
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

type Listener = Rc<RefCell<dyn FnMut(&PointerEvent)>>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, PointerEventKind, Listener)>,
}

impl Registry {
    fn remove(&mut self, id: u64) -> Option<Listener> {
        let index = self
            .listeners
            .iter()
            .position(|(listener_id, _, _)| *listener_id == id)?;
        Some(self.listeners.remove(index).2)
    }

    fn contains(&self, id: u64) -> bool {
        self.listeners.iter().any(|(listener_id, _, _)| *listener_id == id)
    }
}

/// Something pointer listeners can be attached to: an element, or the whole document.
///
/// Cloning is cheap and yields another handle to the same listener list.
#[derive(Clone, Default)]
pub struct PointerTarget {
    registry: Rc<RefCell<Registry>>,
}

impl fmt::Debug for PointerTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerTarget")
            .field("listeners", &self.registry.borrow().listeners.len())
            .finish()
    }
}

impl PointerTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a listener for one kind of event. It stays attached until the returned
    /// [`Subscription`] is released.
    pub fn listen(
        &self,
        kind: PointerEventKind,
        listener: impl FnMut(&PointerEvent) + 'static,
    ) -> Subscription {
        let listener: Listener = Rc::new(RefCell::new(listener));
        let id = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.listeners.push((id, kind, listener));
            id
        };

        let registry = Rc::downgrade(&self.registry);
        Subscription::from_teardown(move || {
            if let Some(registry) = Weak::upgrade(&registry) {
                // Drop the closure outside the borrow: its captures may touch this target.
                let removed = registry.borrow_mut().remove(id);
                drop(removed);
            }
        })
    }

    /// Deliver `event` to every listener for its kind, in registration order.
    ///
    /// Listeners removed by an earlier listener are skipped. Listeners added during dispatch
    /// only see later events.
    pub fn dispatch(&self, event: &PointerEvent) {
        let snapshot: Vec<(u64, Listener)> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .filter(|(_, kind, _)| *kind == event.kind)
            .map(|(id, _, listener)| (*id, Rc::clone(listener)))
            .collect();

        for (id, listener) in snapshot {
            if !self.registry.borrow().contains(id) {
                continue;
            }
            let mut listener = listener.borrow_mut();
            (*listener)(event);
        }
    }

    pub fn listener_count(&self, kind: PointerEventKind) -> usize {
        self.registry
            .borrow()
            .listeners
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .count()
    }
}

struct SubscriptionInner {
    closed: Cell<bool>,
    teardown: RefCell<Option<Box<dyn FnOnce()>>>,
    children: RefCell<Vec<Subscription>>,
}

/// A handle to an attached listener (or a group of them).
///
/// Cloning yields another handle to the same subscription. Releasing is idempotent.
#[derive(Clone)]
pub struct Subscription {
    inner: Rc<SubscriptionInner>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("closed", &self.is_closed())
            .field("children", &self.inner.children.borrow().len())
            .finish()
    }
}

impl Default for Subscription {
    fn default() -> Self {
        Self::empty()
    }
}

impl Subscription {
    /// An open subscription with nothing to release yet; use [`Self::add`] to group others.
    pub fn empty() -> Self {
        Self {
            inner: Rc::new(SubscriptionInner {
                closed: Cell::new(false),
                teardown: RefCell::new(None),
                children: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn from_teardown(teardown: impl FnOnce() + 'static) -> Self {
        let subscription = Self::empty();
        *subscription.inner.teardown.borrow_mut() = Some(Box::new(teardown));
        subscription
    }

    /// Release `child` together with this subscription.
    ///
    /// If this subscription is already closed, `child` is released immediately.
    pub fn add(&self, child: Self) {
        if self.is_closed() {
            child.unsubscribe();
        } else {
            self.inner.children.borrow_mut().push(child);
        }
    }

    /// Run the teardown, then release children in the order they were added.
    pub fn unsubscribe(&self) {
        if self.inner.closed.replace(true) {
            return;
        }

        let teardown = self.inner.teardown.borrow_mut().take();
        if let Some(teardown) = teardown {
            teardown();
        }

        let children = std::mem::take(&mut *self.inner.children.borrow_mut());
        for child in children {
            child.unsubscribe();
        }
    }

    pub fn is_closed(&self) -> bool {
        self.inner.closed.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn counter() -> (Rc<Cell<u32>>, impl FnMut(&PointerEvent) + 'static) {
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        (count, move |_: &PointerEvent| c.set(c.get() + 1))
    }

    #[test]
    fn listeners_only_see_their_kind() {
        let target = PointerTarget::new();
        let (downs, on_down) = counter();
        let _sub = target.listen(PointerEventKind::Down, on_down);

        target.dispatch(&PointerEvent::moved(pos2(1.0, 1.0)));
        target.dispatch(&PointerEvent::down(pos2(1.0, 1.0)));
        target.dispatch(&PointerEvent::up(pos2(1.0, 1.0)));

        assert_eq!(downs.get(), 1);
    }

    #[test]
    fn unsubscribe_detaches_and_is_idempotent() {
        let target = PointerTarget::new();
        let (moves, on_move) = counter();
        let sub = target.listen(PointerEventKind::Move, on_move);
        assert_eq!(target.listener_count(PointerEventKind::Move), 1);

        sub.unsubscribe();
        sub.unsubscribe();
        assert!(sub.is_closed());
        assert_eq!(target.listener_count(PointerEventKind::Move), 0);

        target.dispatch(&PointerEvent::moved(pos2(0.0, 0.0)));
        assert_eq!(moves.get(), 0);
    }

    #[test]
    fn listener_removed_during_dispatch_is_skipped() {
        let target = PointerTarget::new();
        let (late, on_late) = counter();

        let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let victim_in_listener = Rc::clone(&victim);
        let _first = target.listen(PointerEventKind::Up, move |_| {
            if let Some(sub) = victim_in_listener.borrow().as_ref() {
                sub.unsubscribe();
            }
        });
        *victim.borrow_mut() = Some(target.listen(PointerEventKind::Up, on_late));

        target.dispatch(&PointerEvent::up(pos2(0.0, 0.0)));
        assert_eq!(late.get(), 0);
    }

    #[test]
    fn listener_added_during_dispatch_waits_for_next_event() {
        let target = PointerTarget::new();
        let (added, on_added) = counter();
        let on_added = Rc::new(RefCell::new(Some(on_added)));

        let target_in_listener = target.clone();
        let keep: Rc<RefCell<Vec<Subscription>>> = Rc::default();
        let keep_in_listener = Rc::clone(&keep);
        let _sub = target.listen(PointerEventKind::Move, move |_| {
            if let Some(listener) = on_added.borrow_mut().take() {
                let sub = target_in_listener.listen(PointerEventKind::Move, listener);
                keep_in_listener.borrow_mut().push(sub);
            }
        });

        target.dispatch(&PointerEvent::moved(pos2(0.0, 0.0)));
        assert_eq!(added.get(), 0);
        target.dispatch(&PointerEvent::moved(pos2(1.0, 0.0)));
        assert_eq!(added.get(), 1);
    }

    #[test]
    fn group_releases_children_in_order() {
        let order: Rc<RefCell<Vec<&'static str>>> = Rc::default();
        let group = Subscription::empty();
        for name in ["first", "second"] {
            let order = Rc::clone(&order);
            group.add(Subscription::from_teardown(move || order.borrow_mut().push(name)));
        }

        group.unsubscribe();
        group.unsubscribe();
        assert_eq!(*order.borrow(), vec!["first", "second"]);

        let released = Rc::new(Cell::new(false));
        let r = Rc::clone(&released);
        group.add(Subscription::from_teardown(move || r.set(true)));
        assert!(released.get(), "adding to a closed group releases at once");
    }

    #[test]
    fn prevent_default_is_visible_to_the_host() {
        let target = PointerTarget::new();
        let _sub = target.listen(PointerEventKind::Move, PointerEvent::prevent_default);

        let event = PointerEvent::moved(pos2(0.0, 0.0));
        assert!(!event.default_prevented());
        target.dispatch(&event);
        assert!(event.default_prevented());
    }
}
