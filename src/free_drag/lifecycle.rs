use itertools::Itertools as _;

use super::pointer::Subscription;

/// What a registered subscription is for.
///
/// The declaration order is the release order: inner `Move` subscriptions go first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SubscriptionRole {
    Move,
    Start,
    End,
}

/// Owns every subscription of one [`super::FreeDragging`] instance.
///
/// At most one [`SubscriptionRole::Move`] entry is active at a time.
#[derive(Debug, Default)]
pub struct SubscriptionSet {
    entries: Vec<(SubscriptionRole, Subscription)>,
    torn_down: bool,
}

impl SubscriptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `subscription`.
    ///
    /// Registering a `Move` releases the previous `Move` first. After [`Self::teardown_all`]
    /// the subscription is released immediately instead of being kept.
    pub fn register(&mut self, role: SubscriptionRole, subscription: Subscription) {
        if self.torn_down {
            log::debug!("register {role:?} after teardown: releasing immediately");
            subscription.unsubscribe();
            return;
        }

        if role == SubscriptionRole::Move {
            self.release(SubscriptionRole::Move);
        }

        self.entries.retain(|(_, s)| !s.is_closed());
        self.entries.push((role, subscription));
    }

    /// Release every subscription with `role`. Entries that were already released are fine.
    pub fn release(&mut self, role: SubscriptionRole) {
        let (released, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|(r, _)| *r == role);
        self.entries = kept;

        for (_, subscription) in released {
            subscription.unsubscribe();
        }
    }

    /// Release everything but stay usable, e.g. before wiring the streams again.
    pub fn release_all(&mut self) {
        let entries = std::mem::take(&mut self.entries);
        for (role, subscription) in entries
            .into_iter()
            .sorted_by_key(|(role, _)| *role)
        {
            log::trace!("release {role:?}");
            subscription.unsubscribe();
        }
    }

    /// Final release. Calling it again is a no-op.
    pub fn teardown_all(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.release_all();
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Number of registered subscriptions with `role` that are still open.
    pub fn active_count(&self, role: SubscriptionRole) -> usize {
        self.entries
            .iter()
            .filter(|(r, s)| *r == role && !s.is_closed())
            .count()
    }
}
