use egui::{Pos2, Vec2};

use super::geometry::Bounds;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
}

/// Live state of the drag lifecycle.
///
/// `current_offset` survives between gestures; `bounds` only exists while a gesture is active.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragSession {
    origin: Vec2,
    current_offset: Vec2,
    bounds: Option<Bounds>,
    active: bool,
}

impl DragSession {
    /// Pointer position minus offset at drag start; after a drag ends it equals the offset.
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn current_offset(&self) -> Vec2 {
        self.current_offset
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Idle → Dragging → Idle, forever.
///
/// Pure bookkeeping: callers apply the visual side effects and manage subscriptions.
#[derive(Debug, Default)]
pub struct DragStateMachine {
    session: DragSession,
}

impl DragStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from a previously reached offset (e.g. after re-initialization).
    pub fn with_offset(offset: Vec2) -> Self {
        Self {
            session: DragSession {
                origin: offset,
                current_offset: offset,
                bounds: None,
                active: false,
            },
        }
    }

    pub fn phase(&self) -> DragPhase {
        if self.session.active {
            DragPhase::Dragging
        } else {
            DragPhase::Idle
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.session.active
    }

    pub fn offset(&self) -> Vec2 {
        self.session.current_offset
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }

    /// Start a gesture at `pointer`. Returns `false` (and changes nothing) if one is already
    /// running, so two gestures can never overlap.
    pub fn begin(&mut self, pointer: Pos2, bounds: Bounds) -> bool {
        if self.session.active {
            return false;
        }

        self.session.origin = pointer.to_vec2() - self.session.current_offset;
        self.session.bounds = Some(bounds);
        self.session.active = true;
        true
    }

    /// Follow the pointer. Returns the new, clamped offset, or `None` when idle.
    pub fn drag_to(&mut self, pointer: Pos2) -> Option<Vec2> {
        if !self.session.active {
            return None;
        }
        let bounds = self.session.bounds?;

        let raw = pointer.to_vec2() - self.session.origin;
        self.session.current_offset = bounds.clamp_offset(raw);
        Some(self.session.current_offset)
    }

    /// Finish the gesture. Returns whether one was running.
    ///
    /// A stray end (no gesture) only re-anchors `origin` to the current offset.
    pub fn end(&mut self) -> bool {
        let was_active = self.session.active;
        self.session.origin = self.session.current_offset;
        self.session.bounds = None;
        self.session.active = false;
        was_active
    }
}
