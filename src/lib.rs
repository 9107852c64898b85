//! Drag an element freely inside a bounded container.
//!
//! [`FreeDragging`] listens for pointer-down on a handle and pointer-move/up on the whole
//! document, and translates the element by the pointer delta, clamped so it stays inside its
//! boundary. [`dispatch_egui_input`] feeds `egui` pointer input into a [`Document`].

#![forbid(unsafe_code)]

pub mod free_drag;

pub use free_drag::{
    Bounds, Document, DragHandle, DragPhase, DragSession, DragStateMachine, Element,
    ElementResolver, FreeDragError, FreeDragging, FreeDraggingOptions, PointerEvent,
    PointerEventKind, PointerTarget, Subscription, SubscriptionRole, SubscriptionSet, Translate,
};
pub use free_drag::{compose, compute_bounds, DragStreams};
pub use free_drag::{dispatch_egui_input, paint_element, DispatchSummary};
