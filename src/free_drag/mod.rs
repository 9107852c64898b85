use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

mod composer;
mod debug;
mod element;
mod error;
mod geometry;
mod host;
mod lifecycle;
mod options;
mod pointer;
mod state_machine;

#[cfg(test)]
mod host_tests;

pub use composer::{compose, DragStreams};
pub use element::{Document, Element, ElementResolver, Translate, BODY_SELECTOR};
pub use error::FreeDragError;
pub use geometry::{clamp, compute_bounds, Bounds, LayoutGeometry};
pub use host::{dispatch_egui_input, paint_element, pointer_events_from_input, DispatchSummary};
pub use lifecycle::{SubscriptionRole, SubscriptionSet};
pub use options::{FreeDraggingOptions, DEFAULT_DRAGGING_CLASS};
pub use pointer::{PointerEvent, PointerEventKind, PointerTarget, Subscription};
pub use state_machine::{DragPhase, DragSession, DragStateMachine};

use debug::DebugEventLog;

/// Which element starts a drag when pressed. Decided once, at [`FreeDragging::init`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragHandle {
    /// A descendant marked with [`Element::mark_as_drag_handle`].
    Explicit(Element),
    /// No handle was marked: the whole draggable element is the handle.
    Draggable,
}

impl DragHandle {
    fn resolve(draggable: &Element) -> Self {
        match draggable.handle_child() {
            Some(handle) => Self::Explicit(handle),
            None => Self::Draggable,
        }
    }

    /// The element receiving drag-start events.
    pub fn element<'a>(&'a self, draggable: &'a Element) -> &'a Element {
        match self {
            Self::Explicit(handle) => handle,
            Self::Draggable => draggable,
        }
    }
}

struct DragController {
    element: Element,
    boundary: Element,
    streams: DragStreams,
    machine: DragStateMachine,
    subscriptions: SubscriptionSet,
    dragging_class: String,
    last_bounds: Option<Bounds>,
    debug_log: DebugEventLog,
}

impl DragController {
    /// Subscribe the start and end handlers. Move handlers are opened per gesture.
    fn wire(this: &Rc<RefCell<Self>>) {
        let streams = this.borrow().streams.clone();

        let weak = Rc::downgrade(this);
        let start = streams.subscribe_start(move |event| {
            if let Some(controller) = weak.upgrade() {
                Self::on_start(&controller, event);
            }
        });

        let weak = Rc::downgrade(this);
        let end = streams.subscribe_end(move |_| {
            if let Some(controller) = weak.upgrade() {
                controller.borrow_mut().on_end();
            }
        });

        let mut controller = this.borrow_mut();
        controller.subscriptions.register(SubscriptionRole::Start, start);
        controller.subscriptions.register(SubscriptionRole::End, end);
    }

    fn on_start(this: &Rc<RefCell<Self>>, event: &PointerEvent) {
        let mut guard = this.borrow_mut();
        let controller = &mut *guard;

        let bounds = compute_bounds(&controller.element, &controller.boundary);
        if !controller.machine.begin(event.pos, bounds) {
            log::trace!("{}: drag start ignored, already dragging", controller.element.name());
            return;
        }

        controller.last_bounds = Some(bounds);
        controller.element.add_class(&controller.dragging_class);
        log::debug!(
            "{}: drag start at {:?} bounds={bounds:?}",
            controller.element.name(),
            event.pos
        );
        controller
            .debug_log
            .push(format!("start pos={:?} bounds={bounds:?}", event.pos));

        let weak = Rc::downgrade(this);
        let moves = controller.streams.subscribe_move(move |event| {
            if let Some(controller) = weak.upgrade() {
                controller.borrow_mut().on_move(event);
            }
        });
        controller.subscriptions.register(SubscriptionRole::Move, moves);
    }

    fn on_move(&mut self, event: &PointerEvent) {
        event.prevent_default();

        if let Some(offset) = self.machine.drag_to(event.pos) {
            self.element.set_transform(Translate(offset));
            log::trace!("{}: offset {offset:?}", self.element.name());
        }
    }

    fn on_end(&mut self) {
        let was_dragging = self.machine.end();
        self.element.remove_class(&self.dragging_class);
        self.subscriptions.release(SubscriptionRole::Move);

        if was_dragging {
            let offset = self.machine.offset();
            log::debug!("{}: drag end offset={offset:?}", self.element.name());
            self.debug_log.push(format!("end offset={offset:?}"));
        }
    }

    /// Drop any gesture in progress without moving the element.
    fn abort_gesture(&mut self) {
        if self.machine.end() {
            self.element.remove_class(&self.dragging_class);
            self.debug_log.push("gesture aborted");
        }
    }
}

/// Lets the user drag an element around inside a boundary element.
///
/// Create it once the element, its boundary and its optional handle exist
/// ([`Self::init`]), feed pointer events to the [`Document`], and call [`Self::destroy`]
/// when the host goes away (dropping does the same).
///
/// While dragging, the element carries [`FreeDraggingOptions::dragging_class`] and its
/// [`Element::transform`] follows the pointer, clamped to [`Bounds`] computed from the
/// boundary and element layout at the start of every gesture.
pub struct FreeDragging {
    controller: Rc<RefCell<DragController>>,
    handle: DragHandle,
    options: FreeDraggingOptions,
}

impl fmt::Debug for FreeDragging {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let controller = self.controller.borrow();
        f.debug_struct("FreeDragging")
            .field("element", &controller.element.name())
            .field("boundary_query", &self.options.boundary_query)
            .field("handle", &self.handle)
            .field("session", controller.machine.session())
            .finish_non_exhaustive()
    }
}

fn resolve_boundary(
    resolver: &impl ElementResolver,
    query: &str,
) -> Result<Element, FreeDragError> {
    if query.trim().is_empty() {
        return Err(FreeDragError::EmptyBoundaryQuery);
    }
    resolver.query_selector(query).ok_or_else(|| {
        log::warn!("free drag boundary {query:?} did not resolve");
        FreeDragError::BoundaryNotFound {
            query: query.to_owned(),
        }
    })
}

impl FreeDragging {
    /// Install dragging on `element`.
    ///
    /// # Errors
    /// Fails, without installing anything, if `options.boundary_query` does not resolve.
    pub fn init(
        resolver: &impl ElementResolver,
        element: Element,
        options: FreeDraggingOptions,
    ) -> Result<Self, FreeDragError> {
        let boundary = resolve_boundary(resolver, &options.boundary_query)?;
        let handle = DragHandle::resolve(&element);
        let streams = compose(handle.element(&element).pointer_target(), resolver.surface());

        let mut debug_log =
            DebugEventLog::new(options.debug_event_log, options.debug_event_log_capacity);
        debug_log.push(format!(
            "init boundary={} handle={}",
            options.boundary_query,
            handle.element(&element).name()
        ));
        log::debug!(
            "{}: free drag installed, boundary={:?} handle={}",
            element.name(),
            options.boundary_query,
            handle.element(&element).name()
        );

        let controller = Rc::new(RefCell::new(DragController {
            element,
            boundary,
            streams,
            machine: DragStateMachine::new(),
            subscriptions: SubscriptionSet::new(),
            dragging_class: options.dragging_class.clone(),
            last_bounds: None,
            debug_log,
        }));
        DragController::wire(&controller);

        Ok(Self {
            controller,
            handle,
            options,
        })
    }

    /// Resolve the boundary again and re-subscribe everything, keeping the current offset.
    ///
    /// The handle is not re-resolved. A gesture in progress is dropped. No-op after
    /// [`Self::destroy`].
    ///
    /// # Errors
    /// If the boundary no longer resolves, the existing wiring is left untouched.
    pub fn reinitialize(&mut self, resolver: &impl ElementResolver) -> Result<(), FreeDragError> {
        if self.is_torn_down() {
            return Ok(());
        }
        let boundary = resolve_boundary(resolver, &self.options.boundary_query)?;

        {
            let mut controller = self.controller.borrow_mut();
            controller.subscriptions.release_all();
            controller.abort_gesture();

            let handle_target = self.handle.element(&controller.element).pointer_target().clone();
            controller.boundary = boundary;
            controller.streams = compose(&handle_target, resolver.surface());
            controller.debug_log.push("reinitialize");
            log::debug!("{}: free drag re-initialized", controller.element.name());
        }
        DragController::wire(&self.controller);
        Ok(())
    }

    /// Release every subscription. Only the first call does anything.
    pub fn destroy(&mut self) {
        let mut controller = self.controller.borrow_mut();
        if controller.subscriptions.is_torn_down() {
            return;
        }
        controller.abort_gesture();
        controller.subscriptions.teardown_all();
        controller.debug_log.push("teardown");
        log::debug!("{}: free drag torn down", controller.element.name());
    }

    pub fn is_torn_down(&self) -> bool {
        self.controller.borrow().subscriptions.is_torn_down()
    }

    /// Current translation of the element.
    pub fn offset(&self) -> egui::Vec2 {
        self.controller.borrow().machine.offset()
    }

    pub fn phase(&self) -> DragPhase {
        self.controller.borrow().machine.phase()
    }

    pub fn is_dragging(&self) -> bool {
        self.controller.borrow().machine.is_dragging()
    }

    pub fn session(&self) -> DragSession {
        *self.controller.borrow().machine.session()
    }

    /// Bounds computed at the most recent drag start.
    pub fn last_bounds(&self) -> Option<Bounds> {
        self.controller.borrow().last_bounds
    }

    pub fn element(&self) -> Element {
        self.controller.borrow().element.clone()
    }

    pub fn boundary(&self) -> Element {
        self.controller.borrow().boundary.clone()
    }

    pub fn handle(&self) -> &DragHandle {
        &self.handle
    }

    pub fn options(&self) -> &FreeDraggingOptions {
        &self.options
    }

    /// Number of open subscriptions per role, e.g. to check nothing leaked.
    pub fn active_subscriptions(&self, role: SubscriptionRole) -> usize {
        self.controller.borrow().subscriptions.active_count(role)
    }

    /// Lines recorded when [`FreeDraggingOptions::debug_event_log`] is on.
    pub fn debug_log_text(&self) -> String {
        self.controller.borrow().debug_log.text()
    }
}

impl Drop for FreeDragging {
    fn drop(&mut self) {
        self.destroy();
    }
}
