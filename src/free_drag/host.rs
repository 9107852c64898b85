use egui::{Color32, Context, CursorIcon, Event, Painter, PointerButton, Stroke, StrokeKind};

use super::element::{Document, Element};
use super::pointer::PointerEvent;

/// What [`dispatch_egui_input`] did this pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Number of pointer events delivered to the document.
    pub dispatched: usize,

    /// A listener asked to skip default handling of at least one event (i.e. a drag moved).
    pub default_prevented: bool,
}

fn to_pointer_event(event: &Event) -> Option<PointerEvent> {
    match event {
        Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed,
            ..
        } => Some(if *pressed {
            PointerEvent::down(*pos)
        } else {
            PointerEvent::up(*pos)
        }),
        Event::PointerMoved(pos) => Some(PointerEvent::moved(*pos)),
        _ => None,
    }
}

/// This pass's primary-button presses/releases and pointer moves, in the order they happened.
pub fn pointer_events_from_input(ctx: &Context) -> Vec<PointerEvent> {
    ctx.input(|i| i.events.iter().filter_map(to_pointer_event).collect())
}

/// Feed this pass's pointer input into `document`.
///
/// Call once per pass, before painting, so the painted transforms are up to date.
pub fn dispatch_egui_input(ctx: &Context, document: &Document) -> DispatchSummary {
    let mut summary = DispatchSummary::default();

    for event in pointer_events_from_input(ctx) {
        document.dispatch(&event);
        summary.dispatched += 1;
        summary.default_prevented |= event.default_prevented();
    }

    if summary.default_prevented {
        ctx.set_cursor_icon(CursorIcon::Grabbing);
    }

    summary
}

/// Paint `element` at its visual rect; outlined while it carries `dragging_class`.
pub fn paint_element(painter: &Painter, element: &Element, fill: Color32, dragging_class: &str) {
    let rect = element.visual_rect();
    painter.rect_filled(rect, 6.0, fill);

    if element.has_class(dragging_class) {
        painter.rect_stroke(
            rect,
            6.0,
            Stroke::new(2.0, Color32::WHITE),
            StrokeKind::Inside,
        );
    }
}
