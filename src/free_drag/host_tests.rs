use egui::{
    pos2, vec2, Context, CursorIcon, Event, Modifiers, PointerButton, Pos2, RawInput, Rect,
};

use super::{
    dispatch_egui_input, DispatchSummary, Document, Element, FreeDragging, FreeDraggingOptions,
};

fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
    Rect::from_min_size(pos2(x, y), vec2(w, h))
}

fn button(pos: Pos2, button: PointerButton, pressed: bool) -> Event {
    Event::PointerButton {
        pos,
        button,
        pressed,
        modifiers: Modifiers::NONE,
    }
}

fn press(pos: Pos2) -> Event {
    button(pos, PointerButton::Primary, true)
}

fn release(pos: Pos2) -> Event {
    button(pos, PointerButton::Primary, false)
}

/// Run one egui pass with `events`, dispatching them into `document`.
fn run_pass(
    ctx: &Context,
    document: &Document,
    events: Vec<Event>,
) -> (DispatchSummary, CursorIcon) {
    let raw = RawInput {
        screen_rect: Some(rect(0.0, 0.0, 800.0, 600.0)),
        events,
        ..Default::default()
    };

    let mut summary = DispatchSummary::default();
    let output = ctx.run(raw, |ctx| {
        summary = dispatch_egui_input(ctx, document);
    });
    (summary, output.platform_output.cursor_icon)
}

fn board_with_card() -> (Document, Element) {
    let mut document = Document::new(rect(0.0, 0.0, 800.0, 600.0));
    let board = Element::new("board", rect(0.0, 0.0, 400.0, 300.0));
    let card = Element::new("card", rect(0.0, 0.0, 50.0, 50.0));
    document.body().append_child(&board);
    board.append_child(&card);
    document.register_selector("#board", &board);
    (document, card)
}

#[test]
fn egui_pointer_input_drags_the_card() {
    let (document, card) = board_with_card();
    let drag = FreeDragging::init(
        &document,
        card.clone(),
        FreeDraggingOptions::with_boundary("#board"),
    )
    .unwrap();
    let ctx = Context::default();

    let (summary, _) = run_pass(&ctx, &document, vec![press(pos2(10.0, 10.0))]);
    assert_eq!(summary.dispatched, 1);
    assert!(drag.is_dragging());
    assert!(card.has_class("free-dragging"));

    let (summary, cursor) = run_pass(
        &ctx,
        &document,
        vec![
            Event::PointerMoved(pos2(30.0, 20.0)),
            Event::PointerMoved(pos2(60.0, 40.0)),
        ],
    );
    assert_eq!(summary.dispatched, 2);
    assert!(summary.default_prevented);
    assert_eq!(cursor, CursorIcon::Grabbing);
    assert_eq!(drag.offset(), vec2(50.0, 30.0));
    assert_eq!(card.visual_rect(), rect(50.0, 30.0, 50.0, 50.0));

    let (summary, _) = run_pass(&ctx, &document, vec![release(pos2(60.0, 40.0))]);
    assert!(!summary.default_prevented);
    assert!(!drag.is_dragging());
    assert!(!card.has_class("free-dragging"));
}

#[test]
fn press_and_moves_in_one_pass_keep_their_order() {
    let (document, card) = board_with_card();
    let drag = FreeDragging::init(
        &document,
        card,
        FreeDraggingOptions::with_boundary("#board"),
    )
    .unwrap();
    let ctx = Context::default();

    run_pass(
        &ctx,
        &document,
        vec![
            Event::PointerMoved(pos2(10.0, 10.0)),
            press(pos2(10.0, 10.0)),
            Event::PointerMoved(pos2(510.0, 510.0)),
            release(pos2(510.0, 510.0)),
            Event::PointerMoved(pos2(0.0, 0.0)),
        ],
    );

    assert!(!drag.is_dragging());
    assert_eq!(drag.offset(), vec2(350.0, 250.0));
}

#[test]
fn secondary_button_does_not_start_a_drag() {
    let (document, card) = board_with_card();
    let drag = FreeDragging::init(
        &document,
        card,
        FreeDraggingOptions::with_boundary("#board"),
    )
    .unwrap();
    let ctx = Context::default();

    let (summary, _) = run_pass(
        &ctx,
        &document,
        vec![button(pos2(10.0, 10.0), PointerButton::Secondary, true)],
    );
    assert_eq!(summary.dispatched, 0);
    assert!(!drag.is_dragging());
}

#[test]
fn idle_moves_leave_the_cursor_alone() {
    let (document, card) = board_with_card();
    let _drag = FreeDragging::init(
        &document,
        card,
        FreeDraggingOptions::with_boundary("#board"),
    )
    .unwrap();
    let ctx = Context::default();

    let (summary, cursor) =
        run_pass(&ctx, &document, vec![Event::PointerMoved(pos2(10.0, 10.0))]);
    assert_eq!(summary.dispatched, 1);
    assert!(!summary.default_prevented);
    assert_eq!(cursor, CursorIcon::Default);
}
