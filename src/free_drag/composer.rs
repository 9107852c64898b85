use super::pointer::{PointerEvent, PointerEventKind, PointerTarget, Subscription};

/// The three logical streams of a drag gesture, built from raw pointer signals.
///
/// - start: pointer-down on the handle.
/// - move: pointer-move anywhere on the surface, only until the next pointer-up.
/// - end: pointer-up anywhere on the surface, so releasing outside the handle still ends the drag.
#[derive(Clone, Debug)]
pub struct DragStreams {
    handle: PointerTarget,
    surface: PointerTarget,
}

/// Build the drag streams for one drag session.
pub fn compose(handle: &PointerTarget, surface: &PointerTarget) -> DragStreams {
    DragStreams {
        handle: handle.clone(),
        surface: surface.clone(),
    }
}

impl DragStreams {
    pub fn subscribe_start(&self, on_start: impl FnMut(&PointerEvent) + 'static) -> Subscription {
        self.handle.listen(PointerEventKind::Down, on_start)
    }

    pub fn subscribe_end(&self, on_end: impl FnMut(&PointerEvent) + 'static) -> Subscription {
        self.surface.listen(PointerEventKind::Up, on_end)
    }

    /// Move events until the next pointer-up on the surface.
    ///
    /// The returned subscription closes itself at that pointer-up, releasing the raw move
    /// listener. Releasing it earlier is fine too.
    pub fn subscribe_move(&self, on_move: impl FnMut(&PointerEvent) + 'static) -> Subscription {
        let window = Subscription::empty();

        window.add(self.surface.listen(PointerEventKind::Move, on_move));

        let closer = window.clone();
        window.add(
            self.surface
                .listen(PointerEventKind::Up, move |_| closer.unsubscribe()),
        );

        window
    }

    pub fn handle(&self) -> &PointerTarget {
        &self.handle
    }

    pub fn surface(&self) -> &PointerTarget {
        &self.surface
    }
}
