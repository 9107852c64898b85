use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::fmt;
use std::rc::{Rc, Weak};

use egui::{Pos2, Rect, Vec2};

use super::geometry::LayoutGeometry;
use super::pointer::{PointerEvent, PointerTarget};

/// A 2D translation applied on top of an element's layout position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Translate(pub Vec2);

impl fmt::Display for Translate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "translate3d({}px, {}px, 0)", self.0.x, self.0.y)
    }
}

struct ElementNode {
    name: String,
    layout: Cell<Rect>,
    transform: Cell<Option<Translate>>,
    classes: RefCell<BTreeSet<String>>,
    is_drag_handle: Cell<bool>,
    parent: RefCell<Weak<ElementNode>>,
    children: RefCell<Vec<Element>>,
    target: PointerTarget,
}

/// A node the drag logic can measure, style and listen to.
///
/// Cloning is cheap; clones refer to the same node. Parents hold their children, children
/// only point back weakly.
#[derive(Clone)]
pub struct Element {
    node: Rc<ElementNode>,
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("name", &self.node.name)
            .field("layout", &self.node.layout.get())
            .field("transform", &self.node.transform.get())
            .field("classes", &self.node.classes.borrow())
            .finish_non_exhaustive()
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }
}

impl Eq for Element {}

impl Element {
    pub fn new(name: impl Into<String>, layout: Rect) -> Self {
        Self {
            node: Rc::new(ElementNode {
                name: name.into(),
                layout: Cell::new(layout),
                transform: Cell::new(None),
                classes: RefCell::new(BTreeSet::new()),
                is_drag_handle: Cell::new(false),
                parent: RefCell::new(Weak::new()),
                children: RefCell::new(Vec::new()),
                target: PointerTarget::new(),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.node.name
    }

    /// Attach `child` as the last child of `self`, detaching it from any previous parent.
    pub fn append_child(&self, child: &Self) {
        if let Some(old_parent) = child.parent() {
            old_parent.node.children.borrow_mut().retain(|c| c != child);
        }
        *child.node.parent.borrow_mut() = Rc::downgrade(&self.node);
        self.node.children.borrow_mut().push(child.clone());
    }

    pub fn parent(&self) -> Option<Self> {
        let node = self.node.parent.borrow().upgrade()?;
        Some(Self { node })
    }

    pub fn children(&self) -> Vec<Self> {
        self.node.children.borrow().clone()
    }

    /// Layout box, ignoring any translation.
    pub fn layout_rect(&self) -> Rect {
        self.node.layout.get()
    }

    pub fn set_layout_rect(&self, rect: Rect) {
        self.node.layout.set(rect);
    }

    pub fn transform(&self) -> Option<Translate> {
        self.node.transform.get()
    }

    pub fn set_transform(&self, transform: Translate) {
        self.node.transform.set(Some(transform));
    }

    /// The transform as a CSS `transform` value, if any.
    pub fn transform_css(&self) -> Option<String> {
        self.transform().map(|t| t.to_string())
    }

    /// Own translation plus the translations of all ancestors.
    pub fn total_translation(&self) -> Vec2 {
        let mut total = Vec2::ZERO;
        let mut current = Some(self.clone());
        while let Some(element) = current {
            if let Some(Translate(offset)) = element.transform() {
                total += offset;
            }
            current = element.parent();
        }
        total
    }

    /// Where the element is painted and hit-tested.
    pub fn visual_rect(&self) -> Rect {
        self.layout_rect().translate(self.total_translation())
    }

    pub fn add_class(&self, class: &str) {
        self.node.classes.borrow_mut().insert(class.to_owned());
    }

    pub fn remove_class(&self, class: &str) {
        self.node.classes.borrow_mut().remove(class);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.node.classes.borrow().contains(class)
    }

    /// Mark this element as the drag handle of its closest draggable ancestor.
    pub fn mark_as_drag_handle(&self) {
        self.node.is_drag_handle.set(true);
    }

    pub fn is_drag_handle(&self) -> bool {
        self.node.is_drag_handle.get()
    }

    /// First descendant marked as a drag handle, depth-first in child order.
    pub fn handle_child(&self) -> Option<Self> {
        self.children().into_iter().find_map(|child| {
            if child.is_drag_handle() {
                Some(child)
            } else {
                child.handle_child()
            }
        })
    }

    pub fn pointer_target(&self) -> &PointerTarget {
        &self.node.target
    }
}

impl LayoutGeometry for Element {
    fn offset_rect(&self) -> Rect {
        self.layout_rect()
    }
}

/// Maps a selector to a single element.
pub trait ElementResolver {
    fn query_selector(&self, selector: &str) -> Option<Element>;

    /// The target that sees every pointer event, wherever it lands.
    fn surface(&self) -> &PointerTarget;
}

/// Selector this document always resolves to its body.
pub const BODY_SELECTOR: &str = "body";

/// A tree of elements under a body, plus a document-wide pointer target.
#[derive(Debug)]
pub struct Document {
    body: Element,
    selectors: ahash::HashMap<String, Element>,
    surface: PointerTarget,
}

impl Document {
    pub fn new(body_rect: Rect) -> Self {
        Self {
            body: Element::new(BODY_SELECTOR, body_rect),
            selectors: Default::default(),
            surface: PointerTarget::new(),
        }
    }

    pub fn body(&self) -> &Element {
        &self.body
    }

    /// Make `element` findable by `selector`. A later registration of the same selector wins.
    pub fn register_selector(&mut self, selector: impl Into<String>, element: &Element) {
        self.selectors.insert(selector.into(), element.clone());
    }

    pub fn unregister_selector(&mut self, selector: &str) {
        self.selectors.remove(selector);
    }

    /// The top-most element whose visual rect contains `pos`: later siblings paint over
    /// earlier ones, children over parents.
    pub fn hit_test(&self, pos: Pos2) -> Option<Element> {
        fn visit(element: &Element, pos: Pos2) -> Option<Element> {
            if let Some(hit) = element
                .children()
                .iter()
                .rev()
                .find_map(|child| visit(child, pos))
            {
                return Some(hit);
            }
            element.visual_rect().contains(pos).then(|| element.clone())
        }

        visit(&self.body, pos)
    }

    /// Deliver `event` to the element under the pointer, then each of its ancestors, then the
    /// document surface.
    pub fn dispatch(&self, event: &PointerEvent) {
        let mut current = self.hit_test(event.pos);
        while let Some(element) = current {
            element.pointer_target().dispatch(event);
            current = element.parent();
        }
        self.surface.dispatch(event);
    }
}

impl ElementResolver for Document {
    fn query_selector(&self, selector: &str) -> Option<Element> {
        if selector == BODY_SELECTOR {
            return Some(self.body.clone());
        }
        self.selectors.get(selector).cloned()
    }

    fn surface(&self) -> &PointerTarget {
        &self.surface
    }
}
