//! Detached document used to exercise the page bindings without a browser.
//! Compiled for tests only.
//!
//! Nodes live in an arena and are addressed by [`NodeId`]. Events dispatched
//! through [`MemorySurface::dispatch`] follow the browser's order for the
//! listeners this crate registers: element listeners from the target up to the
//! root, then document, then window. Non-bubbling events only reach their
//! target.

use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
    iter::Peekable,
    str::Chars,
};

use crate::{
    surface::{
        EventKind, EventResponse, Handler, IntersectionCallback, IntersectionOptions,
        ListenTarget, NavigatorInfo, Rect, Surface, SurfaceError, UiEvent,
    },
    viewport::ViewportSnapshot,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Default)]
struct NodeData {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    text: String,
    value: String,
    disabled: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    rect: Rect,
    offset_top: f64,
    offset_height: f64,
}

struct Listener {
    target: ListenTarget<NodeId>,
    kind: EventKind,
    handler: Handler<NodeId>,
}

struct Observation {
    nodes: Vec<NodeId>,
    options: IntersectionOptions,
    on_change: IntersectionCallback<NodeId>,
}

pub struct MemorySurface {
    nodes: RefCell<Vec<NodeData>>,
    root: NodeId,
    head: NodeId,
    body: NodeId,
    viewport: Cell<ViewportSnapshot>,
    navigator: RefCell<NavigatorInfo>,
    loaded: Cell<bool>,
    intersection_supported: Cell<bool>,
    listeners: RefCell<Vec<Listener>>,
    observations: RefCell<Vec<Observation>>,
    scroll_requests: RefCell<Vec<f64>>,
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySurface {
    pub fn new() -> Self {
        let surface = Self {
            nodes: RefCell::new(Vec::new()),
            root: NodeId(0),
            head: NodeId(1),
            body: NodeId(2),
            viewport: Cell::new(ViewportSnapshot::default()),
            navigator: RefCell::new(NavigatorInfo::default()),
            loaded: Cell::new(false),
            intersection_supported: Cell::new(true),
            listeners: RefCell::new(Vec::new()),
            observations: RefCell::new(Vec::new()),
            scroll_requests: RefCell::new(Vec::new()),
        };

        let root = surface.new_node("html");
        let head = surface.new_node("head");
        let body = surface.new_node("body");
        surface.append_child(&root, &head);
        surface.append_child(&root, &body);
        surface
    }

    fn new_node(&self, tag: &str) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(NodeData {
            tag: tag.to_ascii_lowercase(),
            ..NodeData::default()
        });
        NodeId(nodes.len() - 1)
    }

    fn with_node<T>(&self, node: &NodeId, read: impl FnOnce(&NodeData) -> T) -> Option<T> {
        self.nodes.borrow().get(node.0).map(read)
    }

    fn with_node_mut(&self, node: &NodeId, write: impl FnOnce(&mut NodeData)) {
        if let Some(data) = self.nodes.borrow_mut().get_mut(node.0) {
            write(data);
        }
    }

    fn parent_of(&self, node: &NodeId) -> Option<NodeId> {
        self.with_node(node, |data| data.parent).flatten()
    }

    fn detach(&self, node: &NodeId) {
        let Some(parent) = self.parent_of(node) else {
            return;
        };
        self.with_node_mut(&parent, |data| data.children.retain(|child| child != node));
        self.with_node_mut(node, |data| data.parent = None);
    }

    fn descendants(&self, from: &NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self
            .with_node(from, |data| data.children.iter().rev().copied().collect())
            .unwrap_or_default();

        while let Some(node) = stack.pop() {
            out.push(node);
            if let Some(children) = self.with_node(&node, |data| data.children.clone()) {
                stack.extend(children.into_iter().rev());
            }
        }

        out
    }

    fn matches(&self, node: &NodeId, selector: &str) -> bool {
        selector
            .split(',')
            .filter_map(|part| Compound::parse(part.trim()))
            .any(|compound| {
                self.with_node(node, |data| compound.matches(data))
                    .unwrap_or(false)
            })
    }

    /// Creates an element with the given classes and attaches it to `parent`.
    pub fn append(&self, parent: &NodeId, tag: &str, classes: &[&str]) -> NodeId {
        let node = self.new_node(tag);
        self.with_node_mut(&node, |data| {
            data.classes = classes.iter().map(ToString::to_string).collect();
        });
        self.append_child(parent, &node);
        node
    }

    pub fn set_layout(&self, node: &NodeId, offset_top: f64, offset_height: f64) {
        self.with_node_mut(node, |data| {
            data.offset_top = offset_top;
            data.offset_height = offset_height;
        });
    }

    pub fn set_rect(&self, node: &NodeId, rect: Rect) {
        self.with_node_mut(node, |data| data.rect = rect);
    }

    pub fn set_viewport(&self, width: f64, height: f64) {
        let mut viewport = self.viewport.get();
        viewport.width = width;
        viewport.height = height;
        self.viewport.set(viewport);
    }

    pub fn set_scroll_offset(&self, offset: f64) {
        let mut viewport = self.viewport.get();
        viewport.scroll_offset = offset;
        self.viewport.set(viewport);
    }

    pub fn set_navigator(&self, platform: &str, max_touch_points: u32) {
        *self.navigator.borrow_mut() = NavigatorInfo {
            platform: platform.to_string(),
            max_touch_points,
        };
    }

    pub fn disable_intersection_observer(&self) {
        self.intersection_supported.set(false);
    }

    pub fn classes(&self, node: &NodeId) -> Vec<String> {
        self.with_node(node, |data| data.classes.clone())
            .unwrap_or_default()
    }

    pub fn tag(&self, node: &NodeId) -> String {
        self.with_node(node, |data| data.tag.clone())
            .unwrap_or_default()
    }

    pub fn children(&self, node: &NodeId) -> Vec<NodeId> {
        self.with_node(node, |data| data.children.clone())
            .unwrap_or_default()
    }

    pub fn is_disabled(&self, node: &NodeId) -> bool {
        self.with_node(node, |data| data.disabled).unwrap_or(false)
    }

    pub fn scroll_requests(&self) -> Vec<f64> {
        self.scroll_requests.borrow().clone()
    }

    pub fn observed_options(&self) -> Vec<IntersectionOptions> {
        self.observations
            .borrow()
            .iter()
            .map(|observation| observation.options.clone())
            .collect()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn dispatch(
        &self,
        target: ListenTarget<NodeId>,
        kind: EventKind,
        event: UiEvent<NodeId>,
    ) -> EventResponse {
        let path = match &target {
            ListenTarget::Element(node) if kind.bubbles() => {
                let mut path = Vec::new();
                let mut current = Some(*node);
                while let Some(hop) = current {
                    path.push(ListenTarget::Element(hop));
                    current = self.parent_of(&hop);
                }
                path.push(ListenTarget::Document);
                path.push(ListenTarget::Window);
                path
            }
            other => vec![other.clone()],
        };

        let mut response = EventResponse::Proceed;
        for hop in path {
            let handlers: Vec<Handler<NodeId>> = self
                .listeners
                .borrow()
                .iter()
                .filter(|listener| listener.kind == kind && listener.target == hop)
                .map(|listener| listener.handler.clone())
                .collect();

            for handler in handlers {
                if handler(&event) == EventResponse::PreventDefault {
                    response = EventResponse::PreventDefault;
                }
            }
        }

        response
    }

    pub fn fire(&self, node: &NodeId, kind: EventKind) -> EventResponse {
        self.dispatch(ListenTarget::Element(*node), kind, UiEvent::on(*node))
    }

    pub fn click(&self, node: &NodeId) -> EventResponse {
        self.fire(node, EventKind::Click)
    }

    pub fn click_at(&self, node: &NodeId, client_x: f64, client_y: f64) -> EventResponse {
        self.dispatch(
            ListenTarget::Element(*node),
            EventKind::Click,
            UiEvent::at(*node, client_x, client_y),
        )
    }

    pub fn scroll_window(&self, offset: f64) {
        self.set_scroll_offset(offset);
        self.dispatch(ListenTarget::Window, EventKind::Scroll, UiEvent::plain());
    }

    pub fn resize_window(&self, width: f64, height: f64) {
        self.set_viewport(width, height);
        self.dispatch(ListenTarget::Window, EventKind::Resize, UiEvent::plain());
    }

    pub fn finish_loading(&self) {
        self.loaded.set(true);
        self.dispatch(ListenTarget::Window, EventKind::Load, UiEvent::plain());
    }

    pub fn set_intersecting(&self, node: &NodeId, visible: bool) {
        let callbacks: Vec<IntersectionCallback<NodeId>> = self
            .observations
            .borrow()
            .iter()
            .filter(|observation| observation.nodes.contains(node))
            .map(|observation| observation.on_change.clone())
            .collect();

        for callback in callbacks {
            callback(node, visible);
        }
    }
}

impl Surface for MemorySurface {
    type Node = NodeId;

    fn query(&self, selector: &str) -> Option<NodeId> {
        self.descendants(&self.root)
            .into_iter()
            .find(|node| self.matches(node, selector))
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        self.descendants(&self.root)
            .into_iter()
            .filter(|node| self.matches(node, selector))
            .collect()
    }

    fn query_within(&self, parent: &NodeId, selector: &str) -> Option<NodeId> {
        self.descendants(parent)
            .into_iter()
            .find(|node| self.matches(node, selector))
    }

    fn closest(&self, node: &NodeId, selector: &str) -> Option<NodeId> {
        let mut current = Some(*node);
        while let Some(candidate) = current {
            if self.matches(&candidate, selector) {
                return Some(candidate);
            }
            current = self.parent_of(&candidate);
        }
        None
    }

    fn root(&self) -> Option<NodeId> {
        Some(self.root)
    }

    fn head(&self) -> Option<NodeId> {
        Some(self.head)
    }

    fn body(&self) -> Option<NodeId> {
        Some(self.body)
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        self.with_node_mut(node, |data| {
            if !data.classes.iter().any(|existing| existing == class) {
                data.classes.push(class.to_string());
            }
        });
    }

    fn remove_class(&self, node: &NodeId, class: &str) {
        self.with_node_mut(node, |data| data.classes.retain(|existing| existing != class));
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.with_node(node, |data| data.classes.iter().any(|existing| existing == class))
            .unwrap_or(false)
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) {
        self.with_node_mut(node, |data| {
            data.styles.insert(property.to_string(), value.to_string());
        });
    }

    fn style(&self, node: &NodeId, property: &str) -> Option<String> {
        self.with_node(node, |data| data.styles.get(property).cloned())
            .flatten()
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.with_node(node, |data| data.attributes.get(name).cloned())
            .flatten()
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        self.with_node_mut(node, |data| {
            data.attributes.insert(name.to_string(), value.to_string());
        });
    }

    fn text(&self, node: &NodeId) -> String {
        self.with_node(node, |data| data.text.clone())
            .unwrap_or_default()
    }

    fn set_text(&self, node: &NodeId, text: &str) {
        self.with_node_mut(node, |data| data.text = text.to_string());
    }

    fn field_value(&self, node: &NodeId) -> String {
        self.with_node(node, |data| data.value.clone())
            .unwrap_or_default()
    }

    fn set_field_value(&self, node: &NodeId, value: &str) {
        self.with_node_mut(node, |data| data.value = value.to_string());
    }

    fn set_disabled(&self, node: &NodeId, disabled: bool) {
        self.with_node_mut(node, |data| data.disabled = disabled);
    }

    fn create_element(&self, tag: &str) -> Option<NodeId> {
        Some(self.new_node(tag))
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) {
        if parent == child || self.contains(child, parent) {
            return;
        }
        self.detach(child);
        self.with_node_mut(child, |data| data.parent = Some(*parent));
        self.with_node_mut(parent, |data| data.children.push(*child));
    }

    fn remove(&self, node: &NodeId) {
        self.detach(node);
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        let mut current = Some(*node);
        while let Some(candidate) = current {
            if candidate == *ancestor {
                return true;
            }
            current = self.parent_of(&candidate);
        }
        false
    }

    fn is_attached(&self, node: &NodeId) -> bool {
        self.contains(&self.root, node)
    }

    fn bounding_rect(&self, node: &NodeId) -> Rect {
        self.with_node(node, |data| data.rect).unwrap_or_default()
    }

    fn offset_top(&self, node: &NodeId) -> f64 {
        self.with_node(node, |data| data.offset_top)
            .unwrap_or_default()
    }

    fn offset_height(&self, node: &NodeId) -> f64 {
        self.with_node(node, |data| data.offset_height)
            .unwrap_or_default()
    }

    fn viewport(&self) -> ViewportSnapshot {
        self.viewport.get()
    }

    fn scroll_to(&self, top: f64) {
        self.scroll_requests.borrow_mut().push(top);
        self.set_scroll_offset(top.max(0.0));
    }

    fn navigator(&self) -> NavigatorInfo {
        self.navigator.borrow().clone()
    }

    fn is_loaded(&self) -> bool {
        self.loaded.get()
    }

    fn listen(&self, target: ListenTarget<NodeId>, kind: EventKind, handler: Handler<NodeId>) {
        self.listeners.borrow_mut().push(Listener {
            target,
            kind,
            handler,
        });
    }

    fn observe_intersections(
        &self,
        nodes: &[NodeId],
        options: &IntersectionOptions,
        on_change: IntersectionCallback<NodeId>,
    ) -> Result<(), SurfaceError> {
        if !self.intersection_supported.get() {
            return Err(SurfaceError::Unsupported("IntersectionObserver"));
        }

        self.observations.borrow_mut().push(Observation {
            nodes: nodes.to_vec(),
            options: options.clone(),
            on_change,
        });
        Ok(())
    }
}

/// One compound selector: `tag#id.class[attr][attr=value]`.
#[derive(Debug, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<(String, Option<String>)>,
}

impl Compound {
    fn parse(selector: &str) -> Option<Self> {
        if selector.is_empty() {
            return None;
        }

        let mut compound = Self::default();
        let mut chars = selector.chars().peekable();

        let tag = take_ident(&mut chars);
        if !tag.is_empty() {
            compound.tag = Some(tag.to_ascii_lowercase());
        }

        while let Some(c) = chars.next() {
            match c {
                '.' => compound.classes.push(take_ident(&mut chars)),
                '#' => compound.id = Some(take_ident(&mut chars)),
                '[' => {
                    let body: String = chars.by_ref().take_while(|&c| c != ']').collect();
                    let attribute = match body.split_once('=') {
                        Some((name, value)) => (
                            name.trim().to_string(),
                            Some(value.trim().trim_matches(|c| c == '"' || c == '\'').to_string()),
                        ),
                        None => (body.trim().to_string(), None),
                    };
                    compound.attributes.push(attribute);
                }
                _ => return None,
            }
        }

        Some(compound)
    }

    fn matches(&self, data: &NodeData) -> bool {
        if let Some(tag) = &self.tag {
            if &data.tag != tag {
                return false;
            }
        }

        if let Some(id) = &self.id {
            if data.attributes.get("id") != Some(id) {
                return false;
            }
        }

        let classes_match = self
            .classes
            .iter()
            .all(|class| data.classes.iter().any(|existing| existing == class));
        let attributes_match = self.attributes.iter().all(|(name, expected)| {
            match (data.attributes.get(name), expected) {
                (Some(actual), Some(expected)) => actual == expected,
                (Some(_), None) => true,
                (None, _) => false,
            }
        });

        classes_match && attributes_match
    }
}

fn take_ident(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut out = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_alphanumeric() || c == '-' || c == '_' {
            out.push(c);
            chars.next();
        } else {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::handler;
    use std::rc::Rc;

    #[test]
    fn compound_selectors_match_tag_class_id_and_attributes() {
        let surface = MemorySurface::new();
        let body = surface.body().expect("body");
        let button = surface.append(&body, "button", &["btn", "primary"]);
        surface.set_attribute(&button, "type", "submit");
        surface.set_attribute(&button, "id", "send");
        let section = surface.append(&body, "section", &["hero"]);

        assert_eq!(surface.query("button.btn"), Some(button));
        assert_eq!(surface.query("#send"), Some(button));
        assert_eq!(surface.query("button[type=\"submit\"]"), Some(button));
        assert_eq!(surface.query("button[type=reset]"), None);
        assert_eq!(surface.query_all("section, .primary"), vec![button, section]);
    }

    #[test]
    fn removed_nodes_leave_queries_and_the_tree() {
        let surface = MemorySurface::new();
        let body = surface.body().expect("body");
        let toast = surface.append(&body, "div", &["notification"]);

        assert!(surface.is_attached(&toast));
        surface.remove(&toast);
        assert!(!surface.is_attached(&toast));
        assert!(surface.query(".notification").is_none());
        assert!(surface.children(&body).is_empty());
    }

    #[test]
    fn click_bubbles_to_ancestors_then_document() {
        let surface = MemorySurface::new();
        let body = surface.body().expect("body");
        let menu = surface.append(&body, "ul", &["nav-menu"]);
        let link = surface.append(&menu, "a", &["nav-link"]);
        let order = Rc::new(RefCell::new(Vec::new()));

        for (target, label) in [
            (ListenTarget::Document, "document"),
            (ListenTarget::Element(menu), "menu"),
            (ListenTarget::Element(link), "link"),
        ] {
            let order = order.clone();
            surface.listen(
                target,
                EventKind::Click,
                handler(move |_| {
                    order.borrow_mut().push(label);
                    EventResponse::Proceed
                }),
            );
        }

        surface.click(&link);
        assert_eq!(*order.borrow(), vec!["link", "menu", "document"]);
    }

    #[test]
    fn mouseenter_does_not_bubble() {
        let surface = MemorySurface::new();
        let body = surface.body().expect("body");
        let card = surface.append(&body, "div", &["skill-card"]);
        let hits = Rc::new(Cell::new(0));

        {
            let hits = hits.clone();
            surface.listen(
                ListenTarget::Element(body),
                EventKind::MouseEnter,
                handler(move |_| {
                    hits.set(hits.get() + 1);
                    EventResponse::Proceed
                }),
            );
        }

        surface.fire(&card, EventKind::MouseEnter);
        assert_eq!(hits.get(), 0);
    }
}
