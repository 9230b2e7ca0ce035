use std::rc::Rc;

use thiserror::Error;

use crate::viewport::ViewportSnapshot;

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("{0} is not available in this environment")]
    Unsupported(&'static str),
    #[error("browser call failed: {0}")]
    Js(String),
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    Click,
    Submit,
    MouseEnter,
    MouseLeave,
    TouchStart,
    TouchEnd,
    TouchMove,
    Scroll,
    Resize,
    Load,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Submit => "submit",
            Self::MouseEnter => "mouseenter",
            Self::MouseLeave => "mouseleave",
            Self::TouchStart => "touchstart",
            Self::TouchEnd => "touchend",
            Self::TouchMove => "touchmove",
            Self::Scroll => "scroll",
            Self::Resize => "resize",
            Self::Load => "load",
        }
    }

    pub fn bubbles(self) -> bool {
        !matches!(
            self,
            Self::MouseEnter | Self::MouseLeave | Self::Scroll | Self::Resize | Self::Load
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ListenTarget<N> {
    Window,
    Document,
    Element(N),
}

#[derive(Clone, Debug, PartialEq)]
pub struct UiEvent<N> {
    pub target: Option<N>,
    pub client_x: f64,
    pub client_y: f64,
}

impl<N> UiEvent<N> {
    pub fn plain() -> Self {
        Self {
            target: None,
            client_x: 0.0,
            client_y: 0.0,
        }
    }

    pub fn on(target: N) -> Self {
        Self {
            target: Some(target),
            client_x: 0.0,
            client_y: 0.0,
        }
    }

    pub fn at(target: N, client_x: f64, client_y: f64) -> Self {
        Self {
            target: Some(target),
            client_x,
            client_y,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventResponse {
    Proceed,
    PreventDefault,
}

pub type Handler<N> = Rc<dyn Fn(&UiEvent<N>) -> EventResponse>;
pub type IntersectionCallback<N> = Rc<dyn Fn(&N, bool)>;

pub fn handler<N, F>(f: F) -> Handler<N>
where
    F: Fn(&UiEvent<N>) -> EventResponse + 'static,
{
    Rc::new(f)
}

#[derive(Clone, Debug, PartialEq)]
pub struct IntersectionOptions {
    pub threshold: f64,
    pub root_margin: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavigatorInfo {
    pub platform: String,
    pub max_touch_points: u32,
}

/// Everything the page bindings are allowed to do to the document.
///
/// Selectors are plain CSS selectors; callers only use compound selectors
/// (`tag`, `.class`, `#id`, `[attr]` and combinations of them) so that any
/// implementation can answer them. Mutations on detached or foreign nodes are
/// ignored rather than reported.
pub trait Surface {
    type Node: Clone + PartialEq + 'static;

    fn query(&self, selector: &str) -> Option<Self::Node>;
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;
    fn query_within(&self, parent: &Self::Node, selector: &str) -> Option<Self::Node>;
    fn closest(&self, node: &Self::Node, selector: &str) -> Option<Self::Node>;

    fn root(&self) -> Option<Self::Node>;
    fn head(&self) -> Option<Self::Node>;
    fn body(&self) -> Option<Self::Node>;

    fn add_class(&self, node: &Self::Node, class: &str);
    fn remove_class(&self, node: &Self::Node, class: &str);
    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    fn set_style(&self, node: &Self::Node, property: &str, value: &str);
    fn style(&self, node: &Self::Node, property: &str) -> Option<String>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);
    fn text(&self, node: &Self::Node) -> String;
    fn set_text(&self, node: &Self::Node, text: &str);
    fn field_value(&self, node: &Self::Node) -> String;
    fn set_field_value(&self, node: &Self::Node, value: &str);
    fn set_disabled(&self, node: &Self::Node, disabled: bool);

    fn create_element(&self, tag: &str) -> Option<Self::Node>;
    fn append_child(&self, parent: &Self::Node, child: &Self::Node);
    fn remove(&self, node: &Self::Node);
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool;
    fn is_attached(&self, node: &Self::Node) -> bool;

    fn bounding_rect(&self, node: &Self::Node) -> Rect;
    fn offset_top(&self, node: &Self::Node) -> f64;
    fn offset_height(&self, node: &Self::Node) -> f64;

    fn viewport(&self) -> ViewportSnapshot;
    fn scroll_to(&self, top: f64);
    fn navigator(&self) -> NavigatorInfo;
    fn is_loaded(&self) -> bool;

    fn listen(&self, target: ListenTarget<Self::Node>, kind: EventKind, handler: Handler<Self::Node>);
    fn observe_intersections(
        &self,
        nodes: &[Self::Node],
        options: &IntersectionOptions,
        on_change: IntersectionCallback<Self::Node>,
    ) -> Result<(), SurfaceError>;

    fn set_styles(&self, node: &Self::Node, styles: &[(&str, &str)]) {
        for (property, value) in styles {
            self.set_style(node, property, value);
        }
    }
}
