//! Browser implementations of [`Surface`] and [`Scheduler`].

use std::time::Duration;

use gloo_timers::callback::Timeout;
use js_sys::{Array, Function, Reflect, JSON};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlButtonElement,
    HtmlElement, HtmlInputElement, HtmlTextAreaElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, MouseEvent, ScrollBehavior,
    ScrollToOptions, Window,
};

use crate::{
    particles::{ParticlesConfig, PARTICLES_CANVAS_ID},
    scheduler::{Scheduler, Task},
    surface::{
        EventKind, EventResponse, Handler, IntersectionCallback, IntersectionOptions,
        ListenTarget, NavigatorInfo, Rect, Surface, SurfaceError, UiEvent,
    },
    viewport::{ViewportSnapshot, DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH},
};

fn js_error(value: JsValue) -> SurfaceError {
    SurfaceError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

fn ui_event(event: &Event) -> UiEvent<Element> {
    let target = event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok());
    let (client_x, client_y) = event
        .dyn_ref::<MouseEvent>()
        .map(|mouse| (mouse.client_x() as f64, mouse.client_y() as f64))
        .unwrap_or((0.0, 0.0));

    UiEvent {
        target,
        client_x,
        client_y,
    }
}

pub struct DomSurface {
    window: Window,
    document: Document,
}

impl DomSurface {
    pub fn new() -> Option<Self> {
        let window = window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }
}

impl Surface for DomSurface {
    type Node = Element;

    fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        let Ok(list) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };

        (0..list.length())
            .filter_map(|index| list.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn query_within(&self, parent: &Element, selector: &str) -> Option<Element> {
        parent.query_selector(selector).ok().flatten()
    }

    fn closest(&self, node: &Element, selector: &str) -> Option<Element> {
        node.closest(selector).ok().flatten()
    }

    fn root(&self) -> Option<Element> {
        self.document.document_element()
    }

    fn head(&self) -> Option<Element> {
        self.query("head")
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn add_class(&self, node: &Element, class: &str) {
        let _ = node.class_list().add_1(class);
    }

    fn remove_class(&self, node: &Element, class: &str) {
        let _ = node.class_list().remove_1(class);
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) {
        if let Some(element) = node.dyn_ref::<HtmlElement>() {
            let _ = element.style().set_property(property, value);
        }
    }

    fn style(&self, node: &Element, property: &str) -> Option<String> {
        node.dyn_ref::<HtmlElement>()
            .and_then(|element| element.style().get_property_value(property).ok())
            .filter(|value| !value.is_empty())
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        let _ = node.set_attribute(name, value);
    }

    fn text(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn field_value(&self, node: &Element) -> String {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            return input.value();
        }
        if let Some(area) = node.dyn_ref::<HtmlTextAreaElement>() {
            return area.value();
        }
        String::new()
    }

    fn set_field_value(&self, node: &Element, value: &str) {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(area) = node.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        }
    }

    fn set_disabled(&self, node: &Element, disabled: bool) {
        if let Some(button) = node.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(disabled);
        } else if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.set_disabled(disabled);
        }
    }

    fn create_element(&self, tag: &str) -> Option<Element> {
        self.document.create_element(tag).ok()
    }

    fn append_child(&self, parent: &Element, child: &Element) {
        let _ = parent.append_child(child);
    }

    fn remove(&self, node: &Element) {
        node.remove();
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        let node: &web_sys::Node = node;
        ancestor.contains(Some(node))
    }

    fn is_attached(&self, node: &Element) -> bool {
        node.is_connected()
    }

    fn bounding_rect(&self, node: &Element) -> Rect {
        let rect = node.get_bounding_client_rect();
        Rect {
            left: rect.left(),
            top: rect.top(),
            width: rect.width(),
            height: rect.height(),
        }
    }

    fn offset_top(&self, node: &Element) -> f64 {
        node.dyn_ref::<HtmlElement>()
            .map(|element| element.offset_top() as f64)
            .unwrap_or_default()
    }

    fn offset_height(&self, node: &Element) -> f64 {
        node.dyn_ref::<HtmlElement>()
            .map(|element| element.offset_height() as f64)
            .unwrap_or_default()
    }

    fn viewport(&self) -> ViewportSnapshot {
        let width = self
            .window
            .inner_width()
            .ok()
            .and_then(|value| value.as_f64())
            .unwrap_or(DEFAULT_VIEWPORT_WIDTH);
        let height = self
            .window
            .inner_height()
            .ok()
            .and_then(|value| value.as_f64())
            .unwrap_or(DEFAULT_VIEWPORT_HEIGHT);
        let scroll_offset = self.window.scroll_y().unwrap_or(0.0);

        ViewportSnapshot {
            width,
            height,
            scroll_offset,
        }
    }

    fn scroll_to(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn navigator(&self) -> NavigatorInfo {
        let navigator = self.window.navigator();
        NavigatorInfo {
            platform: navigator.platform().unwrap_or_default(),
            max_touch_points: u32::try_from(navigator.max_touch_points()).unwrap_or(0),
        }
    }

    fn is_loaded(&self) -> bool {
        self.document.ready_state() == "complete"
    }

    /// Listeners live as long as the page. `touchmove` is registered as
    /// non-passive so the scroll lock can cancel it.
    fn listen(&self, target: ListenTarget<Element>, kind: EventKind, handler: Handler<Element>) {
        let target: EventTarget = match target {
            ListenTarget::Window => self.window.clone().into(),
            ListenTarget::Document => self.document.clone().into(),
            ListenTarget::Element(element) => element.into(),
        };

        let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if handler(&ui_event(&event)) == EventResponse::PreventDefault {
                event.prevent_default();
            }
        });

        let options = AddEventListenerOptions::new();
        if kind == EventKind::TouchMove {
            options.set_passive(false);
        }
        let _ = target.add_event_listener_with_callback_and_add_event_listener_options(
            kind.as_str(),
            callback.as_ref().unchecked_ref(),
            &options,
        );
        callback.forget();
    }

    fn observe_intersections(
        &self,
        nodes: &[Element],
        options: &IntersectionOptions,
        on_change: IntersectionCallback<Element>,
    ) -> Result<(), SurfaceError> {
        let supported = Reflect::has(&self.window, &JsValue::from_str("IntersectionObserver"))
            .unwrap_or(false);
        if !supported {
            return Err(SurfaceError::Unsupported("IntersectionObserver"));
        }

        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    on_change(&entry.target(), entry.is_intersecting());
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
                .map_err(js_error)?;

        for node in nodes {
            observer.observe(node);
        }
        callback.forget();
        Ok(())
    }
}

pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn set_timeout(&self, delay: Duration, task: Task) {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, task).forget();
    }

    fn request_frame(&self, task: Task) {
        let Some(window) = window() else {
            return;
        };
        let callback = Closure::once_into_js(move || task());
        let _ = window.request_animation_frame(callback.unchecked_ref());
    }
}

/// Hands the particle configuration to the page's `particlesJS` global.
pub fn init_particles(config: &ParticlesConfig) -> Result<(), SurfaceError> {
    let particles_js = Reflect::get(&js_sys::global(), &JsValue::from_str("particlesJS"))
        .map_err(js_error)?;
    let Some(particles_js) = particles_js.dyn_ref::<Function>() else {
        return Err(SurfaceError::Unsupported("particlesJS"));
    };

    let json = config
        .to_json()
        .map_err(|error| SurfaceError::Js(error.to_string()))?;
    let options = JSON::parse(&json).map_err(js_error)?;
    particles_js
        .call2(&JsValue::NULL, &JsValue::from_str(PARTICLES_CANVAS_ID), &options)
        .map_err(js_error)?;
    Ok(())
}
