use std::{rc::Rc, time::Duration};

use crate::{
    config::{PRESS_RELEASE_DELAY, PULSE_DURATION, RIPPLE_LIFETIME},
    scheduler::Scheduler,
    surface::{handler, EventKind, EventResponse, ListenTarget, Rect, Surface},
    viewport::ViewportMetrics,
};

type StyleSet = &'static [(&'static str, &'static str)];

pub struct ClickPulse {
    pub pressed: StyleSet,
    pub released: StyleSet,
    pub hold: Duration,
}

/// Visual feedback for one kind of interactive element. Empty sets mean the
/// element does not react to that input.
pub struct PointerProfile {
    pub hover_enter: StyleSet,
    pub hover_leave: StyleSet,
    pub touch_start: StyleSet,
    pub touch_end: StyleSet,
    pub click: Option<ClickPulse>,
}

pub static CARD: PointerProfile = PointerProfile {
    hover_enter: &[("transform", "translateY(-8px) scale(1.02)")],
    hover_leave: &[("transform", "translateY(0) scale(1)")],
    touch_start: &[("transform", "scale(0.98)")],
    touch_end: &[("transform", "scale(1)")],
    click: None,
};

pub static TEST_ELEMENT: PointerProfile = PointerProfile {
    hover_enter: &[
        ("transform", "scale(1.08)"),
        ("box-shadow", "0 0 25px rgba(0, 183, 255, 0.5)"),
    ],
    hover_leave: &[
        ("transform", "scale(1)"),
        ("box-shadow", "0 0 0 rgba(0, 183, 255, 0.3)"),
    ],
    touch_start: &[("transform", "scale(1.05)")],
    touch_end: &[("transform", "scale(1)")],
    click: Some(ClickPulse {
        pressed: &[
            ("transform", "scale(1.1)"),
            ("box-shadow", "0 0 30px rgba(0, 183, 255, 0.8)"),
        ],
        released: &[
            ("transform", "scale(1)"),
            ("box-shadow", "0 0 0 rgba(0, 183, 255, 0.3)"),
        ],
        hold: PULSE_DURATION,
    }),
};

pub static SCROLL_TOP_BUTTON: PointerProfile = PointerProfile {
    hover_enter: &[
        ("transform", "scale(1.1)"),
        ("box-shadow", "0 6px 20px rgba(0, 183, 255, 0.4)"),
    ],
    hover_leave: &[
        ("transform", "scale(1)"),
        ("box-shadow", "0 4px 15px rgba(0, 183, 255, 0.3)"),
    ],
    touch_start: &[("transform", "scale(0.95)")],
    touch_end: &[("transform", "scale(1)")],
    click: None,
};

/// Wires `profile` onto `element`. Hover reacts only on desktop widths and
/// touch only on mobile widths, both decided when the event arrives.
pub fn bind_profile<S: Surface + 'static>(
    surface: &Rc<S>,
    scheduler: &Rc<dyn Scheduler>,
    metrics: &ViewportMetrics<S>,
    element: &S::Node,
    profile: &'static PointerProfile,
) {
    let bind = |kind: EventKind, styles: StyleSet, on_mobile: bool, delay: Option<Duration>| {
        if styles.is_empty() {
            return;
        }
        let surface_for_handler = surface.clone();
        let scheduler = scheduler.clone();
        let metrics = metrics.clone();
        let target = element.clone();
        surface.listen(
            ListenTarget::Element(element.clone()),
            kind,
            handler(move |_| {
                if metrics.is_mobile() != on_mobile {
                    return EventResponse::Proceed;
                }
                match delay {
                    Some(delay) => {
                        let surface = surface_for_handler.clone();
                        let target = target.clone();
                        scheduler.set_timeout(
                            delay,
                            Box::new(move || surface.set_styles(&target, styles)),
                        );
                    }
                    None => surface_for_handler.set_styles(&target, styles),
                }
                EventResponse::Proceed
            }),
        );
    };

    bind(EventKind::MouseEnter, profile.hover_enter, false, None);
    bind(EventKind::MouseLeave, profile.hover_leave, false, None);
    bind(EventKind::TouchStart, profile.touch_start, true, None);
    bind(EventKind::TouchEnd, profile.touch_end, true, Some(PRESS_RELEASE_DELAY));

    if let Some(pulse) = &profile.click {
        let surface_for_handler = surface.clone();
        let scheduler = scheduler.clone();
        let target = element.clone();
        surface.listen(
            ListenTarget::Element(element.clone()),
            EventKind::Click,
            handler(move |_| {
                surface_for_handler.set_styles(&target, pulse.pressed);
                let surface = surface_for_handler.clone();
                let target = target.clone();
                scheduler.set_timeout(
                    pulse.hold,
                    Box::new(move || surface.set_styles(&target, pulse.released)),
                );
                EventResponse::Proceed
            }),
        );
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RippleGeometry {
    pub size: f64,
    pub x: f64,
    pub y: f64,
}

/// Square ripple as large as the button's longer side, centred on the
/// pointer and positioned relative to the button.
pub fn ripple_geometry(rect: &Rect, client_x: f64, client_y: f64) -> RippleGeometry {
    let size = rect.width.max(rect.height);
    RippleGeometry {
        size,
        x: client_x - rect.left - size / 2.0,
        y: client_y - rect.top - size / 2.0,
    }
}

pub fn spawn_ripple<S: Surface + 'static>(
    surface: &Rc<S>,
    scheduler: &Rc<dyn Scheduler>,
    button: &S::Node,
    client_x: f64,
    client_y: f64,
) -> Option<S::Node> {
    let geometry = ripple_geometry(&surface.bounding_rect(button), client_x, client_y);
    let ripple = surface.create_element("span")?;
    let size = format!("{}px", geometry.size);
    let left = format!("{}px", geometry.x);
    let top = format!("{}px", geometry.y);

    surface.add_class(&ripple, "ripple");
    surface.set_styles(
        &ripple,
        &[
            ("position", "absolute"),
            ("width", size.as_str()),
            ("height", size.as_str()),
            ("left", left.as_str()),
            ("top", top.as_str()),
            ("background", "rgba(255, 255, 255, 0.3)"),
            ("border-radius", "50%"),
            ("transform", "scale(0)"),
            ("animation", "ripple 0.6s linear"),
            ("pointer-events", "none"),
        ],
    );
    surface.append_child(button, &ripple);

    let surface = surface.clone();
    let spawned = ripple.clone();
    scheduler.set_timeout(RIPPLE_LIFETIME, Box::new(move || surface.remove(&spawned)));
    Some(ripple)
}

pub fn bind_ripple<S: Surface + 'static>(surface: &Rc<S>, scheduler: &Rc<dyn Scheduler>, button: &S::Node) {
    let surface_for_handler = surface.clone();
    let scheduler = scheduler.clone();
    let target = button.clone();
    surface.listen(
        ListenTarget::Element(button.clone()),
        EventKind::Click,
        handler(move |event| {
            spawn_ripple(&surface_for_handler, &scheduler, &target, event.client_x, event.client_y);
            EventResponse::Proceed
        }),
    );
}
