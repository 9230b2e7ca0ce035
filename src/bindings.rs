//! Wires every page behavior to its event sources.
//!
//! [`install`] is called once, after the markup is mounted. Each component
//! owns its own state; the only thing they share is the surface and the
//! scheduler.

use std::rc::Rc;

use tracing::{debug, info};

use crate::{
    config::InteractionConfig,
    contact::ContactForm,
    entrance::EntranceAnimator,
    navigation::NavController,
    notification::Notifier,
    page,
    pointer::{self, CARD, SCROLL_TOP_BUTTON, TEST_ELEMENT},
    scheduler::Scheduler,
    scroll_effects::ScrollEffects,
    surface::{handler, EventKind, EventResponse, ListenTarget, Surface},
    throttle::{throttle, FrameGate, RESIZE_THROTTLE, SCROLL_THROTTLE},
    viewport::ViewportMetrics,
};

/// Handles to the installed components, kept alive by their listeners and
/// returned for inspection.
pub struct Installed<S: Surface> {
    pub nav: Option<Rc<NavController<S>>>,
    pub scroll: Rc<ScrollEffects<S>>,
    pub entrance: Rc<EntranceAnimator<S>>,
    pub contact: Option<Rc<ContactForm<S>>>,
    pub notifier: Notifier<S>,
    pub scroll_top: Option<S::Node>,
}

pub fn install<S: Surface + 'static>(
    surface: Rc<S>,
    scheduler: Rc<dyn Scheduler>,
    config: &InteractionConfig,
) -> Installed<S> {
    let metrics = ViewportMetrics::new(surface.clone(), config.mobile_breakpoint);

    page::inject_styles(surface.as_ref(), config.mobile_breakpoint);
    let nav = bind_navigation(&surface, config);

    page::begin_loading(surface.as_ref());
    page::reveal_hero_title(surface.as_ref());
    page::stagger_floating_icons(surface.as_ref());

    let scroll = Rc::new(ScrollEffects::new(
        surface.clone(),
        config.mobile_breakpoint,
        config.navbar_scroll_threshold,
        config.scroll_top_threshold,
    ));
    scroll.prepare_sections();

    let scroll_top = page::create_scroll_top_button(surface.as_ref(), metrics.is_mobile());
    if let Some(button) = &scroll_top {
        scroll.set_scroll_top_button(button.clone());
        bind_scroll_top(&surface, &scheduler, &metrics, button);
    }

    page::prepare_images(&surface);
    scroll.reveal_sections();
    bind_scroll(&surface, &scheduler, &scroll);
    bind_resize(&surface, &scheduler, &metrics, scroll_top.clone());

    let entrance = EntranceAnimator::new(surface.clone());
    entrance.observe();

    bind_pointer_effects(&surface, &scheduler, &metrics);

    let notifier = Notifier::new(surface.clone(), scheduler.clone(), config.notification_visible);
    let contact = bind_contact_form(&surface, &scheduler, &notifier, config);

    bind_touch_lock(&surface, nav.clone(), config.scroll_lock_exempt.clone());
    page::bind_anchor_links(&surface, config.anchor_offset);

    if page::is_ios(&surface.navigator()) {
        page::apply_vh_unit(surface.as_ref());
    }

    bind_load(&surface, &scheduler);

    info!(
        event = "interactions_installed",
        nav = nav.is_some(),
        contact = contact.is_some(),
        mobile = metrics.is_mobile()
    );

    Installed {
        nav,
        scroll,
        entrance,
        contact,
        notifier,
        scroll_top,
    }
}

fn bind_navigation<S: Surface + 'static>(
    surface: &Rc<S>,
    config: &InteractionConfig,
) -> Option<Rc<NavController<S>>> {
    let Some(nav) = NavController::attach(surface.clone(), config.mobile_breakpoint) else {
        debug!(event = "navigation_skipped");
        return None;
    };
    let nav = Rc::new(nav);

    {
        let nav_for_handler = nav.clone();
        surface.listen(
            ListenTarget::Element(nav.hamburger().clone()),
            EventKind::Click,
            handler(move |_| {
                nav_for_handler.toggle();
                EventResponse::Proceed
            }),
        );
    }

    for link in surface.query_all(".nav-link") {
        let nav = nav.clone();
        surface.listen(
            ListenTarget::Element(link),
            EventKind::Click,
            handler(move |_| {
                nav.close();
                EventResponse::Proceed
            }),
        );
    }

    {
        let nav = nav.clone();
        surface.listen(
            ListenTarget::Document,
            EventKind::Click,
            handler(move |event| {
                nav.on_document_click(event.target.as_ref());
                EventResponse::Proceed
            }),
        );
    }

    {
        let nav = nav.clone();
        let surface_for_handler = surface.clone();
        surface.listen(
            ListenTarget::Window,
            EventKind::Resize,
            handler(move |_| {
                nav.on_resize(surface_for_handler.viewport().width);
                EventResponse::Proceed
            }),
        );
    }

    Some(nav)
}

/// Navbar, parallax and the scroll-to-top button share one frame per burst of
/// scroll events; section reveal runs behind its own throttle.
fn bind_scroll<S: Surface + 'static>(
    surface: &Rc<S>,
    scheduler: &Rc<dyn Scheduler>,
    scroll: &Rc<ScrollEffects<S>>,
) {
    let gate = FrameGate::new(scheduler.clone());
    let frame_work: Rc<dyn Fn()> = {
        let scroll = scroll.clone();
        Rc::new(move || scroll.on_frame())
    };
    let reveal = {
        let scroll = scroll.clone();
        throttle(scheduler.clone(), SCROLL_THROTTLE, move |()| scroll.reveal_sections())
    };

    surface.listen(
        ListenTarget::Window,
        EventKind::Scroll,
        handler(move |_| {
            gate.request(frame_work.clone());
            reveal.call(());
            EventResponse::Proceed
        }),
    );
}

/// Only the hero font size is throttled. Layout that depends on the device
/// class follows every resize so the last event of a burst always lands.
fn bind_resize<S: Surface + 'static>(
    surface: &Rc<S>,
    scheduler: &Rc<dyn Scheduler>,
    metrics: &ViewportMetrics<S>,
    scroll_top: Option<S::Node>,
) {
    let font = {
        let surface = surface.clone();
        throttle(scheduler.clone(), RESIZE_THROTTLE, move |()| {
            page::apply_hero_font_size(surface.as_ref());
        })
    };

    let surface_for_handler = surface.clone();
    let metrics = metrics.clone();
    surface.listen(
        ListenTarget::Window,
        EventKind::Resize,
        handler(move |_| {
            font.call(());
            if let Some(button) = &scroll_top {
                page::place_scroll_top_button(surface_for_handler.as_ref(), button, metrics.is_mobile());
            }
            if page::is_ios(&surface_for_handler.navigator()) {
                page::apply_vh_unit(surface_for_handler.as_ref());
            }
            EventResponse::Proceed
        }),
    );
}

fn bind_scroll_top<S: Surface + 'static>(
    surface: &Rc<S>,
    scheduler: &Rc<dyn Scheduler>,
    metrics: &ViewportMetrics<S>,
    button: &S::Node,
) {
    let surface_for_handler = surface.clone();
    surface.listen(
        ListenTarget::Element(button.clone()),
        EventKind::Click,
        handler(move |_| {
            surface_for_handler.scroll_to(0.0);
            EventResponse::Proceed
        }),
    );
    pointer::bind_profile(surface, scheduler, metrics, button, &SCROLL_TOP_BUTTON);
}

fn bind_pointer_effects<S: Surface + 'static>(
    surface: &Rc<S>,
    scheduler: &Rc<dyn Scheduler>,
    metrics: &ViewportMetrics<S>,
) {
    for card in surface.query_all(".skill-card, .project-card") {
        pointer::bind_profile(surface, scheduler, metrics, &card, &CARD);
    }
    for element in surface.query_all(".test-element") {
        pointer::bind_profile(surface, scheduler, metrics, &element, &TEST_ELEMENT);
    }
    for button in surface.query_all(".btn") {
        pointer::bind_ripple(surface, scheduler, &button);
    }
}

fn bind_contact_form<S: Surface + 'static>(
    surface: &Rc<S>,
    scheduler: &Rc<dyn Scheduler>,
    notifier: &Notifier<S>,
    config: &InteractionConfig,
) -> Option<Rc<ContactForm<S>>> {
    let form = surface.query(".contact-form")?;
    let contact = Rc::new(ContactForm::attach(
        surface.clone(),
        scheduler.clone(),
        notifier.clone(),
        &form,
        config.submit_latency,
    )?);

    let contact_for_handler = contact.clone();
    surface.listen(
        ListenTarget::Element(form),
        EventKind::Submit,
        handler(move |_| {
            contact_for_handler.submit();
            EventResponse::PreventDefault
        }),
    );
    Some(contact)
}

fn bind_touch_lock<S: Surface + 'static>(
    surface: &Rc<S>,
    nav: Option<Rc<NavController<S>>>,
    exempt: Vec<String>,
) {
    let (Some(nav), Some(body)) = (nav, surface.body()) else {
        return;
    };

    let surface_for_handler = surface.clone();
    surface.listen(
        ListenTarget::Element(body),
        EventKind::TouchMove,
        handler(move |event| {
            let blocked = page::blocks_touch_scroll(
                surface_for_handler.as_ref(),
                event.target.as_ref(),
                &exempt,
                nav.is_open(),
            );
            if blocked {
                EventResponse::PreventDefault
            } else {
                EventResponse::Proceed
            }
        }),
    );
}

fn bind_load<S: Surface + 'static>(surface: &Rc<S>, scheduler: &Rc<dyn Scheduler>) {
    if surface.is_loaded() {
        page::finish_loading(surface, scheduler);
        return;
    }

    let surface_for_handler = surface.clone();
    let scheduler = scheduler.clone();
    surface.listen(
        ListenTarget::Window,
        EventKind::Load,
        handler(move |_| {
            page::finish_loading(&surface_for_handler, &scheduler);
            EventResponse::Proceed
        }),
    );
}
