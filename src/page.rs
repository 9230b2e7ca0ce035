use std::rc::Rc;

use tracing::debug;

use crate::{
    config::{LOADING_CLEAR_DELAY, PRELOADER_FADE},
    scheduler::Scheduler,
    surface::{handler, EventKind, EventResponse, ListenTarget, NavigatorInfo, Surface},
    viewport::{hero_font_size_rem, vh_unit_px},
};

pub const LOADING_CLASS: &str = "loading";

const FLOAT_DELAY_STEP_SECONDS: f64 = 0.5;
const IOS_DEVICES: [&str; 3] = ["iPad", "iPhone", "iPod"];

fn nav_open_css(mobile_breakpoint: f64) -> String {
    format!(
        "
    body.nav-open {{
        overflow: hidden;
    }}

    @media (max-width: {mobile_breakpoint}px) {{
        body.nav-open {{
            position: fixed;
            width: 100%;
        }}
    }}
"
    )
}

const LOADING_CSS: &str = "
    body.loading {
        overflow: hidden;
    }

    body.loading::before {
        content: '';
        position: fixed;
        top: 0;
        left: 0;
        width: 100%;
        height: 100%;
        background: linear-gradient(135deg, #f8fafc 0%, #e2f2ff 100%);
        z-index: 9999;
        display: flex;
        align-items: center;
        justify-content: center;
    }

    body.loading::after {
        content: '';
        position: fixed;
        top: 50%;
        left: 50%;
        transform: translate(-50%, -50%);
        width: 50px;
        height: 50px;
        border: 3px solid rgba(0, 183, 255, 0.3);
        border-top: 3px solid #00b7ff;
        border-radius: 50%;
        animation: spin 1s linear infinite;
        z-index: 10000;
    }

    @keyframes spin {
        0% { transform: translate(-50%, -50%) rotate(0deg); }
        100% { transform: translate(-50%, -50%) rotate(360deg); }
    }
";

const SCROLL_TOP_BASE_STYLES: [(&str, &str); 10] = [
    ("position", "fixed"),
    ("background", "linear-gradient(135deg, #00b7ff, #0099cc)"),
    ("color", "white"),
    ("border", "none"),
    ("border-radius", "50%"),
    ("cursor", "pointer"),
    ("opacity", "0"),
    ("visibility", "hidden"),
    ("transition", "all 0.3s ease"),
    ("z-index", "1000"),
];

/// The scroll lock's media query follows the configured mobile breakpoint.
pub fn inject_styles<S: Surface>(surface: &S, mobile_breakpoint: f64) {
    let Some(head) = surface.head() else {
        return;
    };

    let nav_open = nav_open_css(mobile_breakpoint);
    for css in [nav_open.as_str(), LOADING_CSS] {
        if let Some(style) = surface.create_element("style") {
            surface.set_text(&style, css);
            surface.append_child(&head, &style);
        }
    }
}

pub fn reveal_hero_title<S: Surface>(surface: &S) {
    if let Some(title) = surface.query(".hero-title") {
        surface.set_styles(&title, &[("opacity", "1"), ("transform", "translateY(0)")]);
    }
}

pub fn stagger_floating_icons<S: Surface>(surface: &S) {
    for (index, icon) in surface.query_all(".floating-icon").iter().enumerate() {
        let delay = index as f64 * FLOAT_DELAY_STEP_SECONDS;
        surface.set_style(icon, "animation-delay", &format!("{delay}s"));
    }
}

pub fn apply_hero_font_size<S: Surface>(surface: &S) {
    if let Some(title) = surface.query(".hero-title") {
        let size = hero_font_size_rem(&surface.viewport());
        surface.set_style(&title, "font-size", &format!("{size}rem"));
    }
}

pub fn is_ios(navigator: &NavigatorInfo) -> bool {
    IOS_DEVICES
        .iter()
        .any(|device| navigator.platform.contains(device))
        || (navigator.platform == "MacIntel" && navigator.max_touch_points > 1)
}

pub fn apply_vh_unit<S: Surface>(surface: &S) {
    if let Some(root) = surface.root() {
        let vh = vh_unit_px(&surface.viewport());
        surface.set_style(&root, "--vh", &format!("{vh}px"));
    }
}

/// Images start shrunk and transparent and settle once their bytes arrive.
pub fn prepare_images<S: Surface + 'static>(surface: &Rc<S>) {
    for image in surface.query_all("img") {
        let surface_for_handler = surface.clone();
        let target = image.clone();
        surface.listen(
            ListenTarget::Element(image.clone()),
            EventKind::Load,
            handler(move |_| {
                surface_for_handler.set_styles(&target, &[("opacity", "1"), ("transform", "scale(1)")]);
                EventResponse::Proceed
            }),
        );
        surface.set_styles(
            &image,
            &[
                ("opacity", "0"),
                ("transform", "scale(0.8)"),
                ("transition", "all 0.3s ease"),
            ],
        );
    }
}

pub fn begin_loading<S: Surface>(surface: &S) {
    if let Some(body) = surface.body() {
        surface.add_class(&body, LOADING_CLASS);
    }
}

/// Runs once the window has loaded: fades the preloader out, drops the
/// loading overlay and sizes the hero title.
pub fn finish_loading<S: Surface + 'static>(surface: &Rc<S>, scheduler: &Rc<dyn Scheduler>) {
    if let Some(preloader) = surface.query(".preloader") {
        surface.set_style(&preloader, "opacity", "0");
        let surface = surface.clone();
        scheduler.set_timeout(
            PRELOADER_FADE,
            Box::new(move || surface.set_style(&preloader, "display", "none")),
        );
    }

    if let Some(body) = surface.body() {
        let surface = surface.clone();
        scheduler.set_timeout(
            LOADING_CLEAR_DELAY,
            Box::new(move || surface.remove_class(&body, LOADING_CLASS)),
        );
    }

    apply_hero_font_size(surface.as_ref());
    debug!(event = "page_loaded");
}

pub fn anchor_scroll_target(offset_top: f64, navbar_offset: f64) -> f64 {
    offset_top - navbar_offset
}

/// Smooth-scrolls in-page links so their target clears the fixed navbar.
pub fn bind_anchor_links<S: Surface + 'static>(surface: &Rc<S>, navbar_offset: f64) {
    for anchor in surface.query_all("a") {
        let Some(href) = surface.attribute(&anchor, "href") else {
            continue;
        };
        if !href.starts_with('#') {
            continue;
        }

        let surface_for_handler = surface.clone();
        surface.listen(
            ListenTarget::Element(anchor),
            EventKind::Click,
            handler(move |_| {
                let target = href
                    .strip_prefix('#')
                    .filter(|id| !id.is_empty())
                    .and_then(|id| surface_for_handler.query(&format!("#{id}")));
                if let Some(target) = target {
                    let top = anchor_scroll_target(surface_for_handler.offset_top(&target), navbar_offset);
                    surface_for_handler.scroll_to(top);
                }
                EventResponse::PreventDefault
            }),
        );
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollTopPlacement {
    pub inset: &'static str,
    pub size: &'static str,
    pub font_size: &'static str,
}

pub fn scroll_top_placement(mobile: bool) -> ScrollTopPlacement {
    if mobile {
        ScrollTopPlacement {
            inset: "20px",
            size: "45px",
            font_size: "1rem",
        }
    } else {
        ScrollTopPlacement {
            inset: "30px",
            size: "50px",
            font_size: "1.2rem",
        }
    }
}

pub fn place_scroll_top_button<S: Surface>(surface: &S, button: &S::Node, mobile: bool) {
    let placement = scroll_top_placement(mobile);
    surface.set_styles(
        button,
        &[
            ("bottom", placement.inset),
            ("right", placement.inset),
            ("width", placement.size),
            ("height", placement.size),
            ("font-size", placement.font_size),
        ],
    );
}

/// Creates the floating back-to-top control, hidden until the page scrolls.
pub fn create_scroll_top_button<S: Surface>(surface: &S, mobile: bool) -> Option<S::Node> {
    let body = surface.body()?;
    let button = surface.create_element("button")?;
    surface.add_class(&button, "scroll-to-top");
    surface.set_attribute(&button, "aria-label", "Scroll to top");

    if let Some(icon) = surface.create_element("i") {
        surface.add_class(&icon, "fas");
        surface.add_class(&icon, "fa-arrow-up");
        surface.append_child(&button, &icon);
    }

    surface.set_styles(&button, &SCROLL_TOP_BASE_STYLES);
    surface.set_style(&button, "box-shadow", "0 4px 15px rgba(0, 183, 255, 0.3)");
    place_scroll_top_button(surface, &button, mobile);
    surface.append_child(&body, &button);
    Some(button)
}

/// Whether a touch drag should be cancelled: only while the menu holds the
/// page, and never inside regions that scroll on their own.
pub fn blocks_touch_scroll<S: Surface>(
    surface: &S,
    target: Option<&S::Node>,
    exempt: &[String],
    nav_open: bool,
) -> bool {
    if !nav_open {
        return false;
    }

    match target {
        Some(target) => !exempt
            .iter()
            .any(|selector| surface.closest(target, selector).is_some()),
        None => true,
    }
}
