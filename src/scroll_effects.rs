use std::{cell::RefCell, rc::Rc};

use tracing::debug;

use crate::{
    surface::Surface,
    viewport::{is_mobile_width, ViewportSnapshot},
};

pub const SCROLLED_CLASS: &str = "scrolled";

const PARALLAX_BASE_SPEED: f64 = 0.5;
const PARALLAX_SPEED_STEP: f64 = 0.1;
const REVEAL_VISIBLE_FRACTION: f64 = 0.3;

const SECTION_HIDDEN: [(&str, &str); 3] = [
    ("opacity", "0"),
    ("transform", "translateY(30px)"),
    ("transition", "all 0.6s ease"),
];
const SECTION_SHOWN: [(&str, &str); 2] = [("opacity", "1"), ("transform", "translateY(0)")];
const SCROLL_TOP_SHOWN: [(&str, &str); 2] = [("opacity", "1"), ("visibility", "visible")];
const SCROLL_TOP_HIDDEN: [(&str, &str); 2] = [("opacity", "0"), ("visibility", "hidden")];

/// One-shot latch for elements that animate in once and stay put.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealState {
    Pending,
    Revealed,
}

pub fn navbar_is_scrolled(snapshot: &ViewportSnapshot, threshold: f64) -> bool {
    snapshot.scroll_offset > threshold
}

/// Vertical translation for the decorative icon at `index`; deeper icons
/// drift faster. Pinned to zero on mobile.
pub fn parallax_offset(snapshot: &ViewportSnapshot, index: usize, mobile: bool) -> f64 {
    if mobile {
        return 0.0;
    }
    let speed = PARALLAX_BASE_SPEED + index as f64 * PARALLAX_SPEED_STEP;
    0.0 - snapshot.scroll_offset * speed
}

pub fn section_in_view(snapshot: &ViewportSnapshot, top: f64, height: f64) -> bool {
    snapshot.scroll_offset + snapshot.height > top + height * REVEAL_VISIBLE_FRACTION
}

pub fn scroll_top_visible(snapshot: &ViewportSnapshot, threshold: f64) -> bool {
    snapshot.scroll_offset > threshold
}

pub struct ScrollEffects<S: Surface> {
    surface: Rc<S>,
    breakpoint: f64,
    navbar_threshold: f64,
    scroll_top_threshold: f64,
    navbar: Option<S::Node>,
    parallax: Vec<S::Node>,
    sections: RefCell<Vec<(S::Node, RevealState)>>,
    scroll_top: RefCell<Option<S::Node>>,
}

impl<S: Surface> ScrollEffects<S> {
    pub fn new(surface: Rc<S>, breakpoint: f64, navbar_threshold: f64, scroll_top_threshold: f64) -> Self {
        let navbar = surface.query(".navbar");
        let parallax = surface.query_all(".floating-icon");

        Self {
            surface,
            breakpoint,
            navbar_threshold,
            scroll_top_threshold,
            navbar,
            parallax,
            sections: RefCell::new(Vec::new()),
            scroll_top: RefCell::new(None),
        }
    }

    /// Hides every non-hero section so it can fade in on first view.
    pub fn prepare_sections(&self) {
        let sections: Vec<(S::Node, RevealState)> = self
            .surface
            .query_all("section")
            .into_iter()
            .filter(|section| !self.surface.has_class(section, "hero"))
            .map(|section| {
                self.surface.set_styles(&section, &SECTION_HIDDEN);
                (section, RevealState::Pending)
            })
            .collect();

        debug!(event = "sections_prepared", count = sections.len());
        *self.sections.borrow_mut() = sections;
    }

    pub fn set_scroll_top_button(&self, button: S::Node) {
        *self.scroll_top.borrow_mut() = Some(button);
    }

    pub fn reveal_states(&self) -> Vec<RevealState> {
        self.sections.borrow().iter().map(|(_, state)| *state).collect()
    }

    /// The per-frame pass: navbar marker, parallax and scroll-to-top button.
    pub fn on_frame(&self) {
        let snapshot = self.surface.viewport();
        self.update_navbar(&snapshot);
        self.update_parallax(&snapshot);
        self.update_scroll_top(&snapshot);
    }

    pub fn update_navbar(&self, snapshot: &ViewportSnapshot) {
        let Some(navbar) = &self.navbar else {
            return;
        };

        if navbar_is_scrolled(snapshot, self.navbar_threshold) {
            self.surface.add_class(navbar, SCROLLED_CLASS);
        } else {
            self.surface.remove_class(navbar, SCROLLED_CLASS);
        }
    }

    pub fn update_parallax(&self, snapshot: &ViewportSnapshot) {
        let mobile = is_mobile_width(snapshot.width, self.breakpoint);
        for (index, element) in self.parallax.iter().enumerate() {
            let offset = parallax_offset(snapshot, index, mobile);
            self.surface
                .set_style(element, "transform", &format!("translateY({offset}px)"));
        }
    }

    pub fn update_scroll_top(&self, snapshot: &ViewportSnapshot) {
        let scroll_top = self.scroll_top.borrow();
        let Some(button) = scroll_top.as_ref() else {
            return;
        };

        if scroll_top_visible(snapshot, self.scroll_top_threshold) {
            self.surface.set_styles(button, &SCROLL_TOP_SHOWN);
        } else {
            self.surface.set_styles(button, &SCROLL_TOP_HIDDEN);
        }
    }

    /// Reveals pending sections that have come into view. Revealed sections
    /// are never hidden again.
    pub fn reveal_sections(&self) {
        let snapshot = self.surface.viewport();
        let mut sections = self.sections.borrow_mut();

        for (section, state) in sections.iter_mut() {
            if *state == RevealState::Revealed {
                continue;
            }

            let top = self.surface.offset_top(section);
            let height = self.surface.offset_height(section);
            if section_in_view(&snapshot, top, height) {
                self.surface.set_styles(section, &SECTION_SHOWN);
                *state = RevealState::Revealed;
            }
        }
    }
}
