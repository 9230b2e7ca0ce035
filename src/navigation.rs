use std::{cell::Cell, rc::Rc};

use tracing::debug;

use crate::{surface::Surface, viewport::is_mobile_width};

pub const ACTIVE_CLASS: &str = "active";
pub const NAV_OPEN_CLASS: &str = "nav-open";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavState {
    Closed,
    Open,
}

impl NavState {
    fn toggled(self) -> Self {
        match self {
            Self::Closed => Self::Open,
            Self::Open => Self::Closed,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Open => "open",
        }
    }
}

/// Open/closed state of the mobile menu, mirrored onto the hamburger, the
/// menu and the body.
pub struct NavController<S: Surface> {
    surface: Rc<S>,
    hamburger: S::Node,
    menu: S::Node,
    breakpoint: f64,
    state: Cell<NavState>,
}

impl<S: Surface> NavController<S> {
    pub fn attach(surface: Rc<S>, breakpoint: f64) -> Option<Self> {
        let hamburger = surface.query(".hamburger")?;
        let menu = surface.query(".nav-menu")?;

        Some(Self {
            surface,
            hamburger,
            menu,
            breakpoint,
            state: Cell::new(NavState::Closed),
        })
    }

    pub fn state(&self) -> NavState {
        self.state.get()
    }

    pub fn is_open(&self) -> bool {
        self.state() == NavState::Open
    }

    pub fn hamburger(&self) -> &S::Node {
        &self.hamburger
    }

    pub fn menu(&self) -> &S::Node {
        &self.menu
    }

    pub fn toggle(&self) {
        self.apply(self.state().toggled());
    }

    pub fn close(&self) {
        self.apply(NavState::Closed);
    }

    /// Document-level click: anything outside the hamburger and the menu
    /// closes an open menu.
    pub fn on_document_click(&self, target: Option<&S::Node>) {
        if !self.is_open() {
            return;
        }

        let inside = target.is_some_and(|target| {
            self.surface.contains(&self.hamburger, target) || self.surface.contains(&self.menu, target)
        });
        if !inside {
            self.close();
        }
    }

    pub fn on_resize(&self, width: f64) {
        if !is_mobile_width(width, self.breakpoint) {
            self.close();
        }
    }

    fn apply(&self, next: NavState) {
        let previous = self.state.replace(next);
        let body = self.surface.body();

        match next {
            NavState::Open => {
                self.surface.add_class(&self.hamburger, ACTIVE_CLASS);
                self.surface.add_class(&self.menu, ACTIVE_CLASS);
                if let Some(body) = &body {
                    self.surface.add_class(body, NAV_OPEN_CLASS);
                }
            }
            NavState::Closed => {
                self.surface.remove_class(&self.hamburger, ACTIVE_CLASS);
                self.surface.remove_class(&self.menu, ACTIVE_CLASS);
                if let Some(body) = &body {
                    self.surface.remove_class(body, NAV_OPEN_CLASS);
                }
            }
        }

        if previous != next {
            debug!(event = "nav_state_changed", from = previous.as_str(), to = next.as_str());
        }
    }
}
