use std::{cell::RefCell, rc::Rc};

use tracing::{debug, warn};

use crate::{
    scroll_effects::RevealState,
    surface::{IntersectionOptions, Surface},
};

pub const ANIMATE_CLASS: &str = "aos-animate";
pub const ENTRANCE_SELECTOR: &str = "[data-aos]";

const VISIBILITY_THRESHOLD: f64 = 0.1;
const BOTTOM_TRIGGER_INSET: &str = "0px 0px -50px 0px";

pub fn entrance_options() -> IntersectionOptions {
    IntersectionOptions {
        threshold: VISIBILITY_THRESHOLD,
        root_margin: BOTTOM_TRIGGER_INSET.to_string(),
    }
}

/// Adds `aos-animate` to tagged elements the first time they become visible.
pub struct EntranceAnimator<S: Surface> {
    surface: Rc<S>,
    elements: RefCell<Vec<(S::Node, RevealState)>>,
}

impl<S: Surface + 'static> EntranceAnimator<S> {
    pub fn new(surface: Rc<S>) -> Rc<Self> {
        let elements = surface
            .query_all(ENTRANCE_SELECTOR)
            .into_iter()
            .map(|element| (element, RevealState::Pending))
            .collect();

        Rc::new(Self {
            surface,
            elements: RefCell::new(elements),
        })
    }

    /// Registers every tagged element with the visibility watcher. Without a
    /// watcher the elements are revealed at once so nothing stays hidden.
    pub fn observe(self: &Rc<Self>) {
        let nodes: Vec<S::Node> = self
            .elements
            .borrow()
            .iter()
            .map(|(node, _)| node.clone())
            .collect();
        if nodes.is_empty() {
            return;
        }

        let animator = self.clone();
        let result = self.surface.observe_intersections(
            &nodes,
            &entrance_options(),
            Rc::new(move |node: &S::Node, visible: bool| animator.on_intersection(node, visible)),
        );

        match result {
            Ok(()) => debug!(event = "entrance_observed", count = nodes.len()),
            Err(error) => {
                warn!(event = "entrance_observer_unavailable", error = %error);
                for node in &nodes {
                    self.on_intersection(node, true);
                }
            }
        }
    }

    pub fn on_intersection(&self, node: &S::Node, visible: bool) {
        if !visible {
            return;
        }

        let mut elements = self.elements.borrow_mut();
        let Some((element, state)) = elements.iter_mut().find(|(element, _)| element == node) else {
            return;
        };

        if *state == RevealState::Pending {
            self.surface.add_class(element, ANIMATE_CLASS);
            *state = RevealState::Revealed;
        }
    }

    pub fn state_of(&self, node: &S::Node) -> Option<RevealState> {
        self.elements
            .borrow()
            .iter()
            .find(|(element, _)| element == node)
            .map(|(_, state)| *state)
    }
}
