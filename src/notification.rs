use std::{rc::Rc, time::Duration};

use tracing::debug;

use crate::{
    config::{NOTIFICATION_ENTER_DELAY, NOTIFICATION_EXIT_DURATION},
    scheduler::Scheduler,
    surface::Surface,
};

const HIDDEN_TRANSFORM: &str = "translateX(100%)";
const SHOWN_TRANSFORM: &str = "translateX(0)";

const TOAST_STYLES: [(&str, &str); 12] = [
    ("position", "fixed"),
    ("top", "20px"),
    ("right", "20px"),
    ("padding", "15px 20px"),
    ("border-radius", "8px"),
    ("color", "white"),
    ("font-weight", "500"),
    ("z-index", "10000"),
    ("transform", HIDDEN_TRANSFORM),
    ("transition", "transform 0.3s ease"),
    ("max-width", "300px"),
    ("word-wrap", "break-word"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    pub fn background(self) -> &'static str {
        match self {
            Self::Success => "linear-gradient(135deg, #4CAF50, #45a049)",
            Self::Error => "linear-gradient(135deg, #f44336, #d32f2f)",
            Self::Info => "linear-gradient(135deg, #00b7ff, #0099cc)",
        }
    }
}

/// Transient top-right toasts. Each one slides in shortly after insertion,
/// stays for the configured time, slides out and is removed.
pub struct Notifier<S: Surface> {
    surface: Rc<S>,
    scheduler: Rc<dyn Scheduler>,
    visible_for: Duration,
}

impl<S: Surface> Clone for Notifier<S> {
    fn clone(&self) -> Self {
        Self {
            surface: self.surface.clone(),
            scheduler: self.scheduler.clone(),
            visible_for: self.visible_for,
        }
    }
}

impl<S: Surface + 'static> Notifier<S> {
    pub fn new(surface: Rc<S>, scheduler: Rc<dyn Scheduler>, visible_for: Duration) -> Self {
        Self {
            surface,
            scheduler,
            visible_for,
        }
    }

    pub fn notify(&self, message: &str, severity: Severity) -> Option<S::Node> {
        let body = self.surface.body()?;
        let toast = self.surface.create_element("div")?;

        self.surface.add_class(&toast, "notification");
        self.surface
            .add_class(&toast, &format!("notification-{}", severity.as_str()));
        self.surface.set_text(&toast, message);
        self.surface.set_styles(&toast, &TOAST_STYLES);
        self.surface
            .set_style(&toast, "background", severity.background());
        self.surface.append_child(&body, &toast);

        debug!(
            event = "notification_shown",
            severity = severity.as_str(),
            visible_ms = self.visible_for.as_millis() as u64
        );

        {
            let surface = self.surface.clone();
            let toast = toast.clone();
            self.scheduler.set_timeout(
                NOTIFICATION_ENTER_DELAY,
                Box::new(move || surface.set_style(&toast, "transform", SHOWN_TRANSFORM)),
            );
        }

        {
            let surface = self.surface.clone();
            let scheduler = self.scheduler.clone();
            let toast = toast.clone();
            self.scheduler.set_timeout(
                self.visible_for,
                Box::new(move || {
                    surface.set_style(&toast, "transform", HIDDEN_TRANSFORM);
                    scheduler.set_timeout(
                        NOTIFICATION_EXIT_DURATION,
                        Box::new(move || surface.remove(&toast)),
                    );
                }),
            );
        }

        Some(toast)
    }
}
