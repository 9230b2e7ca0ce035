use std::{rc::Rc, sync::OnceLock, time::Duration};

use regex::Regex;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    notification::{Notifier, Severity},
    scheduler::Scheduler,
    surface::Surface,
};

const MIN_NAME_CHARS: usize = 2;
const MIN_MESSAGE_CHARS: usize = 10;
const BUSY_LABEL: &str = "Sending...";
const SUCCESS_MESSAGE: &str = "Thank you for your message! I will get back to you soon.";

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all fields")]
    MissingField,
    #[error("Name must be at least 2 characters long")]
    NameTooShort,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Message must be at least 10 characters long")]
    MessageTooShort,
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"))
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactSubmission {
    pub fn new(name: &str, email: &str, message: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            message: message.trim().to_string(),
        }
    }

    /// Checks the rules in order and reports only the first one broken.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() || self.email.is_empty() || self.message.is_empty() {
            return Err(ValidationError::MissingField);
        }

        if self.name.chars().count() < MIN_NAME_CHARS {
            return Err(ValidationError::NameTooShort);
        }

        if !email_pattern().is_match(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }

        if self.message.chars().count() < MIN_MESSAGE_CHARS {
            return Err(ValidationError::MessageTooShort);
        }

        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Rejected(ValidationError),
    Sending,
}

pub struct ContactForm<S: Surface> {
    surface: Rc<S>,
    scheduler: Rc<dyn Scheduler>,
    notifier: Notifier<S>,
    latency: Duration,
    fields: [S::Node; 3],
    submit_button: Option<S::Node>,
}

impl<S: Surface + 'static> ContactForm<S> {
    /// Binds to a form's `name`, `email` and `message` fields. Returns `None`
    /// when any of them is missing.
    pub fn attach(
        surface: Rc<S>,
        scheduler: Rc<dyn Scheduler>,
        notifier: Notifier<S>,
        form: &S::Node,
        latency: Duration,
    ) -> Option<Self> {
        let field = |name: &str| surface.query_within(form, &format!("[name={name}]"));
        let fields = [field("name")?, field("email")?, field("message")?];
        let submit_button = surface.query_within(form, "button[type=submit]");

        Some(Self {
            surface,
            scheduler,
            notifier,
            latency,
            fields,
            submit_button,
        })
    }

    pub fn read(&self) -> ContactSubmission {
        let [name, email, message] = &self.fields;
        ContactSubmission::new(
            &self.surface.field_value(name),
            &self.surface.field_value(email),
            &self.surface.field_value(message),
        )
    }

    pub fn submit(&self) -> SubmitOutcome {
        let submission = self.read();

        if let Err(error) = submission.validate() {
            debug!(event = "contact_rejected", reason = ?error);
            self.notifier.notify(&error.to_string(), Severity::Error);
            return SubmitOutcome::Rejected(error);
        }

        let original_label = self
            .submit_button
            .as_ref()
            .map(|button| self.surface.text(button));
        if let Some(button) = &self.submit_button {
            self.surface.set_text(button, BUSY_LABEL);
            self.surface.set_disabled(button, true);
        }

        info!(
            event = "contact_sending",
            latency_ms = self.latency.as_millis() as u64
        );

        let surface = self.surface.clone();
        let notifier = self.notifier.clone();
        let fields = self.fields.clone();
        let submit_button = self.submit_button.clone();
        self.scheduler.set_timeout(
            self.latency,
            Box::new(move || {
                notifier.notify(SUCCESS_MESSAGE, Severity::Success);
                for field in &fields {
                    surface.set_field_value(field, "");
                }
                if let (Some(button), Some(label)) = (submit_button, original_label) {
                    surface.set_text(&button, &label);
                    surface.set_disabled(&button, false);
                }
                info!(event = "contact_sent");
            }),
        );

        SubmitOutcome::Sending
    }
}
