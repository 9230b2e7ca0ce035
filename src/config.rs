use std::time::Duration;

use crate::surface::Surface;

const DEFAULT_MOBILE_BREAKPOINT: u64 = 768;
const DEFAULT_NAVBAR_SCROLL_THRESHOLD: u64 = 50;
const DEFAULT_SCROLL_TOP_THRESHOLD: u64 = 300;
const DEFAULT_NOTIFICATION_VISIBLE_MS: u64 = 5_000;
const DEFAULT_SUBMIT_LATENCY_MS: u64 = 2_000;
const DEFAULT_ANCHOR_OFFSET: u64 = 80;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;
const DEFAULT_SCROLL_LOCK_EXEMPT: [&str; 2] = [".nav-menu", ".contact-form"];

const MOBILE_BREAKPOINT_BOUNDS: (u64, u64) = (320, 2_048);
const NAVBAR_SCROLL_THRESHOLD_BOUNDS: (u64, u64) = (0, 1_000);
const SCROLL_TOP_THRESHOLD_BOUNDS: (u64, u64) = (0, 10_000);
const NOTIFICATION_VISIBLE_MS_BOUNDS: (u64, u64) = (500, 60_000);
const SUBMIT_LATENCY_MS_BOUNDS: (u64, u64) = (0, 30_000);
const ANCHOR_OFFSET_BOUNDS: (u64, u64) = (0, 400);

pub const NOTIFICATION_ENTER_DELAY: Duration = Duration::from_millis(100);
pub const NOTIFICATION_EXIT_DURATION: Duration = Duration::from_millis(300);
pub const RIPPLE_LIFETIME: Duration = Duration::from_millis(600);
pub const PRESS_RELEASE_DELAY: Duration = Duration::from_millis(150);
pub const PULSE_DURATION: Duration = Duration::from_millis(300);
pub const PRELOADER_FADE: Duration = Duration::from_millis(500);
pub const LOADING_CLEAR_DELAY: Duration = Duration::from_millis(500);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" => Some(Self::Warn),
            _ => None,
        }
    }

    pub fn as_log_level(self) -> log::Level {
        match self {
            Self::Debug => log::Level::Debug,
            Self::Info => log::Level::Info,
            Self::Warn => log::Level::Warn,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct InteractionConfig {
    pub mobile_breakpoint: f64,
    pub navbar_scroll_threshold: f64,
    pub scroll_top_threshold: f64,
    pub notification_visible: Duration,
    pub submit_latency: Duration,
    pub anchor_offset: f64,
    pub scroll_lock_exempt: Vec<String>,
    pub log_level: LogLevel,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint: DEFAULT_MOBILE_BREAKPOINT as f64,
            navbar_scroll_threshold: DEFAULT_NAVBAR_SCROLL_THRESHOLD as f64,
            scroll_top_threshold: DEFAULT_SCROLL_TOP_THRESHOLD as f64,
            notification_visible: Duration::from_millis(DEFAULT_NOTIFICATION_VISIBLE_MS),
            submit_latency: Duration::from_millis(DEFAULT_SUBMIT_LATENCY_MS),
            anchor_offset: DEFAULT_ANCHOR_OFFSET as f64,
            scroll_lock_exempt: DEFAULT_SCROLL_LOCK_EXEMPT
                .iter()
                .map(ToString::to_string)
                .collect(),
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl InteractionConfig {
    /// Reads overrides from `data-*` attributes on the document element.
    /// Missing, unparsable or out-of-range values keep their defaults.
    pub fn from_surface<S: Surface>(surface: &S) -> Self {
        let Some(root) = surface.root() else {
            return Self::default();
        };
        let read = |name: &str| surface.attribute(&root, name);

        let mobile_breakpoint = parse_attr_u64_with_bounds(
            read("data-mobile-breakpoint"),
            DEFAULT_MOBILE_BREAKPOINT,
            MOBILE_BREAKPOINT_BOUNDS,
        );
        let navbar_scroll_threshold = parse_attr_u64_with_bounds(
            read("data-navbar-scroll-threshold"),
            DEFAULT_NAVBAR_SCROLL_THRESHOLD,
            NAVBAR_SCROLL_THRESHOLD_BOUNDS,
        );
        let scroll_top_threshold = parse_attr_u64_with_bounds(
            read("data-scroll-top-threshold"),
            DEFAULT_SCROLL_TOP_THRESHOLD,
            SCROLL_TOP_THRESHOLD_BOUNDS,
        );
        let notification_visible_ms = parse_attr_u64_with_bounds(
            read("data-notification-visible-ms"),
            DEFAULT_NOTIFICATION_VISIBLE_MS,
            NOTIFICATION_VISIBLE_MS_BOUNDS,
        );
        let submit_latency_ms = parse_attr_u64_with_bounds(
            read("data-submit-latency-ms"),
            DEFAULT_SUBMIT_LATENCY_MS,
            SUBMIT_LATENCY_MS_BOUNDS,
        );
        let anchor_offset = parse_attr_u64_with_bounds(
            read("data-anchor-offset"),
            DEFAULT_ANCHOR_OFFSET,
            ANCHOR_OFFSET_BOUNDS,
        );
        let log_level = read("data-log-level")
            .as_deref()
            .and_then(LogLevel::parse)
            .unwrap_or(DEFAULT_LOG_LEVEL);

        Self {
            mobile_breakpoint: mobile_breakpoint as f64,
            navbar_scroll_threshold: navbar_scroll_threshold as f64,
            scroll_top_threshold: scroll_top_threshold as f64,
            notification_visible: Duration::from_millis(notification_visible_ms),
            submit_latency: Duration::from_millis(submit_latency_ms),
            anchor_offset: anchor_offset as f64,
            log_level,
            ..Self::default()
        }
    }
}

fn parse_attr_u64_with_bounds(value: Option<String>, default: u64, bounds: (u64, u64)) -> u64 {
    value
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}
