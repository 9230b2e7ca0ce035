//! Interactive behavior for a single-page portfolio: navigation, scroll
//! effects, entrance animations, pointer feedback and the contact form.
//!
//! Everything outside `dom` and `frontend` is target independent and runs
//! against any [`surface::Surface`].

pub mod bindings;
pub mod config;
pub mod contact;
pub mod entrance;
#[cfg(test)]
pub mod memory;
pub mod navigation;
pub mod notification;
pub mod page;
pub mod particles;
pub mod pointer;
pub mod scheduler;
pub mod scroll_effects;
pub mod surface;
pub mod throttle;
pub mod viewport;

#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod frontend;
