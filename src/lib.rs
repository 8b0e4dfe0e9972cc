//! Client-side behavior for statically generated documentation sites.
//!
//! Three independent controllers, each built from handles onto the page:
//!
//! - [`scroll::ScrollSectionTracker`] highlights the navigation link of the
//!   section currently in view, recomputing at most once per frame.
//! - [`copy::CodeBlockCopyController`] adds copy buttons to code samples and
//!   falls back to the legacy copy command when the asynchronous clipboard is
//!   unavailable.
//! - [`theme::ThemeController`] toggles and persists a light/dark preference.
//!
//! Site differences are expressed through [`config::InteractConfig`]. The page
//! boundary is the set of traits in [`dom`]; on `wasm32` the `web` module
//! implements them with `web-sys` and mounts everything on load.

pub mod config;
pub mod copy;
pub mod dom;
pub mod error;
pub mod scroll;
pub mod theme;
pub mod web_assets;

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(test)]
mod fakes;

pub use config::{FailurePolicy, InteractConfig};
pub use error::{InteractError, Result};
