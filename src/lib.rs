//! Client-side widgets of the budget tracker: a reactive cell, the tag
//! input, the category reset form and the page chrome (alert banner,
//! dialog toggles, hamburger menu).
//!
//! Widgets are written against small view traits so their state machines
//! run without a document. The `web` module binds them to the DOM on
//! `wasm32`.

mod addr;
mod config;
mod error;
mod value;

pub mod alert;
pub mod category;
pub mod dialog;
pub mod hamburger;
pub mod reconcile;
pub mod reset;
pub mod tags;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use alert::{Alert, AlertKind, AlertView, Scheduler, TimerToken};
pub use category::{format_categories, parse_categories, parse_periods, CategoryOverview, Period};
pub use config::{Config, Markup};
pub use dialog::{DialogToggle, DialogView};
pub use error::{MountError, RecordError, ResetError};
pub use hamburger::{Hamburger, MenuView};
pub use reconcile::{Changes, Diff, Keyed};
pub use reset::{AllocationForm, CategoryReset, ResetForm, ResetView};
pub use tags::{TagInput, TagSet, TagsView};
pub use value::{Listener, Var};
