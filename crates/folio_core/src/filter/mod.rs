//! Group filtering for rendered item listings.
//!
//! # Responsibility
//! - Model filter controls and filterable items behind `FilterSurface`.
//! - Recompute item visibility whenever a filter control is activated.
//!
//! # Invariants
//! - Exactly one control is active after any successful activation.
//! - Visibility is a pure projection of (selected key, item groups).

pub mod controller;
pub mod dom;
pub mod groups;
pub mod surface;

pub use controller::{FilterController, FilterError, FilterResult};
pub use dom::{DomControl, DomItem, PageDom};
pub use groups::{GroupList, GroupParseError, ALL_FILTER_KEY};
pub use surface::FilterSurface;
