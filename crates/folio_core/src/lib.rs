//! Core logic for Folio: static site generation and group filtering.
//! This crate owns every page-building rule and the filter invariants.

pub mod filter;
pub mod logging;
pub mod site;

pub use filter::{
    DomControl, DomItem, FilterController, FilterError, FilterResult, FilterSurface, GroupList,
    GroupParseError, PageDom, ALL_FILTER_KEY,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use site::{build_site, BuildSummary, SiteError, SiteLayout, SiteResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
