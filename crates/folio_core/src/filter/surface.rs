//! Document-side contract the filter controller drives.
//!
//! # Responsibility
//! - Expose filter controls and items by stable index.
//! - Apply active/hidden state changes requested by the controller.
//!
//! # Invariants
//! - Indices are stable for the lifetime of one attachment.
//! - Setters are only called with indices below the matching `*_count()`.

/// Root of a filterable document: one set of controls, one set of items.
pub trait FilterSurface {
    /// Number of filter controls.
    fn control_count(&self) -> usize;

    /// Filter key carried by control `index`.
    fn control_key(&self, index: usize) -> &str;

    fn is_control_active(&self, index: usize) -> bool;

    /// Toggles the active indicator on control `index`.
    fn set_control_active(&mut self, index: usize, active: bool);

    /// Number of filterable items.
    fn item_count(&self) -> usize;

    /// Raw serialized group attribute of item `index`, if present.
    fn item_groups_attr(&self, index: usize) -> Option<&str>;

    fn is_item_visible(&self, index: usize) -> bool;

    /// Shows or hides item `index`.
    fn set_item_visible(&mut self, index: usize, visible: bool);
}
