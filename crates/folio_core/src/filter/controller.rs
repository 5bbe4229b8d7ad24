//! Filter activation controller.
//!
//! # Responsibility
//! - Attach to a `FilterSurface` and memoize each item's group list.
//! - React to control activation by moving the active indicator and
//!   recomputing visibility for every item.
//!
//! # Invariants
//! - After a successful activation exactly one control is active.
//! - After a successful activation every item is visible iff its groups
//!   match the selected key (`"all"` matches everything).
//! - Items with missing or malformed group data have no memberships.
//! - A rejected activation leaves the surface untouched.

use super::groups::GroupList;
use super::surface::FilterSurface;
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type FilterResult<T> = Result<T, FilterError>;

/// Activation request that cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// Control index is outside the attached control set.
    ControlOutOfRange { index: usize, count: usize },
    /// No control carries the requested filter key.
    UnknownFilterKey(String),
}

impl Display for FilterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ControlOutOfRange { index, count } => write!(
                f,
                "filter control index {index} is out of range (controls: {count})"
            ),
            Self::UnknownFilterKey(key) => write!(f, "no filter control with key `{key}`"),
        }
    }
}

impl Error for FilterError {}

/// Handle returned by `FilterController::attach`; owns the surface until
/// `detach` hands it back.
pub struct FilterController<S: FilterSurface> {
    surface: S,
    keys: Vec<String>,
    groups: Vec<GroupList>,
    active: Option<usize>,
}

impl<S: FilterSurface> FilterController<S> {
    /// Attaches to `surface`, reading control keys and item groups once.
    ///
    /// Does not change any control or item state; the markup's initial
    /// state stands until the first activation.
    pub fn attach(surface: S) -> Self {
        let keys: Vec<String> = (0..surface.control_count())
            .map(|index| surface.control_key(index).to_string())
            .collect();

        let mut malformed = 0usize;
        let groups: Vec<GroupList> = (0..surface.item_count())
            .map(
                |index| match GroupList::parse_attribute(surface.item_groups_attr(index)) {
                    Ok(groups) => groups,
                    Err(err) => {
                        malformed += 1;
                        warn!(
                            "event=filter_attach module=filter status=degraded item_index={} error={}",
                            index, err
                        );
                        GroupList::default()
                    }
                },
            )
            .collect();

        let active = (0..keys.len()).find(|index| surface.is_control_active(*index));

        info!(
            "event=filter_attach module=filter status=ok controls={} items={} malformed_items={}",
            keys.len(),
            groups.len(),
            malformed
        );

        Self {
            surface,
            keys,
            groups,
            active,
        }
    }

    /// Reacts to activation of control `selected`.
    ///
    /// # Errors
    /// - `FilterError::ControlOutOfRange` when `selected` is not a control.
    pub fn on_filter_activated(&mut self, selected: usize) -> FilterResult<()> {
        if selected >= self.keys.len() {
            return Err(FilterError::ControlOutOfRange {
                index: selected,
                count: self.keys.len(),
            });
        }

        for index in 0..self.keys.len() {
            self.surface.set_control_active(index, index == selected);
        }
        self.active = Some(selected);

        let filter_key = self.keys[selected].as_str();
        let mut visible = 0usize;
        for (index, groups) in self.groups.iter().enumerate() {
            let shown = groups.matches(filter_key);
            if shown {
                visible += 1;
            }
            self.surface.set_item_visible(index, shown);
        }

        debug!(
            "event=filter_apply module=filter status=ok key={} visible={} hidden={}",
            filter_key,
            visible,
            self.groups.len() - visible
        );
        Ok(())
    }

    /// Activates the first control carrying `filter_key`.
    pub fn activate_key(&mut self, filter_key: &str) -> FilterResult<()> {
        let index = self
            .keys
            .iter()
            .position(|key| key == filter_key)
            .ok_or_else(|| FilterError::UnknownFilterKey(filter_key.to_string()))?;
        self.on_filter_activated(index)
    }

    /// Index of the active control, as last observed or set.
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_key(&self) -> Option<&str> {
        self.active.map(|index| self.keys[index].as_str())
    }

    /// Filter keys in control order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Memoized group list of item `index`.
    pub fn item_groups(&self, index: usize) -> Option<&GroupList> {
        self.groups.get(index)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Releases the surface with its current state.
    pub fn detach(self) -> S {
        self.surface
    }
}
