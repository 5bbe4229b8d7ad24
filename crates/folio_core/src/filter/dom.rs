//! In-memory filter surface backed by rendered page markup.
//!
//! # Responsibility
//! - Extract `.filter-btn` controls and `.item` entries from page HTML.
//! - Track their class lists and apply `active`/`hidden` toggles.
//!
//! # Invariants
//! - Element order follows document order.
//! - Controls without a `data-filter` attribute are not part of the surface.
//! - Class toggles never duplicate a class name.

use super::surface::FilterSurface;
use log::{info, warn};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

/// Class carried by filter controls.
pub const CONTROL_CLASS: &str = "filter-btn";
/// Class carried by filterable items.
pub const ITEM_CLASS: &str = "item";
/// Class marking the active filter control.
pub const ACTIVE_CLASS: &str = "active";
/// Class marking a hidden item.
pub const HIDDEN_CLASS: &str = "hidden";
/// Attribute holding the filter key of a control.
pub const FILTER_ATTR: &str = "data-filter";
/// Attribute holding the serialized group list of an item.
pub const GROUPS_ATTR: &str = "data-groups";

static CONTROL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".filter-btn").expect("valid control selector"));
static ITEM_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".item").expect("valid item selector"));
static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h3").expect("valid title selector"));

/// One filter control element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomControl {
    pub filter_key: String,
    /// Visible button text.
    pub label: String,
    classes: Vec<String>,
}

impl DomControl {
    pub fn new(filter_key: impl Into<String>, active: bool) -> Self {
        let filter_key = filter_key.into();
        let mut control = Self {
            label: filter_key.clone(),
            filter_key,
            classes: vec![CONTROL_CLASS.to_string()],
        };
        toggle_class(&mut control.classes, ACTIVE_CLASS, active);
        control
    }

    pub fn is_active(&self) -> bool {
        has_class(&self.classes, ACTIVE_CLASS)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}

/// One filterable item element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomItem {
    /// Raw `data-groups` value, entity-decoded.
    pub groups_attr: Option<String>,
    /// Text of the first `<h3>` inside the item, when present.
    pub title: Option<String>,
    classes: Vec<String>,
}

impl DomItem {
    pub fn new(groups_attr: Option<&str>) -> Self {
        Self {
            groups_attr: groups_attr.map(str::to_string),
            title: None,
            classes: vec![ITEM_CLASS.to_string()],
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn is_hidden(&self) -> bool {
        has_class(&self.classes, HIDDEN_CLASS)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}

/// Controls and items of one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageDom {
    controls: Vec<DomControl>,
    items: Vec<DomItem>,
}

impl PageDom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses rendered page markup.
    ///
    /// Never fails: markup is parsed leniently, and controls lacking a
    /// filter key are skipped with a warning.
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);
        let mut dom = Self::new();

        for (position, element) in document.select(&CONTROL_SELECTOR).enumerate() {
            let Some(filter_key) = element.value().attr(FILTER_ATTR) else {
                warn!(
                    "event=dom_parse module=filter status=degraded reason=control_without_key position={}",
                    position
                );
                continue;
            };
            dom.controls.push(DomControl {
                filter_key: filter_key.to_string(),
                label: element_text(element),
                classes: element_classes(element),
            });
        }

        for element in document.select(&ITEM_SELECTOR) {
            let title = element
                .select(&TITLE_SELECTOR)
                .next()
                .map(element_text)
                .filter(|text| !text.is_empty());
            dom.items.push(DomItem {
                groups_attr: element.value().attr(GROUPS_ATTR).map(str::to_string),
                title,
                classes: element_classes(element),
            });
        }

        info!(
            "event=dom_parse module=filter status=ok controls={} items={}",
            dom.controls.len(),
            dom.items.len()
        );
        dom
    }

    pub fn push_control(&mut self, control: DomControl) {
        self.controls.push(control);
    }

    pub fn push_item(&mut self, item: DomItem) {
        self.items.push(item);
    }

    pub fn controls(&self) -> &[DomControl] {
        &self.controls
    }

    pub fn items(&self) -> &[DomItem] {
        &self.items
    }

    /// Filter keys of controls currently marked active.
    pub fn active_keys(&self) -> Vec<&str> {
        self.controls
            .iter()
            .filter(|control| control.is_active())
            .map(|control| control.filter_key.as_str())
            .collect()
    }

    /// Indices of items not marked hidden.
    pub fn visible_items(&self) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| !item.is_hidden())
            .map(|(index, _)| index)
            .collect()
    }
}

impl FilterSurface for PageDom {
    fn control_count(&self) -> usize {
        self.controls.len()
    }

    fn control_key(&self, index: usize) -> &str {
        &self.controls[index].filter_key
    }

    fn is_control_active(&self, index: usize) -> bool {
        self.controls[index].is_active()
    }

    fn set_control_active(&mut self, index: usize, active: bool) {
        toggle_class(&mut self.controls[index].classes, ACTIVE_CLASS, active);
    }

    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn item_groups_attr(&self, index: usize) -> Option<&str> {
        self.items[index].groups_attr.as_deref()
    }

    fn is_item_visible(&self, index: usize) -> bool {
        !self.items[index].is_hidden()
    }

    fn set_item_visible(&mut self, index: usize, visible: bool) {
        toggle_class(&mut self.items[index].classes, HIDDEN_CLASS, !visible);
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn element_classes(element: ElementRef<'_>) -> Vec<String> {
    element.value().classes().map(str::to_string).collect()
}

fn has_class(classes: &[String], class: &str) -> bool {
    classes.iter().any(|value| value == class)
}

fn toggle_class(classes: &mut Vec<String>, class: &str, on: bool) {
    if on {
        if !has_class(classes, class) {
            classes.push(class.to_string());
        }
    } else {
        classes.retain(|value| value != class);
    }
}

#[cfg(test)]
mod tests {
    use super::{toggle_class, PageDom};

    #[test]
    fn toggle_class_is_idempotent() {
        let mut classes = vec!["item".to_string()];
        toggle_class(&mut classes, "hidden", true);
        toggle_class(&mut classes, "hidden", true);
        assert_eq!(classes, ["item", "hidden"]);
        toggle_class(&mut classes, "hidden", false);
        assert_eq!(classes, ["item"]);
    }

    #[test]
    fn parse_reads_controls_items_and_decodes_entities() {
        let html = r#"
            <div class="filter-buttons">
                <button class="filter-btn active" data-filter="all">All</button>
                <button class="filter-btn" data-filter="books">books</button>
                <button class="filter-btn">broken</button>
            </div>
            <div class="items-container">
                <div class='item' data-groups='["books", "o&#39;reilly"]'><h3>First</h3></div>
                <div class='item hidden'></div>
            </div>"#;
        let dom = PageDom::parse(html);

        assert_eq!(dom.controls().len(), 2);
        assert_eq!(dom.controls()[0].label, "All");
        assert_eq!(dom.active_keys(), ["all"]);

        assert_eq!(dom.items().len(), 2);
        assert_eq!(
            dom.items()[0].groups_attr.as_deref(),
            Some(r#"["books", "o'reilly"]"#)
        );
        assert_eq!(dom.items()[0].title.as_deref(), Some("First"));
        assert_eq!(dom.items()[1].groups_attr, None);
        assert_eq!(dom.visible_items(), [0]);
    }
}
