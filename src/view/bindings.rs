// src/view/bindings.rs
//! Event-binding pass: reads rendered markup back and lists the actions its
//! controls expose.

use scraper::{Html, Selector};

use crate::types::Action;

/// A rendered `[data-action]` control: its action name and target id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub action: String,
    pub id: Option<String>,
}

/// Every control in `markup`, in document order.
pub fn collect_controls(markup: &str) -> Vec<Control> {
    let Ok(selector) = Selector::parse("[data-action]") else {
        return Vec::new();
    };

    let fragment = Html::parse_fragment(markup);
    fragment
        .select(&selector)
        .filter_map(|element| {
            let value = element.value();
            Some(Control {
                action: value.attr("data-action")?.to_string(),
                id: value.attr("data-id").map(str::to_string),
            })
        })
        .collect()
}

/// Board actions bound in `markup`. Controls whose action is not a board
/// action are skipped.
pub fn collect_bindings(markup: &str) -> Vec<Action> {
    collect_controls(markup)
        .iter()
        .filter_map(|control| Action::parse(&control.action, control.id.as_deref()))
        .collect()
}

pub fn is_bound(markup: &str, action: &Action) -> bool {
    collect_bindings(markup).iter().any(|bound| bound == action)
}

/// Whether a control named `action` targeting `id` is present.
pub fn has_control(markup: &str, action: &str, id: &str) -> bool {
    collect_controls(markup)
        .iter()
        .any(|control| control.action == action && control.id.as_deref() == Some(id))
}
