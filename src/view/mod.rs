//! View state and HTML rendering for both pages.
//!
//! Controllers mutate the view structs; everything in this module that
//! produces markup is a pure function of those structs. Record text is
//! escaped by askama.

pub mod dashboard;
pub mod front_desk;

use askama::Template;

/// Load state of one independently fetched panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelState<T> {
    Loading,
    /// The request succeeded with nothing to show.
    Empty,
    Ready(T),
    /// The request failed; the error has already been logged.
    Failed,
}

impl<T> Default for PanelState<T> {
    fn default() -> Self {
        PanelState::Loading
    }
}

impl<T> PanelState<Vec<T>> {
    pub fn from_items(items: Vec<T>) -> Self {
        if items.is_empty() {
            PanelState::Empty
        } else {
            PanelState::Ready(items)
        }
    }
}

impl<T> PanelState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, PanelState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            PanelState::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// One `<option>` of a select control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Texts shown by a list panel when it has no cards.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Placeholders {
    pub empty: &'static str,
    pub failed: &'static str,
    /// Front-desk lists prefix the text with a glyph.
    pub icons: bool,
}

#[derive(Template)]
#[template(path = "placeholder.html")]
struct PlaceholderTemplate<'a> {
    loading: bool,
    modifier: &'a str,
    icon: &'a str,
    text: &'a str,
}

/// Render `state`, delegating to `ready` for loaded content.
pub(crate) fn render_panel<T, F>(
    state: &PanelState<T>,
    texts: Placeholders,
    ready: F,
) -> askama::Result<String>
where
    F: FnOnce(&T) -> askama::Result<String>,
{
    let (icon, text, modifier) = match state {
        PanelState::Ready(value) => return ready(value),
        PanelState::Loading => {
            return PlaceholderTemplate {
                loading: true,
                modifier: "",
                icon: "",
                text: "",
            }
            .render()
        }
        PanelState::Empty => ("—", texts.empty, ""),
        PanelState::Failed => ("!", texts.failed, " error"),
    };

    PlaceholderTemplate {
        loading: false,
        modifier,
        icon: if texts.icons { icon } else { "" },
        text,
    }
    .render()
}

/// Select options plus the value the browser would show as chosen.
#[derive(Debug)]
pub(crate) struct OptionRow<'a> {
    pub value: &'a str,
    pub label: &'a str,
    pub selected: bool,
}

pub(crate) fn option_rows<'a>(options: &'a [SelectOption], current: &str) -> Vec<OptionRow<'a>> {
    options
        .iter()
        .map(|opt| OptionRow {
            value: &opt.value,
            label: &opt.label,
            selected: opt.value == current,
        })
        .collect()
}

/// The value a select control holds after its options are replaced: the
/// previous value if it is still offered, otherwise the first option.
pub(crate) fn reselect(options: &[SelectOption], current: &str) -> String {
    if options.iter().any(|opt| opt.value == current) {
        return current.to_string();
    }
    options
        .first()
        .map(|opt| opt.value.clone())
        .unwrap_or_default()
}

/// Missing text shown as a dash.
pub(crate) fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}
