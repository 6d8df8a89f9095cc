use crate::utils::error::Result;
use std::path::Path;

/// Durable home of the candidate list.
pub trait CandidateBackend {
    /// Returns the persisted values. "No prior state" is an empty list, not an error.
    fn load(&self) -> Result<Vec<String>>;
    /// Fully replaces the persisted values.
    fn save(&self, values: &[String]) -> Result<()>;
    /// Human-readable description of where the values live, for logs.
    fn location(&self) -> String;
}

/// Host capability: the text currently highlighted or selected by the user.
pub trait SelectionSource {
    fn selected_text(&self) -> Option<String>;
}

/// Host capability: whether a named popup is on screen.
pub trait PopupProbe {
    fn is_visible(&self, popup: &str) -> bool;
}

pub trait ConfigProvider {
    fn restore_on_startup(&self) -> bool;
    fn persistence_file_path(&self) -> &Path;
    fn symbol_chars(&self) -> &str;
}

impl<F> SelectionSource for F
where
    F: Fn() -> Option<String>,
{
    fn selected_text(&self) -> Option<String> {
        self()
    }
}

impl<F> PopupProbe for F
where
    F: Fn(&str) -> bool,
{
    fn is_visible(&self, popup: &str) -> bool {
        self(popup)
    }
}
