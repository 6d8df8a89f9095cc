use crate::core::completion::CompletionSource;
use crate::domain::ports::{CandidateBackend, ConfigProvider, PopupProbe, SelectionSource};
use crate::domain::store::CandidateStore;
use crate::utils::error::Result;
use crate::utils::validation::validate_candidate;

/// Popup name the host reports for its completion menu.
pub const COMPLETION_POPUP: &str = "completion";

/// One editing session's worth of curated candidates.
///
/// The session owns its store and backend outright; the host drives it
/// through [`start`](Self::start), the command methods, completion requests
/// and finally [`shutdown`](Self::shutdown). Nothing here touches process
/// lifetime, and no error is fatal to the host.
pub struct CompletionSession<B: CandidateBackend> {
    store: CandidateStore,
    backend: B,
    source: CompletionSource,
    restore_on_startup: bool,
}

impl<B: CandidateBackend> CompletionSession<B> {
    pub fn new(backend: B, source: CompletionSource, restore_on_startup: bool) -> Self {
        Self {
            store: CandidateStore::new(),
            backend,
            source,
            restore_on_startup,
        }
    }

    pub fn from_config(backend: B, config: &impl ConfigProvider) -> Result<Self> {
        let source = CompletionSource::new(config.symbol_chars())?;
        Ok(Self::new(backend, source, config.restore_on_startup()))
    }

    /// Loads persisted candidates when restore is enabled.
    ///
    /// On failure the store is left empty and the error is returned for the
    /// host to report; the session stays usable.
    pub fn start(&mut self) -> Result<usize> {
        if !self.restore_on_startup {
            tracing::debug!("Restore disabled, starting with an empty candidate list");
            return Ok(0);
        }

        match self.backend.load() {
            Ok(values) => {
                self.store.restore(values);
                tracing::info!(
                    "Restored {} candidates from {}",
                    self.store.len(),
                    self.backend.location()
                );
                Ok(self.store.len())
            }
            Err(e) => {
                self.store.clear();
                tracing::error!(
                    "Failed to restore candidates from {}: {}",
                    self.backend.location(),
                    e
                );
                Err(e)
            }
        }
    }

    /// Host shutdown event. Flushes only when restore is enabled.
    pub fn shutdown(&self) -> Result<()> {
        if !self.restore_on_startup {
            tracing::debug!("Restore disabled, skipping save on shutdown");
            return Ok(());
        }
        self.save_now()
    }

    /// Explicit save regardless of the restore setting.
    pub fn save_now(&self) -> Result<()> {
        let values = self.store.snapshot();
        self.backend.save(&values).inspect_err(|e| {
            tracing::error!(
                "Failed to save candidates to {}: {}",
                self.backend.location(),
                e
            );
        })?;
        tracing::info!(
            "Saved {} candidates to {}",
            values.len(),
            self.backend.location()
        );
        Ok(())
    }

    /// Adds `text` verbatim. Returns `false` when it was already present.
    pub fn add_candidate(&mut self, text: &str) -> Result<bool> {
        validate_candidate(text)?;
        let added = self.store.add(text);
        if added {
            tracing::debug!("Added candidate {:?}", text);
        }
        Ok(added)
    }

    /// Adds the host's current selection. `Ok(None)` when nothing is selected.
    pub fn add_selection(&mut self, selection: &dyn SelectionSource) -> Result<Option<String>> {
        let Some(text) = selection.selected_text() else {
            tracing::debug!("No selection to add");
            return Ok(None);
        };
        self.add_candidate(&text)?;
        Ok(Some(text))
    }

    /// Removes `name`; absent names are ignored.
    pub fn delete_candidate(&mut self, name: &str) -> bool {
        let removed = self.store.remove(name);
        if removed {
            tracing::debug!("Deleted candidate {:?}", name);
        }
        removed
    }

    pub fn clear_all(&mut self) {
        let count = self.store.len();
        self.store.clear();
        tracing::info!("Cleared {} candidates", count);
    }

    pub fn candidates(&self, prefix: &str) -> Vec<String> {
        self.source.candidates(&self.store, prefix)
    }

    pub fn complete(&self, text: &str, cursor: usize) -> Vec<String> {
        self.source.complete(&self.store, text, cursor)
    }

    pub fn prefix_before<'t>(&self, text: &'t str, cursor: usize) -> Option<&'t str> {
        self.source.prefix_before(text, cursor)
    }

    /// Whether a host-side keybinding override should stand down because the
    /// completion popup is showing.
    pub fn popup_suppresses_override(&self, probe: &dyn PopupProbe) -> bool {
        probe.is_visible(COMPLETION_POPUP)
    }

    pub fn store(&self) -> &CandidateStore {
        &self.store
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn restore_on_startup(&self) -> bool {
        self.restore_on_startup
    }
}
