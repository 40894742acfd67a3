//! Settings accessor over the document store.

use crate::model::document::{Settings, SettingsPatch, Theme};
use crate::repo::RepoResult;
use crate::store::document_store::DocumentStore;
use crate::store::SlotStore;
use log::info;

/// Typed access to the `settings` sub-document.
pub struct SettingsStore<'store, S: SlotStore> {
    store: &'store DocumentStore<S>,
}

impl<'store, S: SlotStore> SettingsStore<'store, S> {
    pub fn new(store: &'store DocumentStore<S>) -> Self {
        Self { store }
    }

    /// Current settings (`theme = light` when never saved).
    pub fn get(&self) -> RepoResult<Settings> {
        Ok(self.store.load()?.settings)
    }

    /// Merges `patch` over stored settings, persists, and returns the result.
    pub fn save(&self, patch: SettingsPatch) -> RepoResult<Settings> {
        let settings = self.store.modify(|document| {
            document.settings.apply_patch(patch);
            document.settings
        })?;
        info!(
            "event=settings_save module=repo status=ok theme={}",
            settings.theme.as_str()
        );
        Ok(settings)
    }

    pub fn set_theme(&self, theme: Theme) -> RepoResult<Settings> {
        self.save(SettingsPatch { theme: Some(theme) })
    }

    /// Flips between light and dark and returns the new theme.
    pub fn toggle_theme(&self) -> RepoResult<Theme> {
        let current = self.get()?.theme;
        Ok(self.set_theme(current.toggled())?.theme)
    }
}
