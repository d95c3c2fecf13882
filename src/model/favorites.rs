//! Favorite titles, persisted through the preference store

use std::collections::BTreeSet;

use anyhow::Result;

use super::store::{PreferenceStore, FAVORITES_KEY};

/// Set of favorite ids.
///
/// Ids are kept sorted so the persisted JSON only depends on membership.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Favorites {
    ids: BTreeSet<String>,
}

impl Favorites {
    pub fn load(store: &dyn PreferenceStore) -> Self {
        let Some(content) = store.get(FAVORITES_KEY) else {
            return Self::default();
        };
        match serde_json::from_str::<Vec<String>>(&content) {
            Ok(ids) => {
                tracing::debug!(count = ids.len(), "Favorites loaded");
                Self {
                    ids: ids.into_iter().collect(),
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Stored favorites are unreadable, starting empty");
                Self::default()
            }
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Flip membership of `id` and persist the whole set.
    ///
    /// Returns the new membership. If the write fails the flip is undone.
    pub fn toggle(&mut self, id: &str, store: &mut dyn PreferenceStore) -> Result<bool> {
        let now_favorite = if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        };

        if let Err(e) = self.persist(store) {
            if now_favorite {
                self.ids.remove(id);
            } else {
                self.ids.insert(id.to_string());
            }
            return Err(e);
        }

        tracing::info!(id, favorite = now_favorite, total = self.ids.len(), "Favorite toggled");
        Ok(now_favorite)
    }

    fn persist(&self, store: &mut dyn PreferenceStore) -> Result<()> {
        let ids: Vec<&String> = self.ids.iter().collect();
        store.set(FAVORITES_KEY, serde_json::to_string(&ids)?)
    }
}
