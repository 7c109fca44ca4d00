//! Selection and watchlist state

use bevy::prelude::*;
use std::collections::BTreeSet;

use crate::neo::NeoBatch;
use crate::selection::store::WatchlistRepository;

/// The single focused object, by catalog id.
#[derive(Resource, Debug, Default)]
pub struct Selection {
    selected: Option<String>,
}

impl Selection {
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_selected(&self, external_id: &str) -> bool {
        self.selected.as_deref() == Some(external_id)
    }

    /// Replaces the current selection. Ids outside the current batch are
    /// rejected and leave the selection untouched.
    pub fn select(&mut self, batch: &NeoBatch, external_id: &str) -> anyhow::Result<()> {
        anyhow::ensure!(
            batch.contains(external_id),
            "object {} is not in the current batch",
            external_id
        );
        self.selected = Some(external_id.to_string());
        Ok(())
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }
}

/// The signed-in user's bookmarked catalog ids.
#[derive(Resource, Debug, Default)]
pub struct Watchlist {
    user: Option<String>,
    ids: BTreeSet<String>,
}

impl Watchlist {
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn ids(&self) -> &BTreeSet<String> {
        &self.ids
    }

    pub fn contains(&self, external_id: &str) -> bool {
        self.ids.contains(external_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Switches to `user`'s stored list. Storage errors leave an empty list.
    pub fn load_for(&mut self, user: &str, repo: &dyn WatchlistRepository) {
        self.user = Some(user.to_string());
        self.ids = match repo.load(user) {
            Ok(ids) => ids,
            Err(err) => {
                warn!("[WATCHLIST] could not load list for {}: {:#}", user, err);
                BTreeSet::new()
            }
        };
        info!("[WATCHLIST] {} entries for {}", self.ids.len(), user);
    }

    /// Adds `external_id` if absent, removes it otherwise, then writes the full
    /// set. Returns whether the id is on the list afterwards. On a failed write
    /// the in-memory change is rolled back.
    pub fn toggle(
        &mut self,
        external_id: &str,
        repo: &dyn WatchlistRepository,
    ) -> anyhow::Result<bool> {
        let user = self
            .user
            .clone()
            .ok_or_else(|| anyhow::anyhow!("no user signed in"))?;

        let added = if self.ids.remove(external_id) {
            false
        } else {
            self.ids.insert(external_id.to_string());
            true
        };

        if let Err(err) = repo.save(&user, &self.ids) {
            if added {
                self.ids.remove(external_id);
            } else {
                self.ids.insert(external_id.to_string());
            }
            return Err(err);
        }
        Ok(added)
    }

    pub fn clear(&mut self) {
        self.user = None;
        self.ids.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neo::fixtures::record;
    use crate::selection::store::MemoryWatchlistStore;

    struct FailingStore;

    impl WatchlistRepository for FailingStore {
        fn load(&self, _user: &str) -> anyhow::Result<BTreeSet<String>> {
            anyhow::bail!("disk unavailable")
        }
        fn save(&self, _user: &str, _ids: &BTreeSet<String>) -> anyhow::Result<()> {
            anyhow::bail!("disk unavailable")
        }
    }

    fn batch() -> NeoBatch {
        let mut batch = NeoBatch::default();
        batch.replace(vec![record("a", "Alpha"), record("b", "Beta")]);
        batch
    }

    #[test]
    fn select_replaces_previous() {
        let batch = batch();
        let mut selection = Selection::default();
        selection.select(&batch, "a").unwrap();
        selection.select(&batch, "b").unwrap();
        assert_eq!(selection.selected(), Some("b"));
        assert!(!selection.is_selected("a"));
    }

    #[test]
    fn select_unknown_id_fails_and_keeps_selection() {
        let batch = batch();
        let mut selection = Selection::default();
        selection.select(&batch, "a").unwrap();
        assert!(selection.select(&batch, "zzz").is_err());
        assert_eq!(selection.selected(), Some("a"));
    }

    #[test]
    fn select_against_empty_batch_fails() {
        let mut selection = Selection::default();
        assert!(selection.select(&NeoBatch::default(), "a").is_err());
        assert_eq!(selection.selected(), None);
    }

    #[test]
    fn toggle_twice_restores_set() {
        let store = MemoryWatchlistStore::default();
        let mut list = Watchlist::default();
        list.load_for("astro", &store);

        assert!(list.toggle("a", &store).unwrap());
        assert!(list.contains("a"));
        assert!(!list.toggle("a", &store).unwrap());
        assert!(list.ids().is_empty());
        assert!(store.load("astro").unwrap().is_empty());
    }

    #[test]
    fn toggle_persists_whole_set() {
        let store = MemoryWatchlistStore::default();
        let mut list = Watchlist::default();
        list.load_for("astro", &store);
        list.toggle("a", &store).unwrap();
        list.toggle("b", &store).unwrap();

        let mut reloaded = Watchlist::default();
        reloaded.load_for("astro", &store);
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.contains("a") && reloaded.contains("b"));
    }

    #[test]
    fn lists_are_per_user() {
        let store = MemoryWatchlistStore::default();
        let mut list = Watchlist::default();
        list.load_for("astro", &store);
        list.toggle("a", &store).unwrap();

        list.load_for("other", &store);
        assert_eq!(list.user(), Some("other"));
        assert!(!list.contains("a"));
    }

    #[test]
    fn toggle_without_user_fails() {
        let store = MemoryWatchlistStore::default();
        let mut list = Watchlist::default();
        assert!(list.toggle("a", &store).is_err());
        assert!(list.ids().is_empty());
    }

    #[test]
    fn failed_save_rolls_back() {
        let mut list = Watchlist::default();
        list.load_for("astro", &FailingStore);
        assert!(list.ids().is_empty());
        assert!(list.toggle("a", &FailingStore).is_err());
        assert!(!list.contains("a"));
    }
}
