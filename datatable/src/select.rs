use crate::key::KeySet;
use crate::RowKey;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectMode {
    Single,
    #[default]
    Multi,
}

/// The selection store: a set of selected row identities.
///
/// Owned by the table instance and keyed by identity, so pipeline rebuilds
/// (filter/sort/group changes) never disturb it; keys are pruned only when
/// their row leaves the item set entirely.
#[derive(Clone, Debug)]
pub(crate) struct Selection {
    selected: KeySet<RowKey>,
    mode: SelectMode,
}

impl Selection {
    pub(crate) fn new(mode: SelectMode) -> Self {
        Self {
            selected: KeySet::new(),
            mode,
        }
    }

    pub(crate) fn mode(&self) -> SelectMode {
        self.mode
    }

    pub(crate) fn set_mode(&mut self, mode: SelectMode) {
        self.mode = mode;
    }

    pub(crate) fn is_selected(&self, key: RowKey) -> bool {
        self.selected.contains(&key)
    }

    pub(crate) fn select(&mut self, key: RowKey, on: bool) {
        if on {
            if self.mode == SelectMode::Single {
                self.selected.clear();
            }
            self.selected.insert(key);
        } else {
            self.selected.remove(&key);
        }
    }

    pub(crate) fn toggle(&mut self, key: RowKey) {
        let on = !self.is_selected(key);
        self.select(key, on);
    }

    /// Applies to the full candidate set. In single-select mode, selecting
    /// all is meaningless and ignored; deselecting all still clears.
    pub(crate) fn select_all(&mut self, candidates: &[RowKey], on: bool) {
        if !on {
            self.selected.clear();
            return;
        }
        if self.mode == SelectMode::Single {
            twarn!("select_all ignored in single-select mode");
            return;
        }
        self.selected.extend(candidates.iter().copied());
    }

    pub(crate) fn some_selected(&self, candidates: &[RowKey]) -> bool {
        candidates.iter().any(|k| self.selected.contains(k))
    }

    pub(crate) fn all_selected(&self, candidates: &[RowKey]) -> bool {
        !candidates.is_empty() && candidates.iter().all(|k| self.selected.contains(k))
    }

    pub(crate) fn len(&self) -> usize {
        self.selected.len()
    }

    /// Drops keys whose rows left the item set.
    pub(crate) fn retain_live(&mut self, live: &KeySet<RowKey>) {
        self.selected.retain(|k| live.contains(k));
    }
}
