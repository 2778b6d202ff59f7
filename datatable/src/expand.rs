use crate::key::KeySet;
use crate::RowKey;

/// The expansion store: a set of expanded row identities, disjoint from and
/// independent of selection, with the same identity-keyed survival rules.
/// There is no expand-all analog.
#[derive(Clone, Debug, Default)]
pub(crate) struct Expansion {
    expanded: KeySet<RowKey>,
}

impl Expansion {
    pub(crate) fn is_expanded(&self, key: RowKey) -> bool {
        self.expanded.contains(&key)
    }

    pub(crate) fn expand(&mut self, key: RowKey, on: bool) {
        if on {
            self.expanded.insert(key);
        } else {
            self.expanded.remove(&key);
        }
    }

    pub(crate) fn toggle(&mut self, key: RowKey) {
        let on = !self.is_expanded(key);
        self.expand(key, on);
    }

    pub(crate) fn len(&self) -> usize {
        self.expanded.len()
    }

    pub(crate) fn retain_live(&mut self, live: &KeySet<RowKey>) {
        self.expanded.retain(|k| live.contains(k));
    }
}
