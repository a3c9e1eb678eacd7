//! The result of one comparison run: a list of folder pairs.

use std::ops::{Index, IndexMut};

use tracing::debug;

use crate::base::BaseFolderPair;
use crate::handle::ObjectMut;
use crate::registry::ObjectId;
use crate::view::ObjectRef;

/// Ordered list of compared folder pairs.
#[derive(Debug, Default)]
pub struct FolderComparison {
    pairs: Vec<BaseFolderPair>,
}

impl FolderComparison {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, pair: BaseFolderPair) {
        self.pairs.push(pair);
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&BaseFolderPair> {
        self.pairs.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut BaseFolderPair> {
        self.pairs.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BaseFolderPair> {
        self.pairs.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, BaseFolderPair> {
        self.pairs.iter_mut()
    }

    /// Total number of live items across all pairs.
    pub fn item_count(&self) -> usize {
        self.pairs.iter().map(BaseFolderPair::item_count).sum()
    }

    /// Find the pair that issued `id`.
    pub fn pair_of(&self, id: ObjectId) -> Option<&BaseFolderPair> {
        self.pairs.iter().find(|pair| pair.tree_id() == id.tree())
    }

    /// Resolve a handle from any pair of this comparison.
    pub fn resolve(&self, id: ObjectId) -> Option<ObjectRef<'_>> {
        self.pair_of(id)?.resolve(id)
    }

    pub fn resolve_mut(&mut self, id: ObjectId) -> Option<ObjectMut<'_>> {
        self.pairs
            .iter_mut()
            .find(|pair| pair.tree_id() == id.tree())?
            .resolve_mut(id)
    }

    /// Swap left and right in every pair.
    pub fn flip(&mut self) {
        for pair in &mut self.pairs {
            pair.flip();
        }
    }

    /// Prune items missing on both sides in every pair.
    pub fn remove_empty(&mut self) -> usize {
        let removed: usize = self.pairs.iter_mut().map(BaseFolderPair::remove_empty).sum();
        debug!(pairs = self.pairs.len(), removed, "pruned comparison");
        removed
    }
}

impl Index<usize> for FolderComparison {
    type Output = BaseFolderPair;

    fn index(&self, index: usize) -> &BaseFolderPair {
        &self.pairs[index]
    }
}

impl IndexMut<usize> for FolderComparison {
    fn index_mut(&mut self, index: usize) -> &mut BaseFolderPair {
        &mut self.pairs[index]
    }
}

impl From<Vec<BaseFolderPair>> for FolderComparison {
    fn from(pairs: Vec<BaseFolderPair>) -> Self {
        Self { pairs }
    }
}

impl FromIterator<BaseFolderPair> for FolderComparison {
    fn from_iter<I: IntoIterator<Item = BaseFolderPair>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for FolderComparison {
    type Item = BaseFolderPair;
    type IntoIter = std::vec::IntoIter<BaseFolderPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

impl<'a> IntoIterator for &'a FolderComparison {
    type Item = &'a BaseFolderPair;
    type IntoIter = std::slice::Iter<'a, BaseFolderPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

impl<'a> IntoIterator for &'a mut FolderComparison {
    type Item = &'a mut BaseFolderPair;
    type IntoIter = std::slice::IterMut<'a, BaseFolderPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter_mut()
    }
}
