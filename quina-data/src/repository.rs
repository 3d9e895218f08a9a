use std::collections::hash_map::Entry;
use std::collections::HashMap;

use anyhow::Result;
use tracing::debug;

use crate::models::Draw;

/// Source des tirages historiques. `draws(Some(n))` renvoie les `n` concours
/// les plus récents, `draws(None)` tout l'historique ; toujours par id croissant.
pub trait DrawRepository {
    fn draws(&self, window: Option<usize>) -> Result<Vec<Draw>>;

    fn count(&self) -> Result<usize>;

    fn find(&self, id: u32) -> Result<Option<Draw>> {
        Ok(self.draws(None)?.into_iter().find(|d| d.id == id))
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    draws: Vec<Draw>,
}

impl MemoryRepository {
    /// Trie par id et ignore les doublons (le premier rencontré est gardé).
    pub fn new(draws: Vec<Draw>) -> Self {
        let mut repo = Self::default();
        for draw in draws {
            repo.insert(draw);
        }
        repo
    }

    /// Renvoie `false` si un concours de même id existe déjà.
    pub fn insert(&mut self, draw: Draw) -> bool {
        match self.draws.binary_search_by_key(&draw.id, |d| d.id) {
            Ok(_) => false,
            Err(pos) => {
                self.draws.insert(pos, draw);
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.draws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }
}

impl DrawRepository for MemoryRepository {
    fn draws(&self, window: Option<usize>) -> Result<Vec<Draw>> {
        let start = match window {
            Some(n) => self.draws.len().saturating_sub(n),
            None => 0,
        };
        Ok(self.draws[start..].to_vec())
    }

    fn count(&self) -> Result<usize> {
        Ok(self.draws.len())
    }

    fn find(&self, id: u32) -> Result<Option<Draw>> {
        Ok(self
            .draws
            .binary_search_by_key(&id, |d| d.id)
            .ok()
            .map(|idx| self.draws[idx].clone()))
    }
}

/// Cache explicite des fenêtres déjà chargées, indexé par taille de fenêtre.
/// À vider avec `invalidate` dès que la source change.
pub struct WindowCache<R> {
    repo: R,
    /// Jamais purgé : un appelant de longue durée doit appeler `invalidate`.
    entries: HashMap<Option<usize>, Vec<Draw>>,
}

impl<R: DrawRepository> WindowCache<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            entries: HashMap::new(),
        }
    }

    pub fn window(&mut self, size: Option<usize>) -> Result<&[Draw]> {
        match self.entries.entry(size) {
            Entry::Occupied(entry) => Ok(entry.into_mut().as_slice()),
            Entry::Vacant(entry) => {
                let draws = self.repo.draws(size)?;
                debug!(window = ?size, loaded = draws.len(), "fenêtre chargée");
                Ok(entry.insert(draws).as_slice())
            }
        }
    }

    pub fn is_cached(&self, size: Option<usize>) -> bool {
        self.entries.contains_key(&size)
    }

    pub fn invalidate(&mut self) {
        self.entries.clear();
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }
}
