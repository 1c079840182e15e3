use crate::dataset::{Dataset, DatasetError};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// One drawn word together with the category it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pick {
    pub word: String,
    pub category: String,
}

/// Seam between the session and its randomness, so the reducer stays
/// deterministic under test.
pub trait WordPicker: std::fmt::Debug {
    fn pick(&mut self, dataset: &Dataset) -> Result<Pick, DatasetError>;
}

/// Uniform pick of a category, then a uniform pick within it.
#[derive(Debug)]
pub struct RandomPicker {
    rng: StdRng,
}

impl RandomPicker {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible word sequence for demos and debugging.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl WordPicker for RandomPicker {
    fn pick(&mut self, dataset: &Dataset) -> Result<Pick, DatasetError> {
        let categories: Vec<&String> = dataset.categories.keys().collect();
        let category = categories
            .choose(&mut self.rng)
            .ok_or(DatasetError::NoCategories)?;

        let words = &dataset.categories[*category];
        let word = words
            .choose(&mut self.rng)
            .ok_or_else(|| DatasetError::EmptyCategory((*category).clone()))?;

        Ok(Pick {
            word: word.clone(),
            category: (*category).clone(),
        })
    }
}

/// Hands out a fixed sequence of picks, repeating the last one once the
/// script runs out. For tests.
#[derive(Debug)]
pub struct ScriptedPicker {
    picks: Vec<Pick>,
    next: usize,
}

impl ScriptedPicker {
    pub fn new(picks: Vec<Pick>) -> Self {
        assert!(!picks.is_empty(), "scripted picker needs at least one pick");
        Self { picks, next: 0 }
    }
}

impl WordPicker for ScriptedPicker {
    fn pick(&mut self, _dataset: &Dataset) -> Result<Pick, DatasetError> {
        let idx = self.next.min(self.picks.len() - 1);
        self.next += 1;
        Ok(self.picks[idx].clone())
    }
}
