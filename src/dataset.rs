use include_dir::{include_dir, Dir};
use serde::Deserialize;
use serde_json::from_str;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;

static DATA_DIR: Dir = include_dir!("src/data");

/// Category -> word list mapping the picker draws from.
///
/// A `BTreeMap` keeps category iteration order stable, so a seeded picker
/// produces the same word sequence on every run.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Dataset {
    pub name: String,
    pub categories: BTreeMap<String, Vec<String>>,
}

/// The supplied mapping cannot seed a round. Fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetError {
    NoCategories,
    EmptyCategory(String),
    UnknownCategory(String),
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::NoCategories => write!(f, "dataset has no categories"),
            DatasetError::EmptyCategory(name) => {
                write!(f, "category '{name}' has no words")
            }
            DatasetError::UnknownCategory(name) => {
                write!(f, "category '{name}' is not in the dataset")
            }
        }
    }
}

impl Error for DatasetError {}

impl Dataset {
    /// The dataset compiled into the binary.
    pub fn embedded() -> Self {
        let file = DATA_DIR
            .get_file("words.json")
            .expect("embedded dataset not found");

        let contents = file
            .contents_utf8()
            .expect("unable to interpret embedded dataset as a string");

        from_str(contents).expect("unable to deserialize embedded dataset json")
    }

    /// Load a user-supplied dataset with the same schema as the embedded one.
    pub fn from_path(path: &Path) -> Result<Self, Box<dyn Error>> {
        let contents = fs::read_to_string(path)?;
        let dataset = Self::from_json(&contents)?;
        Ok(dataset)
    }

    pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        from_str(contents)
    }

    /// Rounds can only be seeded from a non-empty mapping where every
    /// category has at least one word.
    pub fn validate(&self) -> Result<(), DatasetError> {
        if self.categories.is_empty() {
            return Err(DatasetError::NoCategories);
        }
        for (name, words) in &self.categories {
            if words.is_empty() {
                return Err(DatasetError::EmptyCategory(name.clone()));
            }
        }
        Ok(())
    }

    /// Narrow the dataset to a single category.
    pub fn restricted_to(&self, category: &str) -> Result<Self, DatasetError> {
        match self.categories.get(category) {
            Some(words) => Ok(Self {
                name: self.name.clone(),
                categories: BTreeMap::from([(category.to_string(), words.clone())]),
            }),
            None => Err(DatasetError::UnknownCategory(category.to_string())),
        }
    }

    pub fn word_count(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }
}
