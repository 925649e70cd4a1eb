use thiserror::Error;
use tracing::debug;

use crate::storage::{self, KeyValueStore};

pub const LIKED_KEY: &str = "liked";

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Storage(#[from] storage::Error),

    #[error("Stored liked pictures are not a list of dates: {0}")]
    Corrupt(serde_json::Error),

    #[error("Failed to encode liked pictures: {0}")]
    Encode(serde_json::Error),
}

pub type Result<T> = core::result::Result<T, Error>;

/// Dates of liked pictures, in the order they were liked. Never holds a
/// date twice.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LikedSet {
    dates: Vec<String>,
}

impl LikedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, date: &str) -> bool {
        self.dates.iter().any(|liked| liked == date)
    }

    /// Returns `false` when the date was already liked.
    pub fn insert<T: Into<String>>(&mut self, date: T) -> bool {
        let date = date.into();
        if self.contains(&date) {
            return false;
        }

        self.dates.push(date);
        true
    }

    pub fn remove(&mut self, date: &str) -> bool {
        let before = self.dates.len();
        self.dates.retain(|liked| liked != date);

        self.dates.len() != before
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl<T: Into<String>> FromIterator<T> for LikedSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        for date in iter {
            set.insert(date);
        }

        set
    }
}

pub struct LikeStore<S> {
    store: S,
}

impl<S: KeyValueStore> LikeStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// An absent or empty value is an empty set.
    pub fn load(&self) -> Result<LikedSet> {
        let Some(raw) = self.store.get(LIKED_KEY)? else {
            return Ok(LikedSet::new());
        };

        if raw.trim().is_empty() {
            return Ok(LikedSet::new());
        }

        let dates: Vec<String> = serde_json::from_str(&raw).map_err(Error::Corrupt)?;
        debug!(count = dates.len(), "restored liked pictures");

        Ok(dates.into_iter().collect())
    }

    pub fn save(&mut self, liked: &LikedSet) -> Result<()> {
        let raw = serde_json::to_string(&liked.dates).map_err(Error::Encode)?;
        self.store.set(LIKED_KEY, raw)?;

        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
