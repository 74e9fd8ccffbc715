use crate::error::Result;
use polars::prelude::*;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Derived columns computed from a read-only table, keyed by column name
#[derive(Default)]
pub struct DerivedCache {
    data: Mutex<HashMap<String, Series>>,
}

impl DerivedCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Series> {
        let data = self.data.lock().unwrap_or_else(PoisonError::into_inner);
        data.get(key).cloned()
    }

    pub fn set(&self, key: String, value: Series) {
        let mut data = self.data.lock().unwrap_or_else(PoisonError::into_inner);
        data.insert(key, value);
    }

    /// Return the cached series or compute, store and return it.
    ///
    /// Errors from `f` are returned as-is and nothing is cached.
    pub fn get_or_try_insert_with<F>(&self, key: &str, f: F) -> Result<Series>
    where
        F: FnOnce() -> Result<Series>,
    {
        if let Some(series) = self.get(key) {
            return Ok(series);
        }
        log::debug!("Deriving column '{}'", key);
        let series = f()?;
        self.set(key.to_string(), series.clone());
        Ok(series)
    }

    pub fn len(&self) -> usize {
        self.data.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
