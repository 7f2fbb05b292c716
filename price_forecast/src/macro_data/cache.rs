//! Memoization of provider results

use super::{MacroData, MacroIndicatorProvider};
use crate::error::ProviderError;
use chrono::NaiveDate;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use tracing::debug;

/// Number of date lists remembered by `CachingProvider::new`
pub const DEFAULT_CACHE_CAPACITY: usize = 32;

#[derive(Debug, Default)]
struct Entries {
    data: HashMap<Vec<NaiveDate>, MacroData>,
    // Keys from oldest to newest insertion
    order: VecDeque<Vec<NaiveDate>>,
}

/// Wraps a provider and remembers its answer for each exact list of dates.
///
/// A changed price history or a new "today" produces a different date list
/// and therefore a fresh fetch. At most `capacity` lists are kept; the oldest
/// one is dropped first. `invalidate` drops everything remembered so far.
#[derive(Debug)]
pub struct CachingProvider<P> {
    inner: P,
    capacity: usize,
    entries: RefCell<Entries>,
    misses: Cell<usize>,
}

impl<P: MacroIndicatorProvider> CachingProvider<P> {
    pub fn new(inner: P) -> Self {
        Self::with_capacity(inner, DEFAULT_CACHE_CAPACITY)
    }

    /// Cache holding at most `capacity` date lists; zero disables caching
    pub fn with_capacity(inner: P, capacity: usize) -> Self {
        Self {
            inner,
            capacity,
            entries: RefCell::new(Entries::default()),
            misses: Cell::new(0),
        }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of date lists currently remembered
    pub fn len(&self) -> usize {
        self.entries.borrow().data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of requests that reached the wrapped provider
    pub fn misses(&self) -> usize {
        self.misses.get()
    }

    pub fn invalidate(&self) {
        let mut entries = self.entries.borrow_mut();
        entries.data.clear();
        entries.order.clear();
    }
}

impl<P: MacroIndicatorProvider> MacroIndicatorProvider for CachingProvider<P> {
    fn fetch(&self, dates: &[NaiveDate]) -> Result<MacroData, ProviderError> {
        if let Some(hit) = self.entries.borrow().data.get(dates) {
            debug!(dates = dates.len(), "macro data served from cache");
            return Ok(hit.clone());
        }

        let data = self.inner.fetch(dates)?;
        self.misses.set(self.misses.get() + 1);
        if self.capacity == 0 {
            return Ok(data);
        }

        let mut entries = self.entries.borrow_mut();
        while entries.order.len() >= self.capacity {
            if let Some(oldest) = entries.order.pop_front() {
                entries.data.remove(&oldest);
            }
        }
        entries.order.push_back(dates.to_vec());
        entries.data.insert(dates.to_vec(), data.clone());
        Ok(data)
    }
}
