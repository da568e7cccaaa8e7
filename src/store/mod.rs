mod record;
pub mod storage;

pub use record::HEADERS;
pub use storage::{get_store_path, read_listings, write_listings};

use crate::error::{Error, Result};
use crate::listing::RentalListing;
use std::path::Path;
use tracing::{debug, info};

/// A listing together with the overall score it was saved with.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedListing {
    pub listing: RentalListing,
    pub overall_score: f64,
}

/// In-memory collection of scored listings, in insertion order.
#[derive(Debug, Default)]
pub struct ListingStore {
    entries: Vec<SavedListing>,
}

impl ListingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from `path`, or start empty if the file doesn't exist.
    pub fn open(path: &Path) -> Result<Self> {
        let mut store = Self::new();
        if path.exists() {
            store.load(path)?;
        } else {
            debug!(path = %path.display(), "no saved listings yet");
        }
        Ok(store)
    }

    pub fn add(&mut self, listing: RentalListing, overall_score: f64) -> Result<&SavedListing> {
        if !overall_score.is_finite() {
            return Err(Error::validation(
                "overall score",
                format!("{} is not a finite number", overall_score),
            ));
        }
        self.entries.push(SavedListing {
            listing,
            overall_score,
        });
        let index = self.entries.len() - 1;
        Ok(&self.entries[index])
    }

    pub fn list(&self) -> &[SavedListing] {
        &self.entries
    }

    /// Listings by descending overall score. Ties keep insertion order.
    pub fn ranked(&self) -> Vec<&SavedListing> {
        self.ranked_with_positions()
            .into_iter()
            .map(|(_, saved)| saved)
            .collect()
    }

    /// Like [`ListingStore::ranked`], paired with each listing's 1-based
    /// position for [`ListingStore::get`] and [`ListingStore::remove`].
    pub fn ranked_with_positions(&self) -> Vec<(usize, &SavedListing)> {
        let mut ranked: Vec<(usize, &SavedListing)> =
            self.entries.iter().enumerate().map(|(i, s)| (i + 1, s)).collect();
        ranked.sort_by(|(_, a), (_, b)| b.overall_score.total_cmp(&a.overall_score));
        ranked
    }

    /// Look up by 1-based position in insertion order.
    pub fn get(&self, index: usize) -> Result<&SavedListing> {
        self.check_index(index)?;
        Ok(&self.entries[index - 1])
    }

    /// Remove by 1-based position in insertion order.
    pub fn remove(&mut self, index: usize) -> Result<SavedListing> {
        self.check_index(index)?;
        Ok(self.entries.remove(index - 1))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        write_listings(path, &self.entries)?;
        info!(path = %path.display(), count = self.entries.len(), "saved listings");
        Ok(())
    }

    /// Replace the contents with the listings stored at `path`.
    ///
    /// Any bad row fails the load and leaves the current contents untouched.
    pub fn load(&mut self, path: &Path) -> Result<usize> {
        let loaded = read_listings(path)?;
        self.entries = loaded;
        info!(path = %path.display(), count = self.entries.len(), "loaded listings");
        Ok(self.entries.len())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index == 0 || index > self.entries.len() {
            return Err(Error::validation(
                "listing number",
                format!("{} is out of range (1-{})", index, self.entries.len()),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::listing::NewListing;
    use std::collections::BTreeMap;
    use std::env;
    use std::fs;

    fn listing(address: &str) -> RentalListing {
        RentalListing::from_parts(NewListing {
            address,
            monthly_rent: 1400.0,
            zip_code: "20742",
            utilities_included: true,
            unit_type: "2x2",
            lease_term_months: 1,
            distances: BTreeMap::from([("bike".to_string(), 2.0)]),
        })
        .unwrap()
    }

    fn store() -> ListingStore {
        let mut store = ListingStore::new();
        store.add(listing("1 First St"), 6.0).unwrap();
        store.add(listing("2 Second St"), 9.5).unwrap();
        store.add(listing("3 Third St"), 6.0).unwrap();
        store
    }

    #[test]
    fn test_add_rejects_non_finite_score() {
        let mut store = ListingStore::new();
        assert!(store.add(listing("1 First St"), f64::NAN).is_err());
        assert!(store.is_empty());
        // Overall scores are not capped at 10
        assert!(store.add(listing("1 First St"), 10.6).is_ok());
        assert!(store.add(listing("2 Second St"), -0.7).is_ok());
    }

    #[test]
    fn test_ranked_descending_stable() {
        let store = store();
        let ranked: Vec<&str> = store.ranked().iter().map(|s| s.listing.address()).collect();
        assert_eq!(ranked, vec!["2 Second St", "1 First St", "3 Third St"]);
        assert_eq!(store.list()[0].listing.address(), "1 First St");

        let positions: Vec<usize> = store.ranked_with_positions().iter().map(|(p, _)| *p).collect();
        assert_eq!(positions, vec![2, 1, 3]);
    }

    #[test]
    fn test_remove_by_position() {
        let mut store = store();
        let removed = store.remove(2).unwrap();
        assert_eq!(removed.listing.address(), "2 Second St");
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(2).unwrap().listing.address(), "3 Third St");
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut store = store();
        assert_eq!(store.remove(0).unwrap_err().kind(), ErrorKind::Validation);
        assert!(store.remove(4).is_err());
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = env::temp_dir().join("rent_rank_test_store_roundtrip.csv");
        let _ = fs::remove_file(&path);

        let original = store();
        original.save(&path).unwrap();

        let mut loaded = ListingStore::new();
        assert_eq!(loaded.load(&path).unwrap(), 3);
        assert_eq!(loaded.list(), original.list());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_failed_load_keeps_current_listings() {
        let path = env::temp_dir().join("rent_rank_test_store_corrupt.csv");
        let _ = fs::remove_file(&path);

        store().save(&path).unwrap();
        let corrupted = fs::read_to_string(&path).unwrap().replace(",9.5,", ",TEN,");
        fs::write(&path, corrupted).unwrap();

        let mut current = ListingStore::new();
        current.add(listing("9 Ninth St"), 5.0).unwrap();
        let err = current.load(&path).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::PersistenceCorruption);
        assert_eq!(current.len(), 1);
        assert_eq!(current.list()[0].listing.address(), "9 Ninth St");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let path = env::temp_dir().join("rent_rank_test_store_open_missing.csv");
        let _ = fs::remove_file(&path);

        let store = ListingStore::open(&path).unwrap();
        assert!(store.is_empty());

        let mut store = ListingStore::new();
        assert_eq!(store.load(&path).unwrap_err().kind(), ErrorKind::Io);
    }
}
