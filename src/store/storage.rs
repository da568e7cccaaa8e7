use super::record::{to_row, ListingRecord, HEADERS};
use super::SavedListing;
use crate::error::{Error, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Get the default store path (~/.config/rent-rank/saved_rentals.csv)
pub fn get_store_path() -> PathBuf {
    crate::config::get_config_dir().join("saved_rentals.csv")
}

fn io_error(path: &Path, source: io::Error) -> Error {
    Error::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Read every row of a listing CSV.
///
/// All-or-nothing: the first bad row fails the whole load.
pub fn read_listings(path: &Path) -> Result<Vec<SavedListing>> {
    let file = File::open(path).map_err(|e| io_error(path, e))?;
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(file);

    let mut listings = Vec::new();
    for (i, result) in reader.deserialize::<ListingRecord>().enumerate() {
        let row = i + 1;
        let record = result.map_err(|e| {
            if e.is_io_error() {
                io_error(path, io::Error::from(e))
            } else {
                Error::PersistenceCorruption {
                    row,
                    field: "record",
                    reason: e.to_string(),
                }
            }
        })?;
        listings.push(record.parse(row)?);
    }
    Ok(listings)
}

/// Write listings to a CSV file atomically.
///
/// The header is always written, so an empty store produces a header-only
/// file. Creates the parent directory if it doesn't exist.
pub fn write_listings(path: &Path, listings: &[SavedListing]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }

    let mut file = AtomicWriteFile::open(path).map_err(|e| io_error(path, e))?;
    {
        let mut writer = csv::Writer::from_writer(&mut file);
        writer
            .write_record(HEADERS)
            .map_err(|e| io_error(path, e.into()))?;
        for saved in listings {
            writer
                .write_record(to_row(saved)?)
                .map_err(|e| io_error(path, e.into()))?;
        }
        writer.flush().map_err(|e| io_error(path, e))?;
    }
    file.flush().map_err(|e| io_error(path, e))?;
    file.commit().map_err(|e| io_error(path, e))?;

    Ok(())
}
