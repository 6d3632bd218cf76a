//! Reads earthquake listings into a [`Catalog`].
//!
//! The expected input is delimited text with a header line, one event per
//! record, latitude in the second column and longitude in the third (the
//! USGS feed layout: `time,latitude,longitude,depth,mag,...`). Points are
//! stored as `[longitude, latitude]` so that the first coordinate is the
//! horizontal one.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::{Error, Result};

const LATITUDE_COLUMN: usize = 1;
const LONGITUDE_COLUMN: usize = 2;

/// Delimited-text reader configuration.
#[derive(Debug, Clone)]
pub struct Loader {
    delimiter: u8,
}

impl Loader {
    /// Comma-delimited loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Load a catalog from a file.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<Catalog> {
        let path = path.as_ref();
        let catalog = self.load_reader(File::open(path)?)?;
        debug!(path = %path.display(), points = catalog.len(), "loaded catalog");
        Ok(catalog)
    }

    /// Load a catalog from any byte source. The first line is a header.
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<Catalog> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.delimiter)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut points = Vec::new();
        for (idx, record) in rdr.records().enumerate() {
            let record = record?;
            // Header is line 1; fall back to counting if csv has no position.
            let line = record
                .position()
                .map(|p| p.line())
                .unwrap_or(idx as u64 + 2);
            let lat = field(&record, LATITUDE_COLUMN, "latitude", line)?;
            let lon = field(&record, LONGITUDE_COLUMN, "longitude", line)?;
            points.push(vec![lon, lat]);
        }
        Ok(Catalog::from_points(points))
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

fn field(record: &StringRecord, column: usize, name: &str, line: u64) -> Result<f64> {
    let raw = record.get(column).ok_or_else(|| Error::Parse {
        line,
        message: format!("missing {name} column"),
    })?;
    raw.parse().map_err(|e| Error::Parse {
        line,
        message: format!("invalid {name} {raw:?}: {e}"),
    })
}

/// Load a comma-delimited catalog from `path`.
pub fn read_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    Loader::new().load(path)
}
