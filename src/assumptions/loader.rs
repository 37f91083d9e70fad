//! Load assumption sets from JSON files

use super::Assumptions;
use crate::error::Result;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

impl Assumptions {
    /// Parse assumptions from a reader; omitted keys take their defaults
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        let assumptions: Assumptions = serde_json::from_reader(reader)?;
        assumptions.validate()?;
        Ok(assumptions)
    }

    /// Load assumptions from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Loading assumptions from {}", path.display());
        let file = File::open(path)?;
        Self::from_json_reader(BufReader::new(file))
    }
}
