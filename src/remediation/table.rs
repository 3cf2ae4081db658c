//! Read-only remediation table loaded from CSV.

use crate::constants::remediation::{NO_SOLUTION, UPDATE_TABLE};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// One row of the remediation table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemediationEntry {
    /// Disease label as produced by the classifiers.
    #[serde(rename = "Crop & Disease Name")]
    pub label: String,

    /// Short-term organic or cultural treatment.
    #[serde(
        rename = "Temporary Solution",
        alias = "Temporary Solution (Organic & Cultural)"
    )]
    pub temporary: String,

    /// Long-term chemical or cultural treatment.
    #[serde(
        rename = "Permanent Solution",
        alias = "Permanent Solution (Chemical/Spray & Cultural)"
    )]
    pub permanent: String,
}

/// Treatment text for a diagnosed label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remedy {
    /// Temporary solution.
    pub temporary: String,
    /// Permanent solution.
    pub permanent: String,
}

impl Remedy {
    /// Sentinel pair returned for labels missing from the table.
    pub fn not_found() -> Self {
        Self {
            temporary: NO_SOLUTION.to_string(),
            permanent: UPDATE_TABLE.to_string(),
        }
    }
}

/// Label-keyed remediation lookup, case-insensitive exact match.
#[derive(Debug, Clone, Default)]
pub struct RemediationTable {
    entries: HashMap<String, RemediationEntry>,
}

impl RemediationTable {
    /// Table with no entries; every lookup returns the sentinel pair.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the table from a CSV file.
    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|e| Error::RemediationRead {
            path: path.to_path_buf(),
            source: e.into(),
        })?;

        let table = Self::from_reader(file).map_err(|e| Error::RemediationRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        info!(
            "Loaded {} remediation entries from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    /// Parse the table from any CSV source. The first row is the header.
    pub fn from_reader<R: Read>(reader: R) -> std::result::Result<Self, csv::Error> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut entries = HashMap::new();
        for row in csv_reader.deserialize() {
            let entry: RemediationEntry = row?;
            let key = entry.label.to_lowercase();
            if entries.contains_key(&key) {
                debug!("Duplicate remediation label ignored: {}", entry.label);
                continue;
            }
            entries.insert(key, entry);
        }

        Ok(Self { entries })
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the entry for a label, ignoring case.
    pub fn get(&self, label: &str) -> Option<&RemediationEntry> {
        self.entries.get(&label.to_lowercase())
    }

    /// Resolve a label to its treatment pair, falling back to the sentinels.
    pub fn resolve(&self, label: &str) -> Remedy {
        self.get(label).map_or_else(Remedy::not_found, |entry| Remedy {
            temporary: entry.temporary.clone(),
            permanent: entry.permanent.clone(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const TABLE: &str = "\
Crop & Disease Name,Temporary Solution,Permanent Solution
Corn_Blight,Remove infected leaves,\"Apply mancozeb, rotate crops\"
Apple___Apple_scab,Rake fallen leaves,Plant resistant cultivars
corn_blight,Duplicate row,Should be ignored
";

    #[test]
    fn test_resolve_is_case_insensitive() {
        let table = RemediationTable::from_reader(TABLE.as_bytes()).unwrap();

        let upper = table.resolve("Corn_Blight");
        let lower = table.resolve("corn_blight");
        assert_eq!(upper, lower);
        assert_eq!(upper.temporary, "Remove infected leaves");
        assert_eq!(upper.permanent, "Apply mancozeb, rotate crops");
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let table = RemediationTable::from_reader(TABLE.as_bytes()).unwrap();
        assert_eq!(
            table.resolve("APPLE___APPLE_SCAB"),
            table.resolve("APPLE___APPLE_SCAB")
        );
    }

    #[test]
    fn test_first_duplicate_wins() {
        let table = RemediationTable::from_reader(TABLE.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.resolve("CORN_BLIGHT").temporary, "Remove infected leaves");
    }

    #[test]
    fn test_miss_returns_sentinels() {
        let table = RemediationTable::from_reader(TABLE.as_bytes()).unwrap();
        let remedy = table.resolve("Tomato___Late_blight");
        assert_eq!(remedy.temporary, "No solution found.");
        assert_eq!(remedy.permanent, "Please update CSV.");
    }

    #[test]
    fn test_match_is_exact_not_substring() {
        let table = RemediationTable::from_reader(TABLE.as_bytes()).unwrap();
        assert!(table.get("Corn").is_none());
        assert!(table.get("Corn_Blight_extra").is_none());
    }

    #[test]
    fn test_empty_table_always_misses() {
        let table = RemediationTable::empty();
        assert!(table.is_empty());
        assert_eq!(table.resolve("anything"), Remedy::not_found());
    }

    #[test]
    fn test_long_header_aliases() {
        let csv = "\
Crop & Disease Name,Temporary Solution (Organic & Cultural),Permanent Solution (Chemical/Spray & Cultural),Notes
Grape___Black_rot,Prune cankers,Copper spray,extra column
";
        let table = RemediationTable::from_reader(csv.as_bytes()).unwrap();
        let remedy = table.resolve("grape___black_rot");
        assert_eq!(remedy.temporary, "Prune cankers");
        assert_eq!(remedy.permanent, "Copper spray");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{TABLE}").unwrap();

        let table = RemediationTable::load(file.path()).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let result = RemediationTable::load(Path::new("/nonexistent/solutions.csv"));
        assert!(matches!(result, Err(Error::RemediationRead { .. })));
    }

    #[test]
    fn test_missing_column_is_error() {
        let csv = "Crop & Disease Name,Temporary Solution\nCorn,x\n";
        assert!(RemediationTable::from_reader(csv.as_bytes()).is_err());
    }
}
