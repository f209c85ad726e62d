use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SeedError};
use crate::text::normalize_for_match;

/// A country as referenced in the graph path: QID plus display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRef {
    pub country_qid: String,
    pub country_label: String,
}

fn column_index(headers: &csv::StringRecord, column: &str, path: &Path) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}').trim() == column)
        .ok_or_else(|| SeedError::MissingColumn {
            column: column.to_string(),
            path: path.display().to_string(),
        })
}

/// Loads the country list: one label per row under `country_label`.
///
/// Blank labels are skipped; duplicates collapse to the first occurrence,
/// order preserved.
pub fn load_countries(path: &Path) -> Result<Vec<String>> {
    let mut reader = csv::Reader::from_path(path)?;
    let idx = column_index(&reader.headers()?.clone(), "country_label", path)?;

    let mut seen = HashSet::new();
    let mut countries = Vec::new();
    for record in reader.records() {
        let record = record?;
        let label = record.get(idx).unwrap_or("").trim();
        if !label.is_empty() && seen.insert(label.to_string()) {
            countries.push(label.to_string());
        }
    }
    Ok(countries)
}

/// Loads (QID, label) country rows for the graph fetch path. Rows missing
/// either value are skipped; duplicate QIDs collapse to first occurrence.
pub fn load_country_refs(path: &Path) -> Result<Vec<CountryRef>> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    let qid_idx = column_index(&headers, "country_qid", path)?;
    let label_idx = column_index(&headers, "country_label", path)?;

    let mut seen = HashSet::new();
    let mut countries = Vec::new();
    for record in reader.records() {
        let record = record?;
        let qid = record.get(qid_idx).unwrap_or("").trim();
        let label = record.get(label_idx).unwrap_or("").trim();
        if qid.is_empty() || label.is_empty() {
            continue;
        }
        if seen.insert(qid.to_string()) {
            countries.push(CountryRef {
                country_qid: qid.to_string(),
                country_label: label.to_string(),
            });
        }
    }
    Ok(countries)
}

/// Builds the normalized-key exclusion set from a manually curated list.
///
/// A missing file is an empty set, not an error; the manual list is
/// optional. A present file without a `name` column is a configuration
/// error.
pub fn load_manual_seed_keys(path: &Path) -> Result<HashSet<String>> {
    if !path.exists() {
        return Ok(HashSet::new());
    }

    let mut reader = csv::Reader::from_path(path)?;
    let idx = column_index(&reader.headers()?.clone(), "name", path)?;

    let mut keys = HashSet::new();
    for record in reader.records() {
        let record = record?;
        let name = record.get(idx).unwrap_or("").trim();
        if name.is_empty() {
            continue;
        }
        let key = normalize_for_match(name);
        if !key.is_empty() {
            keys.insert(key);
        }
    }
    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_countries_skips_blanks_and_duplicates() {
        let file = csv_file("country_label,tier\nKenya,1\n ,2\nPeru,1\nKenya,3\n");
        let countries = load_countries(file.path()).unwrap();
        assert_eq!(countries, vec!["Kenya", "Peru"]);
    }

    #[test]
    fn test_load_countries_missing_column_is_fatal() {
        let file = csv_file("nation,tier\nKenya,1\n");
        let err = load_countries(file.path()).unwrap_err();
        assert!(matches!(err, SeedError::MissingColumn { ref column, .. } if column == "country_label"));
    }

    #[test]
    fn test_load_countries_tolerates_bom() {
        let file = csv_file("\u{feff}country_label\nKenya\n");
        let countries = load_countries(file.path()).unwrap();
        assert_eq!(countries, vec!["Kenya"]);
    }

    #[test]
    fn test_load_country_refs() {
        let file = csv_file(
            "country_qid,country_label\nQ114,Kenya\nQ419,Peru\n,Nowhere\nQ114,Kenya Again\n",
        );
        let refs = load_country_refs(file.path()).unwrap();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].country_qid, "Q114");
        assert_eq!(refs[0].country_label, "Kenya");
        assert_eq!(refs[1].country_qid, "Q419");
    }

    #[test]
    fn test_manual_keys_are_normalized() {
        let file = csv_file("name,notes\nOfgem,x\nComisión Nacional de Energía,y\n  ,z\n");
        let keys = load_manual_seed_keys(file.path()).unwrap();
        assert!(keys.contains("ofgem"));
        assert!(keys.contains("comision nacional de energia"));
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn test_manual_keys_missing_file_is_empty() {
        let keys = load_manual_seed_keys(Path::new("does/not/exist.csv")).unwrap();
        assert!(keys.is_empty());
    }

    #[test]
    fn test_manual_keys_missing_column_is_fatal() {
        let file = csv_file("institution\nOfgem\n");
        let err = load_manual_seed_keys(file.path()).unwrap_err();
        assert!(matches!(err, SeedError::MissingColumn { ref column, .. } if column == "name"));
    }
}
