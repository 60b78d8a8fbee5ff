//! CSV Data Loader Module
//! Reads the two Olympic source tables from disk using Polars.

use polars::prelude::*;
use std::path::Path;
use thiserror::Error;

/// Columns the athlete/event table must carry.
pub const EVENT_COLUMNS: [&str; 14] = [
    "Name", "Sex", "Age", "Height", "Weight", "Team", "NOC", "Games", "Year", "Season", "City",
    "Sport", "Event", "Medal",
];

/// Columns the NOC→region mapping table must carry (`notes` is optional).
pub const REGION_COLUMNS: [&str; 2] = ["NOC", "region"];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("File not found: {0}")]
    FileNotFound(String),
    #[error("Column '{column}' missing from {file}")]
    MissingColumn { file: String, column: String },
}

/// Load the athlete/event table (`athlete_events.csv` layout).
///
/// The source data writes missing values as the literal string `NA`
/// (ages, heights, weights and the medal outcome of non-medal rows), so
/// `NA` is declared as the null marker before type inference runs.
pub fn load_events(path: &Path) -> Result<DataFrame, LoaderError> {
    let df = load_csv(path)?;
    check_columns(&df, path, &EVENT_COLUMNS)?;
    log::info!("loaded {} event rows from {}", df.height(), path.display());
    Ok(df)
}

/// Load the NOC→region mapping table (`noc_regions.csv` layout).
pub fn load_regions(path: &Path) -> Result<DataFrame, LoaderError> {
    let df = load_csv(path)?;
    check_columns(&df, path, &REGION_COLUMNS)?;
    log::info!(
        "loaded {} region mappings from {}",
        df.height(),
        path.display()
    );
    Ok(df)
}

/// Read one CSV with lazy scanning, then collect.
fn load_csv(path: &Path) -> Result<DataFrame, LoaderError> {
    if !path.is_file() {
        return Err(LoaderError::FileNotFound(path.display().to_string()));
    }

    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(10000))
        .with_ignore_errors(true)
        .with_null_values(Some(NullValues::AllColumnsSingle("NA".into())))
        .finish()?
        .collect()?;

    Ok(df)
}

/// Verify every required column is present.
fn check_columns(df: &DataFrame, path: &Path, required: &[&str]) -> Result<(), LoaderError> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    for column in required {
        if !names.iter().any(|n| n == column) {
            return Err(LoaderError::MissingColumn {
                file: path.display().to_string(),
                column: (*column).to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const EVENTS_HEADER: &str =
        "Name,Sex,Age,Height,Weight,Team,NOC,Games,Year,Season,City,Sport,Event,Medal";

    fn write_csv(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{content}").unwrap();
        path
    }

    #[test]
    fn test_load_events_parses_na_as_null() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "events.csv",
            &format!(
                "{EVENTS_HEADER}\n\
                 A Runner,M,24,180,72,India,IND,1996 Summer,1996,Summer,Atlanta,Athletics,100m,Gold\n\
                 B Walker,F,NA,NA,NA,India,IND,1996 Summer,1996,Summer,Atlanta,Athletics,200m,NA\n"
            ),
        );

        let df = load_events(&path).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.column("Age").unwrap().null_count(), 1);
        assert_eq!(df.column("Medal").unwrap().null_count(), 1);
        // Numeric inference must survive the NA placeholder rows.
        assert!(matches!(
            df.column("Age").unwrap().dtype(),
            DataType::Int64 | DataType::Float64
        ));
    }

    #[test]
    fn test_load_events_missing_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "events.csv", "Name,Sex\nA Runner,M\n");

        let err = load_events(&path).unwrap_err();
        assert!(matches!(err, LoaderError::MissingColumn { .. }));
    }

    #[test]
    fn test_load_regions() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "regions.csv",
            "NOC,region,notes\nIND,India,\nKOS,Kosovo,\n",
        );

        let df = load_regions(&path).unwrap();
        assert_eq!(df.height(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_events(Path::new("/nonexistent/athlete_events.csv")).unwrap_err();
        assert!(matches!(err, LoaderError::FileNotFound(_)));
    }
}
