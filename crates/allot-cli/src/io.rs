//! Activity input and store file persistence

use allot_model::Activity;
use allot_resolver::{MemoryChartStore, StoredChart};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Read a JSON activity array from `path`, or stdin for `-`/`None`
pub(crate) fn read_activities(path: Option<&str>) -> Result<Vec<Activity>> {
    match path {
        None | Some("-") => parse_activities(io::stdin().lock(), "stdin"),
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {path}"))?;
            parse_activities(BufReader::new(file), path)
        }
    }
}

fn parse_activities(reader: impl Read, source: &str) -> Result<Vec<Activity>> {
    serde_json::from_reader(reader)
        .with_context(|| format!("{source} is not a JSON array of activities"))
}

/// Load a store from a JSON records file; a missing file is an empty store
pub(crate) fn load_store(path: &Path) -> Result<MemoryChartStore> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "store file missing, starting empty");
            return Ok(MemoryChartStore::new());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("opening store {}", path.display()));
        }
    };

    let records: Vec<StoredChart> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("reading store {}", path.display()))?;
    Ok(MemoryChartStore::from_records(records))
}

/// Replace the store file with the current records
///
/// Writes to a sibling temporary file first so a failed write leaves the
/// previous file intact.
pub(crate) fn save_store(path: &Path, store: &MemoryChartStore) -> Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temporary file in {}", dir.display()))?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, &store.records())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }
    tmp.persist(path)
        .with_context(|| format!("writing store {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use allot_model::{AllocationMode, ChartData};
    use allot_resolver::ChartStore;

    #[test]
    fn parses_activity_array() {
        let json = br##"[{"id":"1","name":"Sleep","value":56,"color":"#3498db"}]"##;
        let activities = parse_activities(&json[..], "test").unwrap();
        assert_eq!(activities, vec![Activity::new("1", "Sleep", 56.0, "#3498db")]);
    }

    #[test]
    fn rejects_non_array_input() {
        let err = parse_activities(&b"{\"id\":1}"[..], "test").unwrap_err();
        assert!(err.to_string().contains("not a JSON array"));
    }

    #[test]
    fn missing_store_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = load_store(&dir.path().join("charts.json")).unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn store_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("charts.json");

        let store = load_store(&path).unwrap();
        let chart = ChartData::new(
            vec![Activity::new("1", "Sleep", 56.0, "#3498db")],
            AllocationMode::Percentage,
        );
        let id = store.persist(chart.clone(), None).await.unwrap();
        save_store(&path, &store).unwrap();

        let reloaded = load_store(&path).unwrap();
        assert_eq!(reloaded.lookup(id).await.unwrap().unwrap().data, chart);
    }

    #[test]
    fn corrupt_store_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("charts.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(load_store(&path).is_err());
    }
}
