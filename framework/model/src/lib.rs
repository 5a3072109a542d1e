use std::io::{BufRead, Read, Write};
use std::path::Path;

mod architecture;
mod outcome;
mod record;
mod run_config;

pub use architecture::{ArchitectureKind, ArchitectureVariant, CoordinateMapping};
pub use outcome::RunOutcome;
pub use record::{Metrics, ResultGroup, ResultRecord};
pub use run_config::{MapperParameters, RunConfig, WeightPair};

/// Append result records to a file
///
/// Each record is serialized to JSON and output as a single line followed by a newline. The
/// recommended file extension is `.jsonl`. The file is created if it does not exist.
pub fn append_records(records: &[ResultRecord], path: &Path) -> anyhow::Result<()> {
    let mut file = std::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)?;
    store_records(records, &mut file)?;
    Ok(())
}

/// Serialize result records to a writer, one JSON object per line
pub fn store_records<W: Write>(records: &[ResultRecord], writer: &mut W) -> anyhow::Result<()> {
    for record in records {
        serde_json::to_writer(&mut *writer, record)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

/// Load result records from a reader
///
/// The input should contain one JSON object per line. This is the format produced by
/// [append_records]. Blank lines are skipped.
pub fn load_records<R: Read>(reader: R) -> anyhow::Result<Vec<ResultRecord>> {
    let reader = std::io::BufReader::new(reader);
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: ResultRecord = serde_json::from_str(&line)?;
        records.push(record);
    }
    Ok(records)
}

/// Load result records from a file written by [append_records]
pub fn load_records_from_file(path: &Path) -> anyhow::Result<Vec<ResultRecord>> {
    let file = std::fs::File::open(path)?;
    load_records(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record(benchmark: &str, run_idx: usize, fidelity: f64) -> ResultRecord {
        let config = RunConfig {
            run_idx,
            architecture: ArchitectureVariant::new(
                ArchitectureKind::Hybrid,
                "architectures/rubidium_hybrid.json",
            ),
            coordinate_mapping: CoordinateMapping::Random,
            circuit_mapping: "identity".to_string(),
            weights: WeightPair::new(1.0, 0.5),
            parameters: MapperParameters::default(),
        };
        let mut record = ResultRecord::for_run(benchmark, &config);
        record.metrics.fidelity = Some(fidelity);
        record.metrics.runtime_ms = Some(42);
        record
    }

    #[test]
    fn appended_records_load_back_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.jsonl");

        append_records(&[sample_record("qft_n4", 0, 0.9)], &path).unwrap();
        append_records(
            &[sample_record("ghz_n8", 1, 0.8), sample_record("qft_n4", 1, 0.7)],
            &path,
        )
        .unwrap();

        let loaded = load_records_from_file(&path).unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded[0], sample_record("qft_n4", 0, 0.9));
        assert_eq!(loaded[2].benchmark, "qft_n4");
        assert_eq!(loaded[2].run_idx, 1);
    }

    #[test]
    fn absent_metrics_survive_serialization() {
        let mut buf = Vec::new();
        store_records(&[sample_record("qft_n4", 0, 0.9)], &mut buf).unwrap();

        let loaded = load_records(buf.as_slice()).unwrap();
        assert_eq!(loaded[0].metrics.swaps, None);
        assert_eq!(loaded[0].metrics.fidelity, Some(0.9));
    }

    #[test]
    fn blank_lines_are_skipped() {
        let mut buf = Vec::new();
        store_records(&[sample_record("qft_n4", 0, 0.9)], &mut buf).unwrap();
        buf.extend_from_slice(b"\n   \n");

        assert_eq!(load_records(buf.as_slice()).unwrap().len(), 1);
    }

    #[test]
    fn malformed_line_is_an_error() {
        assert!(load_records("{ not json".as_bytes()).is_err());
    }
}
