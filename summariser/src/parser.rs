//! Line-oriented extraction of [ResultRecord]s from the mapping tool's standard output.
//!
//! The tool prints, per benchmark circuit, a `Mapping <inputDir>/<name>.qasm` line, a number of
//! `<label>: <number>` metric lines and finally a `* runtime: <ms>` line. Each runtime line closes
//! one record.

use std::fmt;
use std::path::Path;

use namap_bench_model::{Metrics, ResultRecord, RunConfig};
use thiserror::Error;

/// Closes the record that is currently being accumulated.
pub const TERMINAL_MARKER: &str = "* runtime";

/// Identifier given to a record whose output never named its benchmark.
pub const UNNAMED_BENCHMARK: &str = "<unnamed>";

const BENCHMARK_EXTENSION: &str = ".qasm";

/// Metric markers, matched as substrings in this order.
///
/// Longer, more qualified labels come first so that a short label can never claim a line that
/// belongs to a longer one.
pub const METRIC_MARKERS: [(&str, MetricField); 8] = [
    ("totalGateFidelities", MetricField::GateFidelity),
    ("totalExecutionTimes", MetricField::ExecutionTime),
    ("totalFidelities", MetricField::Fidelity),
    ("totalIdleTime", MetricField::IdleTime),
    ("totalnCZs", MetricField::CzCount),
    ("nBridges", MetricField::Bridges),
    ("nSwaps", MetricField::Swaps),
    ("nMoves", MetricField::Moves),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
    Integer,
    Float,
}

impl fmt::Display for NumericKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericKind::Integer => write!(f, "integer"),
            NumericKind::Float => write!(f, "float"),
        }
    }
}

/// The [Metrics] field that a metric marker writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricField {
    Swaps,
    Bridges,
    Moves,
    CzCount,
    ExecutionTime,
    IdleTime,
    GateFidelity,
    Fidelity,
}

impl MetricField {
    pub fn kind(&self) -> NumericKind {
        match self {
            MetricField::Swaps
            | MetricField::Bridges
            | MetricField::Moves
            | MetricField::CzCount => NumericKind::Integer,
            MetricField::ExecutionTime
            | MetricField::IdleTime
            | MetricField::GateFidelity
            | MetricField::Fidelity => NumericKind::Float,
        }
    }

    fn store(
        &self,
        metrics: &mut Metrics,
        marker: &'static str,
        line_no: usize,
        line: &str,
    ) -> Result<(), ParseError> {
        let kind = self.kind();
        match self {
            MetricField::Swaps => metrics.swaps = Some(parse_value(line, line_no, marker, kind)?),
            MetricField::Bridges => {
                metrics.bridges = Some(parse_value(line, line_no, marker, kind)?)
            }
            MetricField::Moves => metrics.moves = Some(parse_value(line, line_no, marker, kind)?),
            MetricField::CzCount => {
                metrics.cz_count = Some(parse_value(line, line_no, marker, kind)?)
            }
            MetricField::ExecutionTime => {
                metrics.execution_time = Some(parse_value(line, line_no, marker, kind)?)
            }
            MetricField::IdleTime => {
                metrics.idle_time = Some(parse_value(line, line_no, marker, kind)?)
            }
            MetricField::GateFidelity => {
                metrics.gate_fidelity = Some(parse_value(line, line_no, marker, kind)?)
            }
            MetricField::Fidelity => {
                metrics.fidelity = Some(parse_value(line, line_no, marker, kind)?)
            }
        }
        Ok(())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("line {line_no}: `{marker}` line has no `:` separator: {line:?}")]
    MissingSeparator {
        line_no: usize,
        marker: &'static str,
        line: String,
    },
    #[error("line {line_no}: `{marker}` value {value:?} is not a valid {expected}")]
    MalformedNumber {
        line_no: usize,
        marker: &'static str,
        value: String,
        expected: NumericKind,
    },
}

/// Parses the value after the last `:` of `line`.
fn parse_value<T: std::str::FromStr>(
    line: &str,
    line_no: usize,
    marker: &'static str,
    expected: NumericKind,
) -> Result<T, ParseError> {
    let (_, value) = line
        .rsplit_once(':')
        .ok_or_else(|| ParseError::MissingSeparator {
            line_no,
            marker,
            line: line.to_string(),
        })?;
    let value = value.trim();
    value.parse::<T>().map_err(|_| ParseError::MalformedNumber {
        line_no,
        marker,
        value: value.to_string(),
        expected,
    })
}

/// Converts the standard output of one tool invocation into result records.
#[derive(Debug, Clone)]
pub struct OutputParser {
    benchmark_prefix: String,
}

impl OutputParser {
    /// `input_dir` must be the directory exactly as it was passed to the tool, because the tool
    /// echoes it back in its `Mapping` lines.
    pub fn new(input_dir: impl AsRef<Path>) -> Self {
        let input_dir = input_dir.as_ref().to_string_lossy();
        Self {
            benchmark_prefix: format!("Mapping {}/", input_dir.trim_end_matches('/')),
        }
    }

    /// Start an accumulator for the output of the run described by `config`.
    pub fn accumulator<'a>(&'a self, config: &'a RunConfig) -> RecordAccumulator<'a> {
        RecordAccumulator {
            benchmark_prefix: &self.benchmark_prefix,
            config,
            benchmark: None,
            metrics: Metrics::default(),
            line_no: 0,
        }
    }

    /// Parse a complete output stream.
    ///
    /// Returns one record per terminal marker line. Fields accumulated after the last terminal
    /// marker are discarded.
    pub fn parse(&self, output: &str, config: &RunConfig) -> Result<Vec<ResultRecord>, ParseError> {
        let mut accumulator = self.accumulator(config);
        let mut records = Vec::new();
        for line in output.lines() {
            if let Some(record) = accumulator.feed_line(line)? {
                records.push(record);
            }
        }

        if accumulator.has_pending() {
            log::debug!(
                "Discarding unterminated result at the end of the output of run {}",
                config.run_idx
            );
        }

        Ok(records)
    }
}

/// The state of a single in-progress record.
///
/// Fed one line at a time. Run-level fields always come from the [RunConfig] the accumulator was
/// created for.
#[derive(Debug)]
pub struct RecordAccumulator<'a> {
    benchmark_prefix: &'a str,
    config: &'a RunConfig,
    benchmark: Option<String>,
    metrics: Metrics,
    line_no: usize,
}

impl RecordAccumulator<'_> {
    /// Feed the next line of output, returning a completed record if this line was a terminal
    /// marker.
    pub fn feed_line(&mut self, line: &str) -> Result<Option<ResultRecord>, ParseError> {
        self.line_no += 1;

        if let Some(path) = line.strip_prefix(self.benchmark_prefix) {
            let name = path
                .find(BENCHMARK_EXTENSION)
                .map_or(path, |end| &path[..end]);
            self.benchmark = Some(name.to_string());
            return Ok(None);
        }

        if let Some((marker, field)) = METRIC_MARKERS
            .iter()
            .find(|(marker, _)| line.contains(marker))
        {
            field.store(&mut self.metrics, *marker, self.line_no, line)?;
            return Ok(None);
        }

        if line.contains(TERMINAL_MARKER) {
            let runtime_ms =
                parse_value(line, self.line_no, TERMINAL_MARKER, NumericKind::Integer)?;
            self.metrics.runtime_ms = Some(runtime_ms);
            return Ok(Some(self.take_record()));
        }

        Ok(None)
    }

    /// Whether anything has been accumulated since the last completed record.
    pub fn has_pending(&self) -> bool {
        self.benchmark.is_some() || self.metrics != Metrics::default()
    }

    fn take_record(&mut self) -> ResultRecord {
        let benchmark = self.benchmark.take().unwrap_or_else(|| {
            log::warn!(
                "Run {} closed a result on line {} without naming the benchmark",
                self.config.run_idx,
                self.line_no
            );
            UNNAMED_BENCHMARK.to_string()
        });

        let mut record = ResultRecord::for_run(benchmark, self.config);
        record.metrics = std::mem::take(&mut self.metrics);
        record
    }
}

#[cfg(test)]
mod tests {
    use namap_bench_model::{
        ArchitectureKind, ArchitectureVariant, CoordinateMapping, MapperParameters, WeightPair,
    };

    use super::*;

    fn config(run_idx: usize) -> RunConfig {
        RunConfig {
            run_idx,
            architecture: ArchitectureVariant::new(
                ArchitectureKind::Gate,
                "architectures/rubidium_gate.json",
            ),
            coordinate_mapping: CoordinateMapping::Trivial,
            circuit_mapping: "identity".to_string(),
            weights: WeightPair::new(1.0, 0.5),
            parameters: MapperParameters::default(),
        }
    }

    const TWO_BENCHMARKS: &str = "\
Mapping benchmarks/qft_n4.qasm
nSwaps: 3
nBridges: 1
nMoves: 0
totalExecutionTimes: 12.5
totalIdleTime: 3.25
totalGateFidelities: 0.99
totalFidelities: 0.987654
* runtime: 17
Mapping benchmarks/ghz_n8.qasm
nSwaps: 7
totalFidelities: 0.9
* runtime: 40
";

    #[test]
    fn two_terminal_markers_give_two_records_with_run_fields() {
        let parser = OutputParser::new("benchmarks");
        let records = parser.parse(TWO_BENCHMARKS, &config(4)).unwrap();

        assert_eq!(records.len(), 2);
        for record in &records {
            assert_eq!(record.run_idx, 4);
            assert_eq!(record.weights, WeightPair::new(1.0, 0.5));
            assert_eq!(record.architecture, ArchitectureKind::Gate);
        }

        assert_eq!(records[0].benchmark, "qft_n4");
        assert_eq!(records[0].metrics.swaps, Some(3));
        assert_eq!(records[0].metrics.bridges, Some(1));
        assert_eq!(records[0].metrics.moves, Some(0));
        assert_eq!(records[0].metrics.execution_time, Some(12.5));
        assert_eq!(records[0].metrics.idle_time, Some(3.25));
        assert_eq!(records[0].metrics.runtime_ms, Some(17));

        assert_eq!(records[1].benchmark, "ghz_n8");
        assert_eq!(records[1].metrics.swaps, Some(7));
        assert_eq!(records[1].metrics.bridges, None);
        assert_eq!(records[1].metrics.runtime_ms, Some(40));
    }

    #[test]
    fn metrics_without_terminal_marker_give_no_records() {
        let output = "Mapping benchmarks/qft_n4.qasm\nnSwaps: 3\ntotalFidelities: 0.5\n";
        let records = OutputParser::new("benchmarks")
            .parse(output, &config(0))
            .unwrap();

        assert!(records.is_empty());
    }

    #[test]
    fn trailing_unterminated_fields_are_discarded() {
        let output = format!("{TWO_BENCHMARKS}Mapping benchmarks/adder.qasm\nnSwaps: 9\n");
        let records = OutputParser::new("benchmarks")
            .parse(&output, &config(0))
            .unwrap();

        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.benchmark != "adder"));
    }

    #[test]
    fn total_fidelity_does_not_touch_gate_fidelity() {
        let parser = OutputParser::new("benchmarks");
        let config = config(0);
        let mut accumulator = parser.accumulator(&config);

        accumulator.feed_line("totalFidelities: 0.987654").unwrap();
        let record = accumulator.feed_line("* runtime: 1").unwrap().unwrap();

        assert_eq!(record.metrics.fidelity, Some(0.987654));
        assert_eq!(record.metrics.gate_fidelity, None);
    }

    #[test]
    fn gate_fidelity_does_not_touch_total_fidelity() {
        let parser = OutputParser::new("benchmarks");
        let config = config(0);
        let mut accumulator = parser.accumulator(&config);

        accumulator.feed_line("totalGateFidelities: 0.5").unwrap();
        let record = accumulator.feed_line("* runtime: 1").unwrap().unwrap();

        assert_eq!(record.metrics.gate_fidelity, Some(0.5));
        assert_eq!(record.metrics.fidelity, None);
    }

    #[test]
    fn benchmark_identifier_is_between_prefix_and_extension() {
        let parser = OutputParser::new("benchmarks");
        let config = config(0);
        let mut accumulator = parser.accumulator(&config);

        accumulator
            .feed_line("Mapping benchmarks/qft_n4.qasm")
            .unwrap();
        let record = accumulator.feed_line("* runtime: 5").unwrap().unwrap();

        assert_eq!(record.benchmark, "qft_n4");
    }

    #[test]
    fn trailing_slash_on_input_dir_is_ignored() {
        let records = OutputParser::new("benchmarks/")
            .parse("Mapping benchmarks/qft_n4.qasm\n* runtime: 5\n", &config(0))
            .unwrap();

        assert_eq!(records[0].benchmark, "qft_n4");
    }

    #[test]
    fn later_mapping_line_retags_without_closing() {
        let output = "\
Mapping benchmarks/first.qasm
nSwaps: 2
Mapping benchmarks/second.qasm
* runtime: 5
";
        let records = OutputParser::new("benchmarks")
            .parse(output, &config(0))
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].benchmark, "second");
        assert_eq!(records[0].metrics.swaps, Some(2));
    }

    #[test]
    fn cz_count_uses_qualified_marker() {
        let parser = OutputParser::new("benchmarks");
        let config = config(0);
        let mut accumulator = parser.accumulator(&config);

        accumulator.feed_line("totalnCZs: 120").unwrap();
        let record = accumulator.feed_line("* runtime: 1").unwrap().unwrap();

        assert_eq!(record.metrics.cz_count, Some(120));
        assert_eq!(record.metrics.swaps, None);
    }

    #[test]
    fn value_is_taken_after_last_colon() {
        let parser = OutputParser::new("benchmarks");
        let config = config(0);
        let mut accumulator = parser.accumulator(&config);

        accumulator.feed_line("scheduler: nMoves: 11 ").unwrap();
        let record = accumulator.feed_line("* runtime: 1").unwrap().unwrap();

        assert_eq!(record.metrics.moves, Some(11));
    }

    #[test]
    fn fields_reset_between_records() {
        let output = "\
Mapping benchmarks/a.qasm
nBridges: 4
* runtime: 1
* runtime: 2
";
        let records = OutputParser::new("benchmarks")
            .parse(output, &config(0))
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].benchmark, UNNAMED_BENCHMARK);
        assert_eq!(records[1].metrics.bridges, None);
        assert_eq!(records[1].metrics.runtime_ms, Some(2));
    }

    #[test]
    fn unrecognised_lines_are_ignored() {
        let output = "\
Reading architecture file
Mapping other_dir/a.qasm
Layer 4 of 10
";
        let records = OutputParser::new("benchmarks")
            .parse(output, &config(0))
            .unwrap();

        assert!(records.is_empty());
    }

    #[test]
    fn malformed_integer_is_an_error() {
        let output = "Mapping benchmarks/a.qasm\nnSwaps: 3.5\n* runtime: 1\n";
        let err = OutputParser::new("benchmarks")
            .parse(output, &config(0))
            .unwrap_err();

        assert_eq!(
            err,
            ParseError::MalformedNumber {
                line_no: 2,
                marker: "nSwaps",
                value: "3.5".to_string(),
                expected: NumericKind::Integer,
            }
        );
    }

    #[test]
    fn malformed_runtime_is_an_error() {
        let output = "* runtime: soon\n";
        let err = OutputParser::new("benchmarks")
            .parse(output, &config(0))
            .unwrap_err();

        assert!(matches!(
            err,
            ParseError::MalformedNumber {
                marker: TERMINAL_MARKER,
                ..
            }
        ));
    }

    #[test]
    fn metric_line_without_separator_is_an_error() {
        let err = OutputParser::new("benchmarks")
            .parse("totalFidelities 0.5\n", &config(0))
            .unwrap_err();

        assert!(matches!(err, ParseError::MissingSeparator { line_no: 1, .. }));
    }

    #[test]
    fn marker_table_puts_qualified_labels_before_their_suffixes() {
        for (i, (marker, _)) in METRIC_MARKERS.iter().enumerate() {
            for (later, _) in &METRIC_MARKERS[i + 1..] {
                assert!(
                    !later.contains(marker),
                    "{later} contains {marker} but is checked after it"
                );
            }
        }
    }
}
