use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use namap_bench_model::RunConfig;
use tokio::process::Command;

/// The command line for one run of the mapping tool.
///
/// The tool takes positional arguments only:
///
/// ```text
/// NaMain <runIdx> <inputDir> <outputDir> <lookaheadGate> <lookaheadShuttling> <decay>
///        <shuttlingTimeWeight> <gateWeight> <shuttlingWeight> <verbose> <architectureJson>
///        <initialCoordinateMapping> <initialCircuitMapping>
/// ```
///
/// Arguments are passed straight to the process, never through a shell.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolInvocation {
    program: PathBuf,
    args: Vec<OsString>,
}

impl ToolInvocation {
    pub fn new(program: &Path, input_dir: &Path, output_dir: &Path, config: &RunConfig) -> Self {
        let parameters = &config.parameters;
        let args = vec![
            OsString::from(config.run_idx.to_string()),
            input_dir.as_os_str().to_owned(),
            output_dir.as_os_str().to_owned(),
            OsString::from(parameters.lookahead_gate.to_string()),
            OsString::from(parameters.lookahead_shuttling.to_string()),
            OsString::from(parameters.decay.to_string()),
            OsString::from(parameters.shuttling_time_weight.to_string()),
            OsString::from(config.weights.gate.to_string()),
            OsString::from(config.weights.shuttling.to_string()),
            OsString::from(if parameters.verbose { "1" } else { "0" }),
            config.architecture.config_path.as_os_str().to_owned(),
            OsString::from(config.coordinate_mapping.to_string()),
            OsString::from(config.circuit_mapping.as_str()),
        ];

        Self {
            program: program.to_path_buf(),
            args,
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// A command with stdin closed and both output streams captured.
    ///
    /// The child is killed if the handle is dropped before it has been reaped.
    pub fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        command
    }
}

impl fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}
