mod cli;
mod command;
mod config;
mod definition;
mod executor;
mod init;
mod progress;
mod run;
mod shutdown;
mod sweep;
mod tool_binary;
mod types;

#[cfg(all(test, unix))]
mod test_utils;

pub mod prelude {
    pub use crate::cli::SweepCli;
    pub use crate::command::ToolInvocation;
    pub use crate::config::{
        MalformedOutputPolicy, SweepConfig, DEFAULT_GRACE_PERIOD_S, DEFAULT_TIMEOUT_S,
    };
    pub use crate::definition::{SweepDefinition, SweepDefinitionBuilder};
    pub use crate::init::init;
    pub use crate::run::run;
    pub use crate::sweep::SweepGrid;
    pub use crate::tool_binary::{tool_binary_path, NAMAP_BIN_PATH_ENV};
    pub use crate::types::SweepResult;

    pub use namap_bench_model::{
        ArchitectureKind, ArchitectureVariant, CoordinateMapping, MapperParameters, ResultGroup,
        ResultRecord, RunConfig, RunOutcome, WeightPair,
    };
    pub use namap_bench_summariser::ReportLayout;
}
