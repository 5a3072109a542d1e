/// How one invocation of the mapping tool ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Exit status 0. Carries the decoded standard output for metric extraction.
    Success { stdout: String },
    /// Non-zero exit status.
    ///
    /// The captured output is only kept for diagnostics. `code` is [None] when the process was
    /// ended by a signal.
    Failed {
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },
    /// The run exceeded its time limit and was cancelled. Partial output is not kept.
    TimedOut,
}
