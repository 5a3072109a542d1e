/// Recommended error type for your sweep `main` function. Errors from the runner can be propagated
/// with `?`.
pub type SweepResult<T> = anyhow::Result<T>;
