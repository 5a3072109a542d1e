use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;

use anyhow::Context;
use namap_bench_model::{RunConfig, RunOutcome};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Child;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::command::ToolInvocation;
use crate::config::{DEFAULT_GRACE_PERIOD_S, DEFAULT_TIMEOUT_S};
use crate::shutdown::{ShutdownHandle, ShutdownSignalError};
use crate::types::SweepResult;

/// Runs the mapping tool, one configuration at a time.
///
/// Owns the tokio runtime that child processes are awaited on. Each call to
/// [RunExecutor::execute] blocks until the child has exited, timed out or been cancelled by a
/// shutdown signal, and the child is always reaped before it returns.
#[derive(Debug)]
pub struct RunExecutor {
    runtime: tokio::runtime::Runtime,
    shutdown_handle: ShutdownHandle,
    binary: PathBuf,
    input_dir: PathBuf,
    output_dir: PathBuf,
    timeout: Duration,
    grace_period: Duration,
}

enum RunEvent {
    Exited(std::io::Result<ExitStatus>),
    TimedOut,
    Shutdown,
}

impl RunExecutor {
    pub(crate) fn new(
        runtime: tokio::runtime::Runtime,
        shutdown_handle: ShutdownHandle,
        binary: PathBuf,
        input_dir: PathBuf,
        output_dir: PathBuf,
    ) -> Self {
        Self {
            runtime,
            shutdown_handle,
            binary,
            input_dir,
            output_dir,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_S),
            grace_period: Duration::from_secs(DEFAULT_GRACE_PERIOD_S),
        }
    }

    pub(crate) fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub(crate) fn with_grace_period(mut self, grace_period: Duration) -> Self {
        self.grace_period = grace_period;
        self
    }

    /// Run the mapping tool for `config` and classify how it ended.
    ///
    /// Returns an error if the tool could not be started or waited on, or if the run was
    /// cancelled by a shutdown signal. The latter is a [ShutdownSignalError] and can be detected
    /// with [anyhow::Error::is].
    pub fn execute(&self, config: &RunConfig) -> SweepResult<RunOutcome> {
        let invocation =
            ToolInvocation::new(&self.binary, &self.input_dir, &self.output_dir, config);
        log::info!("Run {}: {}", config.run_idx, invocation);

        let mut shutdown_listener = self.shutdown_handle.new_listener();
        self.runtime.block_on(async move {
            let mut child = invocation
                .command()
                .spawn()
                .with_context(|| format!("Failed to start {}", invocation.program().display()))?;

            let deadline = Instant::now() + self.timeout;
            let mut stdout = drain(child.stdout.take());
            let mut stderr = drain(child.stderr.take());

            let event = tokio::select! {
                status = child.wait() => RunEvent::Exited(status),
                _ = tokio::time::sleep_until(deadline) => RunEvent::TimedOut,
                _ = shutdown_listener.wait_for_shutdown() => RunEvent::Shutdown,
            };

            match event {
                RunEvent::Exited(status) => {
                    let status = status.with_context(|| {
                        format!("Failed to wait for run {} to exit", config.run_idx)
                    })?;
                    // A descendant of the tool can hold the pipes open after the child has exited
                    let output = tokio::time::timeout_at(deadline, async {
                        Ok::<_, anyhow::Error>((
                            collect(&mut stdout).await?,
                            collect(&mut stderr).await?,
                        ))
                    })
                    .await;
                    let (stdout, stderr) = match output {
                        Ok(output) => output?,
                        Err(_) => {
                            stdout.abort();
                            stderr.abort();
                            log::warn!(
                                "Output of run {} was still open when {:?} had passed",
                                config.run_idx,
                                self.timeout
                            );
                            return Ok(RunOutcome::TimedOut);
                        }
                    };

                    if status.success() {
                        Ok(RunOutcome::Success { stdout })
                    } else {
                        Ok(RunOutcome::Failed {
                            code: status.code(),
                            stdout,
                            stderr,
                        })
                    }
                }
                RunEvent::TimedOut => {
                    stdout.abort();
                    stderr.abort();
                    log::debug!(
                        "Run {} exceeded {:?}, terminating",
                        config.run_idx,
                        self.timeout
                    );
                    terminate(&mut child, self.grace_period).await?;
                    Ok(RunOutcome::TimedOut)
                }
                RunEvent::Shutdown => {
                    stdout.abort();
                    stderr.abort();
                    terminate(&mut child, self.grace_period).await?;
                    Err(anyhow::anyhow!(ShutdownSignalError::default()))
                }
            }
        })
    }
}

/// Read a pipe to the end on its own task so that neither pipe can fill up and block the child.
fn drain<R>(pipe: Option<R>) -> JoinHandle<std::io::Result<Vec<u8>>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            pipe.read_to_end(&mut buf).await?;
        }
        Ok(buf)
    })
}

async fn collect(handle: &mut JoinHandle<std::io::Result<Vec<u8>>>) -> SweepResult<String> {
    let buf = handle
        .await
        .context("Output reader task failed")?
        .context("Failed to read output of the mapping tool")?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Stop a child in two phases.
///
/// SIGTERM first, then SIGKILL if the child is still running once `grace_period` has passed. The
/// child has been reaped when this returns `Ok`.
async fn terminate(child: &mut Child, grace_period: Duration) -> SweepResult<()> {
    #[cfg(unix)]
    {
        if let Some(pid) = child.id() {
            use nix::sys::signal::{kill, SIGTERM};
            use nix::unistd::Pid;

            match kill(Pid::from_raw(pid as i32), SIGTERM) {
                Ok(()) => {
                    if let Ok(status) = tokio::time::timeout(grace_period, child.wait()).await {
                        let status = status.context("Failed to wait for the mapping tool to exit")?;
                        log::debug!("Mapping tool exited after SIGTERM with {status}");
                        return Ok(());
                    }
                    log::warn!(
                        "Mapping tool did not exit within {grace_period:?} of SIGTERM, killing it"
                    );
                }
                Err(e) => log::warn!("Failed to send SIGTERM to the mapping tool: {e}"),
            }
        }
    }

    #[cfg(not(unix))]
    let _ = grace_period;

    child
        .kill()
        .await
        .context("Failed to kill the mapping tool")?;
    Ok(())
}
