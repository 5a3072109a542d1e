use tokio::signal;

pub(crate) use namap_bench_core::prelude::{ShutdownHandle, ShutdownSignalError};

/// Spawn a task on `runtime` that requests shutdown when Ctrl-C is pressed.
pub(crate) fn start_shutdown_listener(runtime: &tokio::runtime::Runtime) -> ShutdownHandle {
    let handle = ShutdownHandle::default();

    let listener_handle = handle.clone();
    runtime.spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                listener_handle.shutdown();
                println!("Received shutdown signal, stopping the sweep...");
            }
            Err(e) => {
                log::error!("Failed to listen for Ctrl-C, the sweep cannot be interrupted: {e}");
            }
        }
    });

    handle
}
