//! Usage: Run synchronous work on Tauri's blocking pool without tying up the main thread.

/// Spawns `f` on the blocking pool and returns immediately.
///
/// A panic inside `f` is logged under `label`; nothing is propagated to the caller.
pub(crate) fn spawn_detached<F>(label: &'static str, f: F)
where
    F: FnOnce() + Send + 'static,
{
    let handle = tauri::async_runtime::spawn_blocking(f);
    tauri::async_runtime::spawn(async move {
        if let Err(err) = handle.await {
            tracing::error!(task = label, "blocking task failed: {err}");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn spawn_detached_returns_before_work_finishes() {
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let (done_tx, done_rx) = mpsc::channel();

        spawn_detached("test_wait", move || {
            let _ = release_rx.recv();
            let _ = done_tx.send(());
        });

        assert!(done_rx.try_recv().is_err());
        release_tx.send(()).expect("release");
        done_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("detached work completes");
    }

    #[test]
    fn spawn_detached_swallows_panics() {
        spawn_detached("test_panic", || panic!("boom"));

        let (tx, rx) = mpsc::channel();
        spawn_detached("test_after_panic", move || {
            let _ = tx.send(());
        });
        rx.recv_timeout(Duration::from_secs(5))
            .expect("pool keeps running after a panic");
    }
}
