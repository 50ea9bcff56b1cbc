//! Ctrl+C handling for long searches.
//!
//! The first interrupt cancels the running search so it can report partial
//! results; a second one exits immediately.

use std::future::Future;
use std::io;

use docsift_core::CancellationToken;

/// Exit status for a process ended by SIGINT.
const INTERRUPTED: i32 = 130;

/// Cancel `token` when the user presses Ctrl+C.
///
/// The signal is awaited on a background thread with a single-threaded tokio
/// runtime, leaving the search itself on the calling thread.
pub fn cancel_on_ctrl_c(token: &CancellationToken) -> io::Result<()> {
    let token = token.clone();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    std::thread::Builder::new()
        .name("ctrl-c".into())
        .spawn(move || {
            runtime.block_on(async {
                if watch(&token, tokio::signal::ctrl_c).await {
                    std::process::exit(INTERRUPTED);
                }
            })
        })?;
    Ok(())
}

/// Cancel on the first signal. Returns true if a second signal arrived.
async fn watch<S, Fut>(token: &CancellationToken, mut signal: S) -> bool
where
    S: FnMut() -> Fut,
    Fut: Future<Output = io::Result<()>>,
{
    if let Err(e) = signal().await {
        log::warn!("failed to listen for Ctrl+C: {e}");
        return false;
    }
    log::info!("interrupt received, canceling search");
    eprintln!("Canceling search... (press Ctrl+C again to quit)");
    token.cancel();

    signal().await.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn block_on<F: Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(future)
    }

    #[test]
    fn first_signal_cancels_the_token() {
        let token = CancellationToken::new();
        let calls = Cell::new(0);
        let second = block_on(watch(&token, || {
            calls.set(calls.get() + 1);
            let result = if calls.get() == 1 {
                Ok(())
            } else {
                Err(io::Error::other("listener closed"))
            };
            async move { result }
        }));

        assert!(token.is_canceled());
        assert!(!second);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn second_signal_requests_exit() {
        let token = CancellationToken::new();
        assert!(block_on(watch(&token, || async { Ok(()) })));
        assert!(token.is_canceled());
    }

    #[test]
    fn listener_failure_leaves_the_search_running() {
        let token = CancellationToken::new();
        let second = block_on(watch(&token, || async {
            Err(io::Error::other("no signal support"))
        }));
        assert!(!token.is_canceled());
        assert!(!second);
    }
}
