// SPDX-License-Identifier: GPL-3.0-only

//! Cancellable capture countdown
//!
//! A started countdown runs as a background task emitting one tick per
//! second, from the start value down to zero, followed by exactly one
//! `Finished`. Stopping suppresses every further event: the cancel flag is
//! checked before each emission, so no tick or `Finished` is ever delivered
//! after `stop()` returns.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

/// Events emitted by a running countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownEvent {
    /// The currently displayed value, strictly descending
    Tick(u32),
    /// The countdown ran to completion; emitted exactly once
    Finished,
}

/// Live state of a running countdown, owned by the ticker task
struct CountdownState {
    remaining: u32,
    start_value: u32,
}

impl CountdownState {
    fn new(start_value: u32) -> Self {
        Self {
            remaining: start_value,
            start_value,
        }
    }

    /// Step down one value; `false` once zero has been emitted
    fn advance(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}

struct RunningCountdown {
    cancel: Arc<AtomicBool>,
    handle: tokio::task::JoinHandle<()>,
}

/// Handle owning at most one background countdown task
#[derive(Default)]
pub struct CountdownTimer {
    running: Option<RunningCountdown>,
}

impl CountdownTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a countdown task is still alive
    pub fn is_running(&self) -> bool {
        self.running
            .as_ref()
            .map(|r| !r.handle.is_finished())
            .unwrap_or(false)
    }

    /// Start a countdown from `start_value`, delivering events through
    /// `sender` wrapped by `wrap`.
    ///
    /// The first tick is emitted immediately so the display shows the
    /// starting number at once; `Finished` follows the zero tick after one
    /// final one-second beat. Any still-running countdown is stopped first.
    pub fn start<E, F>(&mut self, start_value: u32, sender: UnboundedSender<E>, wrap: F)
    where
        E: Send + 'static,
        F: Fn(CountdownEvent) -> E + Send + 'static,
    {
        self.stop();

        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);

        let handle = tokio::spawn(async move {
            let mut state = CountdownState::new(start_value);
            debug!(start_value = state.start_value, "Countdown started");
            loop {
                if flag.load(Ordering::SeqCst) {
                    return;
                }
                if sender
                    .send(wrap(CountdownEvent::Tick(state.remaining)))
                    .is_err()
                {
                    // Receiver gone, nobody is watching the countdown
                    return;
                }
                tokio::time::sleep(Duration::from_secs(1)).await;
                if !state.advance() {
                    break;
                }
            }
            if flag.load(Ordering::SeqCst) {
                return;
            }
            let _ = sender.send(wrap(CountdownEvent::Finished));
        });

        self.running = Some(RunningCountdown { cancel, handle });
    }

    /// Halt the countdown immediately, suppressing any not-yet-emitted
    /// tick and the `Finished` event. Idempotent; safe to call from a
    /// thread other than the one driving the ticks.
    pub fn stop(&mut self) {
        if let Some(running) = self.running.take() {
            running.cancel.store(true, Ordering::SeqCst);
            running.handle.abort();
            debug!("Countdown stopped");
        }
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    async fn collect(start_value: u32) -> Vec<CountdownEvent> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timer = CountdownTimer::new();
        timer.start(start_value, tx, |e| e);

        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            let done = event == CountdownEvent::Finished;
            events.push(event);
            if done {
                break;
            }
        }
        events
    }

    #[tokio::test(start_paused = true)]
    async fn test_emits_descending_ticks_then_finished() {
        let events = collect(3).await;
        assert_eq!(
            events,
            vec![
                CountdownEvent::Tick(3),
                CountdownEvent::Tick(2),
                CountdownEvent::Tick(1),
                CountdownEvent::Tick(0),
                CountdownEvent::Finished,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_start_still_ticks_once() {
        let events = collect(0).await;
        assert_eq!(
            events,
            vec![CountdownEvent::Tick(0), CountdownEvent::Finished]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_suppresses_finished() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timer = CountdownTimer::new();
        timer.start(5, tx, |e| e);

        // Let the first tick arrive, then cancel mid-count
        let first = rx.recv().await.expect("first tick");
        assert_eq!(first, CountdownEvent::Tick(5));
        timer.stop();

        // Channel closes without Finished ever arriving
        let mut rest = Vec::new();
        while let Some(event) = rx.recv().await {
            rest.push(event);
        }
        assert!(
            !rest.contains(&CountdownEvent::Finished),
            "stop() must suppress Finished, got {:?}",
            rest
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_after_stop() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timer = CountdownTimer::new();
        timer.start(4, tx.clone(), |e| e);
        assert_eq!(rx.recv().await, Some(CountdownEvent::Tick(4)));
        timer.stop();
        assert!(!timer.is_running());

        timer.start(1, tx, |e| e);
        assert_eq!(rx.recv().await, Some(CountdownEvent::Tick(1)));
        assert_eq!(rx.recv().await, Some(CountdownEvent::Tick(0)));
        assert_eq!(rx.recv().await, Some(CountdownEvent::Finished));
    }
}
