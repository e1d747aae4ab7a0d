//! Wall-clock display ticker.

use chrono::{DateTime, Local, TimeZone};
use std::{fmt::Display, time::Duration};
use tokio::{
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tracing::debug;

/// Display refresh period.
pub const TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, Default)]
pub struct Clock;

impl Clock {
    /// Spawn a repeating task that hands the current local time to `sink`
    /// once per `period`, the first call immediately. Must be called inside
    /// a tokio runtime. `period` must be non-zero.
    pub fn start<F>(period: Duration, mut sink: F) -> ClockHandle
    where
        F: FnMut(DateTime<Local>) + Send + 'static,
    {
        let task = tokio::spawn(async move {
            let mut ticker = time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                sink(Local::now());
            }
        });

        debug!(?period, "clock started");
        ClockHandle { task }
    }
}

/// Owns the ticking task. Stopping or dropping the handle cancels it.
#[derive(Debug)]
pub struct ClockHandle {
    task: JoinHandle<()>,
}

impl ClockHandle {
    /// Cancel the ticking task.
    pub fn stop(self) {
        drop(self);
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for ClockHandle {
    fn drop(&mut self) {
        self.task.abort();
        debug!("clock stopped");
    }
}

/// `time | date`, as shown in the navbar.
pub fn format_clock<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    now.format("%H:%M:%S | %a %d %b %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tokio::sync::mpsc;

    #[test]
    fn formats_time_then_date() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 3).unwrap();
        assert_eq!(format_clock(&at), "07:05:03 | Sat 09 Mar 2024");
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_every_second_while_running() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = Clock::start(TICK, move |now| {
            let _ = tx.send(now);
        });

        time::sleep(Duration::from_millis(3_500)).await;

        let mut ticks = 0;
        while rx.try_recv().is_ok() {
            ticks += 1;
        }
        assert!(ticks >= 3, "expected at least 3 ticks, got {ticks}");
        assert!(handle.is_running());
        handle.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn no_ticks_after_stop() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = Clock::start(TICK, move |now| {
            let _ = tx.send(now);
        });

        time::sleep(Duration::from_millis(1_500)).await;
        handle.stop();
        while rx.try_recv().is_ok() {}

        time::sleep(Duration::from_secs(5)).await;

        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_handle_cancels_task() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        {
            let _handle = Clock::start(TICK, move |now| {
                let _ = tx.send(now);
            });
            time::sleep(Duration::from_millis(500)).await;
        }
        while rx.try_recv().is_ok() {}

        time::sleep(Duration::from_secs(3)).await;

        assert!(rx.try_recv().is_err());
    }
}
