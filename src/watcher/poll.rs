use crate::error::Result;
use crate::event::TrackerEvent;
use std::future::Future;
use std::ops::ControlFlow;
use std::time::Duration;
use tokio::sync::mpsc;

pub const MIN_INTERVAL_SECS: u64 = 5;

pub fn rescan_pause(interval_secs: u64) -> Duration {
    Duration::from_secs(interval_secs.max(MIN_INTERVAL_SECS))
}

/// Drives `scan` until it breaks, fails, or a `Shutdown` arrives on `events`.
///
/// The pause is measured from the end of each scan, so a scan slower than
/// the interval delays the next one instead of stacking refreshes behind it.
/// `Shutdown` cancels a scan in flight as well as the pause. A `Refresh`
/// during the pause starts the next scan early. Returns the number of
/// completed scans.
pub async fn run_scan_loop<F, Fut>(
    events: &mut mpsc::UnboundedReceiver<TrackerEvent>,
    interval_secs: u64,
    mut scan: F,
) -> Result<usize>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<ControlFlow<()>>>,
{
    let pause = rescan_pause(interval_secs);
    let mut completed = 0;

    loop {
        let flow = tokio::select! {
            flow = scan() => flow?,
            _ = shutdown_requested(events) => break,
        };
        completed += 1;
        if flow.is_break() {
            break;
        }

        tokio::select! {
            _ = tokio::time::sleep(pause) => {}
            event = events.recv() => match event {
                Some(TrackerEvent::Refresh) => tracing::debug!("manual refresh"),
                Some(TrackerEvent::Shutdown) | None => break,
            },
        }
    }

    tracing::debug!(completed, "scan loop finished");
    Ok(completed)
}

/// Resolves on `Shutdown` or once every sender is gone. Refreshes that land
/// mid-scan are dropped.
async fn shutdown_requested(events: &mut mpsc::UnboundedReceiver<TrackerEvent>) {
    while let Some(event) = events.recv().await {
        if event == TrackerEvent::Shutdown {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RadarError;
    use std::sync::{Arc, Mutex};
    use tokio::time::{sleep, Instant};

    type Starts = Arc<Mutex<Vec<Instant>>>;

    fn timed_scan(
        starts: &Starts,
        takes: Duration,
    ) -> impl FnMut() -> std::pin::Pin<Box<dyn Future<Output = Result<ControlFlow<()>>> + Send>>
    {
        let starts = starts.clone();
        move || {
            let starts = starts.clone();
            Box::pin(async move {
                starts.lock().unwrap().push(Instant::now());
                sleep(takes).await;
                Ok(ControlFlow::Continue(()))
            })
        }
    }

    fn shutdown_after(tx: mpsc::UnboundedSender<TrackerEvent>, after: Duration) {
        tokio::spawn(async move {
            sleep(after).await;
            let _ = tx.send(TrackerEvent::Shutdown);
        });
    }

    #[tokio::test(start_paused = true)]
    async fn slow_scans_do_not_pile_up_refreshes() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let starts = Starts::default();
        let begin = Instant::now();
        shutdown_after(tx.clone(), Duration::from_secs(60));

        let completed = run_scan_loop(&mut rx, 5, timed_scan(&starts, Duration::from_secs(12)))
            .await
            .unwrap();

        // 12 s scan + 5 s pause: starts at 0, 17, 34, 51; the fourth is cut off at 60.
        let starts = starts.lock().unwrap().clone();
        assert_eq!(starts.len(), 4);
        assert_eq!(completed, 3);
        for pair in starts.windows(2) {
            let gap = pair[1] - pair[0];
            assert!(gap >= Duration::from_secs(17) && gap < Duration::from_secs(18), "{gap:?}");
        }
        let elapsed = begin.elapsed();
        assert!(elapsed >= Duration::from_secs(60) && elapsed < Duration::from_secs(61));
        assert!(rx.try_recv().is_err());
        drop(tx);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_during_pause_stops_at_once() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let starts = Starts::default();
        let begin = Instant::now();
        shutdown_after(tx.clone(), Duration::from_secs(30));

        let completed = run_scan_loop(&mut rx, 60, timed_scan(&starts, Duration::from_secs(1)))
            .await
            .unwrap();

        assert_eq!(completed, 1);
        assert_eq!(starts.lock().unwrap().len(), 1);
        assert!(begin.elapsed() < Duration::from_secs(31));
        drop(tx);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_has_a_floor() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let starts = Starts::default();
        shutdown_after(tx.clone(), Duration::from_secs(11));

        run_scan_loop(&mut rx, 1, timed_scan(&starts, Duration::ZERO))
            .await
            .unwrap();

        // Scans at 0, 5 and 10 only, never every second.
        assert_eq!(starts.lock().unwrap().len(), 3);
        drop(tx);
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_during_pause_rescans_early() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let starts = Starts::default();
        let begin = Instant::now();
        let refresh_tx = tx.clone();
        tokio::spawn(async move {
            sleep(Duration::from_secs(2)).await;
            let _ = refresh_tx.send(TrackerEvent::Refresh);
        });
        shutdown_after(tx.clone(), Duration::from_secs(3));

        run_scan_loop(&mut rx, 60, timed_scan(&starts, Duration::ZERO))
            .await
            .unwrap();

        let starts = starts.lock().unwrap().clone();
        assert_eq!(starts.len(), 2);
        assert!(starts[1] - begin < Duration::from_secs(3));
        drop(tx);
    }

    #[tokio::test]
    async fn break_ends_the_loop_without_waiting() {
        let (_tx, mut rx) = mpsc::unbounded_channel();
        let completed = run_scan_loop(&mut rx, 60, || async {
            Ok::<_, RadarError>(ControlFlow::Break(()))
        })
        .await
        .unwrap();
        assert_eq!(completed, 1);
    }

    #[tokio::test]
    async fn scan_error_propagates() {
        let (_tx, mut rx) = mpsc::unbounded_channel();
        let err = run_scan_loop(&mut rx, 60, || async {
            Err::<ControlFlow<()>, _>(RadarError::AuthenticationFailed { status: 401 })
        })
        .await
        .unwrap_err();
        assert!(matches!(err, RadarError::AuthenticationFailed { status: 401 }));
    }
}
