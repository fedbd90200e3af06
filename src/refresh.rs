// src/refresh.rs
//
// Bounded fetch pool for bulk refresh. Workers only fetch; every result is
// handed back over a channel to the calling thread, which is the single
// owner allowed to touch the store.

use std::{
    thread,
    time::Duration,
    sync::{ mpsc, atomic::{ AtomicUsize, Ordering } },
};

use crate::config::PoolOptions;
use crate::error::FetchError;
use crate::fetch::Fetch;
use crate::model::{SeriesId, SeriesInfo};

/// Result of fetching one identifier.
pub type FetchOutcome = Result<SeriesInfo, (SeriesId, FetchError)>;

/// Fetch every identifier on up to `pool.workers` threads and feed each
/// outcome to `on_result` on the calling thread, in completion order.
/// Returns once every identifier has been reported.
pub fn fetch_all<F>(
    fetcher: &F,
    ids: &[SeriesId],
    pool: &PoolOptions,
    mut on_result: impl FnMut(FetchOutcome),
) where
    F: Fetch + ?Sized,
{
    if ids.is_empty() {
        return;
    }

    let counter = AtomicUsize::new(0);
    let workers = pool.workers.min(ids.len()).max(1);
    let (res_tx, res_rx) = mpsc::channel::<FetchOutcome>();

    thread::scope(|scope| {
        for _ in 0..workers {
            let idx = &counter;
            let tx = res_tx.clone();

            scope.spawn(move || {
                loop {
                    let i = idx.fetch_add(1, Ordering::Relaxed);
                    if i >= ids.len() {
                        break;
                    }
                    let id = &ids[i];
                    let result = fetcher.fetch(id).map_err(|e| (id.clone(), e));
                    if tx.send(result).is_err() {
                        break; // receiver gone
                    }
                    let more_work = idx.load(Ordering::Relaxed) < ids.len();
                    if let Some(pause) = pause_after(pool, i, more_work) {
                        thread::sleep(pause); // be polite
                    }
                }
            });
        }
        drop(res_tx); // main thread is sole receiver now

        for outcome in res_rx {
            on_result(outcome);
        }
    });
}

/// Pause after fetching item `i`. None once no items are left to claim
/// and when the pool has no pause configured.
fn pause_after(pool: &PoolOptions, i: usize, more_work: bool) -> Option<Duration> {
    if !more_work {
        return None;
    }
    let jitter = if pool.jitter_ms == 0 { 0 } else { (i as u64) % pool.jitter_ms };
    let pause = pool.pause + Duration::from_millis(jitter);
    (!pause.is_zero()).then_some(pause)
}
