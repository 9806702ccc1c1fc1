//! A fixed pool of counting workers, fed through a bounded queue
//!
//! The calling thread reads chunks and pushes them onto the queue, blocking while it is full.
//! Each worker pulls chunks until the queue closes, counting into a map nobody else can see, and
//! then hands that map back exactly once. Nothing is returned until every worker has finished.
//!
//! If a worker panics the whole run fails: its partial counts are gone, and an undercount that
//! looks like a result is worse than no result.
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use crossbeam_channel::{bounded, unbounded, Sender};
use rayon::ThreadPoolBuilder;
use chunk::Chunk;
use config::Config;
use errors::*;
use farm::new_farm;
use super::FrequencyMap;

/// Log progress every this many chunks
const PROGRESS_EVERY: usize = 16;

/// Count every chunk with `count`, using `config.workers` workers.
///
/// Returns one map per worker. A read error in `chunks` stops the dispatching, lets the chunks
/// already queued finish, and is then returned.
pub fn count_chunks<I, F>(chunks: I, config: &Config, count: F) -> Result<Vec<FrequencyMap>>
    where I: IntoIterator<Item = Result<Chunk>>,
          F: Fn(&Chunk, &mut FrequencyMap) + Sync {
    config.validate()?;
    let workers = config.workers;
    let pool = ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("wt-count-{}", i))
        .build()?;
    let (chunk_tx, chunk_rx) = bounded::<Chunk>(config.queue_depth);
    let (done_tx, done_rx) = unbounded::<Result<FrequencyMap>>();
    let abort = AtomicBool::new(false);
    let count = &count;
    let abort_flag = &abort;

    // The scope is the barrier: it only returns once every worker has.
    let dispatched = pool.in_place_scope(|scope| {
        for worker in 0..workers {
            let chunk_rx = chunk_rx.clone();
            let done_tx = done_tx.clone();
            scope.spawn(move |_| {
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                    let mut counts = new_farm();
                    let mut chunks_seen = 0;
                    for chunk in chunk_rx.iter() {
                        if abort_flag.load(Ordering::SeqCst) {
                            break;
                        }
                        count(&chunk, &mut counts);
                        chunks_seen += 1;
                    }
                    debug!("Worker #{} finished: {} chunks, {} distinct tokens",
                        worker, chunks_seen, counts.len());
                    counts
                }));
                let result = outcome.map_err(|payload| {
                    abort_flag.store(true, Ordering::SeqCst);
                    let message = panic_message(&*payload);
                    warn!("Worker #{} crashed; abandoning the run: {}", worker, message);
                    Error::WorkerPanic { worker: worker, message: message }
                });
                // done_rx outlives the scope, so this can't fail
                let _ = done_tx.send(result);
            });
        }
        // Only the workers hold these now, so the channels close when they finish
        drop(chunk_rx);
        drop(done_tx);
        dispatch(chunks, chunk_tx, abort_flag)
    });

    let mut maps = Vec::with_capacity(workers);
    let mut crash = None;
    for result in done_rx.iter() {
        match result {
            Ok(counts) => maps.push(counts),
            Err(err) => if crash.is_none() { crash = Some(err) },
        }
    }
    let dispatched = dispatched?;
    if let Some(err) = crash {
        return Err(err);
    }
    info!("Counted {} chunks with {} workers", dispatched, workers);
    Ok(maps)
}

/// Feed chunks to the queue until they run out, a worker crashes, or a read fails.
///
/// The queue closes when this returns, whichever way it returns.
fn dispatch<I>(chunks: I, queue: Sender<Chunk>, abort: &AtomicBool) -> Result<usize>
    where I: IntoIterator<Item = Result<Chunk>> {
    let mut dispatched = 0;
    let mut bytes = 0u64;
    for chunk in chunks {
        if abort.load(Ordering::SeqCst) {
            break;
        }
        let chunk = chunk?;
        bytes += chunk.data.len() as u64;
        if queue.send(chunk).is_err() {
            // Every worker is gone
            break;
        }
        dispatched += 1;
        if dispatched % PROGRESS_EVERY == 0 {
            info!("Dispatched {} chunks ({} MiB)", dispatched, bytes >> 20);
        }
    }
    Ok(dispatched)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
