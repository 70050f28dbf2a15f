//! Bounded-concurrency batch driver
//!
//! A fixed pool of named worker threads pulls codepoints from a shared
//! cursor; the pool size is the concurrency limit. Each worker opens its
//! own pair of fonts and writes hits into one locked table.

use crate::constants::Codepoint;
use crate::font::source::SourceProvider;
use crate::mapper::resolver::{MatchSettings, RuneResolver};
use crate::mapper::MappingTable;
use log::{info, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::Instant;

/// Shared state of one batch
struct BatchQueue {
    next: AtomicU64,
    end: u64,
    results: Mutex<MappingTable>,
}

impl BatchQueue {
    /// Claim the next codepoint, `None` once the range is drained
    fn claim(&self) -> Option<Codepoint> {
        let cp = self.next.fetch_add(1, Ordering::Relaxed);
        (cp <= self.end).then_some(cp as Codepoint)
    }

    fn store(&self, special: Codepoint, standard: Codepoint) {
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(special, standard);
    }
}

/// Resolve every codepoint in `[start, end]` with at most `concurrency`
/// resolutions in flight.
///
/// Never fails: workers that cannot open their fonts still drain their
/// share of the range as misses.
pub fn map_range<P: SourceProvider>(
    special: &P,
    standard: &P,
    start: Codepoint,
    end: Codepoint,
    concurrency: usize,
    settings: &MatchSettings,
) -> MappingTable {
    if start > end {
        return MappingTable::new();
    }

    let total = end as u64 - start as u64 + 1;
    let workers = (concurrency.max(1) as u64).min(total) as usize;
    let queue = BatchQueue {
        next: AtomicU64::new(start as u64),
        end: end as u64,
        results: Mutex::new(MappingTable::new()),
    };

    info!(
        "Mapping U+{:04X}..=U+{:04X} ({} codepoints, {} workers)",
        start, end, total, workers
    );
    let began = Instant::now();

    thread::scope(|scope| {
        let queue = &queue;
        let mut spawned = 0;
        for id in 0..workers {
            let result = thread::Builder::new()
                .name(format!("glyphmap-worker-{}", id))
                .spawn_scoped(scope, move || run_worker(special, standard, queue, settings));
            match result {
                Ok(_) => spawned += 1,
                Err(e) => warn!("Failed to spawn worker {}: {}", id, e),
            }
        }
        // Keep the single-attempt guarantee even without any worker thread
        if spawned == 0 {
            run_worker(special, standard, queue, settings);
        }
    });

    let table = queue
        .results
        .into_inner()
        .unwrap_or_else(PoisonError::into_inner);

    info!(
        "Mapped {} of {} codepoints in {:.2?}",
        table.len(),
        total,
        began.elapsed()
    );
    table
}

fn run_worker<P: SourceProvider>(
    special: &P,
    standard: &P,
    queue: &BatchQueue,
    settings: &MatchSettings,
) {
    let sources = match (special.open(), standard.open()) {
        (Ok(special), Ok(standard)) => Some((special, standard)),
        (Err(e), _) | (_, Err(e)) => {
            warn!("Worker could not open fonts, its codepoints count as misses: {}", e);
            None
        }
    };
    let resolver = sources
        .as_ref()
        .map(|(special, standard)| RuneResolver::new(special, standard, settings));

    while let Some(cp) = queue.claim() {
        if let Some(hit) = resolver.as_ref().and_then(|r| r.resolve(cp)) {
            queue.store(hit.special, hit.standard);
        }
    }
}
