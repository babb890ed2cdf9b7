//! Parallel analysis of independent recordings
//!
//! Each recording is moved to exactly one worker thread, which runs the
//! whole pipeline on it. Workers share nothing but the job and result
//! channels.

use crate::analysis::ScopeStatistics;
use crate::recording::Recording;
use crossbeam_channel::{bounded, unbounded};

/// Outcome of analysing one recording
#[derive(Debug, Clone)]
pub struct BatchResult {
    /// The recording, with its intervals updated
    pub recording: Recording,
    /// Statistics of the updated intervals
    pub statistics: Vec<ScopeStatistics>,
}

/// Update intervals and compute statistics for every recording
///
/// Runs on up to `workers` threads (at least one). Results are returned in
/// the same order as `recordings`.
pub fn analyze_all(recordings: Vec<Recording>, workers: usize) -> Vec<BatchResult> {
    let total = recordings.len();
    if total == 0 {
        return Vec::new();
    }
    let workers = workers.clamp(1, total);

    let (job_tx, job_rx) = bounded::<(usize, Recording)>(total);
    let (result_tx, result_rx) = unbounded::<(usize, BatchResult)>();

    for job in recordings.into_iter().enumerate() {
        // Capacity equals the job count, so this never blocks
        if job_tx.send(job).is_err() {
            break;
        }
    }
    drop(job_tx);

    std::thread::scope(|scope| {
        for worker in 0..workers {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            scope.spawn(move || {
                for (index, mut recording) in job_rx.iter() {
                    tracing::debug!(worker, recording = recording.name(), "Batch job started");
                    recording.update_valid_intervals();
                    let statistics = recording.compute_statistics();
                    let result = BatchResult {
                        recording,
                        statistics,
                    };
                    if result_tx.send((index, result)).is_err() {
                        break;
                    }
                }
            });
        }
    });
    drop(result_tx);

    let mut results: Vec<(usize, BatchResult)> = result_rx.iter().collect();
    results.sort_by_key(|(index, _)| *index);

    tracing::info!(recordings = total, workers, "Batch analysis complete");

    results.into_iter().map(|(_, result)| result).collect()
}
