//! Tuning knobs for the rayon-backed code paths.
//!
//! Window generation and convolution compute every output sample
//! independently, so long inputs are split across rayon's pool. Short inputs
//! stay sequential because scheduling overhead dominates. The cut-over length
//! comes from, in order of precedence:
//!
//! 1. [`set_parallel_threshold`] (process-wide override, `0` clears it)
//! 2. `SIGKIT_PAR_THRESHOLD`
//! 3. `per_core_work × threads`, where `SIGKIT_PAR_PER_CORE_WORK` defaults to
//!    4096 samples and `SIGKIT_PAR_THREADS` defaults to the number of CPUs.
//!
//! Environment variables are read once per process.

use core::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

/// Samples each core should own before splitting pays off.
const DEFAULT_PER_CORE_WORK: usize = 4096;

static PARALLEL_THRESHOLD_OVERRIDE: AtomicUsize = AtomicUsize::new(0);
static PARALLEL_ENV: OnceLock<ParallelEnv> = OnceLock::new();

struct ParallelEnv {
    threshold: usize,
    per_core_work: usize,
    threads: usize,
}

fn env_usize(name: &str) -> Option<usize> {
    std::env::var(name).ok().and_then(|v| v.parse::<usize>().ok())
}

fn parallel_env() -> &'static ParallelEnv {
    PARALLEL_ENV.get_or_init(|| ParallelEnv {
        threshold: env_usize("SIGKIT_PAR_THRESHOLD").unwrap_or(0),
        per_core_work: env_usize("SIGKIT_PAR_PER_CORE_WORK").unwrap_or(DEFAULT_PER_CORE_WORK),
        threads: env_usize("SIGKIT_PAR_THREADS")
            .filter(|&t| t > 0)
            .unwrap_or_else(|| num_cpus::get().max(1)),
    })
}

/// Set a custom minimum length for the parallel paths.
///
/// Passing `0` reverts to the environment variable or built-in heuristic.
pub fn set_parallel_threshold(threshold: usize) {
    PARALLEL_THRESHOLD_OVERRIDE.store(threshold, Ordering::Relaxed);
}

/// Number of worker threads the heuristic assumes.
pub fn parallel_threads() -> usize {
    parallel_env().threads
}

/// Minimum number of output samples before work is split across threads.
pub fn parallel_threshold() -> usize {
    let override_thr = PARALLEL_THRESHOLD_OVERRIDE.load(Ordering::Relaxed);
    if override_thr != 0 {
        return override_thr;
    }
    let env = parallel_env();
    if env.threshold != 0 {
        env.threshold
    } else {
        env.per_core_work.max(1).saturating_mul(env.threads)
    }
}

/// Whether an output of `len` samples should be computed in parallel.
pub(crate) fn should_parallelize(len: usize) -> bool {
    let threshold = parallel_threshold();
    let parallel = parallel_threads() > 1 && len >= threshold;
    trace_log!(
        "parallel dispatch: len={} threshold={} parallel={}",
        len,
        threshold,
        parallel
    );
    parallel
}
