use crate::ports::outbound::PackageManager;
use crate::sbom_generation::domain::PackageManagerKind;
use crate::sbom_generation::services::DependencyMap;
use crate::shared::error::SbomError;
use crate::shared::Result;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Mutex};
use std::thread;

/// Default number of concurrent dependency queries
pub const DEFAULT_WORKER_COUNT: usize = 4;

/// What to do when a single dependency query fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPolicy {
    /// Abort the whole batch with the first failure
    #[default]
    FailFast,
    /// Record an empty dependency list for the failing package and continue
    SkipFailed,
}

/// DependencyFetcher application service
///
/// Queries the dependencies of every package on a fixed pool of worker
/// threads. Package names are queued up front on a channel sized to the whole
/// batch; workers pull names from it and send `(name, result)` pairs back to
/// the calling thread, which alone builds the resulting map.
pub struct DependencyFetcher<'a, PM> {
    package_manager: &'a PM,
    workers: usize,
    policy: FetchPolicy,
}

impl<'a, PM: PackageManager> DependencyFetcher<'a, PM> {
    pub fn new(package_manager: &'a PM, workers: usize, policy: FetchPolicy) -> Self {
        Self {
            package_manager,
            workers,
            policy,
        }
    }

    /// Fetches the raw dependency tokens of every named package
    ///
    /// Duplicate names are queried once. `on_progress(done, total)` is called
    /// on the calling thread after each result arrives.
    ///
    /// # Returns
    /// A map with one entry per distinct input name
    ///
    /// # Errors
    /// With [`FetchPolicy::FailFast`], the first failing query is returned with
    /// [`SbomError::DependencyFetch`] context and all partial results are dropped
    pub fn fetch_all<'n, I, F>(
        &self,
        kind: PackageManagerKind,
        names: I,
        mut on_progress: F,
    ) -> Result<DependencyMap>
    where
        I: IntoIterator<Item = &'n str>,
        F: FnMut(usize, usize),
    {
        let mut seen = HashSet::new();
        let names: Vec<&str> = names.into_iter().filter(|name| seen.insert(*name)).collect();
        let total = names.len();
        if total == 0 {
            return Ok(DependencyMap::new());
        }

        let workers = self.workers.clamp(1, total);
        tracing::debug!(packages = total, workers, "fetching dependencies");

        let (job_tx, job_rx) = mpsc::sync_channel::<&str>(total);
        for name in &names {
            job_tx
                .send(*name)
                .map_err(|_| anyhow::anyhow!("dependency job queue closed unexpectedly"))?;
        }
        drop(job_tx);

        let job_rx = Mutex::new(job_rx);
        let cancelled = AtomicBool::new(false);
        let (result_tx, result_rx) = mpsc::channel::<(&str, Result<Vec<String>>)>();
        let package_manager = self.package_manager;

        thread::scope(|scope| {
            for _ in 0..workers {
                let result_tx = result_tx.clone();
                let job_rx = &job_rx;
                let cancelled = &cancelled;
                scope.spawn(move || loop {
                    let next = match job_rx.lock() {
                        Ok(queue) => queue.recv(),
                        Err(_) => break,
                    };
                    let Ok(name) = next else { break };
                    if cancelled.load(Ordering::Relaxed) {
                        break;
                    }
                    let result = package_manager.query_dependencies(kind, name);
                    if result_tx.send((name, result)).is_err() {
                        break;
                    }
                });
            }
            drop(result_tx);

            let mut dependency_map = DependencyMap::with_capacity(total);
            for received in 1..=total {
                let Ok((name, result)) = result_rx.recv() else {
                    anyhow::bail!(
                        "dependency workers stopped after {} of {} packages",
                        received - 1,
                        total
                    );
                };
                on_progress(received, total);

                match (result, self.policy) {
                    (Ok(dependencies), _) => {
                        dependency_map.insert(name.to_string(), dependencies);
                    }
                    (Err(e), FetchPolicy::FailFast) => {
                        cancelled.store(true, Ordering::Relaxed);
                        return Err(e.context(SbomError::DependencyFetch {
                            package: name.to_string(),
                        }));
                    }
                    (Err(e), FetchPolicy::SkipFailed) => {
                        tracing::warn!(package = name, error = %e, "skipping dependencies of package");
                        dependency_map.insert(name.to_string(), Vec::new());
                    }
                }
            }
            Ok(dependency_map)
        })
    }
}
