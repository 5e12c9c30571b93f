use distro2sbom::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Mock PackageManager with canned listings, licenses and dependency output
///
/// Dependency queries sleep briefly and record how many ran at once, so tests
/// can check the worker bound.
#[derive(Default, Clone)]
pub struct MockPackageManager {
    packages: Vec<(String, String)>,
    licenses: HashMap<String, String>,
    dependencies: HashMap<String, Vec<String>>,
    failing: HashSet<String>,
    query_delay: Duration,
    in_flight: Arc<AtomicUsize>,
    peak_in_flight: Arc<AtomicUsize>,
    dependency_queries: Arc<AtomicUsize>,
}

impl MockPackageManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_package(mut self, name: &str, version: &str) -> Self {
        self.packages.push((name.to_string(), version.to_string()));
        self
    }

    pub fn with_license(mut self, name: &str, license: &str) -> Self {
        self.licenses.insert(name.to_string(), license.to_string());
        self
    }

    /// Raw dependency output lines for `name`
    pub fn with_dependencies(mut self, name: &str, dependencies: &[&str]) -> Self {
        self.dependencies.insert(
            name.to_string(),
            dependencies.iter().map(|d| d.to_string()).collect(),
        );
        self
    }

    pub fn failing_dependencies_for(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }

    pub fn with_query_delay(mut self, delay: Duration) -> Self {
        self.query_delay = delay;
        self
    }

    pub fn peak_concurrency(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    pub fn dependency_query_count(&self) -> usize {
        self.dependency_queries.load(Ordering::SeqCst)
    }
}

impl PackageManager for MockPackageManager {
    fn list_packages(&self, _kind: PackageManagerKind) -> Result<Vec<Package>> {
        self.packages
            .iter()
            .map(|(name, version)| Package::new(name.clone(), version.clone()))
            .collect()
    }

    fn query_license(&self, _kind: PackageManagerKind, package_name: &str) -> Result<Option<String>> {
        Ok(self.licenses.get(package_name).cloned())
    }

    fn query_dependencies(
        &self,
        kind: PackageManagerKind,
        package_name: &str,
    ) -> Result<Vec<String>> {
        self.dependency_queries.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.query_delay.is_zero() {
            thread::sleep(self.query_delay);
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.contains(package_name) {
            anyhow::bail!("{} dependency query failed for {}", kind, package_name);
        }
        Ok(self
            .dependencies
            .get(package_name)
            .cloned()
            .unwrap_or_default())
    }
}
