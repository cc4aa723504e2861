use std::sync::Arc;

use prometheus::{CounterVec, HistogramOpts, HistogramVec, Opts, Registry, proto::MetricFamily};

use fluid_core::{BuildOutcome, LookupOutcome, MetricsBackend};

/// Prometheus metrics backend.
///
/// ## Label cardinality
/// All labels are bounded:
/// - `engine`: one of the supported engine kinds
/// - `outcome`: "success", "not_found", "backend_error" for builds;
///   "found", "not_found", "error" for lookups
/// - `resource`: "runtime", "daemonset", "dataset"
#[derive(Clone)]
pub struct PrometheusMetrics {
    cache_hits: CounterVec,
    builds: CounterVec,
    build_duration: HistogramVec,
    lookups: CounterVec,
    registry: Arc<Registry>,
}

impl PrometheusMetrics {
    /// Create a new prometheus metrics backend with custom registry.
    pub fn new_with_registry(registry: Arc<Registry>) -> Result<Self, prometheus::Error> {
        let cache_hits = CounterVec::new(
            Opts::new(
                "runtime_info_cache_hits_total",
                "Runtime info requests answered from the engine cache",
            )
            .namespace("fluid"),
            &["engine"],
        )?;
        registry.register(Box::new(cache_hits.clone()))?;

        let builds = CounterVec::new(
            Opts::new("runtime_info_builds_total", "Runtime info builds by outcome")
                .namespace("fluid"),
            &["engine", "outcome"],
        )?;
        registry.register(Box::new(builds.clone()))?;

        let build_duration = HistogramVec::new(
            HistogramOpts::new(
                "runtime_info_build_duration_seconds",
                "Runtime info build duration in seconds, lookups included",
            )
            .namespace("fluid")
            .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
            &["engine"],
        )?;
        registry.register(Box::new(build_duration.clone()))?;

        let lookups = CounterVec::new(
            Opts::new("cluster_lookups_total", "Cluster object lookups by outcome")
                .namespace("fluid"),
            &["resource", "outcome"],
        )?;
        registry.register(Box::new(lookups.clone()))?;

        Ok(Self {
            cache_hits,
            builds,
            build_duration,
            lookups,
            registry,
        })
    }

    /// Create a new prometheus metrics backend with its own registry.
    pub fn new() -> Result<Self, prometheus::Error> {
        Self::new_with_registry(Arc::new(Registry::new()))
    }

    /// Gather all metrics for exposition.
    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }

    /// Underlying registry, for registering metrics alongside these.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }
}

impl MetricsBackend for PrometheusMetrics {
    fn record_cache_hit(&self, engine: &str) {
        self.cache_hits.with_label_values(&[engine]).inc();
    }

    fn record_build(&self, engine: &str, outcome: BuildOutcome, duration_ms: u64) {
        self.builds
            .with_label_values(&[engine, outcome.as_label()])
            .inc();

        let duration_seconds = duration_ms as f64 / 1000.0;
        self.build_duration
            .with_label_values(&[engine])
            .observe(duration_seconds);
    }

    fn record_lookup(&self, resource: &str, outcome: LookupOutcome) {
        self.lookups
            .with_label_values(&[resource, outcome.as_label()])
            .inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family<'a>(families: &'a [MetricFamily], name: &str) -> &'a MetricFamily {
        families
            .iter()
            .find(|f| f.name() == name)
            .unwrap_or_else(|| panic!("metric {name} not found"))
    }

    #[test]
    fn cache_hits_are_counted_per_engine() {
        let metrics = PrometheusMetrics::new().unwrap();

        metrics.record_cache_hit("jindo");
        metrics.record_cache_hit("jindo");
        metrics.record_cache_hit("alluxio");

        let families = metrics.gather();
        let hits = family(&families, "fluid_runtime_info_cache_hits_total");
        assert_eq!(hits.get_metric().len(), 2);
    }

    #[test]
    fn builds_feed_counter_and_histogram() {
        let metrics = PrometheusMetrics::new().unwrap();

        metrics.record_build("jindo", BuildOutcome::Success, 12);
        metrics.record_build("jindo", BuildOutcome::NotFound, 3);

        let families = metrics.gather();
        assert_eq!(
            family(&families, "fluid_runtime_info_builds_total")
                .get_metric()
                .len(),
            2
        );
        assert_eq!(
            family(&families, "fluid_runtime_info_build_duration_seconds")
                .get_metric()
                .len(),
            1
        );
    }

    #[test]
    fn lookups_are_labelled_by_resource_and_outcome() {
        let metrics = PrometheusMetrics::new().unwrap();

        metrics.record_lookup("runtime", LookupOutcome::Found);
        metrics.record_lookup("dataset", LookupOutcome::NotFound);
        metrics.record_lookup("dataset", LookupOutcome::NotFound);

        let families = metrics.gather();
        let lookups = family(&families, "fluid_cluster_lookups_total");
        assert_eq!(lookups.get_metric().len(), 2);
    }

    #[test]
    fn registering_twice_in_one_registry_fails() {
        let registry = Arc::new(Registry::new());
        PrometheusMetrics::new_with_registry(registry.clone()).unwrap();

        assert!(PrometheusMetrics::new_with_registry(registry).is_err());
    }
}
