//! Collector registry and text exposition.
//!
//! # Responsibilities
//! - Hold the registered collectors and their descriptors
//! - Reject two collectors announcing the same metric name
//! - Run every collector on scrape and render Prometheus text
//!
//! # Design Decisions
//! - Each scrape records into its own `PrometheusRecorder`, so nothing from a
//!   previous scrape (e.g. a series for a removed label value) leaks into the
//!   next one
//! - Collectors run concurrently; rendering happens after all have finished

use std::collections::HashSet;
use std::sync::Arc;

use futures_util::future::join_all;
use metrics::{describe_gauge, Label};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::collector::{Collector, MetricDesc, MetricSample};

/// Error registering a collector.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("duplicate metric descriptor '{0}'")]
    DuplicateDescriptor(String),
}

/// Set of collectors served from one exposition endpoint.
#[derive(Default)]
pub struct MetricsRegistry {
    collectors: Vec<Arc<dyn Collector>>,
    descriptors: Vec<MetricDesc>,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a collector, recording the descriptors it announces.
    pub fn register(&mut self, collector: Arc<dyn Collector>) -> Result<(), RegistryError> {
        let descs = collector.describe();

        let mut names: HashSet<&str> = self.descriptors.iter().map(|d| d.fq_name.as_str()).collect();
        for desc in &descs {
            if !names.insert(desc.fq_name.as_str()) {
                return Err(RegistryError::DuplicateDescriptor(desc.fq_name.clone()));
            }
        }

        for desc in &descs {
            tracing::debug!(metric = %desc.fq_name, labels = ?desc.variable_labels, "Registered metric");
        }

        self.descriptors.extend(descs);
        self.collectors.push(collector);
        Ok(())
    }

    /// Every registered descriptor, in registration order.
    pub fn descriptors(&self) -> &[MetricDesc] {
        &self.descriptors
    }

    /// Number of registered collectors.
    pub fn len(&self) -> usize {
        self.collectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collectors.is_empty()
    }

    /// Run every collector once and return the raw samples.
    pub async fn collect_all(&self) -> Vec<MetricSample> {
        join_all(self.collectors.iter().map(|c| c.collect()))
            .await
            .into_iter()
            .flatten()
            .collect()
    }

    /// Run a scrape and render it in the Prometheus text format.
    pub async fn gather(&self) -> String {
        let samples = self.collect_all().await;
        render(&self.descriptors, &samples)
    }
}

/// Render descriptors and samples through a scrape-local recorder.
pub fn render(descriptors: &[MetricDesc], samples: &[MetricSample]) -> String {
    let recorder = PrometheusBuilder::new().build_recorder();
    let handle = recorder.handle();

    metrics::with_local_recorder(&recorder, || {
        for desc in descriptors {
            describe_gauge!(desc.fq_name.clone(), desc.help.clone());
        }

        for sample in samples {
            let labels: Vec<Label> = sample
                .labels
                .iter()
                .map(|(k, v)| Label::new(k.clone(), v.clone()))
                .collect();
            metrics::gauge!(sample.name.clone(), labels).set(sample.value);
        }
    });

    handle.render()
}
