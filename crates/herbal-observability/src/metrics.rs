//! Per-request timing metrics.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use herbal_core::RequestId;
use serde::{Deserialize, Serialize};

/// Metrics for one page request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestMetrics {
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workload: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    /// Time to shell flush (microseconds).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to_shell_us: Option<u64>,
    /// Time to first section fill (microseconds).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to_first_section_us: Option<u64>,
    /// Time until the closing markup (microseconds).
    pub total_duration_us: u64,
    pub sections: BTreeMap<String, SectionMetrics>,
    pub dependencies: BTreeMap<String, DependencyMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

/// Metrics for a single section fill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionMetrics {
    pub name: String,
    /// Request start to section start (microseconds).
    pub start_us: u64,
    /// Request start to section sent (microseconds).
    pub sent_us: u64,
    pub duration_us: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<usize>,
    /// The section had nothing to show (empty list or failed load).
    pub rendered_empty: bool,
}

/// Outcome of one upstream read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyMetrics {
    pub tag: String,
    pub url: String,
    pub duration_us: u64,
    /// Number of records decoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<usize>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Collector for request metrics.
#[derive(Debug)]
pub struct MetricsCollector {
    request_id: RequestId,
    workload: Option<String>,
    route: Option<String>,
    start: Instant,
    shell_sent: Option<Instant>,
    first_section_sent: Option<Instant>,
    sections: BTreeMap<String, SectionMetricsBuilder>,
    dependencies: BTreeMap<String, DependencyMetrics>,
}

#[derive(Debug)]
struct SectionMetricsBuilder {
    start: Instant,
    sent: Option<Instant>,
    bytes: Option<usize>,
    rendered_empty: bool,
}

impl MetricsCollector {
    pub fn new(request_id: RequestId) -> Self {
        Self {
            request_id,
            workload: None,
            route: None,
            start: Instant::now(),
            shell_sent: None,
            first_section_sent: None,
            sections: BTreeMap::new(),
            dependencies: BTreeMap::new(),
        }
    }

    pub fn set_workload(&mut self, workload: impl Into<String>) {
        self.workload = Some(workload.into());
    }

    pub fn set_route(&mut self, route: impl Into<String>) {
        self.route = Some(route.into());
    }

    pub fn record_shell_sent(&mut self) {
        self.shell_sent = Some(Instant::now());
    }

    pub fn record_section_start(&mut self, name: &str) {
        self.sections.insert(
            name.to_string(),
            SectionMetricsBuilder {
                start: Instant::now(),
                sent: None,
                bytes: None,
                rendered_empty: false,
            },
        );
    }

    /// Record a section fill. A section that was never started starts now.
    pub fn record_section_sent(&mut self, name: &str, bytes: usize, rendered_empty: bool) {
        let now = Instant::now();
        self.first_section_sent.get_or_insert(now);

        let section = self
            .sections
            .entry(name.to_string())
            .or_insert(SectionMetricsBuilder {
                start: now,
                sent: None,
                bytes: None,
                rendered_empty: false,
            });
        section.sent = Some(now);
        section.bytes = Some(bytes);
        section.rendered_empty = rendered_empty;
    }

    /// Record an upstream read. `items` is the decoded record count on success.
    pub fn record_dependency(
        &mut self,
        tag: &str,
        url: &str,
        duration: Duration,
        outcome: Result<usize, String>,
    ) {
        let (items, error) = match outcome {
            Ok(items) => (Some(items), None),
            Err(error) => (None, Some(error)),
        };
        self.dependencies.insert(
            tag.to_string(),
            DependencyMetrics {
                tag: tag.to_string(),
                url: url.to_string(),
                duration_us: duration.as_micros() as u64,
                success: error.is_none(),
                items,
                error,
            },
        );
    }

    /// Finalize and return the metrics.
    pub fn finalize(self, status_code: Option<u16>) -> RequestMetrics {
        let now = Instant::now();
        let start = self.start;
        let micros = |t: Instant| t.duration_since(start).as_micros() as u64;

        let sections = self
            .sections
            .into_iter()
            .map(|(name, builder)| {
                let sent = builder.sent.unwrap_or(now);
                let metrics = SectionMetrics {
                    name: name.clone(),
                    start_us: micros(builder.start),
                    sent_us: micros(sent),
                    duration_us: sent.duration_since(builder.start).as_micros() as u64,
                    bytes: builder.bytes,
                    rendered_empty: builder.rendered_empty,
                };
                (name, metrics)
            })
            .collect();

        RequestMetrics {
            request_id: self.request_id.to_string(),
            workload: self.workload,
            route: self.route,
            time_to_shell_us: self.shell_sent.map(micros),
            time_to_first_section_us: self.first_section_sent.map(micros),
            total_duration_us: micros(now),
            sections,
            dependencies: self.dependencies,
            status_code,
        }
    }

    pub fn time_to_shell(&self) -> Option<Duration> {
        self.shell_sent.map(|t| t.duration_since(self.start))
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl RequestMetrics {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Format as a human-readable summary.
    pub fn to_summary(&self) -> String {
        let ms = |us: u64| us as f64 / 1000.0;
        let mut lines = vec![format!("Request: {}", self.request_id)];

        if let Some(tts) = self.time_to_shell_us {
            lines.push(format!("  Time to shell: {}us ({:.2}ms)", tts, ms(tts)));
        }
        if let Some(ttfs) = self.time_to_first_section_us {
            lines.push(format!("  Time to first section: {}us ({:.2}ms)", ttfs, ms(ttfs)));
        }
        lines.push(format!(
            "  Total: {}us ({:.2}ms)",
            self.total_duration_us,
            ms(self.total_duration_us)
        ));

        if !self.sections.is_empty() {
            lines.push("  Sections:".to_string());
            for (name, section) in &self.sections {
                let empty = if section.rendered_empty { " [empty]" } else { "" };
                lines.push(format!(
                    "    {}: {}us ({:.2}ms){}",
                    name,
                    section.duration_us,
                    ms(section.duration_us),
                    empty
                ));
            }
        }

        if !self.dependencies.is_empty() {
            lines.push("  Dependencies:".to_string());
            for dep in self.dependencies.values() {
                let outcome = match (&dep.error, dep.items) {
                    (Some(error), _) => format!("FAILED: {}", error),
                    (None, Some(items)) => format!("{} items", items),
                    (None, None) => "ok".to_string(),
                };
                lines.push(format!(
                    "    {} [{}]: {}us - {}",
                    dep.tag, outcome, dep.duration_us, dep.url
                ));
            }
        }

        lines.join("\n")
    }
}
