//! Per-delivery tracking metrics.
//!
//! Combines the simplifier and the haversine length into one summary
//! record. Distance is always measured on the original fixes, never on
//! the simplified polyline, so the reported length does not depend on
//! the rendering tolerance.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::fix::{normalize_trace, parse_raw_fixes, Fix, RawFix};
use crate::geo::trace_length_m;
use crate::simplify::{simplify_trace_with, Tolerance, DEFAULT_EPSILON_DEG};

/// Summary of one recorded trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingMetrics {
    /// Number of fixes in the original trace.
    pub points: usize,
    /// Haversine length of the original trace in km, rounded to 2 decimals.
    pub distance_km: f64,
    /// Number of fixes kept by simplification.
    pub compressed_points: usize,
    /// Kept fixes as a rounded percentage of the original (0-100).
    pub compression_ratio: u8,
}

impl TrackingMetrics {
    pub fn empty() -> Self {
        Self {
            points: 0,
            distance_km: 0.0,
            compressed_points: 0,
            compression_ratio: 0,
        }
    }
}

/// Metrics together with the simplified polyline they were computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceSummary {
    pub metrics: TrackingMetrics,
    pub polyline: Vec<Fix>,
}

/// Simplification settings for metric computation.
///
/// Missing JSON fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Tolerance in degrees. Default: [`DEFAULT_EPSILON_DEG`].
    pub epsilon_deg: f64,
    /// Tolerance in meters. Takes precedence over `epsilon_deg` when set.
    pub tolerance_m: Option<f64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            epsilon_deg: DEFAULT_EPSILON_DEG,
            tolerance_m: None,
        }
    }
}

impl MetricsConfig {
    pub fn tolerance(&self) -> Tolerance {
        match self.tolerance_m {
            Some(m) => Tolerance::Meters(m),
            None => Tolerance::Degrees(self.epsilon_deg),
        }
    }
}

/// Compute metrics for a raw trace with the default tolerance.
pub fn compute_tracking_metrics(points: &[RawFix]) -> Result<TrackingMetrics> {
    compute_tracking_metrics_with(points, &MetricsConfig::default())
}

/// Compute metrics for a raw trace, failing on the first invalid fix.
pub fn compute_tracking_metrics_with(
    points: &[RawFix],
    config: &MetricsConfig,
) -> Result<TrackingMetrics> {
    let fixes = normalize_trace(points)?;
    Ok(metrics_for_fixes(&fixes, config))
}

/// Compute metrics for an already normalized trace.
pub fn metrics_for_fixes(points: &[Fix], config: &MetricsConfig) -> TrackingMetrics {
    summarize_trace(points, config).metrics
}

/// Simplify a trace and compute its metrics in one pass.
pub fn summarize_trace(points: &[Fix], config: &MetricsConfig) -> TraceSummary {
    if points.is_empty() {
        return TraceSummary {
            metrics: TrackingMetrics::empty(),
            polyline: Vec::new(),
        };
    }

    let polyline = simplify_trace_with(points, config.tolerance());
    let distance_m = trace_length_m(points);

    let metrics = TrackingMetrics {
        points: points.len(),
        distance_km: round_to_hundredths(distance_m / 1000.0),
        compressed_points: polyline.len(),
        compression_ratio: ratio_percent(polyline.len(), points.len()),
    };

    debug!(
        "trace metrics: {} -> {} points ({}%), {:.2} km",
        metrics.points, metrics.compressed_points, metrics.compression_ratio, metrics.distance_km
    );

    TraceSummary { metrics, polyline }
}

/// Parse a JSON array of raw fixes and return the metrics as JSON.
pub fn metrics_to_json(data: &[u8]) -> Result<String> {
    let raw = parse_raw_fixes(data)?;
    let metrics = compute_tracking_metrics(&raw)?;
    Ok(serde_json::to_string(&metrics)?)
}

/// Parse a JSON array of raw fixes and return the summary as JSON.
pub fn summary_to_json(data: &[u8], config: &MetricsConfig) -> Result<String> {
    let fixes = normalize_trace(&parse_raw_fixes(data)?)?;
    let summary = summarize_trace(&fixes, config);
    Ok(serde_json::to_string(&summary)?)
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn ratio_percent(kept: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    // kept <= total, so this stays within 0..=100.
    (kept as f64 / total as f64 * 100.0).round() as u8
}
