//! # ridertrace
//!
//! Rider trace simplification and metrics for delivery tracking.
//!
//! The tracking service records a rider's location fixes for each order.
//! This crate reduces such a trace to a lightweight polyline for map
//! clients and reports how long the route was and how much the polyline
//! saved.
//!
//! ```rust
//! use ridertrace::{compute_tracking_metrics, Fix, RawFix};
//!
//! let trace: Vec<RawFix> = [
//!     Fix::new(40.4237, -86.9212),
//!     Fix::new(40.4238, -86.9212),
//!     Fix::new(40.4239, -86.9212),
//! ]
//! .iter()
//! .map(RawFix::from)
//! .collect();
//!
//! let metrics = compute_tracking_metrics(&trace).unwrap();
//! assert_eq!(metrics.compressed_points, 2);
//! ```

pub mod android_jni;
pub mod error;
pub mod fix;
pub mod geo;
pub mod gpx;
pub mod metrics;
pub mod simplify;

pub use error::{Result, TraceError};
pub use fix::{normalize_trace, parse_raw_fixes, Fix, RawFix};
pub use geo::{haversine_distance_meters, perpendicular_distance, trace_length_m};
pub use metrics::{
    compute_tracking_metrics, compute_tracking_metrics_with, metrics_for_fixes, summarize_trace,
    MetricsConfig, TraceSummary, TrackingMetrics,
};
pub use simplify::{simplify_trace, simplify_trace_with, Tolerance, DEFAULT_EPSILON_DEG};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Route `log` output to logcat. Safe to call on every JNI entry.
#[cfg(target_os = "android")]
pub(crate) fn init_logging() {
    use android_logger::Config;
    use log::LevelFilter;

    android_logger::init_once(
        Config::default()
            .with_max_level(LevelFilter::Debug)
            .with_tag("RiderTrace"),
    );
}

/// Elsewhere the host process installs its own logger.
#[cfg(not(target_os = "android"))]
pub(crate) fn init_logging() {}
