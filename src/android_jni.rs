//! Android entry points for the rider app's `com.ridertrace.tracking.RustBridge`.
//!
//! The app hands over the fixes it buffered for an order as a JSON array
//! and gets back metrics or a simplified polyline as JSON. A bad trace
//! surfaces in Kotlin as `IllegalArgumentException` with a null result.

use jni::objects::{JByteArray, JClass, JString};
use jni::sys::{jdouble, jstring};
use jni::JNIEnv;
use log::{debug, info, warn};

use crate::fix::{normalize_trace, parse_raw_fixes};
use crate::metrics::{metrics_for_fixes, metrics_to_json, summary_to_json, MetricsConfig};
use crate::simplify::simplify_trace;

const EXCEPTION_CLASS: &str = "java/lang/IllegalArgumentException";

/// Returns the library version.
/// Maps to: RustBridge.version() -> String
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_ridertrace_tracking_RustBridge_version(
    mut env: JNIEnv,
    _class: JClass,
) -> jstring {
    respond(&mut env, Ok(crate::VERSION.to_string()))
}

/// Maps to: RustBridge.computeTrackingMetrics(fixesJson: String) -> String
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_ridertrace_tracking_RustBridge_computeTrackingMetrics(
    mut env: JNIEnv,
    _class: JClass,
    fixes_json: JString,
) -> jstring {
    crate::init_logging();
    let result = read_string(&mut env, &fixes_json)
        .and_then(|json| metrics_to_json(json.as_bytes()).map_err(|e| e.to_string()));
    respond(&mut env, result)
}

/// Maps to: RustBridge.summarizeTrace(fixesJson: String, configJson: String) -> String
///
/// An empty config string selects the defaults.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_ridertrace_tracking_RustBridge_summarizeTrace(
    mut env: JNIEnv,
    _class: JClass,
    fixes_json: JString,
    config_json: JString,
) -> jstring {
    crate::init_logging();
    let result = summarize(&mut env, &fixes_json, &config_json);
    respond(&mut env, result)
}

/// Maps to: RustBridge.simplifyTrace(fixesJson: String, epsilon: Double) -> String
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_ridertrace_tracking_RustBridge_simplifyTrace(
    mut env: JNIEnv,
    _class: JClass,
    fixes_json: JString,
    epsilon: jdouble,
) -> jstring {
    crate::init_logging();
    let result = read_string(&mut env, &fixes_json).and_then(|json| {
        let fixes = parse_raw_fixes(json.as_bytes())
            .and_then(|raw| normalize_trace(&raw))
            .map_err(|e| e.to_string())?;
        serde_json::to_string(&simplify_trace(&fixes, epsilon)).map_err(|e| e.to_string())
    });
    respond(&mut env, result)
}

/// Maps to: RustBridge.metricsFromGpx(data: ByteArray) -> String
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_ridertrace_tracking_RustBridge_metricsFromGpx(
    mut env: JNIEnv,
    _class: JClass,
    data: JByteArray,
) -> jstring {
    crate::init_logging();
    let result = env
        .convert_byte_array(&data)
        .map_err(|e| e.to_string())
        .and_then(|bytes| crate::gpx::read_fixes_bytes(&bytes).map_err(|e| e.to_string()))
        .and_then(|fixes| {
            let metrics = metrics_for_fixes(&fixes, &MetricsConfig::default());
            serde_json::to_string(&metrics).map_err(|e| e.to_string())
        });
    respond(&mut env, result)
}

fn summarize(env: &mut JNIEnv, fixes_json: &JString, config_json: &JString) -> Result<String, String> {
    let fixes = read_string(env, fixes_json)?;
    let config = parse_config(&read_string(env, config_json)?)?;
    info!("summarizing trace with {config:?}");
    summary_to_json(fixes.as_bytes(), &config).map_err(|e| e.to_string())
}

fn parse_config(json: &str) -> Result<MetricsConfig, String> {
    if json.trim().is_empty() {
        return Ok(MetricsConfig::default());
    }
    serde_json::from_str(json).map_err(|e| format!("invalid config: {e}"))
}

fn read_string(env: &mut JNIEnv, value: &JString) -> Result<String, String> {
    env.get_string(value)
        .map(String::from)
        .map_err(|e| e.to_string())
}

/// Hand a result back to Java, throwing on error.
fn respond(env: &mut JNIEnv, result: Result<String, String>) -> jstring {
    match result.and_then(|s| env.new_string(s).map_err(|e| e.to_string())) {
        Ok(s) => {
            debug!("RustBridge call succeeded");
            s.into_raw()
        }
        Err(msg) => {
            warn!("RustBridge call failed: {msg}");
            if let Err(e) = env.throw_new(EXCEPTION_CLASS, &msg) {
                warn!("could not raise {EXCEPTION_CLASS}: {e}");
            }
            std::ptr::null_mut()
        }
    }
}
