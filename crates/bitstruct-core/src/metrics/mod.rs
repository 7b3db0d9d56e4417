//! Compression-ratio metrics.
//!
//! Each metric compresses the canonical packing of a bitstring (see
//! [`crate::bits`]) and reports `compressed / packed` in (0, 1]. Lower means
//! more redundancy, i.e. more structure. Three independent compressors are
//! registered so a finding can be checked for single-algorithm artifacts.

mod compressors;

use serde::Serialize;

use crate::bits::Bitstring;

pub use compressors::{Bzip2Ratio, XzRatio, ZlibRatio};

/// Metric the claim classifier treats as the default.
pub const DEFAULT_METRIC: &str = "zlib";

/// Metadata about a metric.
#[derive(Debug, Clone, Serialize)]
pub struct MetricInfo {
    /// Unique identifier (e.g. `"zlib"`).
    pub name: &'static str,
    pub description: &'static str,
}

/// Trait that every metric must implement.
///
/// Implementations hold no mutable state and may be called from several
/// threads on independent inputs.
pub trait Metric: Send + Sync {
    fn info(&self) -> &MetricInfo;

    /// Compression ratio of `bits`, in (0, 1]. NaN signals a codec failure,
    /// which the executor rejects as a contract violation.
    fn ratio(&self, bits: &Bitstring) -> f64;

    fn name(&self) -> &'static str {
        self.info().name
    }
}

/// The three built-in compressors, in registration order.
pub fn builtin_metrics() -> Vec<Box<dyn Metric>> {
    vec![Box::new(ZlibRatio), Box::new(Bzip2Ratio), Box::new(XzRatio)]
}

/// Turn a compressed length into a ratio against the packed input.
///
/// A compressor that expands its input is treated as storing it verbatim, so
/// the result never exceeds 1.0. An empty input has ratio 1.0.
pub fn capped_ratio(compressed_len: std::io::Result<usize>, packed_len: usize) -> f64 {
    if packed_len == 0 {
        return 1.0;
    }
    match compressed_len {
        Ok(len) => len.min(packed_len) as f64 / packed_len as f64,
        Err(_) => f64::NAN,
    }
}

/// True when `ratio` satisfies the metric contract.
pub fn ratio_in_range(ratio: f64) -> bool {
    ratio > 0.0 && ratio <= 1.0
}
