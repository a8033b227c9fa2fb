//! Grouping engine: partitions an ordered segment sequence into
//! contiguous batches sized for a single LLM call each.

use tracing::{info, warn};

use crate::error::{AnalysisError, Result};
use crate::segment::TextSegment;

/// Hard upper bound on documents per group; beyond this, extraction
/// quality is considered unreliable and the request is rejected.
pub const MAX_GROUP_SIZE: usize = 10;

/// Above this group size, extraction proceeds with a degraded-quality
/// warning.
pub const WARN_GROUP_SIZE: usize = 5;

/// Divisor used by the default heuristic: aim for roughly five groups.
const DEFAULT_DIVISOR: usize = 5;

/// How many groups the caller wants.
///
/// The original interface used `0` as a "no preference" sentinel; the enum
/// makes the default heuristic explicit and lets logs distinguish
/// "default used" from "explicit value used".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleSize {
    /// No preference: derive the group size from the document count.
    Default,
    /// Aim for exactly this many groups.
    Explicit(usize),
}

impl SampleSize {
    /// Map a wire-level optional count onto a sample size.
    /// Absent or zero means "use the default heuristic".
    pub fn from_request(value: Option<usize>) -> Self {
        match value {
            None | Some(0) => SampleSize::Default,
            Some(n) => SampleSize::Explicit(n),
        }
    }
}

/// Partition `segments` into contiguous groups.
///
/// The group size is derived from `sample_size`:
/// - `Default`: N / 5 (integer division), clamped to at least 1.
/// - `Explicit(n)`: ceil(N / n); n greater than N is a configuration error.
///
/// A derived group size above [`MAX_GROUP_SIZE`] is a configuration error;
/// one above [`WARN_GROUP_SIZE`] logs a degraded-quality warning. An empty
/// input yields an empty group list, which callers treat as "no concepts".
pub fn plan_groups(
    segments: &[TextSegment],
    sample_size: SampleSize,
) -> Result<Vec<&[TextSegment]>> {
    let total = segments.len();
    if total == 0 {
        return Ok(Vec::new());
    }

    let group_size = match sample_size {
        SampleSize::Default => {
            // Clamp: for fewer than five segments the heuristic would
            // produce a zero group size.
            let size = (total / DEFAULT_DIVISOR).max(1);
            info!(
                total,
                group_size = size,
                "No sample size specified, using default grouping heuristic"
            );
            size
        }
        SampleSize::Explicit(n) => {
            if n > total {
                return Err(AnalysisError::Configuration(
                    "sample size exceeds document count".to_string(),
                ));
            }
            total.div_ceil(n)
        }
    };

    if group_size > MAX_GROUP_SIZE {
        return Err(AnalysisError::Configuration(
            "group too large for reliable extraction".to_string(),
        ));
    }
    if group_size > WARN_GROUP_SIZE {
        warn!(group_size, "Large group size; output quality may be degraded");
    }

    Ok(segments.chunks(group_size).collect())
}
