//! The result pair returned by a generation run.

use serde::{Deserialize, Serialize};

/// Output of the two-step generation chain: the continuation text and the
/// condensed carry-forward summary derived from it.
///
/// Nothing is persisted by generation itself; the caller decides whether to
/// write these back through a leaf edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedBeat {
    /// AI-generated continuation of the plot.
    pub result: String,
    /// Summary merging the prior context with the new continuation.
    pub summary: String,
}
