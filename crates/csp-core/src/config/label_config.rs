//! Label normalisation configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Explicit spelling aliases for labeler output.
///
/// Empty by default: a hyphenated `safety-use` is only folded into
/// `safety_use` when a deployment lists it here.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LabelConfig {
    /// Raw label → canonical label.
    pub aliases: BTreeMap<String, String>,
}
