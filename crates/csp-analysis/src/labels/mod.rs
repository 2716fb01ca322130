//! Label records → paper-id label maps, with explicit spelling normalisation.

pub mod normalize;

pub use normalize::{
    label_map_from_records, normalize_labels, route_audit_status, LabelMap, LabelMismatch,
    NormalizedLabels,
};
