//! Record types exchanged with the storage and labeling collaborators.

pub mod collections;
pub mod labels;
pub mod paper;
pub mod survey;

pub use collections::{FxHashMap, FxHashSet};
pub use labels::{
    AuditStatus, IntentLabel, LabelMethod, PaperLabel, AUDIT_CONFIDENCE_THRESHOLD, UNKNOWN_CATEGORY,
};
pub use paper::Paper;
pub use survey::{
    CalibrationQuestion, CalibrationResponse, DimensionScore, SurveyResponse, TopicEntry,
    SCORE_MAX, SCORE_MIN,
};
