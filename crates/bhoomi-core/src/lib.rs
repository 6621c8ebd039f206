pub mod analysis;
pub mod case;
pub mod dispute;

pub use analysis::{AnalysisRecord, ApplicableLaw, CaseSummary, ConfidenceBand, Precedent, Strategies};
pub use case::{CaseError, CaseRecord, CaseStatus, CaseUpdate, NewCase};
pub use dispute::{DisputeCategory, UnknownCategory};
