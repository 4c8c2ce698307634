//! Data models for `gwa-calc`

pub mod period;
pub mod record_store;
pub mod subject;

pub use period::{AcademicPeriod, AcademicStructure};
pub use record_store::RecordStore;
pub use subject::{parse_number, SubjectEntry, SubjectField};
