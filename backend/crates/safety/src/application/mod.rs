//! Application Layer

pub mod radar;
pub mod reports;

pub use radar::{CreateHazardInput, RadarUseCase};
pub use reports::{ReportUseCase, SubmitReportInput, Submitter};
