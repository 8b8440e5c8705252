pub mod store;
pub mod ui;

pub use store::{ReportLoadError, ReportStore};
