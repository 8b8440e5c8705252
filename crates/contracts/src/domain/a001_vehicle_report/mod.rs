pub mod aggregate;
pub mod payload;

pub use aggregate::{ChecklistItem, ChecklistStatus, PhotoRef, ReportData, Severity, VehicleInfo};
pub use payload::{ChecklistData, ReportPayload, VehicleInfoPatch};
