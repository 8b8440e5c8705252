pub mod a001_vehicle_report;
pub mod a002_assistant;
