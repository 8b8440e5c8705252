pub mod builder;
pub mod dto;
pub mod text;

pub use builder::{build, build_section};
pub use dto::{
    DiagnosticLine, ItemView, Recommendation, RecommendationLevel, SectionGroup, SectionId,
    SectionSelector, SectionView, VehicleField,
};
