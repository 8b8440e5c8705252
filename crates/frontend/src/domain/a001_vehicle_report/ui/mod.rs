mod section_view;

pub use section_view::SectionContent;
