//! Plain-text rendering of a section, used as assistant context

use super::dto::SectionView;
use crate::domain::a002_assistant::dto::SectionContext;
use std::fmt::Write;

impl SectionView {
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();

        for field in &self.vehicle_fields {
            let _ = writeln!(out, "{}: {}", field.label, field.value);
        }
        if let Some(note) = &self.history_note {
            let _ = writeln!(out, "Vehicle History Notes: {}", note);
        }
        for line in &self.diagnostic_log {
            let _ = writeln!(out, "> {}", line.text);
        }
        for recommendation in &self.recommendations {
            let _ = writeln!(
                out,
                "{}: {}",
                recommendation.level.label(),
                recommendation.text
            );
        }
        for group in &self.groups {
            let _ = writeln!(out, "\n{}", group.heading);
            for item in &group.items {
                if item.notes.is_empty() {
                    let _ = writeln!(out, "- [{}] {}", item.severity.label(), item.name);
                } else {
                    let _ = writeln!(
                        out,
                        "- [{}] {}: {}",
                        item.severity.label(),
                        item.name,
                        item.notes
                    );
                }
            }
        }

        out.trim().to_string()
    }

    pub fn to_context(&self) -> SectionContext {
        SectionContext {
            title: self.title.clone(),
            content: self.to_plain_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::a001_vehicle_report::aggregate::{
        ChecklistItem, ChecklistStatus, ReportData,
    };
    use crate::projections::p001_report_sections::builder::build_section;

    #[test]
    fn test_group_text() {
        let data = ReportData {
            items: vec![
                ChecklistItem::new("Engine Bay", "Oil", ChecklistStatus::Attention)
                    .with_notes("Slightly dark"),
                ChecklistItem::new("Engine Bay", "Belt", ChecklistStatus::Good),
            ],
            ..Default::default()
        };
        let context = build_section(&data, "under-hood").unwrap().to_context();
        assert_eq!(context.title, "Under Hood Inspection");
        assert_eq!(
            context.content,
            "Engine Bay\n- [Attention] Oil: Slightly dark\n- [Pass] Belt"
        );
    }

    #[test]
    fn test_recommendation_text() {
        let text = build_section(&ReportData::default(), "mechanic-recommendations")
            .unwrap()
            .to_plain_text();
        assert!(text.starts_with("Immediate Action: Brake Service"));
        assert_eq!(text.lines().count(), 4);
    }
}
