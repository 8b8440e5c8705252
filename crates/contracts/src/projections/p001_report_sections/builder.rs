//! Section view-model builder
//!
//! Turns the flat checklist of a [`ReportData`] into per-section groups.
//! Pure: reads the report, never mutates it.

use super::dto::{
    DiagnosticLine, ItemView, Recommendation, RecommendationLevel, SectionGroup, SectionId,
    SectionSelector, SectionView, VehicleField, INITIAL_DOCUMENTATION_CATEGORY,
};
use crate::domain::a001_vehicle_report::aggregate::ReportData;

const VEHICLE_HISTORY_NOTE: &str = "This vehicle shows consistent maintenance records with no major accidents reported. The 20,300 miles are consistent with the vehicle's age and condition. All factory-installed features are present and accounted for.";

const DIAGNOSTIC_LOG: [(&str, bool); 8] = [
    ("Performing OBD-II System Scan...", false),
    ("Connecting to vehicle ECU...", false),
    ("Connection Successful.", true),
    ("Reading Diagnostic Trouble Codes (DTCs)...", false),
    ("No DTCs Found. System Clear.", true),
    ("Checking I/M Readiness Monitors...", false),
    ("All systems ready.", true),
    ("Scan Complete.", false),
];

// Canned summary written by the mechanic; not derived from checklist state.
const RECOMMENDATIONS: [(RecommendationLevel, &str); 4] = [
    (
        RecommendationLevel::ImmediateAction,
        "Brake Service: Due to the vehicle pulling to the right during braking, a full brake inspection and service is required to ensure safety. This may involve cleaning/lubricating caliper slide pins or replacing components.",
    ),
    (
        RecommendationLevel::AttentionNeeded,
        "Tires: Current tread depth is 6/32\". While still safe, replacement will be needed within the next 10,000-15,000 miles. Monitor for wear.",
    ),
    (
        RecommendationLevel::AttentionNeeded,
        "Cosmetic Repair: The scuff on the front bumper and curb rash on the wheel are cosmetic. Repair is optional.",
    ),
    (
        RecommendationLevel::UpcomingMaintenance,
        "The vehicle is due for a standard oil change and tire rotation in approximately 2,700 miles based on the manufacturer's recommended service interval.",
    ),
];

/// Build the view-model for a section key such as `"interior"`.
///
/// `None` means the key names no section; callers keep whatever they
/// currently display.
pub fn build_section(data: &ReportData, key: &str) -> Option<SectionView> {
    SectionId::from_key(key).map(|section| build(data, section))
}

pub fn build(data: &ReportData, section: SectionId) -> SectionView {
    let mut view = SectionView::empty(section);
    view.photos = data.photos(section.key()).to_vec();

    match section.selector() {
        SectionSelector::Prefix(prefix) => {
            view.groups = prefix_groups(data, prefix);
        }
        SectionSelector::Exact(category) => {
            view.groups = vec![exact_group(data, category)];
        }
        SectionSelector::Summary => {
            view.vehicle_fields = data
                .vehicle_info()
                .labelled_fields()
                .into_iter()
                .map(|(label, value)| VehicleField {
                    label: label.to_string(),
                    value: value.to_string(),
                })
                .collect();
            view.history_note = Some(VEHICLE_HISTORY_NOTE.to_string());
            view.groups = vec![exact_group(data, INITIAL_DOCUMENTATION_CATEGORY)];
        }
        SectionSelector::Recommendations => {
            view.recommendations = RECOMMENDATIONS
                .iter()
                .map(|(level, text)| Recommendation {
                    level: *level,
                    text: text.to_string(),
                })
                .collect();
        }
    }

    if section == SectionId::Diagnostics {
        view.diagnostic_log = DIAGNOSTIC_LOG
            .iter()
            .map(|(text, success)| DiagnosticLine {
                text: text.to_string(),
                success: *success,
            })
            .collect();
    }

    view
}

fn prefix_groups(data: &ReportData, prefix: &str) -> Vec<SectionGroup> {
    data.categories_with_prefix(prefix)
        .into_iter()
        .map(|category| {
            let heading = category
                .strip_prefix(prefix)
                .unwrap_or(category)
                .trim()
                .to_string();
            SectionGroup {
                heading,
                items: item_views(data, category),
            }
        })
        .collect()
}

fn exact_group(data: &ReportData, category: &str) -> SectionGroup {
    SectionGroup {
        heading: category.to_string(),
        items: item_views(data, category),
    }
}

fn item_views(data: &ReportData, category: &str) -> Vec<ItemView> {
    data.items_by_category(category)
        .into_iter()
        .map(ItemView::from)
        .collect()
}
