use crate::domain::a001_vehicle_report::aggregate::{ChecklistItem, PhotoRef, Severity};
use serde::{Deserialize, Serialize};

pub const INITIAL_DOCUMENTATION_CATEGORY: &str = "Initial Documentation & Overview";
pub const UNDER_VEHICLE_CATEGORY: &str = "Under Vehicle (Ground-Level)";
pub const ENGINE_BAY_CATEGORY: &str = "Engine Bay";
pub const FINAL_CHECKS_CATEGORY: &str = "Final Checks & Diagnostics";
pub const TEST_DRIVE_CATEGORY: &str = "Test Drive";

/// Разделы отчёта
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionId {
    VehicleSummary,
    Interior,
    Exterior,
    UnderCar,
    UnderHood,
    Diagnostics,
    TestDrive,
    MechanicRecommendations,
}

/// Как раздел выбирает пункты чек-листа
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionSelector {
    /// Подгруппы по категориям с общим префиксом ("Interior:")
    Prefix(&'static str),
    /// Одна группа с точным совпадением категории
    Exact(&'static str),
    /// Сводка: поля автомобиля + группа `Initial Documentation & Overview`
    Summary,
    /// Фиксированные рекомендации, не зависят от чек-листа
    Recommendations,
}

impl SectionId {
    /// Ключ раздела (`data-section` в разметке, ключ фотографий)
    pub fn key(&self) -> &'static str {
        match self {
            SectionId::VehicleSummary => "vehicle-summary",
            SectionId::Interior => "interior",
            SectionId::Exterior => "exterior",
            SectionId::UnderCar => "under-car",
            SectionId::UnderHood => "under-hood",
            SectionId::Diagnostics => "diagnostics",
            SectionId::TestDrive => "test-drive",
            SectionId::MechanicRecommendations => "mechanic-recommendations",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            SectionId::VehicleSummary => "Vehicle Summary",
            SectionId::Interior => "Interior Inspection",
            SectionId::Exterior => "Exterior Inspection",
            SectionId::UnderCar => "Under Car Inspection",
            SectionId::UnderHood => "Under Hood Inspection",
            SectionId::Diagnostics => "Diagnostic Test Report",
            SectionId::TestDrive => "Test Drive Evaluation",
            SectionId::MechanicRecommendations => "Mechanic Recommendations",
        }
    }

    pub fn selector(&self) -> SectionSelector {
        match self {
            SectionId::VehicleSummary => SectionSelector::Summary,
            SectionId::Interior => SectionSelector::Prefix("Interior:"),
            SectionId::Exterior => SectionSelector::Prefix("Exterior:"),
            SectionId::UnderCar => SectionSelector::Exact(UNDER_VEHICLE_CATEGORY),
            SectionId::UnderHood => SectionSelector::Exact(ENGINE_BAY_CATEGORY),
            SectionId::Diagnostics => SectionSelector::Exact(FINAL_CHECKS_CATEGORY),
            SectionId::TestDrive => SectionSelector::Exact(TEST_DRIVE_CATEGORY),
            SectionId::MechanicRecommendations => SectionSelector::Recommendations,
        }
    }

    pub fn all() -> Vec<SectionId> {
        vec![
            SectionId::VehicleSummary,
            SectionId::Interior,
            SectionId::Exterior,
            SectionId::UnderCar,
            SectionId::UnderHood,
            SectionId::Diagnostics,
            SectionId::TestDrive,
            SectionId::MechanicRecommendations,
        ]
    }

    /// Парсинг из ключа раздела
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "vehicle-summary" => Some(SectionId::VehicleSummary),
            "interior" => Some(SectionId::Interior),
            "exterior" => Some(SectionId::Exterior),
            "under-car" => Some(SectionId::UnderCar),
            "under-hood" => Some(SectionId::UnderHood),
            "diagnostics" => Some(SectionId::Diagnostics),
            "test-drive" => Some(SectionId::TestDrive),
            "mechanic-recommendations" => Some(SectionId::MechanicRecommendations),
            _ => None,
        }
    }
}

/// Пункт чек-листа, готовый к отображению
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemView {
    pub name: String,
    pub notes: String,
    pub severity: Severity,
    pub photo: Option<PhotoRef>,
}

impl From<&ChecklistItem> for ItemView {
    fn from(item: &ChecklistItem) -> Self {
        Self {
            name: item.name.clone(),
            notes: item.notes.clone(),
            severity: item.severity(),
            photo: item.photo(),
        }
    }
}

/// Подраздел: заголовок и пункты в исходном порядке
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionGroup {
    pub heading: String,
    pub items: Vec<ItemView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleField {
    pub label: String,
    pub value: String,
}

/// Строка журнала OBD-II сканирования
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticLine {
    pub text: String,
    pub success: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecommendationLevel {
    ImmediateAction,
    AttentionNeeded,
    UpcomingMaintenance,
}

impl RecommendationLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RecommendationLevel::ImmediateAction => "Immediate Action",
            RecommendationLevel::AttentionNeeded => "Attention Needed",
            RecommendationLevel::UpcomingMaintenance => "Upcoming Maintenance",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            RecommendationLevel::ImmediateAction => "recommendation recommendation--immediate",
            RecommendationLevel::AttentionNeeded => "recommendation recommendation--attention",
            RecommendationLevel::UpcomingMaintenance => "recommendation recommendation--upcoming",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub level: RecommendationLevel,
    pub text: String,
}

/// View-model раздела отчёта
///
/// Only the summary fills `vehicle_fields`/`history_note`, only diagnostics
/// fills `diagnostic_log`, only mechanic recommendations fills
/// `recommendations`. Section photos are kept apart from item photos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionView {
    pub section: SectionId,
    pub title: String,
    pub vehicle_fields: Vec<VehicleField>,
    pub history_note: Option<String>,
    pub diagnostic_log: Vec<DiagnosticLine>,
    pub recommendations: Vec<Recommendation>,
    pub photos: Vec<PhotoRef>,
    pub groups: Vec<SectionGroup>,
}

impl SectionView {
    pub fn empty(section: SectionId) -> Self {
        Self {
            section,
            title: section.title().to_string(),
            vehicle_fields: Vec::new(),
            history_note: None,
            diagnostic_log: Vec::new(),
            recommendations: Vec::new(),
            photos: Vec::new(),
            groups: Vec::new(),
        }
    }

    pub fn item_count(&self) -> usize {
        self.groups.iter().map(|g| g.items.len()).sum()
    }
}
