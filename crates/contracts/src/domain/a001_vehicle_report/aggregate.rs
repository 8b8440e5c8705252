use crate::shared::serde_helpers::lenient_string;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;

/// Сведения об автомобиле. Отсутствующие поля хранятся как пустые строки.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleInfo {
    #[serde(default, deserialize_with = "lenient_string")]
    pub make: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub model: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub year: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub vin: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub mileage: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub inspection_date: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub exterior_color: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub interior_color: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub engine: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub transmission: String,
}

impl VehicleInfo {
    /// "2022 Honda Civic"; empty parts collapse
    pub fn display_name(&self) -> String {
        [self.year.as_str(), self.make.as_str(), self.model.as_str()]
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Labelled fields in display order
    pub fn labelled_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("Make", self.make.as_str()),
            ("Model", self.model.as_str()),
            ("Year", self.year.as_str()),
            ("VIN", self.vin.as_str()),
            ("Mileage", self.mileage.as_str()),
            ("Exterior Color", self.exterior_color.as_str()),
            ("Interior Color", self.interior_color.as_str()),
            ("Engine", self.engine.as_str()),
            ("Transmission", self.transmission.as_str()),
            ("Inspection Date", self.inspection_date.as_str()),
        ]
    }

    /// Поля для шапки отчёта: VIN, пробег, дата осмотра (только непустые)
    pub fn summary_fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("VIN", self.vin.as_str()),
            ("Mileage", self.mileage.as_str()),
            ("Inspection Date", self.inspection_date.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .collect()
    }
}

/// Статус пункта чек-листа в том виде, в каком его записал инспектор
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChecklistStatus {
    Good,
    Attention,
    Action,
    /// Неизвестное значение сохраняется как есть
    Unknown(String),
}

impl ChecklistStatus {
    /// Парсинг из строки. `good` распознаётся только точно как есть,
    /// остальные статусы без учёта регистра.
    pub fn from_code(code: &str) -> Self {
        if code == "good" {
            return ChecklistStatus::Good;
        }
        match code.trim().to_ascii_lowercase().as_str() {
            "attention" | "caution" => ChecklistStatus::Attention,
            "action" | "repair" => ChecklistStatus::Action,
            _ => ChecklistStatus::Unknown(code.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            ChecklistStatus::Good => "good",
            ChecklistStatus::Attention => "caution",
            ChecklistStatus::Action => "repair",
            ChecklistStatus::Unknown(raw) => raw.as_str(),
        }
    }

    /// Only `good` passes; every other status is shown as needing attention
    pub fn severity(&self) -> Severity {
        match self {
            ChecklistStatus::Good => Severity::Pass,
            _ => Severity::Attention,
        }
    }
}

impl Default for ChecklistStatus {
    fn default() -> Self {
        ChecklistStatus::Unknown(String::new())
    }
}

impl Serialize for ChecklistStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for ChecklistStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = lenient_string(deserializer)?;
        Ok(ChecklistStatus::from_code(&raw))
    }
}

/// Трёхуровневая классификация для отображения
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Pass,
    Attention,
    Action,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Pass => "Pass",
            Severity::Attention => "Attention",
            Severity::Action => "Action",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Severity::Pass => "status-item status-item--pass",
            Severity::Attention => "status-item status-item--attention",
            Severity::Action => "status-item status-item--action",
        }
    }
}

/// Ссылка на фотографию
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoRef {
    pub url: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub caption: String,
}

impl PhotoRef {
    pub fn new(url: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            caption: caption.into(),
        }
    }
}

/// Пункт чек-листа осмотра
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default)]
    pub status: ChecklistStatus,
    #[serde(default, deserialize_with = "lenient_string")]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl ChecklistItem {
    pub fn new(
        category: impl Into<String>,
        name: impl Into<String>,
        status: ChecklistStatus,
    ) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
            status,
            notes: String::new(),
            photo_url: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_photo(mut self, url: impl Into<String>) -> Self {
        self.photo_url = Some(url.into());
        self
    }

    pub fn severity(&self) -> Severity {
        self.status.severity()
    }

    /// Собственное фото пункта, подписанное его названием
    pub fn photo(&self) -> Option<PhotoRef> {
        self.photo_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(|url| PhotoRef::new(url, self.name.clone()))
    }
}

/// Загруженный отчёт целиком. Заменяется только целиком (см. `ReportStore`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    #[serde(default)]
    pub vehicle_info: VehicleInfo,
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
    #[serde(default)]
    pub photos_by_section: HashMap<String, Vec<PhotoRef>>,
}

impl ReportData {
    pub fn vehicle_info(&self) -> &VehicleInfo {
        &self.vehicle_info
    }

    /// Items whose category equals `category`, in source order
    pub fn items_by_category(&self, category: &str) -> Vec<&ChecklistItem> {
        self.items
            .iter()
            .filter(|item| item.category == category)
            .collect()
    }

    /// Items whose category starts with `prefix`, in source order
    pub fn items_by_category_prefix(&self, prefix: &str) -> Vec<&ChecklistItem> {
        self.items
            .iter()
            .filter(|item| item.category.starts_with(prefix))
            .collect()
    }

    /// Unique categories starting with `prefix`, first-seen order
    pub fn categories_with_prefix(&self, prefix: &str) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for item in self.items_by_category_prefix(prefix) {
            if !categories.contains(&item.category.as_str()) {
                categories.push(item.category.as_str());
            }
        }
        categories
    }

    pub fn photos(&self, section_key: &str) -> &[PhotoRef] {
        self.photos_by_section
            .get(section_key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
