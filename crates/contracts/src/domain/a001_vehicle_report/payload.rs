//! Report payload as served by `get-report`
//!
//! Every part is optional. Two shapes are in circulation: the current one
//! (`items`, `photosBySection`) and the older `checklistData` / `photoData`
//! one. Both are accepted and normalized into [`ReportData`].

use super::aggregate::{ChecklistItem, PhotoRef, ReportData, VehicleInfo};
use crate::shared::serde_helpers::{lenient_string, lenient_string_opt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Частичные сведения об автомобиле: `None` означает "не менять"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleInfoPatch {
    #[serde(default, deserialize_with = "lenient_string_opt", skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(default, deserialize_with = "lenient_string_opt", skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "lenient_string_opt", skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "lenient_string_opt", skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,
    #[serde(default, deserialize_with = "lenient_string_opt", skip_serializing_if = "Option::is_none")]
    pub mileage: Option<String>,
    #[serde(default, deserialize_with = "lenient_string_opt", skip_serializing_if = "Option::is_none")]
    pub inspection_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string_opt", skip_serializing_if = "Option::is_none")]
    pub exterior_color: Option<String>,
    #[serde(default, deserialize_with = "lenient_string_opt", skip_serializing_if = "Option::is_none")]
    pub interior_color: Option<String>,
    #[serde(default, deserialize_with = "lenient_string_opt", skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    #[serde(default, deserialize_with = "lenient_string_opt", skip_serializing_if = "Option::is_none")]
    pub transmission: Option<String>,
}

impl VehicleInfoPatch {
    /// Shallow merge: present fields override, absent fields keep old values
    pub fn apply_to(self, info: &mut VehicleInfo) {
        fn set(target: &mut String, value: Option<String>) {
            if let Some(value) = value {
                *target = value;
            }
        }

        set(&mut info.make, self.make);
        set(&mut info.model, self.model);
        set(&mut info.year, self.year);
        set(&mut info.vin, self.vin);
        set(&mut info.mileage, self.mileage);
        set(&mut info.inspection_date, self.inspection_date);
        set(&mut info.exterior_color, self.exterior_color);
        set(&mut info.interior_color, self.interior_color);
        set(&mut info.engine, self.engine);
        set(&mut info.transmission, self.transmission);
    }
}

impl From<VehicleInfoPatch> for VehicleInfo {
    fn from(patch: VehicleInfoPatch) -> Self {
        let mut info = VehicleInfo::default();
        patch.apply_to(&mut info);
        info
    }
}

/// Старый формат чек-листа: `{ vehicle, items }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistData {
    #[serde(default, deserialize_with = "lenient_string")]
    pub vehicle: String,
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
}

/// Тело ответа `get-report` (и аргумент `ReportStore::update`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_info: Option<VehicleInfoPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ChecklistItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checklist_data: Option<ChecklistData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photos_by_section: Option<HashMap<String, Vec<PhotoRef>>>,
    /// Старое имя `photosBySection`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_data: Option<HashMap<String, Vec<PhotoRef>>>,
}

impl ReportPayload {
    pub fn with_vehicle_info(mut self, patch: VehicleInfoPatch) -> Self {
        self.vehicle_info = Some(patch);
        self
    }

    pub fn with_items(mut self, items: Vec<ChecklistItem>) -> Self {
        self.items = Some(items);
        self
    }

    pub fn with_photos(mut self, photos: HashMap<String, Vec<PhotoRef>>) -> Self {
        self.photos_by_section = Some(photos);
        self
    }

    /// `items` wins over the legacy `checklistData.items`
    pub fn take_items(&mut self) -> Option<Vec<ChecklistItem>> {
        let legacy = self.checklist_data.take().map(|data| data.items);
        self.items.take().or(legacy)
    }

    /// `photosBySection` wins over the legacy `photoData`
    pub fn take_photos(&mut self) -> Option<HashMap<String, Vec<PhotoRef>>> {
        let legacy = self.photo_data.take();
        self.photos_by_section.take().or(legacy)
    }
}

impl From<ReportPayload> for ReportData {
    fn from(mut payload: ReportPayload) -> Self {
        let items = payload.take_items().unwrap_or_default();
        let photos_by_section = payload.take_photos().unwrap_or_default();
        ReportData {
            vehicle_info: payload.vehicle_info.map(VehicleInfo::from).unwrap_or_default(),
            items,
            photos_by_section,
        }
    }
}

impl ReportData {
    /// Merge a partial payload: vehicle fields shallow-merge, items and photos
    /// are replaced wholesale only when present.
    pub fn apply(&mut self, mut payload: ReportPayload) {
        if let Some(items) = payload.take_items() {
            self.items = items;
        }
        if let Some(patch) = payload.vehicle_info.take() {
            patch.apply_to(&mut self.vehicle_info);
        }
        if let Some(photos) = payload.take_photos() {
            self.photos_by_section = photos;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_vehicle_report::aggregate::ChecklistStatus;

    #[test]
    fn test_full_payload() {
        let json = r#"{
            "vehicleInfo": { "make": "Honda", "model": "OK V EX", "year": 2022, "mileage": "20,300 miles" },
            "items": [
                { "category": "Engine Bay", "name": "Oil", "status": "good", "notes": "Clean" },
                { "category": "Test Drive", "name": "Brakes", "status": "repair", "notes": "Pulls right", "photoUrl": "brakes.jpg" }
            ],
            "photosBySection": { "vehicle-summary": [ { "url": "front.jpg", "caption": "Front" } ] }
        }"#;
        let payload: ReportPayload = serde_json::from_str(json).unwrap();
        let data = ReportData::from(payload);

        assert_eq!(data.vehicle_info.make, "Honda");
        assert_eq!(data.vehicle_info.year, "2022");
        assert_eq!(data.vehicle_info.vin, "");
        assert_eq!(data.items.len(), 2);
        assert_eq!(data.items[1].status, ChecklistStatus::Action);
        assert_eq!(data.items[1].photo_url.as_deref(), Some("brakes.jpg"));
        assert_eq!(data.photos("vehicle-summary")[0].caption, "Front");
    }

    #[test]
    fn test_legacy_shape() {
        let json = r#"{
            "checklistData": { "vehicle": "2022 Honda", "items": [ { "category": "Test Drive", "name": "Steering", "status": "caution" } ] },
            "photoData": { "diagnostics": [ { "url": "scan.jpg" } ] }
        }"#;
        let data = ReportData::from(serde_json::from_str::<ReportPayload>(json).unwrap());
        assert_eq!(data.items.len(), 1);
        assert_eq!(data.items[0].status, ChecklistStatus::Attention);
        assert_eq!(data.photos("diagnostics")[0].caption, "");
    }

    #[test]
    fn test_both_photo_keys_are_accepted() {
        let json = r#"{
            "photosBySection": { "interior": [ { "url": "seat.jpg", "caption": "Seat" } ] },
            "photoData": { "diagnostics": [ { "url": "scan.jpg" } ] }
        }"#;
        let payload: ReportPayload = serde_json::from_str(json).unwrap();
        assert!(payload.photo_data.is_some());

        let data = ReportData::from(payload);
        assert_eq!(data.photos("interior")[0].url, "seat.jpg");
        assert!(data.photos("diagnostics").is_empty());

        let mut data = ReportData::default();
        data.apply(serde_json::from_str(r#"{ "photoData": { "diagnostics": [ { "url": "scan.jpg" } ] } }"#).unwrap());
        assert_eq!(data.photos("diagnostics")[0].url, "scan.jpg");
    }

    #[test]
    fn test_items_win_over_legacy() {
        let mut payload = ReportPayload {
            items: Some(vec![ChecklistItem::new("A", "new", ChecklistStatus::Good)]),
            checklist_data: Some(ChecklistData {
                vehicle: String::new(),
                items: vec![ChecklistItem::new("A", "old", ChecklistStatus::Good)],
            }),
            ..Default::default()
        };
        let items = payload.take_items().unwrap();
        assert_eq!(items[0].name, "new");
        assert!(payload.checklist_data.is_none());
    }

    #[test]
    fn test_empty_payload() {
        let data = ReportData::from(serde_json::from_str::<ReportPayload>("{}").unwrap());
        assert_eq!(data, ReportData::default());
    }

    #[test]
    fn test_apply_shallow_merges_vehicle_info() {
        let mut data = ReportData::from(ReportPayload::default().with_vehicle_info(
            VehicleInfoPatch {
                make: Some("Honda".into()),
                model: Some("Civic".into()),
                ..Default::default()
            },
        ));

        data.apply(ReportPayload::default().with_vehicle_info(VehicleInfoPatch {
            make: Some("Toyota".into()),
            ..Default::default()
        }));

        assert_eq!(data.vehicle_info.make, "Toyota");
        assert_eq!(data.vehicle_info.model, "Civic");
    }

    #[test]
    fn test_apply_replaces_lists_only_when_present() {
        let mut data = ReportData::from(
            ReportPayload::default()
                .with_items(vec![ChecklistItem::new("Engine Bay", "Oil", ChecklistStatus::Good)])
                .with_photos(HashMap::from([(
                    "interior".to_string(),
                    vec![PhotoRef::new("seat.jpg", "Seat")],
                )])),
        );

        data.apply(ReportPayload::default());
        assert_eq!(data.items.len(), 1);
        assert_eq!(data.photos("interior").len(), 1);

        data.apply(ReportPayload::default().with_items(Vec::new()));
        assert!(data.items.is_empty());
        assert_eq!(data.photos("interior").len(), 1);
    }
}
