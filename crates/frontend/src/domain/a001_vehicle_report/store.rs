//! Report store: the single holder of the loaded report

use crate::shared::config::GET_REPORT_PATH;
use crate::shared::request_client::{ApiError, RequestClient, Transport};
use contracts::domain::a001_vehicle_report::{
    ChecklistItem, PhotoRef, ReportData, ReportPayload, VehicleInfo,
};
use contracts::projections::p001_report_sections::{build_section, SectionView};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to load report for {vehicle_id}: {source}")]
pub struct ReportLoadError {
    pub vehicle_id: String,
    pub source: ApiError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportStore {
    data: ReportData,
    vehicle_id: Option<String>,
}

impl ReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// GET the report for `vehicle_id` without touching any store.
    /// Split from [`ReportStore::load`] so reactive owners can await it and
    /// call [`ReportStore::replace`] afterwards.
    pub async fn fetch<T: Transport>(
        client: &RequestClient<T>,
        vehicle_id: &str,
    ) -> Result<ReportData, ReportLoadError> {
        log::info!("Loading report for {}", vehicle_id);
        let path = format!(
            "{}?vin={}",
            GET_REPORT_PATH,
            urlencoding::encode(vehicle_id)
        );

        match client.get_json::<ReportPayload>(&path).await {
            Ok(payload) => {
                let data = ReportData::from(payload);
                log::info!(
                    "Report for {} loaded: {} items",
                    vehicle_id,
                    data.items.len()
                );
                Ok(data)
            }
            Err(source) => {
                log::error!("Error loading report for {}: {}", vehicle_id, source);
                Err(ReportLoadError {
                    vehicle_id: vehicle_id.to_string(),
                    source,
                })
            }
        }
    }

    /// Fetch and replace the whole state. On error the previous report stays.
    pub async fn load<T: Transport>(
        &mut self,
        client: &RequestClient<T>,
        vehicle_id: &str,
    ) -> Result<&ReportData, ReportLoadError> {
        let data = Self::fetch(client, vehicle_id).await?;
        self.replace(vehicle_id, data);
        Ok(&self.data)
    }

    pub fn replace(&mut self, vehicle_id: impl Into<String>, data: ReportData) {
        self.vehicle_id = Some(vehicle_id.into());
        self.data = data;
    }

    /// Merge a partial payload into the current report
    pub fn update(&mut self, partial: ReportPayload) {
        self.data.apply(partial);
    }

    pub fn data(&self) -> &ReportData {
        &self.data
    }

    /// Id of the last successfully loaded report
    pub fn vehicle_id(&self) -> Option<&str> {
        self.vehicle_id.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.vehicle_id.is_some()
    }

    pub fn vehicle_info(&self) -> &VehicleInfo {
        self.data.vehicle_info()
    }

    pub fn items_by_category(&self, category: &str) -> Vec<&ChecklistItem> {
        self.data.items_by_category(category)
    }

    pub fn items_by_category_prefix(&self, prefix: &str) -> Vec<&ChecklistItem> {
        self.data.items_by_category_prefix(prefix)
    }

    pub fn photos(&self, section_key: &str) -> &[PhotoRef] {
        self.data.photos(section_key)
    }

    /// View-model for a section key; `None` for an unknown key
    pub fn section(&self, key: &str) -> Option<SectionView> {
        build_section(&self.data, key)
    }
}
