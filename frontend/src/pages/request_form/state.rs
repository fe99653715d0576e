use common::model::request::{LocationData, RepairRequest, RequestStatus};
use common::model::zonal::Zonal;

/// Form state for a new field visit. Coordinates default to zero until a
/// GPS fix is captured; zero doubles as the "not captured yet" marker the
/// submit validation checks.
pub struct NewRequestPage {
    pub protocol: String,
    pub sei_number: String,
    pub contract: String,
    pub description: String,
    pub zonal: Zonal,
    pub technician_id: String,
    pub visit_date: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub photo_before: Option<String>,
    pub locating: bool,
    pub saving: bool,
}

fn today_iso() -> String {
    let iso = String::from(js_sys::Date::new_0().to_iso_string());
    iso.split('T').next().unwrap_or_default().to_string()
}

impl NewRequestPage {
    pub fn new() -> Self {
        NewRequestPage {
            protocol: String::new(),
            sei_number: String::new(),
            contract: String::new(),
            description: String::new(),
            zonal: Zonal::North,
            technician_id: String::new(),
            visit_date: today_iso(),
            latitude: 0.0,
            longitude: 0.0,
            address: String::new(),
            photo_before: None,
            locating: false,
            saving: false,
        }
    }

    pub fn has_location(&self) -> bool {
        self.latitude != 0.0 || self.longitude != 0.0
    }

    /// Assembles the complete entity. Ids are derived from the submission
    /// instant; a blank protocol gets a generated tracking code the same
    /// way.
    pub fn build_request(&self) -> RepairRequest {
        let now_ms = js_sys::Date::now() as u64;
        let digits = now_ms.to_string();
        let protocol = if self.protocol.trim().is_empty() {
            format!("PR-{}", &digits[digits.len().saturating_sub(6)..])
        } else {
            self.protocol.trim().to_string()
        };

        RepairRequest {
            id: format!("req_{}", now_ms),
            protocol,
            sei_number: self.sei_number.trim().to_string(),
            contract: self.contract.trim().to_string(),
            description: self.description.trim().to_string(),
            location: LocationData {
                latitude: self.latitude,
                longitude: self.longitude,
                address: self.address.clone(),
            },
            visit_date: self.visit_date.clone(),
            status: RequestStatus::Open,
            technician_id: self.technician_id.clone(),
            zonal: self.zonal,
            photo_before: self.photo_before.clone(),
            photo_after: None,
            created_at: String::from(js_sys::Date::new_0().to_iso_string()),
        }
    }
}
