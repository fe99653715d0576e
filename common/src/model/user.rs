use serde::{Deserialize, Serialize};

use crate::model::zonal::Zonal;

/// A personnel record. `role` is a key into the role-label dictionary, not
/// a closed enum: custom roles can be added at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: String,
    pub zonal: Zonal,
    pub registration_number: Option<String>,
    pub email: Option<String>,
}
