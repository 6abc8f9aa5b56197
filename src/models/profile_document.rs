use serde::{Deserialize, Serialize};
use crate::models::vehicle_profile::VehicleProfile;

/// Root of a profiles file as read. The vehicle list is mandatory, an empty list is not.
#[derive(Deserialize)]
pub struct ProfileDocument {
    #[serde(rename = "ElectricVehicle")]
    pub vehicles: Vec<VehicleProfile>,
}

/// Root of a profiles file as written
#[derive(Serialize)]
pub struct ProfileDocumentRef<'a> {
    #[serde(rename = "ElectricVehicle")]
    pub vehicles: &'a [VehicleProfile],
}
