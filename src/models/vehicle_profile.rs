use std::fmt;
use std::fmt::Formatter;
use bon::Builder;
use serde::{Deserialize, Serialize};

/// Reference to an external script that reads the live SoC of a vehicle.
/// The script is never run from here, it is only carried along with its profile.
#[derive(Serialize, Deserialize, Builder, Clone, Debug, PartialEq, Eq)]
pub struct SocScriptRef {
    #[builder(into)]
    script: String,
    #[serde(rename = "extractionRegex", skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    extraction_regex: Option<String>,
}

impl SocScriptRef {
    pub fn script(&self) -> &str {
        &self.script
    }

    pub fn extraction_regex(&self) -> Option<&str> {
        self.extraction_regex.as_deref()
    }
}

/// Charging parameters of one electric vehicle.
///
/// Every attribute is optional and an absent attribute stays absent all the way through
/// load and save, no defaults are filled in here. Values are kept exactly as read, even
/// when they are out of range (see `validation`).
#[derive(Serialize, Deserialize, Builder, Clone, Debug, Default, PartialEq, Eq)]
pub struct VehicleProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    name: Option<String>,
    #[serde(rename = "batteryCapacity", skip_serializing_if = "Option::is_none")]
    battery_capacity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phases: Option<i32>,
    #[serde(rename = "maxChargePower", skip_serializing_if = "Option::is_none")]
    max_charge_power: Option<i32>,
    #[serde(rename = "defaultSocManual", skip_serializing_if = "Option::is_none")]
    default_soc_manual: Option<i32>,
    #[serde(rename = "defaultSocSchedule", skip_serializing_if = "Option::is_none")]
    default_soc_schedule: Option<i32>,
    #[serde(rename = "defaultSocOptionalEnergy", skip_serializing_if = "Option::is_none")]
    default_soc_optional_energy: Option<i32>,
    #[serde(rename = "SocScript", skip_serializing_if = "Option::is_none")]
    soc_script: Option<SocScriptRef>,
}

impl VehicleProfile {
    pub fn id(&self) -> Option<i32> {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Battery capacity in Wh
    pub fn battery_capacity(&self) -> Option<i32> {
        self.battery_capacity
    }

    pub fn phases(&self) -> Option<i32> {
        self.phases
    }

    /// Max charge power in W
    pub fn max_charge_power(&self) -> Option<i32> {
        self.max_charge_power
    }

    pub fn default_soc_manual(&self) -> Option<i32> {
        self.default_soc_manual
    }

    pub fn default_soc_schedule(&self) -> Option<i32> {
        self.default_soc_schedule
    }

    pub fn default_soc_optional_energy(&self) -> Option<i32> {
        self.default_soc_optional_energy
    }

    pub fn soc_script(&self) -> Option<&SocScriptRef> {
        self.soc_script.as_ref()
    }

    /// Returns a copy of the profile carrying the given id, all other attributes unchanged.
    /// Used by the store when it assigns an id to a profile that came without one.
    ///
    /// # Arguments
    ///
    /// * 'id' - the id to stamp on the copy
    pub fn with_id(self, id: i32) -> VehicleProfile {
        VehicleProfile { id: Some(id), ..self }
    }
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for VehicleProfile {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "ElectricVehicle {{ id: {}, name: '{}', batteryCapacity: {}, phases: {}, maxChargePower: {}, socScript: {} }}",
            opt(self.id),
            self.name.as_deref().unwrap_or("-"),
            opt(self.battery_capacity),
            opt(self.phases),
            opt(self.max_charge_power),
            self.soc_script.as_ref().map(|s| s.script.as_str()).unwrap_or("-"),
        )
    }
}

fn opt(value: Option<i32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}
