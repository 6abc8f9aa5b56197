use std::fmt;
use std::fmt::Formatter;
use serde::Serialize;
use crate::models::vehicle_profile::VehicleProfile;

/// Battery capacity in Wh assumed for vehicles whose profile doesn't state one
pub const DEFAULT_BATTERY_CAPACITY: i32 = 20000;

/// Battery capacity to plan with for a vehicle, the profile's own value is never changed
///
/// # Arguments
///
/// * 'profile' - the vehicle profile
pub fn effective_battery_capacity(profile: &VehicleProfile) -> i32 {
    profile.battery_capacity().unwrap_or(DEFAULT_BATTERY_CAPACITY)
}

/// What a status view shows for a vehicle
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct EvStatus {
    pub id: Option<i32>,
    pub name: String,
    #[serde(rename = "socManual")]
    pub soc_manual: String,
}

impl EvStatus {
    pub fn from_profile(profile: &VehicleProfile) -> EvStatus {
        EvStatus {
            id: profile.id(),
            name: profile.name().unwrap_or_default().to_string(),
            soc_manual: profile.default_soc_manual().map(|s| s.to_string()).unwrap_or_default(),
        }
    }
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for EvStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let id = self.id.map(|i| i.to_string()).unwrap_or_else(|| "-".to_string());
        write!(f, "{:>4}  {:<24} {:>4}", id, self.name, self.soc_manual)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_battery_capacity() {
        let with = VehicleProfile::builder().id(1).battery_capacity(75000).build();
        let without = VehicleProfile::builder().id(2).build();

        assert_eq!(effective_battery_capacity(&with), 75000);
        assert_eq!(effective_battery_capacity(&without), DEFAULT_BATTERY_CAPACITY);
        assert_eq!(without.battery_capacity(), None);
    }

    #[test]
    fn test_status_from_profile() {
        let profile = VehicleProfile::builder().id(1).name("Tesla").default_soc_manual(80).build();
        assert_eq!(EvStatus::from_profile(&profile), EvStatus {
            id: Some(1),
            name: "Tesla".to_string(),
            soc_manual: "80".to_string(),
        });

        let status = EvStatus::from_profile(&VehicleProfile::default());
        assert_eq!(status.name, "");
        assert_eq!(status.soc_manual, "");
    }

    #[test]
    fn test_status_serializes_like_the_status_view() {
        let profile = VehicleProfile::builder().id(2).name("Leaf").default_soc_manual(60).build();
        let value = serde_json::to_value(EvStatus::from_profile(&profile)).unwrap();

        assert_eq!(value, serde_json::json!({"id": 2, "name": "Leaf", "socManual": "60"}));
    }
}
