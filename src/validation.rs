use std::collections::HashMap;
use std::fmt;
use std::fmt::Formatter;
use crate::models::vehicle_profile::VehicleProfile;

/// Attribute values outside of their expected domain. Reported, never enforced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Violation {
    PercentOutOfRange { attribute: &'static str, value: i32 },
    PhasesOutOfRange(i32),
    NegativeChargePower(i32),
    NonPositiveCapacity(i32),
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for Violation {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Violation::PercentOutOfRange { attribute, value } =>
                write!(f, "{} is {}%, expected 0..=100", attribute, value),
            Violation::PhasesOutOfRange(v) => write!(f, "phases is {}, expected 1..=3", v),
            Violation::NegativeChargePower(v) => write!(f, "maxChargePower is {} W, expected >= 0", v),
            Violation::NonPositiveCapacity(v) => write!(f, "batteryCapacity is {} Wh, expected > 0", v),
        }
    }
}

/// Checks a profile's attribute values against their expected domains
///
/// # Arguments
///
/// * 'profile' - the profile to check
pub fn validate(profile: &VehicleProfile) -> Vec<Violation> {
    let mut violations = Vec::new();

    let percents = [
        ("defaultSocManual", profile.default_soc_manual()),
        ("defaultSocSchedule", profile.default_soc_schedule()),
        ("defaultSocOptionalEnergy", profile.default_soc_optional_energy()),
    ];
    for (attribute, value) in percents {
        if let Some(value) = value.filter(|v| !(0..=100).contains(v)) {
            violations.push(Violation::PercentOutOfRange { attribute, value });
        }
    }

    if let Some(phases) = profile.phases().filter(|p| !(1..=3).contains(p)) {
        violations.push(Violation::PhasesOutOfRange(phases));
    }
    if let Some(power) = profile.max_charge_power().filter(|p| *p < 0) {
        violations.push(Violation::NegativeChargePower(power));
    }
    if let Some(capacity) = profile.battery_capacity().filter(|c| *c <= 0) {
        violations.push(Violation::NonPositiveCapacity(capacity));
    }

    violations
}

/// Returns ids that occur more than once, in order of their first occurrence
///
/// # Arguments
///
/// * 'profiles' - the profiles to check
pub fn duplicate_ids(profiles: &[VehicleProfile]) -> Vec<i32> {
    let mut counts: HashMap<i32, usize> = HashMap::new();
    for id in profiles.iter().filter_map(|p| p.id()) {
        *counts.entry(id).or_default() += 1;
    }

    let mut duplicates: Vec<i32> = Vec::new();
    for id in profiles.iter().filter_map(|p| p.id()) {
        if counts[&id] > 1 && !duplicates.contains(&id) {
            duplicates.push(id);
        }
    }

    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_profile_has_no_violations() {
        let profile = VehicleProfile::builder()
            .id(1)
            .battery_capacity(75000)
            .phases(3)
            .max_charge_power(0)
            .default_soc_manual(0)
            .default_soc_schedule(100)
            .build();

        assert!(validate(&profile).is_empty());
        assert!(validate(&VehicleProfile::default()).is_empty());
    }

    #[test]
    fn test_out_of_range_values_are_reported() {
        let profile = VehicleProfile::builder()
            .battery_capacity(0)
            .phases(4)
            .max_charge_power(-11000)
            .default_soc_manual(101)
            .default_soc_optional_energy(-1)
            .build();

        assert_eq!(validate(&profile), vec![
            Violation::PercentOutOfRange { attribute: "defaultSocManual", value: 101 },
            Violation::PercentOutOfRange { attribute: "defaultSocOptionalEnergy", value: -1 },
            Violation::PhasesOutOfRange(4),
            Violation::NegativeChargePower(-11000),
            Violation::NonPositiveCapacity(0),
        ]);
    }

    #[test]
    fn test_violation_display() {
        let violation = Violation::PercentOutOfRange { attribute: "defaultSocSchedule", value: 120 };
        assert_eq!(violation.to_string(), "defaultSocSchedule is 120%, expected 0..=100");
    }

    #[test]
    fn test_duplicate_ids() {
        let profiles = vec![
            VehicleProfile::builder().id(2).build(),
            VehicleProfile::builder().id(1).build(),
            VehicleProfile::default(),
            VehicleProfile::builder().id(2).build(),
            VehicleProfile::default(),
            VehicleProfile::builder().id(1).build(),
            VehicleProfile::builder().id(2).build(),
        ];

        assert_eq!(duplicate_ids(&profiles), vec![2, 1]);
        assert!(duplicate_ids(&profiles[..3]).is_empty());
    }
}
