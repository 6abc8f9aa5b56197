pub mod vehicle_profile;
pub mod profile_document;
