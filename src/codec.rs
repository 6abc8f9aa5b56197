use std::path::Path;
use crate::errors::ProfileError;
use crate::models::profile_document::{ProfileDocument, ProfileDocumentRef};
use crate::models::vehicle_profile::VehicleProfile;

/// Supported profile file formats
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Toml,
    Json,
}

impl Format {
    /// Picks the format from the file extension, anything but `.json` is read as TOML
    ///
    /// # Arguments
    ///
    /// * 'path' - path to the profiles file
    pub fn from_path(path: &Path) -> Format {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Toml,
        }
    }
}

/// Decodes a profiles document into its vehicle profiles, in document order
///
/// # Arguments
///
/// * 'source' - the document text
/// * 'format' - format of the document
pub fn decode(source: &str, format: Format) -> Result<Vec<VehicleProfile>, ProfileError> {
    let document: ProfileDocument = match format {
        Format::Toml => toml::from_str(source)?,
        Format::Json => serde_json::from_str(source)?,
    };

    Ok(document.vehicles)
}

/// Encodes vehicle profiles into a profiles document, absent attributes are left out
///
/// # Arguments
///
/// * 'profiles' - the profiles to encode
/// * 'format' - format of the document
pub fn encode(profiles: &[VehicleProfile], format: Format) -> Result<String, ProfileError> {
    let document = ProfileDocumentRef { vehicles: profiles };

    let source = match format {
        Format::Toml => toml::to_string(&document)?,
        Format::Json => serde_json::to_string_pretty(&document)
            .map_err(|e| ProfileError::Encode(e.to_string()))?,
    };

    Ok(source)
}
