use std::collections::HashSet;
use std::fs;
use std::path::Path;
use chrono::Utc;
use log::{debug, info, warn};
use serde::Deserialize;
use crate::backup::{backup_file, prune_backups, replace_file, BackupSettings};
use crate::codec::{decode, encode, Format};
use crate::errors::ProfileError;
use crate::models::vehicle_profile::VehicleProfile;
use crate::validation::{duplicate_ids, validate};

/// What to do when a profiles document holds more than one profile with the same id
#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail the whole load with `ProfileError::DuplicateId`
    #[default]
    Reject,
    /// Keep the last profile with a given id, at the position of the first one
    LastWriteWins,
}

/// The in-memory collection of vehicle profiles, in document order
#[derive(Debug, Default)]
pub struct ProfileStore {
    profiles: Vec<VehicleProfile>,
    modified: bool,
}

impl ProfileStore {
    pub fn new() -> ProfileStore {
        ProfileStore::default()
    }

    /// Builds a store from already decoded profiles. Attribute values out of range are
    /// logged but kept as they are.
    ///
    /// # Arguments
    ///
    /// * 'profiles' - the profiles in document order
    /// * 'policy' - how to treat profiles sharing an id
    pub fn from_profiles(profiles: Vec<VehicleProfile>, policy: DuplicatePolicy) -> Result<ProfileStore, ProfileError> {
        let mut store = ProfileStore::new();

        match policy {
            DuplicatePolicy::Reject => {
                if let Some(id) = duplicate_ids(&profiles).first() {
                    return Err(ProfileError::DuplicateId(*id));
                }
                store.profiles = profiles;
            }
            DuplicatePolicy::LastWriteWins => {
                for profile in profiles {
                    match profile.id().and_then(|id| store.position(id)) {
                        Some(i) => {
                            warn!("vehicle id {} occurs more than once, keeping the last one", profile.id().unwrap_or_default());
                            store.profiles[i] = profile;
                        }
                        None => store.profiles.push(profile),
                    }
                }
            }
        }

        for profile in &store.profiles {
            for violation in validate(profile) {
                warn!("vehicle {}: {}", label(profile), violation);
            }
        }

        Ok(store)
    }

    /// Parses a profiles document into a store
    ///
    /// # Arguments
    ///
    /// * 'source' - the document text
    /// * 'format' - format of the document
    /// * 'policy' - how to treat profiles sharing an id
    pub fn parse(source: &str, format: Format, policy: DuplicatePolicy) -> Result<ProfileStore, ProfileError> {
        ProfileStore::from_profiles(decode(source, format)?, policy)
    }

    /// Loads a profiles file, the format is given by the file extension
    ///
    /// # Arguments
    ///
    /// * 'path' - path to the profiles file
    /// * 'policy' - how to treat profiles sharing an id
    pub fn load(path: &Path, policy: DuplicatePolicy) -> Result<ProfileStore, ProfileError> {
        let source = fs::read_to_string(path)?;
        let store = ProfileStore::parse(&source, Format::from_path(path), policy)?;
        info!("loaded {} vehicle profile(s) from {}", store.len(), path.display());

        Ok(store)
    }

    /// Encodes all profiles into a profiles document
    ///
    /// # Arguments
    ///
    /// * 'format' - format of the document
    pub fn encode(&self, format: Format) -> Result<String, ProfileError> {
        encode(&self.profiles, format)
    }

    /// Saves all profiles to file, replacing the file atomically. If backup settings are given
    /// the previous file is copied to the backup dir first and outdated copies are removed.
    ///
    /// # Arguments
    ///
    /// * 'path' - path to the profiles file, its extension gives the format
    /// * 'backup' - optional backup settings
    pub fn save(&mut self, path: &Path, backup: Option<&BackupSettings>) -> Result<(), ProfileError> {
        let source = self.encode(Format::from_path(path))?;

        if let Some(settings) = backup {
            let now = Utc::now();
            backup_file(settings, path, now)?;
            let removed = prune_backups(settings, path, now)?;
            if removed > 0 {
                debug!("removed {} outdated backup(s) of {}", removed, path.display());
            }
        }

        replace_file(path, &source)?;
        self.modified = false;
        info!("saved {} vehicle profile(s) to {}", self.len(), path.display());

        Ok(())
    }

    pub fn find_by_id(&self, id: i32) -> Option<&VehicleProfile> {
        self.profiles.iter().find(|p| p.id() == Some(id))
    }

    /// Stores a profile, replacing the whole profile with the same id if there is one.
    /// A profile without id gets one assigned, one above the highest id in the store or,
    /// if that overflows, the lowest unused positive id.
    /// Returns the id the profile was stored under.
    ///
    /// # Arguments
    ///
    /// * 'profile' - the complete profile
    pub fn upsert(&mut self, profile: VehicleProfile) -> Result<i32, ProfileError> {
        let id = match profile.id() {
            Some(id) => id,
            None => self.next_id().ok_or(ProfileError::IdsExhausted)?,
        };
        let profile = profile.with_id(id);

        match self.position(id) {
            Some(i) => {
                if self.profiles[i] != profile {
                    self.profiles[i] = profile;
                    self.modified = true;
                }
            }
            None => {
                self.profiles.push(profile);
                self.modified = true;
            }
        }

        Ok(id)
    }

    /// Removes the profile with the given id, does nothing if there is none
    ///
    /// # Arguments
    ///
    /// * 'id' - id of the profile to remove
    pub fn remove(&mut self, id: i32) -> Option<VehicleProfile> {
        let removed = self.position(id).map(|i| self.profiles.remove(i));
        if removed.is_some() {
            self.modified = true;
        }

        removed
    }

    pub fn iter(&self) -> impl Iterator<Item = &VehicleProfile> {
        self.profiles.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = i32> + '_ {
        self.profiles.iter().filter_map(|p| p.id())
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// True if profiles were changed since the store was loaded or last saved
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    fn position(&self, id: i32) -> Option<usize> {
        self.profiles.iter().position(|p| p.id() == Some(id))
    }

    fn next_id(&self) -> Option<i32> {
        match self.ids().max() {
            None => Some(1),
            Some(max) => max.checked_add(1).or_else(|| {
                let used: HashSet<i32> = self.ids().collect();
                (1..=i32::MAX).find(|id| !used.contains(id))
            }),
        }
    }
}

fn label(profile: &VehicleProfile) -> String {
    match (profile.id(), profile.name()) {
        (Some(id), Some(name)) => format!("{} ({})", id, name),
        (Some(id), None) => id.to_string(),
        (None, Some(name)) => format!("'{}'", name),
        (None, None) => "without id".to_string(),
    }
}
