use std::{collections::BTreeMap, fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::consts::{ActivityName, ParticipantEmail};

const SEED_CATALOG: &str = include_str!("../../data/activities.json");

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    /// Insertion ordered, each email appears at most once
    pub participants: Vec<ParticipantEmail>,
}

impl Activity {
    pub fn is_full(&self) -> bool {
        self.participants.len() >= self.max_participants as usize
    }

    pub fn has_participant(&self, email: &ParticipantEmail) -> bool {
        self.participants.contains(email)
    }

    pub fn new_test(max_participants: u32, participants: &[&str]) -> Self {
        Activity {
            description: "Test activity".to_string(),
            schedule: "Mondays, 3:30 PM - 4:30 PM".to_string(),
            max_participants,
            participants: participants
                .iter()
                .map(|p| ParticipantEmail::try_from(*p).expect("test emails should be valid"))
                .collect(),
        }
    }
}

/// Activity name -> activity, as returned by a listing
pub type ActivityCatalog = BTreeMap<ActivityName, Activity>;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Unable to read seed file: {0}")]
    Io(#[from] std::io::Error),

    // Covers invalid emails too, `ParticipantEmail` validates while deserializing
    #[error("Unable to parse seed catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Seed catalog contains an activity with an empty name")]
    EmptyActivityName,

    #[error("Seed catalog lists {1} more than once in {0}")]
    DuplicateParticipant(ActivityName, ParticipantEmail),
}

/// The catalog the service ships with
pub fn seed_catalog() -> Result<ActivityCatalog, CatalogError> {
    parse_catalog(SEED_CATALOG)
}

pub fn load_catalog(path: &Path) -> Result<ActivityCatalog, CatalogError> {
    let contents = fs::read_to_string(path)?;

    parse_catalog(&contents)
}

pub fn parse_catalog(contents: &str) -> Result<ActivityCatalog, CatalogError> {
    let catalog: ActivityCatalog = serde_json::from_str(contents)?;

    validate_catalog(&catalog)?;

    Ok(catalog)
}

fn validate_catalog(catalog: &ActivityCatalog) -> Result<(), CatalogError> {
    for (name, activity) in catalog {
        if name.as_str().trim().is_empty() {
            return Err(CatalogError::EmptyActivityName);
        }

        for (index, email) in activity.participants.iter().enumerate() {
            if activity.participants[..index].contains(email) {
                return Err(CatalogError::DuplicateParticipant(
                    name.clone(),
                    email.clone(),
                ));
            }
        }
    }

    Ok(())
}
