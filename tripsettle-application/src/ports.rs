use crate::{error::TripSourceError, model::TripSnapshot};
use std::collections::HashMap;
use tripsettle_domain::{Participant, ParticipantId};

/// Supplies the trip data a settlement is computed from.
pub trait TripSource: Send + Sync {
    fn load(&self) -> Result<TripSnapshot, TripSourceError>;
}

impl TripSource for TripSnapshot {
    fn load(&self) -> Result<TripSnapshot, TripSourceError> {
        Ok(self.clone())
    }
}

pub trait ParticipantDirectory: Send + Sync {
    fn display_name(&self, participant_id: &ParticipantId) -> Option<&str>;
}

impl ParticipantDirectory for HashMap<ParticipantId, String> {
    fn display_name(&self, participant_id: &ParticipantId) -> Option<&str> {
        self.get(participant_id).map(String::as_str)
    }
}

impl ParticipantDirectory for [Participant] {
    fn display_name(&self, participant_id: &ParticipantId) -> Option<&str> {
        self.iter()
            .find(|participant| &participant.id == participant_id)
            .map(|participant| participant.name.as_str())
    }
}

impl ParticipantDirectory for Vec<Participant> {
    fn display_name(&self, participant_id: &ParticipantId) -> Option<&str> {
        self.as_slice().display_name(participant_id)
    }
}
