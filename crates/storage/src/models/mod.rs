mod category;
mod competition;
mod participant;
mod participant_competition;

pub use category::{Category, UnknownCategory};
pub use competition::Competition;
pub use participant::{NewParticipant, Participant};
pub use participant_competition::{NewParticipantCompetition, ParticipantCompetition};
