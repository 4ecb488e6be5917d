pub mod competition;
pub mod participant;
pub mod participant_competition;
