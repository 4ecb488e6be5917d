pub mod competition;
pub mod participant;
pub mod registration;
