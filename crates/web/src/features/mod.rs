pub mod competitions;
pub mod participants;
pub mod registrations;
