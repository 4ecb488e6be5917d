pub mod competitions;
pub mod projection;
pub mod registration;
