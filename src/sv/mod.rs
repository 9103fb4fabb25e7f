pub mod guardrails;
pub mod profile;
pub mod trial;

pub use guardrails::Guardrails;
pub use profile::Profile;
pub use trial::Trial;
