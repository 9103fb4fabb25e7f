//! Notification sender stub.
//!
//! Delivery is handled by an external mail collaborator; this module only
//! defines the template surface and logs the send. Callers treat failures
//! as best-effort: log and move on, never roll back the state change that
//! triggered the notification.

use crate::prelude::*;

#[derive(Copy, Clone, Debug)]
pub enum Template {
  TrialWelcome,
}

impl Template {
  fn id(self) -> &'static str {
    match self {
      Template::TrialWelcome => "trial_welcome",
    }
  }
}

pub async fn send(email: &str, template: Template) -> Result<()> {
  info!("sending '{}' notification to {email}", template.id());
  Ok(())
}
