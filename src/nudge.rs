//! Nudge phase derivation and message selection.
//!
//! Nudges are scheduled, non-blocking messages shown to trial users based
//! on elapsed time. The phase is derived from whole days elapsed since the
//! trial start; message urgency within the late phase is a separate layer
//! keyed on days remaining. Keeping the two layers apart means the phase
//! enum stays stable while the late-phase wording sharpens near the end.

use serde::Serialize;

/// Day of the trial on which each nudge phase begins.
pub const EARLY_NUDGE_DAY: i64 = 7;
pub const MID_NUDGE_DAY: i64 = 21;
pub const LATE_NUDGE_DAY: i64 = 40;

/// Within the late phase, wording turns urgent at this many days left.
pub const URGENT_DAYS_LEFT: i64 = 3;

/// Trial nudge phase.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Nudge {
  None,
  Day7,
  Day21,
  Day40,
  Expired,
}

impl Nudge {
  /// Derive the phase from whole days elapsed since trial start.
  ///
  /// Thresholds are evaluated in descending order so the largest reached
  /// threshold wins; expiry overrides them all.
  pub fn for_elapsed(days_elapsed: i64, expired: bool) -> Self {
    if expired {
      Nudge::Expired
    } else if days_elapsed >= LATE_NUDGE_DAY {
      Nudge::Day40
    } else if days_elapsed >= MID_NUDGE_DAY {
      Nudge::Day21
    } else if days_elapsed >= EARLY_NUDGE_DAY {
      Nudge::Day7
    } else {
      Nudge::None
    }
  }

  /// User-facing message for this phase, or `None` when no nudge is shown.
  pub fn message(self, days_remaining: i64) -> Option<String> {
    match self {
      Nudge::Day7 => Some(
        "🚀 You're getting the hang of it! You've explored manuals, found \
         parts, and connected with the community. Keep discovering!"
          .to_string(),
      ),
      Nudge::Day21 => Some(
        "🎯 Look what you've accomplished! You've accessed technical \
         guides, saved your favorite procedures, and helped fellow owners. \
         The community is better with you here."
          .to_string(),
      ),
      Nudge::Day40 => {
        if days_remaining <= URGENT_DAYS_LEFT {
          Some(format!(
            "⏰ Only {days_remaining} days left in your trial! Don't lose \
             access to workshop manuals, wiring diagrams, and expert \
             support. Upgrade now to keep your truck running smoothly."
          ))
        } else {
          Some(format!(
            "📅 Your trial ends in {days_remaining} days. Ready to \
             continue? Join hundreds of owners who rely on our premium \
             features daily."
          ))
        }
      }
      Nudge::Expired => Some(
        "Your free trial has ended. Upgrade now to regain access to \
         premium manuals, technical diagrams, and priority support. No \
         long-term commitment required."
          .to_string(),
      ),
      Nudge::None => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn phase_thresholds() {
    assert_eq!(Nudge::for_elapsed(0, false), Nudge::None);
    assert_eq!(Nudge::for_elapsed(6, false), Nudge::None);
    assert_eq!(Nudge::for_elapsed(7, false), Nudge::Day7);
    assert_eq!(Nudge::for_elapsed(20, false), Nudge::Day7);
    assert_eq!(Nudge::for_elapsed(21, false), Nudge::Day21);
    assert_eq!(Nudge::for_elapsed(39, false), Nudge::Day21);
    assert_eq!(Nudge::for_elapsed(40, false), Nudge::Day40);
    assert_eq!(Nudge::for_elapsed(44, false), Nudge::Day40);
  }

  #[test]
  fn expiry_overrides_elapsed() {
    assert_eq!(Nudge::for_elapsed(46, true), Nudge::Expired);
    assert_eq!(Nudge::for_elapsed(10, true), Nudge::Expired);
  }

  #[test]
  fn late_phase_message_turns_urgent() {
    // Day 42 of 45: shares the day40 phase but gets the urgent wording.
    let urgent = Nudge::Day40.message(3).unwrap();
    assert!(urgent.contains("Only 3 days left"));

    let calm = Nudge::Day40.message(5).unwrap();
    assert!(calm.contains("ends in 5 days"));
    assert_ne!(urgent, calm);
  }

  #[test]
  fn none_phase_has_no_message() {
    assert_eq!(Nudge::None.message(45), None);
  }

  #[test]
  fn expired_message_calls_for_upgrade() {
    let message = Nudge::Expired.message(0).unwrap();
    assert!(message.contains("Upgrade now"));
  }
}
