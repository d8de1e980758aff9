//! Usage: Process-wide notification presentation policy (installed once before any window exists).
//!
//! Read by whatever path later presents incoming notifications; the shell itself only installs it.

use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct PresentationPolicy {
    pub show_alert: bool,
    pub play_sound: bool,
    pub set_badge: bool,
}

pub const DEFAULT_PRESENTATION_POLICY: PresentationPolicy = PresentationPolicy {
    show_alert: true,
    play_sound: true,
    set_badge: false,
};

static PRESENTATION_POLICY: OnceLock<PresentationPolicy> = OnceLock::new();

/// Returns `true` only for the call that actually installed the policy.
pub fn init_presentation_policy() -> bool {
    let mut installed = false;
    PRESENTATION_POLICY.get_or_init(|| {
        installed = true;
        DEFAULT_PRESENTATION_POLICY
    });
    installed
}

pub fn presentation_policy() -> Option<PresentationPolicy> {
    PRESENTATION_POLICY.get().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_keeps_the_first_policy() {
        // Tests share the process-wide cell, so only the end state is deterministic.
        let _ = init_presentation_policy();
        assert!(!init_presentation_policy());
        assert_eq!(presentation_policy(), Some(DEFAULT_PRESENTATION_POLICY));
    }

    #[test]
    fn default_policy_shows_alerts_without_badges() {
        assert!(DEFAULT_PRESENTATION_POLICY.show_alert);
        assert!(DEFAULT_PRESENTATION_POLICY.play_sound);
        assert!(!DEFAULT_PRESENTATION_POLICY.set_badge);
    }
}
