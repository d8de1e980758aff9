//! Usage: Notification permission bootstrap (`ensure_notification_setup` + fire-and-forget spawn).

use super::types::{
    ChannelConfig, ChannelDeclaration, PermissionGate, PermissionStatus, Platform, SetupOutcome,
};
use crate::blocking;
use crate::mutex_ext::MutexExt;
use crate::notification_backend::TauriNotifications;
use std::sync::Mutex;
use tauri::{AppHandle, Manager, Runtime};

pub const PUSH_PERMISSION_FAILURE_MESSAGE: &str =
    "Failed to get push token for push notification!";

/// OS-facing notification operations. Implementations may block (mobile prompts wait for the user).
pub trait NotificationBackend: Send + Sync {
    fn declare_channel(&self, channel: &ChannelConfig) -> Result<(), String>;

    fn permission_status(&self) -> Result<PermissionStatus, String>;

    /// Returns the status the OS reports once the request resolves.
    fn request_permission(&self) -> Result<PermissionStatus, String>;
}

#[derive(Debug, Default)]
pub struct NotificationState {
    pub gate: PermissionGate,
    last_outcome: Mutex<Option<SetupOutcome>>,
}

impl NotificationState {
    /// `None` until a setup run has finished.
    pub fn last_outcome(&self) -> Option<SetupOutcome> {
        self.last_outcome.lock_or_recover().clone()
    }

    /// Runs the setup against this state's gate and records the outcome.
    pub fn run_setup(
        &self,
        backend: &dyn NotificationBackend,
        platform: Platform,
    ) -> SetupOutcome {
        let outcome = ensure_notification_setup(backend, platform, &self.gate);
        if outcome.is_granted() {
            tracing::info!(%outcome, "notification setup finished");
        } else {
            tracing::warn!(%outcome, "notification setup finished without permission");
        }
        *self.last_outcome.lock_or_recover() = Some(outcome.clone());
        outcome
    }
}

fn declare_default_channel(
    backend: &dyn NotificationBackend,
    platform: Platform,
) -> ChannelDeclaration {
    if !platform.supports_channels() {
        return ChannelDeclaration::Skipped;
    }

    let channel = ChannelConfig::default_channel();
    match backend.declare_channel(&channel) {
        Ok(()) => ChannelDeclaration::Declared,
        Err(err) => {
            tracing::warn!(channel_id = %channel.id, "notification channel declaration failed: {err}");
            ChannelDeclaration::Failed
        }
    }
}

/// Brings notification permission and channel state into a known state.
///
/// Never fails: denial and backend errors are folded into the returned outcome
/// and logged locally. At most one permission request is issued per `gate`.
pub fn ensure_notification_setup(
    backend: &dyn NotificationBackend,
    platform: Platform,
    gate: &PermissionGate,
) -> SetupOutcome {
    let channel = declare_default_channel(backend, platform);
    tracing::debug!(?platform, ?channel, "notification channel step finished");

    let existing = match backend.permission_status() {
        Ok(status) => status,
        Err(err) => {
            tracing::warn!("notification permission query failed: {err}");
            return SetupOutcome::Failed(err);
        }
    };

    if existing == PermissionStatus::Granted {
        return SetupOutcome::AlreadyGranted;
    }

    if !gate.try_acquire() {
        tracing::debug!(status = %existing, "notification permission already requested in this process");
        tracing::warn!("{PUSH_PERMISSION_FAILURE_MESSAGE}");
        return SetupOutcome::Denied(existing);
    }

    let requested = match backend.request_permission() {
        Ok(status) => status,
        Err(err) => {
            tracing::warn!("{PUSH_PERMISSION_FAILURE_MESSAGE} ({err})");
            return SetupOutcome::Failed(err);
        }
    };

    let final_status = match backend.permission_status() {
        Ok(status) => status,
        Err(err) => {
            tracing::debug!("notification permission re-check failed, using request result: {err}");
            requested
        }
    };

    if final_status != PermissionStatus::Granted {
        tracing::warn!("{PUSH_PERMISSION_FAILURE_MESSAGE}");
        return SetupOutcome::Denied(final_status);
    }

    SetupOutcome::Granted
}

/// Runs the setup on the blocking pool; the caller never observes the result.
pub fn spawn_notification_setup<R: Runtime>(app: &AppHandle<R>) {
    let app = app.clone();
    blocking::spawn_detached("notification_setup", move || {
        let backend = TauriNotifications::new(app.clone());
        let state = app.state::<NotificationState>();
        state.run_setup(&backend, Platform::current());
    });
}
