//! Usage: `NotificationBackend` over `tauri-plugin-notification`.

use crate::notifications::{ChannelConfig, NotificationBackend, PermissionStatus};
use tauri::{AppHandle, Runtime};
use tauri_plugin_notification::{NotificationExt, PermissionState};

pub struct TauriNotifications<R: Runtime> {
    app: AppHandle<R>,
}

impl<R: Runtime> TauriNotifications<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }
}

fn status_from_state(state: PermissionState) -> PermissionStatus {
    match state {
        PermissionState::Granted => PermissionStatus::Granted,
        PermissionState::Denied => PermissionStatus::Denied,
        _ => PermissionStatus::Undetermined,
    }
}

impl<R: Runtime> NotificationBackend for TauriNotifications<R> {
    fn declare_channel(&self, channel: &ChannelConfig) -> Result<(), String> {
        declare_channel(&self.app, channel)
    }

    fn permission_status(&self) -> Result<PermissionStatus, String> {
        self.app
            .notification()
            .permission_state()
            .map(status_from_state)
            .map_err(|e| format!("failed to query notification permission: {e}"))
    }

    fn request_permission(&self) -> Result<PermissionStatus, String> {
        self.app
            .notification()
            .request_permission()
            .map(status_from_state)
            .map_err(|e| format!("failed to request notification permission: {e}"))
    }
}

// The plugin's channel API has no vibration-pattern field; vibration is toggled on instead.
#[cfg(target_os = "android")]
fn declare_channel<R: Runtime>(app: &AppHandle<R>, channel: &ChannelConfig) -> Result<(), String> {
    use crate::notifications::Importance;
    use tauri_plugin_notification::{Channel, Importance as PluginImportance};

    let importance = match channel.importance {
        Importance::Min => PluginImportance::Min,
        Importance::Low => PluginImportance::Low,
        Importance::Default => PluginImportance::Default,
        Importance::High | Importance::Max => PluginImportance::High,
    };

    let declared = Channel::builder(channel.id.clone(), channel.display_name.clone())
        .importance(importance)
        .vibration(!channel.vibration_pattern_ms.is_empty())
        .light_color(channel.accent_color.clone())
        .build();

    app.notification()
        .create_channel(declared)
        .map_err(|e| format!("failed to declare notification channel {}: {e}", channel.id))
}

#[cfg(not(target_os = "android"))]
fn declare_channel<R: Runtime>(
    _app: &AppHandle<R>,
    channel: &ChannelConfig,
) -> Result<(), String> {
    Err(format!(
        "notification channels are not supported on this platform (channel {})",
        channel.id
    ))
}
