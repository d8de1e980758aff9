//! Usage: Permission Manager (notification permission + default channel lifecycle).

mod policy;
mod setup;
mod types;

pub use policy::{init_presentation_policy, presentation_policy};
pub use setup::{spawn_notification_setup, NotificationBackend, NotificationState};
pub use types::{ChannelConfig, PermissionStatus};

#[cfg(target_os = "android")]
pub use types::Importance;
