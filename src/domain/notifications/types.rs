//! Usage: Notification data model (platform identity, permission status, channel declaration).

use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Android,
    Ios,
    Macos,
    Windows,
    Linux,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "android") {
            Self::Android
        } else if cfg!(target_os = "ios") {
            Self::Ios
        } else if cfg!(target_os = "macos") {
            Self::Macos
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "linux") {
            Self::Linux
        } else {
            Self::Other
        }
    }

    /// Only Android models notification channels explicitly.
    pub fn supports_channels(self) -> bool {
        matches!(self, Self::Android)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
}

impl fmt::Display for PermissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Granted => "granted",
            Self::Denied => "denied",
            Self::Undetermined => "undetermined",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Min,
    Low,
    Default,
    High,
    Max,
}

pub const DEFAULT_CHANNEL_ID: &str = "default";
const DEFAULT_CHANNEL_NAME: &str = "default";
const DEFAULT_VIBRATION_PATTERN_MS: [u64; 4] = [0, 250, 250, 250];
const DEFAULT_ACCENT_COLOR: &str = "#FF231F7C";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelConfig {
    pub id: String,
    pub display_name: String,
    pub importance: Importance,
    pub vibration_pattern_ms: Vec<u64>,
    pub accent_color: String,
}

impl ChannelConfig {
    pub fn default_channel() -> Self {
        Self {
            id: DEFAULT_CHANNEL_ID.to_string(),
            display_name: DEFAULT_CHANNEL_NAME.to_string(),
            importance: Importance::Max,
            vibration_pattern_ms: DEFAULT_VIBRATION_PATTERN_MS.to_vec(),
            accent_color: DEFAULT_ACCENT_COLOR.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelDeclaration {
    Declared,
    /// Platform has no channel concept; not an error.
    Skipped,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupOutcome {
    AlreadyGranted,
    Granted,
    /// Final status after the (single) request was not `granted`.
    Denied(PermissionStatus),
    Failed(String),
}

impl SetupOutcome {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::AlreadyGranted | Self::Granted)
    }
}

impl fmt::Display for SetupOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyGranted => f.write_str("already granted"),
            Self::Granted => f.write_str("granted"),
            Self::Denied(status) => write!(f, "not granted (status={status})"),
            Self::Failed(err) => write!(f, "failed: {err}"),
        }
    }
}

/// Allows at most one permission request per process.
#[derive(Debug, Default)]
pub struct PermissionGate {
    requested: AtomicBool,
}

impl PermissionGate {
    pub fn try_acquire(&self) -> bool {
        !self.requested.swap(true, Ordering::AcqRel)
    }
}
