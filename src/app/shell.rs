//! Usage: Container Shell (single full-viewport webview on the remote origin + startup side effects).

use crate::config::{self, MAIN_WINDOW_LABEL, REMOTE_ORIGIN};
use crate::notifications;
use std::sync::atomic::{AtomicBool, Ordering};
use tauri::webview::{PageLoadEvent, PageLoadPayload};
use tauri::{AppHandle, Manager, Runtime, WebviewUrl, WebviewWindow, WebviewWindowBuilder};

#[cfg(desktop)]
const LOADING_TITLE_SUFFIX: &str = " (loading…)";

#[cfg(windows)]
const WEBVIEW2_BROWSER_ARGS: &str =
    "--disable-features=msWebOOUI,msPdfOOUI,msSmartScreenProtection --autoplay-policy=no-user-gesture-required";

const VIEWPORT_SCRIPT: &str = r#"
  if (!document.querySelector('meta[name="viewport"]')) {
    var meta = document.createElement('meta');
    meta.name = 'viewport';
    meta.content = 'width=device-width, initial-scale=1';
    (document.head || document.documentElement).appendChild(meta);
  }"#;

const FULLSCREEN_DISABLED_SCRIPT: &str = r#"
  Element.prototype.requestFullscreen = function () {
    return Promise.reject(new TypeError('fullscreen is disabled'));
  };"#;

const INLINE_MEDIA_SCRIPT: &str = r#"
  var markInline = function (root) {
    root.querySelectorAll('video').forEach(function (video) {
      video.setAttribute('playsinline', '');
      video.setAttribute('webkit-playsinline', '');
    });
  };
  markInline(document);
  new MutationObserver(function () { markInline(document); })
    .observe(document.documentElement, { childList: true, subtree: true });"#;

/// Embedded browser configuration record. The only constructor is [`SurfaceConfig::fixed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceConfig {
    pub source_uri: &'static str,
    pub java_script_enabled: bool,
    pub dom_storage_enabled: bool,
    pub start_in_loading_state: bool,
    pub scales_page_to_fit: bool,
    pub allows_fullscreen_video: bool,
    pub allows_inline_media_playback: bool,
    pub media_playback_requires_user_action: bool,
    pub allows_back_forward_navigation_gestures: bool,
}

impl SurfaceConfig {
    pub fn fixed() -> Self {
        Self {
            source_uri: REMOTE_ORIGIN,
            java_script_enabled: true,
            dom_storage_enabled: true,
            start_in_loading_state: true,
            scales_page_to_fit: true,
            allows_fullscreen_video: true,
            allows_inline_media_playback: true,
            media_playback_requires_user_action: false,
            allows_back_forward_navigation_gestures: true,
        }
    }

    fn initialization_script(&self) -> Option<String> {
        let mut body = String::new();
        if !self.allows_fullscreen_video {
            body.push_str(FULLSCREEN_DISABLED_SCRIPT);
        }
        if self.scales_page_to_fit {
            body.push_str(VIEWPORT_SCRIPT);
        }
        if self.allows_inline_media_playback && !self.media_playback_requires_user_action {
            body.push_str(INLINE_MEDIA_SCRIPT);
        }
        if body.is_empty() {
            return None;
        }
        Some(format!(
            "document.addEventListener('DOMContentLoaded', function () {{{body}\n}});"
        ))
    }
}

#[cfg(desktop)]
fn window_title(loading: bool) -> String {
    if loading {
        format!("{}{LOADING_TITLE_SUFFIX}", config::WINDOW_TITLE)
    } else {
        config::WINDOW_TITLE.to_string()
    }
}

/// `Unmounted -> Mounted`; there is no unmount.
#[derive(Debug, Default)]
pub struct MountState {
    mounted: AtomicBool,
}

impl MountState {
    #[cfg(any(desktop, test))]
    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    /// Fires `trigger_setup` (without waiting on it) and then builds the surface.
    ///
    /// Returns `Ok(None)` when already mounted.
    pub fn mount_with<T>(
        &self,
        trigger_setup: impl FnOnce(),
        build_surface: impl FnOnce(&SurfaceConfig) -> Result<T, String>,
    ) -> Result<Option<T>, String> {
        if self.mounted.swap(true, Ordering::AcqRel) {
            tracing::debug!("container shell already mounted");
            return Ok(None);
        }

        trigger_setup();
        build_surface(&SurfaceConfig::fixed()).map(Some)
    }
}

pub fn mount<R: Runtime>(app: &AppHandle<R>) -> Result<(), String> {
    let state = app.state::<MountState>();
    let window = state.mount_with(
        || notifications::spawn_notification_setup(app),
        |surface| build_main_window(app, surface),
    )?;

    if let Some(window) = window {
        tracing::info!(label = %window.label(), origin = REMOTE_ORIGIN, "container shell mounted");
    }
    Ok(())
}

fn on_page_load<R: Runtime>(window: WebviewWindow<R>, payload: PageLoadPayload<'_>) {
    let loading = matches!(payload.event(), PageLoadEvent::Started);
    tracing::debug!(url = %payload.url(), loading, "page load event");

    #[cfg(desktop)]
    let _ = window.set_title(&window_title(loading));
    #[cfg(not(desktop))]
    let _ = window;
}

fn build_main_window<R: Runtime>(
    app: &AppHandle<R>,
    surface: &SurfaceConfig,
) -> Result<WebviewWindow<R>, String> {
    let url = config::parse_origin(surface.source_uri)?;

    let mut builder = WebviewWindowBuilder::new(app, MAIN_WINDOW_LABEL, WebviewUrl::External(url))
        .incognito(!surface.dom_storage_enabled);

    if surface.start_in_loading_state {
        builder = builder.on_page_load(on_page_load);
    }
    if let Some(script) = surface.initialization_script() {
        builder = builder.initialization_script(&script);
    }

    #[cfg(desktop)]
    {
        builder = builder
            .title(window_title(surface.start_in_loading_state))
            .inner_size(config::DEFAULT_WINDOW_WIDTH, config::DEFAULT_WINDOW_HEIGHT)
            .resizable(true)
            .maximized(true);
    }

    #[cfg(windows)]
    {
        builder = builder.additional_browser_args(WEBVIEW2_BROWSER_ARGS);
    }

    let window = builder
        .build()
        .map_err(|e| format!("failed to create main window: {e}"))?;

    if let Err(err) = apply_navigation_gestures(&window, surface) {
        tracing::warn!("{err}");
    }
    Ok(window)
}

// WKWebView ships with swipe navigation off; no builder setter exists for it.
#[cfg(any(target_os = "macos", target_os = "ios"))]
fn apply_navigation_gestures<R: Runtime>(
    window: &WebviewWindow<R>,
    surface: &SurfaceConfig,
) -> Result<(), String> {
    let enabled = surface.allows_back_forward_navigation_gestures;
    window
        .with_webview(move |webview| {
            // SAFETY: on Apple targets `inner()` is the live `WKWebView` owned by the window.
            let wk_webview: &objc2_web_kit::WKWebView = unsafe { &*webview.inner().cast() };
            unsafe { wk_webview.setAllowsBackForwardNavigationGestures(enabled) };
        })
        .map_err(|e| format!("failed to configure navigation gestures: {e}"))
}

// Only WKWebView exposes a swipe-navigation switch.
#[cfg(not(any(target_os = "macos", target_os = "ios")))]
fn apply_navigation_gestures<R: Runtime>(
    _window: &WebviewWindow<R>,
    surface: &SurfaceConfig,
) -> Result<(), String> {
    tracing::debug!(
        enabled = surface.allows_back_forward_navigation_gestures,
        "navigation gestures are platform-managed"
    );
    Ok(())
}

#[cfg(desktop)]
pub fn show_main_window<R: Runtime>(app: &AppHandle<R>) {
    if !app.state::<MountState>().is_mounted() {
        return;
    }
    let Some(window) = app.get_webview_window(MAIN_WINDOW_LABEL) else {
        return;
    };

    let _ = window.show();
    let _ = window.unminimize();
    let _ = window.set_focus();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn fixed_surface_matches_capability_baseline() {
        assert_eq!(
            SurfaceConfig::fixed(),
            SurfaceConfig {
                source_uri: "https://medimitra-client.vercel.app",
                java_script_enabled: true,
                dom_storage_enabled: true,
                start_in_loading_state: true,
                scales_page_to_fit: true,
                allows_fullscreen_video: true,
                allows_inline_media_playback: true,
                media_playback_requires_user_action: false,
                allows_back_forward_navigation_gestures: true,
            }
        );
    }

    #[test]
    fn initialization_script_covers_viewport_and_inline_media() {
        let script = SurfaceConfig::fixed()
            .initialization_script()
            .expect("script");
        assert!(script.contains("width=device-width, initial-scale=1"));
        assert!(script.contains("playsinline"));
        assert!(script.starts_with("document.addEventListener('DOMContentLoaded'"));
    }

    #[test]
    fn initialization_script_is_empty_without_scaling_or_inline_media() {
        let surface = SurfaceConfig {
            scales_page_to_fit: false,
            media_playback_requires_user_action: true,
            ..SurfaceConfig::fixed()
        };
        assert_eq!(surface.initialization_script(), None);
    }

    #[test]
    fn fullscreen_is_blocked_only_when_disallowed() {
        let fixed = SurfaceConfig::fixed().initialization_script().expect("script");
        assert!(!fixed.contains("requestFullscreen"));

        let surface = SurfaceConfig {
            allows_fullscreen_video: false,
            ..SurfaceConfig::fixed()
        };
        let script = surface.initialization_script().expect("script");
        assert!(script.contains("Element.prototype.requestFullscreen"));
    }

    #[cfg(desktop)]
    #[test]
    fn window_title_marks_loading_state() {
        assert_eq!(window_title(true), "MediMitra (loading…)");
        assert_eq!(window_title(false), "MediMitra");
    }

    #[test]
    fn mount_triggers_setup_once_then_builds_surface() {
        let state = MountState::default();
        let mut order = Vec::new();

        let built = state
            .mount_with(
                || order.push("setup"),
                |surface| {
                    assert_eq!(surface, &SurfaceConfig::fixed());
                    Ok("surface")
                },
            )
            .expect("mount");

        assert_eq!(built, Some("surface"));
        assert_eq!(order, vec!["setup"]);
        assert!(state.is_mounted());
    }

    #[test]
    fn second_mount_is_a_no_op() {
        let state = MountState::default();
        let mut setups = 0;

        state.mount_with(|| setups += 1, |_| Ok(())).expect("first");
        let second = state.mount_with(|| setups += 1, |_| Ok(())).expect("second");

        assert_eq!(second, None);
        assert_eq!(setups, 1);
    }

    #[test]
    fn mount_does_not_wait_for_notification_setup() {
        let state = MountState::default();
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let (done_tx, done_rx) = mpsc::channel();

        let built = state
            .mount_with(
                move || {
                    crate::blocking::spawn_detached("test_setup", move || {
                        let _ = release_rx.recv();
                        let _ = done_tx.send(());
                    })
                },
                |surface| Ok(surface.source_uri),
            )
            .expect("mount");

        assert_eq!(built, Some(REMOTE_ORIGIN));
        assert!(done_rx.try_recv().is_err(), "setup finished before release");

        release_tx.send(()).expect("release");
        done_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("setup completes after mount");
    }

    #[test]
    fn surface_build_failure_is_returned() {
        let state = MountState::default();
        let err = state
            .mount_with(|| {}, |_| Err::<(), _>("failed to create main window: boom".to_string()))
            .unwrap_err();
        assert_eq!(err, "failed to create main window: boom");
    }
}
