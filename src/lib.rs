mod app;
mod domain;
mod infra;
mod shared;

pub(crate) use app::{config, logging, shell};
pub(crate) use domain::notifications;
pub(crate) use infra::notification_backend;
pub(crate) use shared::{blocking, mutex_ext};

use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Presentation policy is process-wide and must exist before any window mounts.
    notifications::init_presentation_policy();

    let builder = tauri::Builder::default();

    #[cfg(desktop)]
    let builder = builder.plugin(tauri_plugin_single_instance::init(|app, _argv, _cwd| {
        shell::show_main_window(app);
    }));

    let app = builder
        .manage(notifications::NotificationState::default())
        .manage(shell::MountState::default())
        .plugin(tauri_plugin_notification::init())
        .setup(|app| {
            logging::init(app.handle());

            if let Some(policy) = notifications::presentation_policy() {
                tracing::info!(
                    show_alert = policy.show_alert,
                    play_sound = policy.play_sound,
                    set_badge = policy.set_badge,
                    "notification presentation policy installed"
                );
            }

            if let Err(err) = shell::mount(app.handle()) {
                tracing::error!("container shell mount failed: {err}");
            }

            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    app.run(|app_handle, event| {
        if let tauri::RunEvent::Exit = event {
            let outcome = app_handle
                .state::<notifications::NotificationState>()
                .last_outcome();
            match outcome {
                Some(outcome) => tracing::info!(%outcome, "exiting; notification setup outcome"),
                None => tracing::info!("exiting before notification setup finished"),
            }
        }
    });
}
