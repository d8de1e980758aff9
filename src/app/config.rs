//! Usage: Fixed shell configuration (remote origin, main window identity).

pub const REMOTE_ORIGIN: &str = "https://medimitra-client.vercel.app";
pub const MAIN_WINDOW_LABEL: &str = "main";
#[cfg(desktop)]
pub const WINDOW_TITLE: &str = "MediMitra";
#[cfg(desktop)]
pub const DEFAULT_WINDOW_WIDTH: f64 = 1280.0;
#[cfg(desktop)]
pub const DEFAULT_WINDOW_HEIGHT: f64 = 800.0;

pub fn parse_origin(origin: &str) -> Result<tauri::Url, String> {
    let url = tauri::Url::parse(origin)
        .map_err(|e| format!("failed to parse remote origin {origin}: {e}"))?;
    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(format!(
            "remote origin must use http(s), got scheme={}",
            url.scheme()
        ));
    }
    Ok(url)
}
