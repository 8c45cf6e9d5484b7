// HomeDash platform paths
// Where `config.json` and the local layout fallback live on each OS.
//
// Uses `cfg(target_os)` to pick the implementation at compile time.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Returns the platform-specific configuration directory for HomeDash.
///
/// - **Linux**: `~/.config/homedash` (or `$XDG_CONFIG_HOME/homedash`)
/// - **macOS**: `~/Library/Application Support/HomeDash`
/// - **Windows**: `%APPDATA%/HomeDash`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
}

/// Returns the platform-specific data directory for HomeDash, which holds
/// the local layout fallback.
///
/// - **Linux**: `~/.local/share/homedash` (or `$XDG_DATA_HOME/homedash`)
/// - **macOS**: `~/Library/Application Support/HomeDash/data`
/// - **Windows**: `%LOCALAPPDATA%/HomeDash`
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_data_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_data_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_data_dir()
    }
}
