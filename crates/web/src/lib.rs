//! `stockbook-web`
//!
//! **Responsibility:** the application shell around the inventory store.
//!
//! This crate provides:
//! - `AppShell`, which owns the inventory and its storage for one session
//! - display-ready view models (rows, totals, notifications)
//! - configuration and process start-up
//! - the Leptos frontend (wasm32 builds only)

pub mod config;
pub mod shell;
pub mod types;

#[cfg(target_arch = "wasm32")]
pub mod frontend;

pub use config::ShellConfig;
pub use shell::{AppShell, ShellError};
pub use types::{ItemRow, Notification, Summary};

/// Start a native session: install logging, then open the file-backed inventory.
#[cfg(not(target_arch = "wasm32"))]
pub fn start_native(
    config: &ShellConfig,
) -> Result<AppShell<stockbook_infra::FileStorage>, ShellError> {
    stockbook_observability::init_with(&config.observability);

    let path = match &config.data_file {
        Some(path) => path.clone(),
        None => stockbook_infra::FileStorage::default_path()?,
    };
    tracing::info!(path = %path.display(), "opening inventory file");

    let shell = AppShell::open_with_keys(
        stockbook_infra::FileStorage::new(path),
        config.keys.clone(),
    )?;
    Ok(shell)
}

/// Start a browser session backed by `window.localStorage`.
#[cfg(target_arch = "wasm32")]
pub fn start_browser(
    config: &ShellConfig,
) -> Result<AppShell<stockbook_infra::WebStorage>, ShellError> {
    console_error_panic_hook::set_once();

    let storage = stockbook_infra::WebStorage::local()?;
    let shell = AppShell::open_with_keys(storage, config.keys.clone())?;
    Ok(shell)
}
