//! Settings subcommand handlers.

use std::process::ExitCode;

use tracing::info;

use brandlens_config::{Settings, SettingsStore, SettingsValidator};
use brandlens_ui::{display_value, render_settings, render_validation};

use crate::cli::SettingsAction;
use crate::context::AppContext;

/// Handle settings subcommands.
pub(crate) fn handle_settings_command(
    ctx: &AppContext,
    action: SettingsAction,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    match action {
        SettingsAction::Get { key } => {
            let settings = ctx.store.load()?;
            println!("{}", display_value(&settings, &key)?);
            Ok(ExitCode::SUCCESS)
        }
        SettingsAction::Set { key, value } => settings_set(&ctx.store, &key, &value),
        SettingsAction::List => {
            let settings = ctx.store.load()?;
            print!("{}", render_settings(&settings));
            if ctx.api_key.as_deref().is_some_and(|k| !k.trim().is_empty()) {
                println!();
                println!("Note: an API key from --api-key or GEMINI_API_KEY overrides api_key");
            }
            Ok(ExitCode::SUCCESS)
        }
        SettingsAction::Reset => {
            ctx.store.reset()?;
            info!("Settings reset");
            println!("Settings restored to defaults");
            Ok(ExitCode::SUCCESS)
        }
        SettingsAction::Path => {
            println!("{}", ctx.store.path().display());
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Change one setting. Nothing is written when the result would be invalid.
fn settings_set(
    store: &SettingsStore,
    key: &str,
    value: &str,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let mut settings: Settings = store.load()?;
    settings.set_value(key, value)?;

    let validation = SettingsValidator::validate(&settings);
    if !validation.is_valid() {
        eprint!("{}", render_validation(&validation));
        return Ok(ExitCode::FAILURE);
    }

    store.save(&settings)?;
    info!("Setting {} updated", key);
    println!("{} = {}", key, display_value(&settings, key)?);
    print!("{}", render_validation(&validation));
    Ok(ExitCode::SUCCESS)
}
