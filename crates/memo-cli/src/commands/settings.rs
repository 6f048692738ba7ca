use memo_core::Theme;

use crate::commands::common::{open_session, validate_code, GlobalOptions};
use crate::config_profiles::CliProfilesConfig;
use crate::error::CliError;

pub async fn run_settings(
    options: &GlobalOptions,
    theme: Option<Theme>,
    new_password: Option<&str>,
) -> Result<(), CliError> {
    if let Some(password) = new_password {
        validate_code(password.trim())?;
    }

    let mut app = open_session(options).await?;
    app.open_settings()?;
    if let Some(theme) = theme {
        app.set_theme(theme);
    }
    if let Some(password) = new_password {
        app.set_new_password(password.trim());
    }
    app.apply_settings().await?;

    let applied = app.state().settings.active_theme();
    remember_theme(options.profile.as_deref(), applied)?;

    println!("Theme: {} ({applied})", applied.label());
    if new_password.is_some() {
        println!("Password updated.");
    }
    Ok(())
}

/// Stores the applied theme in the active profile so later sessions start
/// with it.
fn remember_theme(profile: Option<&str>, theme: Theme) -> Result<(), CliError> {
    let mut config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(profile);
    config.profile_mut_or_default(&profile_name).theme = Some(theme);
    config.save().map_err(CliError::Config)?;
    tracing::debug!(profile = %profile_name, %theme, "stored theme in profile");
    Ok(())
}
