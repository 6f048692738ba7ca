use std::env;

use crate::cli::ConfigCommands;
use crate::config_profiles::{normalize_text_option, CliProfile, CliProfilesConfig};
use crate::error::CliError;

pub fn run_config(command: ConfigCommands, global_profile: Option<&str>) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            profile,
            api_base_url,
            upload_url,
            no_activate,
        } => run_config_init(
            profile.as_deref().or(global_profile),
            api_base_url,
            upload_url,
            no_activate,
        ),
        ConfigCommands::Show { profile } => run_config_show(profile.as_deref().or(global_profile)),
    }
}

pub fn run_config_init(
    profile_name: Option<&str>,
    api_base_url: Option<String>,
    upload_url: Option<String>,
    no_activate: bool,
) -> Result<(), CliError> {
    let mut config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(profile_name);

    let profile = config.profile_mut_or_default(&profile_name);
    merge_profile(
        profile,
        api_base_url.or_else(|| env::var("MEMO_API_BASE_URL").ok()),
        upload_url.or_else(|| env::var("MEMO_UPLOAD_URL").ok()),
    );
    profile.validate().map_err(CliError::Config)?;

    if !no_activate {
        config.active_profile = Some(profile_name.clone());
    }

    let path = config.save().map_err(CliError::Config)?;
    println!(
        "Profile '{}' initialized at {}",
        profile_name,
        path.display()
    );

    let ready = config
        .profile(&profile_name)
        .and_then(CliProfile::api_base_url)
        .is_some();
    if ready {
        println!("Profile '{profile_name}' is ready. Run `memo list` to unlock and browse memos.");
    } else {
        println!("Profile '{profile_name}' is missing: api_base_url");
    }

    Ok(())
}

/// Overwrites only the fields that were given a non-blank value.
pub fn merge_profile(
    profile: &mut CliProfile,
    api_base_url: Option<String>,
    upload_url: Option<String>,
) {
    if let Some(value) = normalize_text_option(api_base_url) {
        profile.api_base_url = Some(value.trim_end_matches('/').to_string());
    }
    if let Some(value) = normalize_text_option(upload_url) {
        profile.upload_url = Some(value);
    }
}

pub fn run_config_show(profile_name: Option<&str>) -> Result<(), CliError> {
    let config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(profile_name);
    let Some(profile) = config.profile(&profile_name) else {
        return Err(CliError::Config(format!(
            "Profile '{profile_name}' does not exist. Run `memo config init`."
        )));
    };

    let active = config.active_profile.as_deref() == Some(profile_name.as_str());
    println!(
        "Profile: {profile_name}{}",
        if active { " (active)" } else { "" }
    );
    for line in describe_profile(profile) {
        println!("  {line}");
    }
    Ok(())
}

pub fn describe_profile(profile: &CliProfile) -> Vec<String> {
    let upload = profile.upload_url().unwrap_or_else(|| {
        profile.api_base_url().map_or_else(
            || "(unset)".to_string(),
            |base| format!("{base}/api/upload (default)"),
        )
    });
    vec![
        format!(
            "api_base_url: {}",
            profile.api_base_url().unwrap_or_else(|| "(unset)".to_string())
        ),
        format!("upload_url:   {upload}"),
        format!(
            "theme:        {}",
            profile.theme.unwrap_or_default().as_str()
        ),
    ]
}
