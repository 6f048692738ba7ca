//! memo CLI - password-protected memos from the terminal
//!
//! One-shot commands unlock, act and exit; `memo shell` keeps a session open.

mod cli;
mod commands;
mod config_profiles;
mod error;
mod render;

#[cfg(test)]
mod tests;

use clap::{CommandFactory, Parser};

use crate::cli::{Cli, Commands};
use crate::commands::add::run_add;
use crate::commands::common::GlobalOptions;
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::delete::run_delete;
use crate::commands::edit::run_edit;
use crate::commands::list::run_list;
use crate::commands::search::run_search;
use crate::commands::settings::run_settings;
use crate::commands::shell::run_shell;
use crate::commands::show::run_show;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(
        "memo=info"
            .parse()
            .map_err(|error| CliError::Config(format!("invalid log directive: {error}")))?,
    );
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let options = GlobalOptions {
        profile: cli.profile,
        api_base_url: cli.api_base_url,
        upload_url: cli.upload_url,
        password: cli.password,
    };

    match cli.command {
        Some(Commands::List { query, json }) => run_list(&options, query.as_deref(), json).await?,
        Some(Commands::Search { query, json }) => run_search(&options, &query, json).await?,
        Some(Commands::Show { id, json }) => run_show(&options, &id, json).await?,
        Some(Commands::Add {
            title,
            image,
            content,
        }) => run_add(&options, &title, &content, &image).await?,
        Some(Commands::Edit {
            id,
            title,
            content,
            image,
        }) => run_edit(&options, &id, title.as_deref(), content, &image).await?,
        Some(Commands::Delete { id, yes }) => run_delete(&options, &id, yes).await?,
        Some(Commands::Settings {
            theme,
            new_password,
        }) => run_settings(&options, theme.map(Into::into), new_password.as_deref()).await?,
        Some(Commands::Shell) => run_shell(&options).await?,
        Some(Commands::Config { command }) => run_config(command, options.profile.as_deref())?,
        Some(Commands::Completions { shell, output }) => {
            run_completions(shell, output.as_deref())?;
        }
        None => {
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
