//! Command dispatch

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::Session;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::{output, repl};
use crate::config::{expand_path, global_config_path, Settings};
use crate::domain::{Course, Matches, RepairDecision, TierOutcome};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::snapshot::list_saves;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    if let Some(Commands::Completion { shell }) = &cli.command {
        return completion(*shell);
    }

    let settings = load_settings(cli)?;
    debug!("settings: {:?}", settings);

    match &cli.command {
        None | Some(Commands::Repl) => repl::run(&ServiceContainer::new(settings)),
        Some(Commands::List { used }) => list(&ServiceContainer::new(settings), *used),
        Some(Commands::Tier { count, yes }) => {
            tier(&ServiceContainer::new(settings), *count, *yes)
        }
        Some(Commands::Add { key, select }) => {
            add(&ServiceContainer::new(settings), key, select.as_deref())
        }
        Some(Commands::Remove { key, select }) => {
            remove(&ServiceContainer::new(settings), key, select.as_deref())
        }
        Some(Commands::Saves) => saves(&ServiceContainer::new(settings)),
        Some(Commands::Reset { yes }) => reset(&ServiceContainer::new(settings), *yes),
        Some(Commands::Config { command }) => config(command, &settings),
        Some(Commands::Completion { .. }) => Ok(()),
    }
}

/// Config layers plus command line overrides.
fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(path) = &cli.registry {
        settings.registry_path = expand_path(path);
    }
    if let Some(name) = &cli.save {
        settings.select_save(name)?;
    }
    if let Some(path) = &cli.snapshot {
        settings.snapshot_path = expand_path(path);
    }
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }
    Ok(settings)
}

#[instrument(skip(container))]
fn list(container: &ServiceContainer, used: bool) -> CliResult<()> {
    let session = container.open_session()?;
    if used {
        output::courses(&session.removed(), "No courses have been used.", "courses used");
    } else {
        output::courses(session.active(), "The course list is empty.", "courses active");
    }
    Ok(())
}

#[instrument(skip(container))]
fn tier(container: &ServiceContainer, count: usize, yes: bool) -> CliResult<()> {
    let session = container.open_session()?;
    let mut rng = container.rng();
    let outcome = if yes {
        container.tier.build_with_decision(
            session.active(),
            count,
            RepairDecision::Confirmed,
            &mut rng,
        )?
    } else {
        session.tier(&container.tier, count, &mut rng)?
    };

    match outcome {
        TierOutcome::Built(list) => output::info(&output::tier_tree(&list)),
        TierOutcome::Declined(notice) => output::warning(&format!("tiering cancelled: {notice}")),
    }
    Ok(())
}

#[instrument(skip(container))]
fn add(container: &ServiceContainer, key: &str, select: Option<&str>) -> CliResult<()> {
    let mut session = container.open_session()?;
    let added = match select {
        Some(token) => session.add_matching(&container.search, key, token)?,
        None => {
            let matches = container.search.find(&session.removed(), key)?;
            show_matches(container, &matches);
            let token = ask_token(container, "add")?;
            session.add_matching(&container.search, key, &token)?
        }
    };
    finish_edit(container, &mut session, &added, |c| output::diff_add(c))
}

#[instrument(skip(container))]
fn remove(container: &ServiceContainer, key: &str, select: Option<&str>) -> CliResult<()> {
    let mut session = container.open_session()?;
    let removed = match select {
        Some(token) => session.remove_matching(&container.search, key, token)?,
        None => {
            let matches = container.search.find(session.active(), key)?;
            show_matches(container, &matches);
            let token = ask_token(container, "remove")?;
            session.remove_matching(&container.search, key, &token)?
        }
    };
    finish_edit(container, &mut session, &removed, |c| output::diff_remove(c))
}

#[instrument(skip(container))]
fn saves(container: &ServiceContainer) -> CliResult<()> {
    let dir = &container.settings.saves_dir;
    let names = list_saves(container.fs.as_ref(), dir)
        .map_err(|e| InfraError::io(format!("listing {}", dir.display()), e))?;
    if names.is_empty() {
        output::info(&format!("No saves in {}", dir.display()));
        return Ok(());
    }
    let current = container.settings.save.as_deref();
    for name in &names {
        if Some(name.as_str()) == current {
            output::success(name);
        } else {
            output::detail(name);
        }
    }
    Ok(())
}

#[instrument(skip(container))]
fn reset(container: &ServiceContainer, yes: bool) -> CliResult<()> {
    let mut session = container.open_session()?;
    if !yes {
        let ok = container
            .prompt
            .confirm("Make every course active again?")
            .map_err(|e| InfraError::io("reading confirmation", e))?;
        if !ok {
            output::info("Cancelled reset.");
            return Ok(());
        }
    }
    session.reset();
    container.save_session(&mut session)?;
    output::success(&format!("{} courses active", session.active().len()));
    Ok(())
}

fn config(command: &ConfigCommands, settings: &Settings) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => return Err(CliError::Usage("no config directory on this system".into())),
        },
    }
    Ok(())
}

fn completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}

fn show_matches(container: &ServiceContainer, matches: &Matches) {
    for (key, course) in matches {
        container.prompt.show(&format!("{key}: {course}"));
    }
}

fn ask_token(container: &ServiceContainer, verb: &str) -> CliResult<String> {
    let token = container
        .prompt
        .input(&format!("Key of the course to {verb} ('all' for every match):"))
        .map_err(|e| InfraError::io("reading selection", e))?;
    Ok(token)
}

fn finish_edit(
    container: &ServiceContainer,
    session: &mut Session,
    changed: &[Course],
    show: fn(&Course),
) -> CliResult<()> {
    for course in changed {
        show(course);
    }
    if session.is_dirty() {
        container.save_session(session)?;
    }
    Ok(())
}
