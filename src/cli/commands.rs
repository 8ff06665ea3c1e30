//! Command dispatch

use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::api::{self, AppState};
use crate::cli::args::{Cli, Commands, ConfigCommands, PartyCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings, StorageBackend};
use crate::domain::NewParty;
use crate::infrastructure::{InfraError, ServiceContainer};
use crate::util::path::ensure_parent;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, see `partytree --help`".to_string(),
        ));
    };

    match command {
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        Commands::Config { command } => execute_config(cli, command),
        Commands::Serve { host, port } => {
            let mut settings = load_settings(cli)?;
            if let Some(host) = host {
                settings.server.host = host.clone();
            }
            if let Some(port) = port {
                settings.server.port = *port;
            }
            serve(settings)
        }
        Commands::Seed { roots, rng_seed } => {
            let mut settings = load_settings(cli)?;
            if let Some(roots) = roots {
                settings.seed.roots = *roots;
            }
            seed(settings, *rng_seed)
        }
        Commands::Party { command } => {
            let container = ServiceContainer::new(load_settings(cli)?)?;
            execute_party(&container, command)
        }
        Commands::Tree => {
            let container = ServiceContainer::new(load_settings(cli)?)?;
            tree(&container)
        }
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    Ok(Settings::load(cli.config.as_deref())?)
}

#[instrument(skip(settings))]
fn serve(settings: Settings) -> CliResult<()> {
    if settings.storage.backend == StorageBackend::Memory {
        output::warning("memory backend: parties are lost on shutdown");
    }
    let addr = settings.server.bind_addr();
    let public_url = settings.server.public_url();
    let container = ServiceContainer::new(settings)?;
    let state = AppState {
        hierarchy: container.hierarchy.clone(),
        public_url,
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| InfraError::io("start async runtime", e))?;
    runtime.block_on(api::serve(state, &addr))?;
    Ok(())
}

#[instrument(skip(settings))]
fn seed(settings: Settings, rng_seed: Option<u64>) -> CliResult<()> {
    let plan = settings.seed.clone();
    let container = ServiceContainer::new(settings)?;
    if container.settings.storage.backend == StorageBackend::Memory {
        output::warning("memory backend: seeded parties are discarded on exit");
    }
    let report = container.seed_service().seed(&plan, rng_seed)?;
    output::success(&format!(
        "seeded {} parties ({} roots, {} subsidiaries, {} nested)",
        report.total(),
        report.roots,
        report.subsidiaries,
        report.nested
    ));
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(InfraError::from)?;
    output::info(&json);
    Ok(())
}

fn execute_party(container: &ServiceContainer, command: &PartyCommands) -> CliResult<()> {
    let hierarchy = &container.hierarchy;
    debug!("party command: {:?}", command);
    match command {
        PartyCommands::List => print_json(&hierarchy.list()?),
        PartyCommands::Get { id } => print_json(&hierarchy.get(id)?),
        PartyCommands::Create { name, owner } => {
            let input = NewParty {
                name: name.clone(),
                owner_id: owner.clone(),
            };
            print_json(&hierarchy.create(input)?)
        }
        PartyCommands::Delete { id } => {
            hierarchy.delete(id)?;
            output::action("Deleted", id);
            Ok(())
        }
        PartyCommands::Parents { id } => print_json(&hierarchy.ancestors(id)?),
        PartyCommands::Subsidiaries { id } => print_json(&hierarchy.descendants(id)?),
    }
}

fn tree(container: &ServiceContainer) -> CliResult<()> {
    let forest = container.hierarchy.forest()?;
    if forest.is_empty() {
        output::info("no parties");
        return Ok(());
    }
    for tree in &forest {
        output::info(&output::to_tree(tree));
    }
    Ok(())
}

fn execute_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            output::info(&settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            output::header("Config locations");
            match global_config_path() {
                Some(path) => output::detail(&format!("global: {}", path.display())),
                None => output::detail("global: (no config directory on this platform)"),
            }
            if let Some(path) = &cli.config {
                output::detail(&format!("file:   {}", path.display()));
            }
            output::detail(&format!(
                "env:    {}_<SECTION>__<KEY>",
                crate::config::ENV_PREFIX
            ));
            Ok(())
        }
        ConfigCommands::Init { force } => {
            let path = global_config_path().ok_or_else(|| {
                CliError::Usage("no config directory on this platform".to_string())
            })?;
            if path.exists() && !force {
                return Err(CliError::Usage(format!(
                    "{} exists, use --force to overwrite",
                    path.display()
                )));
            }
            ensure_parent(&path)
                .map_err(|e| InfraError::io(format!("create {}", path.display()), e))?;
            std::fs::write(&path, Settings::template())
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::action("Created", &path.display());
            Ok(())
        }
    }
}
