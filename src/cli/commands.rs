//! Command dispatch

use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::CategoryTreeView;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::StdConsole;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, see `yelist --help`".into(),
        ));
    };

    // Completions do not need settings or a catalog
    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(catalog) = &cli.catalog {
        settings = settings.with_catalog(catalog);
    }
    debug!("settings: {:?}", settings);
    let container = ServiceContainer::new(settings);

    match command {
        Commands::Tree { alias } => cmd_tree(&container, alias.as_deref()),
        Commands::Roots => cmd_roots(&container),
        Commands::Show { alias } => cmd_show(&container, alias),
        Commands::Pick => cmd_pick(&container),
        Commands::Plan => cmd_plan(&container),
        Commands::Config { command } => cmd_config(&container, command),
        Commands::Completion { .. } => Ok(()),
    }
}

fn load_view(container: &ServiceContainer) -> CliResult<CategoryTreeView> {
    Ok(container
        .category_service()
        .load(&container.settings.catalog)?)
}

#[instrument(skip(container))]
fn cmd_tree(container: &ServiceContainer, alias: Option<&str>) -> CliResult<()> {
    let view = load_view(container)?;
    let rendered = container.category_service().render_tree(&view, alias)?;
    output::info(rendered.trim_end());
    Ok(())
}

#[instrument(skip(container))]
fn cmd_roots(container: &ServiceContainer) -> CliResult<()> {
    let view = load_view(container)?;
    for title in container.category_service().root_titles(&view) {
        output::info(&title);
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_show(container: &ServiceContainer, alias: &str) -> CliResult<()> {
    if alias.trim().is_empty() {
        return Err(CliError::InvalidArgs("alias must not be empty".into()));
    }
    let view = load_view(container)?;
    let details = container.category_service().describe(&view, alias)?;

    output::header(&format!(
        "{} ({})",
        details.category.title, details.category.alias
    ));
    output::action("parents", &details.parents.len());
    for parent in &details.parents {
        output::detail(&format!("{} ({})", parent.title, parent.alias));
    }
    output::action("children", &details.children.len());
    for child in &details.children {
        output::detail(&format!("{} ({})", child.title, child.alias));
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_pick(container: &ServiceContainer) -> CliResult<()> {
    let view = load_view(container)?;
    let mut console = StdConsole;
    match container.picker_service().pick(&view, &mut console)? {
        Some(selected) => output::info(&format!("{}\t{}", selected.alias, selected.title)),
        None => debug!("no category selected"),
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_plan(container: &ServiceContainer) -> CliResult<()> {
    let view = load_view(container)?;
    let mut console = StdConsole;
    let list = container.planner_service().run(&view, &mut console)?;

    if list.is_empty() {
        return Ok(());
    }
    output::info(list.to_string().trim_end());
    output::action("categories to search", &list.search_categories().join(","));
    Ok(())
}

fn cmd_config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(container.settings.to_toml()?.trim_end());
        }
        ConfigCommands::Path => match global_config_path() {
            Some(path) => {
                let state = if path.exists() { "exists" } else { "not found" };
                output::action("global", &format!("{} ({})", path.display(), state));
            }
            None => output::action("global", &"unavailable"),
        },
    }
    Ok(())
}
