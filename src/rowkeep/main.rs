use clap::Parser;
use colored::Colorize;
use rowkeep::api::RowkeepApi;
use rowkeep::config::{resolve_config_dir, RowkeepConfig};
use rowkeep::error::{Result, RowkeepError};
use rowkeep::model::Contact;
use rowkeep::script::{parse_script, run_script};
use rowkeep::store::memory::RecordStore;
use rowkeep::store::DataStore;
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

mod args;
mod print;
use args::{Cli, Commands, ConfigAction};
use print::{print_contact, print_contacts, print_messages, print_outcomes};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "rowkeep=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_dir = resolve_config_dir(cli.config_dir.clone())?;
    let config = RowkeepConfig::load(&config_dir)?;

    match cli.command {
        Commands::Run { script } => handle_run(&script),
        Commands::Browse {
            records,
            from,
            backward,
        } => handle_browse(&config, &records, from, backward),
        Commands::Config { action } => handle_config(config, &config_dir, action),
    }
}

fn handle_run(path: &Path) -> Result<()> {
    let json = fs::read_to_string(path)?;
    let steps = parse_script(&json)?;

    let mut store = RecordStore::new(Contact::blank());
    let outcomes = run_script(&mut store, &steps);
    print_outcomes(&outcomes);

    println!();
    println!("{}", format!("Final store ({} records)", store.len()).bold());
    print_contacts(store.records());
    Ok(())
}

fn handle_browse(
    config: &RowkeepConfig,
    path: &Path,
    from: Option<u32>,
    backward: bool,
) -> Result<()> {
    let json = fs::read_to_string(path)?;
    let store = RecordStore::from_json(Contact::blank(), &json)?;
    let count = store.len();
    let mut api = RowkeepApi::new(store, config.clone());

    let mut result = match from {
        Some(id) => {
            let found = api.goto(&id);
            if !found.status.is_ok() {
                return Err(RowkeepError::Api(format!("Record {} not found", id)));
            }
            found
        }
        None if backward => api.last(),
        None => api.first(),
    };

    if result.at_blank {
        if config.show_blank {
            if let Some(blank) = &result.record {
                print_contact(blank);
            }
        } else {
            print_messages(&result.messages);
        }
        return Ok(());
    }

    for visited in 1..=count {
        if let Some(contact) = &result.record {
            print_contact(contact);
        }
        if visited < count {
            result = if backward { api.previous() } else { api.next() };
        }
    }
    Ok(())
}

fn handle_config(
    mut config: RowkeepConfig,
    config_dir: &Path,
    action: Option<ConfigAction>,
) -> Result<()> {
    match action {
        Some(ConfigAction::Set { key, value }) => {
            config.set(&key, &value)?;
            config.save(config_dir)?;
            println!("{}", format!("{} = {}", key, value).green());
        }
        Some(ConfigAction::Show) | None => {
            for (key, value) in config.entries() {
                println!("{} = {}", key.bold(), value);
            }
        }
    }
    Ok(())
}
