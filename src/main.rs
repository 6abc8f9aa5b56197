use std::env;
use std::path::Path;
use anyhow::{bail, Context, Result};
use log::{error, info, warn};
use evprofile::config::{load_config, Config};
use evprofile::logging::setup_logger;
use evprofile::store::ProfileStore;
use evprofile::validation::validate;
use evprofile::vehicle_status::{effective_battery_capacity, EvStatus};

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, PartialEq)]
enum Command {
    List,
    Check,
    Show(i32),
    Remove(i32),
    Import(String),
}

fn main() -> Result<()> {
    let config_path = env::var("EVPROFILE_CONFIG").unwrap_or(DEFAULT_CONFIG_PATH.to_string());
    let config = load_config(&config_path)?;
    setup_logger(&config.general)?;
    info!("evprofile version: {}", env!("CARGO_PKG_VERSION"));

    let command = parse_command(env::args().skip(1).collect())?;
    if let Err(e) = run(&config, command) {
        error!("{:#}", e);
        return Err(e);
    }

    Ok(())
}

/// Parses command line arguments into a command, no arguments means list
///
/// # Arguments
///
/// * 'args' - command line arguments without the program name
fn parse_command(args: Vec<String>) -> Result<Command> {
    let args: Vec<&str> = args.iter().map(|a| a.as_str()).collect();
    match args.as_slice() {
        [] | ["list"] => Ok(Command::List),
        ["check"] => Ok(Command::Check),
        ["show", id] => Ok(Command::Show(parse_id(id)?)),
        ["remove", id] => Ok(Command::Remove(parse_id(id)?)),
        ["import", file] => Ok(Command::Import(file.to_string())),
        _ => bail!("usage: evprofile [list | check | show <id> | remove <id> | import <file>]"),
    }
}

fn parse_id(id: &str) -> Result<i32> {
    id.parse::<i32>().with_context(|| format!("'{}' is not a vehicle id", id))
}

/// Runs a command against the configured profiles file
///
/// # Arguments
///
/// * 'config' - the application configuration
/// * 'command' - the command to run
fn run(config: &Config, command: Command) -> Result<()> {
    let path = Path::new(&config.files.profiles_file);
    let mut store = ProfileStore::load(path, config.store.duplicate_ids)?;

    match command {
        Command::List => {
            println!("{:>4}  {:<24} {:>4}", "id", "name", "soc");
            for profile in store.iter() {
                println!("{}", EvStatus::from_profile(profile));
            }
        }

        Command::Check => {
            let mut problems = 0;
            for profile in store.iter() {
                for violation in validate(profile) {
                    println!("{}: {}", profile, violation);
                    problems += 1;
                }
            }
            println!("{} profile(s), {} problem(s)", store.len(), problems);
        }

        Command::Show(id) => match store.find_by_id(id) {
            Some(profile) => {
                println!("{}", profile);
                println!("effective battery capacity: {} Wh", effective_battery_capacity(profile));
            }
            None => bail!("no vehicle with id {}", id),
        },

        Command::Remove(id) => {
            if store.remove(id).is_none() {
                warn!("no vehicle with id {}, nothing removed", id);
            }
        }

        Command::Import(file) => {
            let imported = ProfileStore::load(Path::new(&file), config.store.duplicate_ids)?;
            for profile in imported.iter() {
                let id = store.upsert(profile.clone())?;
                info!("imported vehicle {}", id);
            }
        }
    }

    if store.is_modified() {
        store.save(path, config.files.backup_settings().as_ref())?;
    }

    Ok(())
}
