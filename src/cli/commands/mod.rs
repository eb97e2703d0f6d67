pub mod compare;
pub mod fleet;
pub mod garage;
pub mod params;

use std::{
    io::{self, Read},
    path::PathBuf,
};

use crate::{
    config::{Config, ConfigManager},
    core::{errors::CliError, services::ServiceError},
    domain::Garage,
    storage::{canonical_name, JsonStorage, StorageBackend},
    utils::build_info,
};

use super::args::suggest;

pub const DEFAULT_GARAGE: &str = "default";

const COMMANDS: &[&str] = &[
    "compare", "values", "fleet", "vehicles", "catalog", "seed", "garage", "params", "version",
    "help",
];

impl From<ServiceError> for CliError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Cost(inner) => CliError::Core(inner),
            ServiceError::Invalid(message) => CliError::Input(message),
        }
    }
}

/// Storage, configuration and the active garage name shared by every command.
pub struct CliContext {
    pub storage: JsonStorage,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub garage_name: String,
}

impl CliContext {
    pub fn open() -> Result<Self, CliError> {
        Self::from_parts(JsonStorage::new_default()?, ConfigManager::new()?)
    }

    pub fn open_in(base: PathBuf) -> Result<Self, CliError> {
        Self::from_parts(
            JsonStorage::new(Some(base.clone()), None)?,
            ConfigManager::with_base_dir(base)?,
        )
    }

    /// The active garage is the one last recorded in storage state.
    fn from_parts(storage: JsonStorage, config_manager: ConfigManager) -> Result<Self, CliError> {
        let config = config_manager.load()?;
        let garage_name = storage
            .last_garage()?
            .unwrap_or_else(|| canonical_name(DEFAULT_GARAGE));
        tracing::debug!(garage = %garage_name, base = %storage.base_dir().display(), "opened data directory");
        Ok(Self {
            storage,
            config_manager,
            config,
            garage_name,
        })
    }

    pub fn load_garage(&self) -> Result<Garage, CliError> {
        Ok(self.storage.load_or_default(&self.garage_name)?)
    }

    pub fn save_garage(&self, garage: &mut Garage) -> Result<(), CliError> {
        garage.touch();
        self.storage.save(garage, &self.garage_name)?;
        self.storage.record_last_garage(Some(&self.garage_name))?;
        Ok(())
    }
}

/// Dispatches `args` (without the program name) to a command.
pub fn run(args: &[String]) -> Result<(), CliError> {
    let Some((command, rest)) = args.split_first() else {
        eprintln!("{}", usage());
        return Err(CliError::Input("missing command".into()));
    };

    match command.as_str() {
        "compare" => compare::compare(&CliContext::open()?, rest),
        "values" => compare::values(&CliContext::open()?, rest),
        "fleet" => fleet::fleet(&CliContext::open()?, rest),
        "vehicles" => garage::vehicles(&CliContext::open()?, rest),
        "catalog" => garage::catalog(&CliContext::open()?, rest),
        "seed" => garage::seed(&CliContext::open()?),
        "garage" => garage::garage(&mut CliContext::open()?, rest),
        "params" => params::params(&mut CliContext::open()?, rest),
        "version" => {
            println!("{}", build_info::current().summary());
            Ok(())
        }
        "help" | "--help" | "-h" => {
            println!("{}", usage());
            Ok(())
        }
        other => {
            let mut message = format!("unknown command `{other}`");
            if let Some(candidate) = suggest(other, COMMANDS.iter().copied()) {
                message.push_str(&format!(" (did you mean `{candidate}`?)"));
            }
            Err(CliError::Command(message))
        }
    }
}

pub fn usage() -> &'static str {
    "Usage: car_cost_cli <command>\n\
     Commands:\n  \
     compare [--car NAME] [--used|--new] [--business N] [--personal N] [--price N]\n          \
     [--catalog N] [--petrol] [--years N] [--km N] [--series] [--cumulative]\n  \
     values [--car NAME] [--used|--new] [--price N] [--years N]\n  \
     fleet [--years N] [--km N] [--series] [--monthly]\n  \
     vehicles list [--name TEXT] [--type TYPE] | show <name> | add < vehicle.json | remove <name>\n  \
     catalog list | show <name> | add < car.json | remove <name>\n  \
     seed\n  \
     garage list | use <name> | backup [--note TEXT] | backups | restore <backup>\n  \
     params [show] | set <field> <value> | reset\n  \
     version"
}

pub(crate) fn read_stdin() -> Result<String, CliError> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    if buffer.trim().is_empty() {
        return Err(CliError::Input("expected JSON on standard input".into()));
    }
    Ok(buffer)
}

pub(crate) fn not_found_message<'a>(
    kind: &str,
    name: &str,
    known: impl IntoIterator<Item = &'a str>,
) -> String {
    let mut message = format!("{kind} `{name}` not found");
    if let Some(candidate) = suggest(name, known) {
        message.push_str(&format!(" (did you mean `{candidate}`?)"));
    }
    message
}
