use serde::de::DeserializeOwned;

use crate::{
    cli::{
        args::{FlagSpec, ParsedArgs},
        output,
        table::{Table, TableColumn},
    },
    config::Config,
    core::{
        errors::CliError,
        services::{CatalogService, SeedService, VehicleQuery, VehicleService},
    },
    domain::{AcquisitionType, CatalogCar, Garage, NamedEntity, VehicleProfile},
    storage::{canonical_name, StorageBackend},
};

use super::{not_found_message, read_stdin, CliContext};

const VEHICLE_FLAGS: FlagSpec = FlagSpec {
    switches: &[],
    options: &["name", "type"],
};

const GARAGE_FLAGS: FlagSpec = FlagSpec {
    switches: &[],
    options: &["note"],
};

const NO_FLAGS: FlagSpec = FlagSpec {
    switches: &[],
    options: &[],
};

pub fn vehicles(ctx: &CliContext, raw: &[String]) -> Result<(), CliError> {
    let args = ParsedArgs::parse(raw, &VEHICLE_FLAGS)?;
    let mut garage = ctx.load_garage()?;

    match args.positional(0).unwrap_or("list") {
        "list" => {
            let query = VehicleQuery {
                name_contains: args.option("name").map(str::to_string),
                acquisition: args
                    .option("type")
                    .map(str::parse::<AcquisitionType>)
                    .transpose()?,
            };
            let found = VehicleService::search(&garage, &query);
            if found.is_empty() {
                output::warning("No vehicles match.");
                return Ok(());
            }
            println!("{}", vehicle_table(&found, &ctx.config).render());
        }
        "show" => {
            let name = required(&args, 1, "vehicle name")?;
            let vehicle = find_vehicle(&garage, name)?;
            println!("{}", serde_json::to_string_pretty(vehicle)?);
        }
        "add" => {
            let vehicles: Vec<VehicleProfile> = parse_one_or_many(&read_stdin()?)?;
            let added = VehicleService::bulk_add(&mut garage, vehicles)?;
            ctx.save_garage(&mut garage)?;
            output::success(format!("Added {added} vehicle(s) to `{}`.", ctx.garage_name));
        }
        "remove" => {
            let name = required(&args, 1, "vehicle name")?;
            let id = find_vehicle(&garage, name)?.id;
            let removed = VehicleService::remove(&mut garage, id)?;
            ctx.save_garage(&mut garage)?;
            output::success(format!("Removed vehicle `{}`.", removed.name));
        }
        other => return Err(unknown_subcommand("vehicles", other)),
    }
    Ok(())
}

pub fn catalog(ctx: &CliContext, raw: &[String]) -> Result<(), CliError> {
    let args = ParsedArgs::parse(raw, &NO_FLAGS)?;
    let mut garage = ctx.load_garage()?;

    match args.positional(0).unwrap_or("list") {
        "list" => {
            let cars = CatalogService::list(&garage);
            if cars.is_empty() {
                output::warning("The catalog is empty.");
                return Ok(());
            }
            println!("{}", catalog_table(&cars, &ctx.config).render());
        }
        "show" => {
            let name = required(&args, 1, "car name")?;
            println!("{}", serde_json::to_string_pretty(find_catalog_car(&garage, name)?)?);
        }
        "add" => {
            let cars: Vec<CatalogCar> = parse_one_or_many(&read_stdin()?)?;
            let count = cars.len();
            for car in cars {
                CatalogService::add(&mut garage, car)?;
            }
            ctx.save_garage(&mut garage)?;
            output::success(format!("Added {count} catalog car(s)."));
        }
        "remove" => {
            let name = required(&args, 1, "car name")?;
            let id = find_catalog_car(&garage, name)?.id;
            let removed = CatalogService::remove(&mut garage, id)?;
            ctx.save_garage(&mut garage)?;
            output::success(format!("Removed catalog car `{}`.", removed.name));
        }
        other => return Err(unknown_subcommand("catalog", other)),
    }
    Ok(())
}

pub fn seed(ctx: &CliContext) -> Result<(), CliError> {
    let mut garage = ctx.load_garage()?;
    let inserted = SeedService::seed(&mut garage)?;
    if inserted == 0 {
        output::info(format!(
            "Garage `{}` already holds data; nothing seeded.",
            ctx.garage_name
        ));
        return Ok(());
    }
    ctx.save_garage(&mut garage)?;
    output::success(format!(
        "Seeded {inserted} records into `{}`.",
        ctx.garage_name
    ));
    Ok(())
}

pub fn garage(ctx: &mut CliContext, raw: &[String]) -> Result<(), CliError> {
    let args = ParsedArgs::parse(raw, &GARAGE_FLAGS)?;

    match args.positional(0).unwrap_or("list") {
        "list" => {
            let names = ctx.storage.list_garages()?;
            if names.is_empty() {
                output::warning("No garages saved yet.");
            }
            for name in names {
                let marker = if name == ctx.garage_name { "*" } else { " " };
                output::info(format!("{marker} {name}"));
            }
        }
        "use" => {
            let name = canonical_name(required(&args, 1, "garage name")?);
            ctx.storage.record_last_garage(Some(&name))?;
            output::success(format!("Now using garage `{name}`."));
            ctx.garage_name = name;
        }
        "backup" => {
            let garage = ctx.load_garage()?;
            let file = ctx
                .storage
                .backup(&garage, &ctx.garage_name, args.option("note"))?;
            output::success(format!("Backup written: {file}"));
        }
        "backups" => {
            let backups = ctx.storage.list_backups(&ctx.garage_name)?;
            if backups.is_empty() {
                output::warning(format!("No backups for `{}`.", ctx.garage_name));
            }
            for backup in backups {
                output::info(backup);
            }
        }
        "restore" => {
            let backup = required(&args, 1, "backup file name")?;
            let restored = ctx.storage.restore(&ctx.garage_name, backup)?;
            output::success(format!(
                "Restored `{}` ({} vehicles, {} catalog cars).",
                ctx.garage_name,
                restored.vehicles.len(),
                restored.catalog.len()
            ));
        }
        other => return Err(unknown_subcommand("garage", other)),
    }
    Ok(())
}

pub fn vehicle_table(vehicles: &[&VehicleProfile], config: &Config) -> Table {
    let mut table = Table::new(vec![
        TableColumn::left("Name").with_max_width(24),
        TableColumn::left("Acquisition"),
        TableColumn::left("Condition"),
        TableColumn::left("Built"),
        TableColumn::left("Acquired"),
        TableColumn::right("Purchase"),
        TableColumn::right("Insurance / mo"),
        TableColumn::right("Road tax / yr"),
        TableColumn::right("Fuel / km"),
        TableColumn::right("k"),
    ]);
    for vehicle in vehicles {
        table.push_row(vec![
            vehicle.name.clone(),
            vehicle.acquisition.to_string(),
            if vehicle.is_used() { "used" } else { "new" }.to_string(),
            vehicle.build.to_string(),
            vehicle.acquired.to_string(),
            config.format_amount(vehicle.purchase_cost),
            config.format_amount(vehicle.insurance_monthly),
            config.format_amount(vehicle.road_tax_yearly),
            format!("{:.3}", vehicle.fuel_per_km),
            format!("{:.3}", vehicle.depreciation_k),
        ]);
    }
    table
}

pub fn catalog_table(cars: &[&CatalogCar], config: &Config) -> Table {
    let mut table = Table::new(vec![
        TableColumn::left("Name").with_max_width(24),
        TableColumn::left("Fuel"),
        TableColumn::right("New"),
        TableColumn::right("Used"),
        TableColumn::right("Catalog value"),
        TableColumn::right("Business lease"),
        TableColumn::right("Personal lease"),
    ]);
    for car in cars {
        table.push_row(vec![
            car.name.clone(),
            format!("{:?}", car.fuel_type).to_lowercase(),
            config.format_amount(car.purchase_price_new),
            config.format_amount(car.used_price()),
            config.format_amount(car.cataloguswaarde),
            config.format_amount(car.business_lease_monthly),
            config.format_amount(car.personal_lease_monthly),
        ]);
    }
    table
}

fn find_vehicle<'a>(garage: &'a Garage, name: &str) -> Result<&'a VehicleProfile, CliError> {
    VehicleService::find_by_name(garage, name).map_err(|_| {
        CliError::Input(not_found_message(
            "Vehicle",
            name,
            garage.vehicles.iter().map(|vehicle| vehicle.name()),
        ))
    })
}

fn find_catalog_car<'a>(garage: &'a Garage, name: &str) -> Result<&'a CatalogCar, CliError> {
    CatalogService::find_by_name(garage, name).map_err(|_| {
        CliError::Input(not_found_message(
            "Catalog car",
            name,
            garage.catalog.iter().map(|car| car.name()),
        ))
    })
}

fn required<'a>(args: &'a ParsedArgs, idx: usize, what: &str) -> Result<&'a str, CliError> {
    args.positional(idx)
        .ok_or_else(|| CliError::Input(format!("missing {what}")))
}

fn unknown_subcommand(command: &str, sub: &str) -> CliError {
    CliError::Command(format!("unknown `{command}` subcommand `{sub}`"))
}

/// Accepts either a single JSON object or an array of them.
fn parse_one_or_many<T: DeserializeOwned>(json: &str) -> Result<Vec<T>, CliError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if value.is_array() {
        Ok(serde_json::from_value(value)?)
    } else {
        Ok(vec![serde_json::from_value(value)?])
    }
}
