use crate::{
    cli::{
        args::{FlagSpec, ParsedArgs},
        output,
        table::{Table, TableColumn},
    },
    config::Config,
    core::{errors::CliError, services::CatalogService},
    cost::{
        generate_cost_series, summarize, yearly_values, ComparisonSummary, CostComparison,
        Scenario, ScenarioInputs, ScenarioParameters, YearlyValue,
    },
    domain::NamedEntity,
};

use super::{not_found_message, CliContext};

const COMPARE_FLAGS: FlagSpec = FlagSpec {
    switches: &["used", "new", "petrol", "series", "cumulative"],
    options: &["car", "business", "personal", "price", "catalog", "years", "km"],
};

const VALUES_FLAGS: FlagSpec = FlagSpec {
    switches: &["used", "new"],
    options: &["car", "price", "years"],
};

pub fn compare(ctx: &CliContext, raw: &[String]) -> Result<(), CliError> {
    let args = ParsedArgs::parse(raw, &COMPARE_FLAGS)?;
    let (inputs, params) = scenario_setup(ctx, &args)?;
    let comparison = generate_cost_series(&inputs, &params)?;
    let summary = summarize(&comparison, &inputs, &params)?;

    output::section(format!(
        "Cost Summary ({} years, {:.0} km/year)",
        params.years, params.km_per_year
    ));
    println!("{}", summary_table(&summary, &ctx.config).render());
    println!();
    output::info(format!(
        "Cash depreciation over {} months: {}",
        comparison.horizon_months(),
        ctx.config.format_amount(summary.cash_depreciation)
    ));
    output::info(format!(
        "Annual fuel: petrol {}, EV {}",
        ctx.config.format_amount(summary.annual_fuel_petrol),
        ctx.config.format_amount(summary.annual_fuel_ev)
    ));
    if let Some(cheapest) = summary.cheapest() {
        output::success(format!("Cheapest over the period: {}", cheapest.scenario));
    }

    if args.switch("series") {
        let cumulative = args.switch("cumulative");
        output::section(if cumulative {
            "Cumulative cost per month"
        } else {
            "Cost per month"
        });
        println!(
            "{}",
            series_table(&comparison, cumulative, &ctx.config).render()
        );
    }
    Ok(())
}

pub fn values(ctx: &CliContext, raw: &[String]) -> Result<(), CliError> {
    let args = ParsedArgs::parse(raw, &VALUES_FLAGS)?;
    let (inputs, params) = scenario_setup(ctx, &args)?;
    let rows = yearly_values(inputs.purchase_price, inputs.is_used, &params)?;

    output::section(format!(
        "Yearly Car Value ({} at {})",
        if inputs.is_used { "used" } else { "new" },
        ctx.config.format_amount(inputs.purchase_price)
    ));
    println!("{}", yearly_value_table(&rows, &ctx.config).render());
    Ok(())
}

/// Builds comparison inputs from the defaults, an optional catalog car and flag overrides.
fn scenario_setup(
    ctx: &CliContext,
    args: &ParsedArgs,
) -> Result<(ScenarioInputs, ScenarioParameters), CliError> {
    if args.switch("used") && args.switch("new") {
        return Err(CliError::Input("--used and --new are mutually exclusive".into()));
    }
    let mut params = ctx.config.parameters.clone();
    let mut inputs = ScenarioInputs::default();
    let is_used = if args.switch("new") {
        false
    } else {
        args.switch("used") || inputs.is_used
    };

    if let Some(name) = args.option("car") {
        let garage = ctx.load_garage()?;
        let car = CatalogService::find_by_name(&garage, name).map_err(|_| {
            CliError::Input(not_found_message(
                "Catalog car",
                name,
                garage.catalog.iter().map(|car| car.name()),
            ))
        })?;
        inputs = ScenarioInputs::from_catalog(car, is_used);
        params = params.with_catalog_costs(car);
    }
    inputs.is_used = is_used;

    if let Some(value) = args.number("business")? {
        inputs.business_lease_monthly = value;
    }
    if let Some(value) = args.number("personal")? {
        inputs.personal_lease_monthly = value;
    }
    if let Some(value) = args.number("price")? {
        inputs.purchase_price = value;
    }
    if let Some(value) = args.number("catalog")? {
        inputs.catalog_value = value;
    }
    if args.switch("petrol") {
        inputs.is_ev = false;
    }
    if let Some(years) = args.count("years")? {
        params.years = years;
    }
    if let Some(km) = args.number("km")? {
        params.km_per_year = km;
    }
    Ok((inputs, params))
}

pub fn summary_table(summary: &ComparisonSummary, config: &Config) -> Table {
    let mut table = Table::new(vec![
        TableColumn::left("Scenario"),
        TableColumn::right("Monthly average"),
        TableColumn::right("Total"),
    ]);
    for row in &summary.rows {
        table.push_row(vec![
            row.scenario.to_string(),
            config.format_amount(row.monthly_average),
            config.format_amount(row.total),
        ]);
    }
    table
}

pub fn series_table(comparison: &CostComparison, cumulative: bool, config: &Config) -> Table {
    let mut columns = vec![TableColumn::right("Month")];
    columns.extend(Scenario::ALL.iter().map(|s| TableColumn::right(s.label())));
    let mut table = Table::new(columns);

    let series: Vec<_> = Scenario::ALL
        .iter()
        .map(|&scenario| {
            let values = comparison.series(scenario);
            if cumulative {
                values.cumulative()
            } else {
                values.clone()
            }
        })
        .collect();

    for (idx, month) in comparison.months.iter().enumerate() {
        let mut row = vec![month.to_string()];
        row.extend(
            series
                .iter()
                .map(|values| config.format_amount(values.values()[idx])),
        );
        table.push_row(row);
    }
    table
}

pub fn yearly_value_table(rows: &[YearlyValue], config: &Config) -> Table {
    let mut table = Table::new(vec![
        TableColumn::right("Year"),
        TableColumn::right("Start value"),
        TableColumn::right("End value"),
        TableColumn::right("Depreciation"),
    ]);
    for row in rows {
        table.push_row(vec![
            row.year.to_string(),
            config.format_amount(row.start_value),
            config.format_amount(row.end_value),
            config.format_amount(row.depreciation),
        ]);
    }
    table
}
