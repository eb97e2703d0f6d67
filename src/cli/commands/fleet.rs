use crate::{
    cli::{
        args::{FlagSpec, ParsedArgs},
        output,
        table::{Table, TableColumn},
    },
    config::Config,
    core::errors::CliError,
    cost::{simulate_fleet, FleetCost},
};

use super::CliContext;

const FLEET_FLAGS: FlagSpec = FlagSpec {
    switches: &["series", "monthly"],
    options: &["years", "km"],
};

pub fn fleet(ctx: &CliContext, raw: &[String]) -> Result<(), CliError> {
    let args = ParsedArgs::parse(raw, &FLEET_FLAGS)?;
    let params = &ctx.config.parameters;
    let years = args.count("years")?.unwrap_or(params.years);
    let km = args.number("km")?.unwrap_or(params.km_per_year);

    let garage = ctx.load_garage()?;
    if garage.vehicles.is_empty() {
        output::warning(format!(
            "Garage `{}` has no vehicles; run `car_cost_cli seed` or `vehicles add` first.",
            ctx.garage_name
        ));
        return Ok(());
    }

    let costs = simulate_fleet(&garage.vehicles, years, km, params)?;
    output::section(format!("Fleet cost ({years} years, {km:.0} km/year)"));
    println!("{}", fleet_summary_table(&costs, &ctx.config).render());

    if args.switch("series") {
        let monthly = args.switch("monthly");
        output::section(if monthly {
            "Cost per month"
        } else {
            "Running total per month"
        });
        println!("{}", fleet_series_table(&costs, monthly, &ctx.config).render());
    }
    Ok(())
}

pub fn fleet_summary_table(costs: &[FleetCost], config: &Config) -> Table {
    let mut table = Table::new(vec![
        TableColumn::left("Vehicle").with_max_width(24),
        TableColumn::right("Months"),
        TableColumn::right("Average / month"),
        TableColumn::right("Total"),
    ]);
    for cost in costs {
        let months = cost.totals.len();
        let average = if months == 0 {
            0.0
        } else {
            cost.final_total() / months as f64
        };
        table.push_row(vec![
            cost.name.clone(),
            months.to_string(),
            config.format_amount(average),
            config.format_amount(cost.final_total()),
        ]);
    }
    table
}

/// One row per month, one column per vehicle.
pub fn fleet_series_table(costs: &[FleetCost], monthly: bool, config: &Config) -> Table {
    let mut columns = vec![TableColumn::right("Month")];
    columns.extend(
        costs
            .iter()
            .map(|cost| TableColumn::right(cost.name.clone()).with_max_width(16)),
    );
    let mut table = Table::new(columns);

    let series: Vec<_> = costs
        .iter()
        .map(|cost| {
            if monthly {
                cost.monthly()
            } else {
                cost.totals.clone()
            }
        })
        .collect();
    let horizon = series.iter().map(|values| values.len()).max().unwrap_or(0);

    for month in 1..=horizon {
        let mut row = vec![month.to_string()];
        row.extend(series.iter().map(|values| {
            values
                .month(month)
                .map(|value| config.format_amount(value))
                .unwrap_or_default()
        }));
        table.push_row(row);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::CostSeries;
    use uuid::Uuid;

    fn cost(name: &str, totals: Vec<f64>) -> FleetCost {
        FleetCost {
            vehicle_id: Uuid::new_v4(),
            name: name.to_string(),
            totals: CostSeries::new(totals),
        }
    }

    #[test]
    fn summary_reports_final_total_and_average() {
        let table = fleet_summary_table(
            &[cost("lease", vec![550.0, 1_100.0])],
            &Config::default(),
        );
        assert_eq!(
            table.rows[0],
            vec!["lease", "2", "€550.00", "€1,100.00"]
        );
    }

    #[test]
    fn monthly_series_shows_deltas() {
        let table = fleet_series_table(
            &[cost("lease", vec![550.0, 1_100.0])],
            true,
            &Config::default(),
        );
        assert_eq!(table.rows[1], vec!["2", "€550.00"]);
    }
}
