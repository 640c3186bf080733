use anyhow::Result;

use energymap::{CoordinateTable, Dashboard, DashboardConfig, DataStore};

use crate::cli::{Cli, PeriodsArgs};

pub fn run(_cli: &Cli, args: &PeriodsArgs) -> Result<()> {
    let table = CoordinateTable::default();
    let store = DataStore::read_csv(&args.data, &table)?;
    let dashboard = Dashboard::new(store, table, None, DashboardConfig::default());

    let options = dashboard.year_options();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&options)?);
    } else {
        for option in options { println!("{}", option.value) }
    }

    Ok(())
}
