use std::collections::BTreeMap;

use anyhow::Context;

pub fn print_schemas() -> anyhow::Result<()> {
    let schemas = folio_api_contracts::schemas()
        .into_iter()
        .collect::<BTreeMap<_, _>>();
    let json =
        serde_json::to_string_pretty(&schemas).context("Failed to serialize the schemas")?;
    println!("{json}");

    Ok(())
}
