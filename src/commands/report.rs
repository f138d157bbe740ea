use crate::cli::CommonArgs;
use crate::output::{output_json, output_ndjson, output_report};

pub fn exec(common: &CommonArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let settings = super::resolve_settings(common)?;
    let report = super::analyze_single(common, &settings.options)?;

    if json {
        output_json(&report)?;
    } else if ndjson {
        output_ndjson(&report.authors)?;
    } else if report.authors.is_empty() {
        println!("No data found for {}", report.range);
    } else {
        output_report(&report)?;
    }

    Ok(())
}
