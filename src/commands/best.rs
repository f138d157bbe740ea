use crate::best::SelectionPolicy;
use crate::cli::CommonArgs;
use crate::output::{output_best, output_best_json, output_ndjson};

pub fn exec(
    common: &CommonArgs,
    top: Option<usize>,
    policy: Option<SelectionPolicy>,
    json: bool,
    ndjson: bool,
) -> anyhow::Result<()> {
    let mut settings = super::resolve_settings(common)?;
    if let Some(top) = top {
        anyhow::ensure!(top > 0, "--top must be at least 1");
        settings.options.selector.top_n = top;
    }
    if let Some(policy) = policy {
        settings.options.selector.policy = policy;
    }

    let report = super::analyze_single(common, &settings.options)?;
    let performers = &report.best_performers;

    if json {
        output_best_json(&report, settings.options.selector.policy)?;
    } else if ndjson {
        output_ndjson(performers)?;
    } else {
        output_best(performers)?;
    }

    Ok(())
}
