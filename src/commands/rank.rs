use crate::cli::CommonArgs;
use crate::model::{Metric, PeriodSelector};
use crate::output::{output_ndjson, output_ranking, output_ranking_json};
use crate::rank::rank;
use tracing::warn;

pub fn exec(
    common: &CommonArgs,
    metric: Metric,
    period: PeriodSelector,
    json: bool,
    ndjson: bool,
) -> anyhow::Result<()> {
    let settings = super::resolve_settings(common)?;
    let report = super::analyze_single(common, &settings.options)?;

    if let PeriodSelector::Period(key) = &period {
        if !report.periods.contains(key) {
            warn!(period = %key, available = ?report.periods, "no commits in requested period");
        }
    }

    let ranking = rank(&report.authors, metric, &period);
    if json {
        output_ranking_json(&report, &ranking)?;
    } else if ndjson {
        output_ndjson(&ranking.entries)?;
    } else {
        output_ranking(&ranking)?;
    }

    Ok(())
}
