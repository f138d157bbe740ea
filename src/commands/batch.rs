use crate::batch::{analyze_batch, discover_repositories, open_all};
use crate::cli::CommonArgs;
use crate::output::{output_batch, output_json, output_ndjson};
use std::path::PathBuf;

pub fn exec(common: &CommonArgs, base: Option<PathBuf>, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let settings = super::resolve_settings(common)?;

    let paths = match base {
        Some(base) => discover_repositories(&base),
        None if !settings.config.repositories.is_empty() => settings.config.repositories.clone(),
        None => anyhow::bail!("No repositories to analyse: pass a base directory or list them in the config file"),
    };

    let (repos, open_failures) = open_all(&paths);
    let progress = !json && !ndjson && console::Term::stderr().is_term();
    let mut batch = analyze_batch(&repos, &settings.options, progress);
    let mut failures = open_failures;
    failures.append(&mut batch.failures);
    batch.failures = failures;

    if json {
        output_json(&batch)?;
    } else if ndjson {
        output_ndjson(batch.repositories.values())?;
    } else if batch.repositories.is_empty() && batch.failures.is_empty() {
        println!("No repositories found.");
    } else {
        output_batch(&batch)?;
    }

    Ok(())
}
