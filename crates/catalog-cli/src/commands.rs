use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use tracing::{info, info_span};

use catalog_cli::render::{TreeStyle, records_table, render_tree};
use catalog_cli::source::CsvRowSource;
use catalog_filter::{FilterConfig, FilterSession, RowSource};
use catalog_model::SourceFetchError;

use crate::cli::{SearchArgs, TreeArgs};

pub fn load_config(path: Option<&Path>) -> Result<FilterConfig> {
    match path {
        Some(path) => FilterConfig::load(path).context("load filter config"),
        None => Ok(FilterConfig::default()),
    }
}

pub fn run_tree(args: &TreeArgs, config: FilterConfig) -> Result<()> {
    let span = info_span!("tree", rows = %args.rows.display());
    let _guard = span.enter();

    let mut config = config;
    if let Some(levels) = args.levels {
        config.levels = levels;
    }
    let source = CsvRowSource::new(&args.rows);
    let mut session = FilterSession::new(config);
    session.try_refresh(&source).map_err(fetch_failure)?;

    for id in &args.expand {
        if !session.toggle(id) {
            bail!("no node with id '{id}' (run with --ids to list them)");
        }
    }
    if let Some(query) = &args.query {
        session.apply_query(query.as_str());
    }
    if let Some(id) = &args.select {
        session
            .select_id(id)
            .ok_or_else(|| anyhow!("no visible node with id '{id}'"))?;
    }

    info!(
        roots = session.forest().len(),
        expanded = session.expanded().len(),
        "rendering catalog tree"
    );
    let tree = render_tree(&session, TreeStyle { show_ids: args.ids });
    if tree.is_empty() {
        println!("No matching products.");
    } else {
        println!("{tree}");
    }
    if let Some(selected) = session.selection() {
        println!();
        println!("Selected: {}", selected.describe());
    }
    Ok(())
}

pub fn run_search(args: &SearchArgs) -> Result<()> {
    let source = CsvRowSource::new(&args.rows);
    let records = source
        .fetch(Some(args.query.as_str()))
        .map_err(fetch_failure)?;
    if records.is_empty() {
        println!("No matching products.");
        return Ok(());
    }
    println!("{}", records_table(&records));
    println!("{} matching product(s)", records.len());
    Ok(())
}

/// Wrap a row source error with its user-facing message on top.
fn fetch_failure(error: SourceFetchError) -> anyhow::Error {
    let message = error.user_message();
    anyhow::Error::new(error).context(message)
}
