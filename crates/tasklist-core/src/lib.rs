pub mod cli;
pub mod commands;
pub mod config;
pub mod datastore;
pub mod datetime;
pub mod render;

use std::ffi::OsString;

use anyhow::Context;
use clap::Parser;
use tracing::{
  debug,
  info
};

#[tracing::instrument(skip_all)]
pub fn run(
  raw_args: Vec<OsString>
) -> anyhow::Result<()> {
  let cli =
    cli::GlobalCli::parse_from(raw_args);

  cli::init_tracing(
    cli.verbose,
    cli.quiet
  )?;

  info!(
    verbose = cli.verbose,
    quiet = cli.quiet,
    "starting tasklist CLI"
  );

  let mut cfg = config::Config::load(
    cli.rcfile.as_deref()
  )?;
  cfg.apply_overrides(
    cli
      .rc_overrides
      .iter()
      .map(|kv| {
        (kv.key.clone(), kv.value.clone())
      })
  )?;
  debug!(
    source = ?cfg.source,
    "configuration ready"
  );

  let data_dir = cfg
    .data_dir(cli.data.as_deref())
    .context(
      "failed to resolve data \
       directory"
    )?;

  let store =
    datastore::FileStore::open(
      &data_dir
    )
    .with_context(|| {
      format!(
        "failed to open store at {}",
        data_dir.display()
      )
    })?;

  let mut renderer =
    render::Renderer::new(&cfg);

  commands::dispatch(
    store,
    &cfg,
    &mut renderer,
    cli.command_or_default(),
    commands::Now::current()
  )?;

  info!("done");
  Ok(())
}
