pub mod cli;
pub mod clock;
pub mod config;
pub mod document;
pub mod error;
pub mod labeler;
pub mod render;
pub mod weekday;

use std::ffi::OsString;
use std::io;

use anyhow::Context;
use clap::Parser;
use tracing::{
  debug,
  info
};

use crate::clock::{
  Clock,
  FixedClock,
  SystemClock
};
use crate::config::Settings;
use crate::document::DocumentStream;
use crate::labeler::WeekdayLabeler;
use crate::render::Renderer;

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
    "starting rooz"
  );

  let settings =
    Settings::load(&cli.overrides())
      .context(
        "failed to resolve settings"
      )?;
  debug!(?settings, "resolved settings");

  let clock: Box<dyn Clock> =
    match cli.at {
      | Some(at) => {
        Box::new(FixedClock(at))
      }
      | None => Box::new(SystemClock)
    };

  let doc = render_page(
    &settings,
    clock.as_ref(),
    cli.all
  )?;
  doc
    .flush_to(&mut io::stdout().lock())
    .context(
      "failed to write to stdout"
    )?;

  info!("done");
  Ok(())
}

/// Renders one page: the label (or the full table) written into a
/// document that is then closed.
pub fn render_page(
  settings: &Settings,
  clock: &dyn Clock,
  all: bool
) -> anyhow::Result<DocumentStream> {
  let renderer =
    Renderer::new(settings.format);
  let mut doc = DocumentStream::new();

  if all {
    doc.write(&renderer.render_table());
  } else {
    let obs =
      WeekdayLabeler::new(
        settings.timezone
      )
      .observe_now(clock)
      .context(
        "failed to compute weekday"
      )?;
    let text = weekday::label_for_name(
      obs.name.as_str()
    )
    .map(|_| renderer.render(&obs))
    .transpose()
    .with_context(|| {
      format!(
        "failed to render label for {}",
        obs.name
      )
    })?;
    doc.write_label(text.as_deref());
  }

  doc.finish_loading();
  Ok(doc)
}
