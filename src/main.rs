use anyhow::Result;
use clap::Parser;

use treemap_view::cli::{Cli, normalize};
use treemap_view::{pipeline, util};

fn main() -> Result<()> {
  let cli = Cli::parse();

  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  util::init_logging();

  // Phase 1: normalize CLI
  let cfg = normalize(cli)?;

  // Phase 2: adapt the request and shape the table
  let today = util::effective_today(cfg.today);
  let output = pipeline::run_preview(&cfg, today)?;

  util::write_output(&cfg.out, &serde_json::to_value(&output)?)
}
