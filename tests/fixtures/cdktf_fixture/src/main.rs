//! Synthesizes the sample application into the configured output directory.

use std::io::Write;

use anyhow::Context;
use cdktf_fixture::{SAMPLE_STACK_ID, sample_app};
use construct_synth::{AppConfig, ContributorRegistry, DirectoryWriter, synth_app};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = AppConfig::load().context("load configuration")?;
    let tree = sample_app(config.clone()).context("build sample app")?;
    let registry = ContributorRegistry::with_stock_contributors();
    let mut writer = DirectoryWriter::from_config(&config);
    let manifest = synth_app(&tree, &registry, &mut writer).context("synthesize sample app")?;

    let entry = manifest
        .stack(SAMPLE_STACK_ID)
        .context("sample stack missing from manifest")?;
    let document = config.outdir.join(&entry.synthesized_stack_path);
    let contents = std::fs::read_to_string(&document)
        .with_context(|| format!("read {document}"))?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(contents.as_bytes())?;
    writeln!(stdout)?;
    Ok(())
}
