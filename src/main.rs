use anyhow::Context;
use runopts::cli::build_registry;
use runopts::RunConfig;
use serde_json::json;
use std::io::{self, Write};

fn main() -> anyhow::Result<()> {
    // Reset SIGPIPE handler to default (terminate) so piping to head/tail works correctly
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    env_logger::init();

    let mut registry = build_registry().context("failed to register options")?;
    let use_color = std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stdout);

    let mut config = RunConfig::new();
    let files = registry.parse_or_exit(&mut config, std::env::args().skip(1), use_color);
    log::debug!("parsed {} file arguments", files.len());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !config.hooks.is_empty() {
        config.hooks.start(&files);
        for file in &files {
            config.hooks.load(file, &mut out)?;
        }
        writeln!(out)?;
    }

    let report = json!({
        "config": config.to_json(),
        "files": files,
    });
    writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    Ok(())
}
