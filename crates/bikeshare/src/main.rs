mod bootstrap;

use std::io::{self, BufRead};

use anyhow::Result;
use bikeshare_core::settings::Settings;
use bikeshare_runtime::data::reader::Loader;
use bikeshare_runtime::prompt::PromptMode;
use bikeshare_runtime::session::ReportSession;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Bikeshare explorer v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!("Data directory: {}", settings.data_dir.display());

    let mode = PromptMode::detect();
    tracing::debug!("Prompt mode: {:?}", mode);

    // dialoguer reads the terminal itself, so stdin stays unlocked there.
    match mode {
        PromptMode::Terminal => run_session(io::empty(), mode, &settings),
        PromptMode::Stream => run_session(io::stdin().lock(), mode, &settings),
    }
}

fn run_session<R: BufRead>(input: R, mode: PromptMode, settings: &Settings) -> Result<()> {
    ReportSession::new(input, io::stdout().lock(), Loader::new(&settings.data_dir))
        .with_prompt_mode(mode)
        .with_basic_stats(settings.debug)
        .run()?;
    Ok(())
}
