use std::io::{self, IsTerminal};

use anyhow::Context;
use weekgrid::core::cli::CliPaths;
use weekgrid::core::context::EngineContext;
use weekgrid::logging::LogTarget;
use weekgrid::prompter::flows::main_flow::MainFlow;
use weekgrid::prompter::prompter::Prompter;

fn main() -> anyhow::Result<()> {
    let paths = CliPaths::from_env().context("Invalid command line")?;
    let mut ctx = EngineContext::open(&paths).with_context(|| {
        format!(
            "Could not start with config '{}' and store '{}'",
            paths.config_path.display(),
            paths.store_path.display()
        )
    })?;
    ctx.logger.info(
        format!("Session started (store: {})", paths.store_path.display()),
        LogTarget::FileOnly,
    );

    let painted = io::stdout().is_terminal();
    let logger = ctx.logger.clone();
    let flow = MainFlow::new(&mut ctx, painted);

    if let Err(err) = Prompter::new().run(flow) {
        logger.error(format!("Prompt stopped: {err}"), LogTarget::FileOnly);
        return Err(err).context("Prompt stopped");
    }
    logger.info("Session ended", LogTarget::FileOnly);
    Ok(())
}
