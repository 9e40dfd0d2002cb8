// Entrypoint for the CLI application.
// - Keeps `main` small: set up logging, read config, hand a fresh form
//   to the UI loop.
// - Logs go to stderr so they do not interleave with the prompts.

use resume_builder::config::Config;
use resume_builder::form::FormState;
use resume_builder::ui::{self, TerminalPrompt};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "resume_builder=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // `RESUME_OUTPUT` optionally adds a JSON file sink. See `config::Config`.
    let config = Config::from_env();
    tracing::info!(output = ?config.output, "starting resume builder");

    let mut sinks = config.sinks();
    let mut form = FormState::new();
    let mut prompt = TerminalPrompt::new();

    // Blocks until the user quits.
    ui::run(&mut form, &mut prompt, &mut sinks)?;
    Ok(())
}
