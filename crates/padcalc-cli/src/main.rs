//! padcalc: keypad calculator in the terminal
//!
//! ## Usage
//!
//! ```bash
//! padcalc run "10+5="             # Print the display after the keys
//! padcalc run "12+3*2=" --steps   # One line per key
//! padcalc --strict run "1/0="     # Report division by zero
//! padcalc interactive             # Raw-mode keypad
//! padcalc keypad                  # Button grid with ids
//! ```

use clap::Parser;
use padcalc::engine::Engine;
use padcalc::keypad::{parse_keys, Keypad};
use padcalc_cli::{
    clipboard::copy_to_clipboard, interactive::run_interactive, logging, Cli, CliConfig,
    CliResult, Commands, OutputFormat, Renderer, RunArgs, RunReport, Step, Verbosity,
};
use std::process::ExitCode;
use tracing::{debug, info};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let config = build_config(&cli)?;
    logging::init(config.verbosity);
    console::set_colors_enabled(config.color.should_color());
    debug!(?config, "configuration resolved");

    let renderer = Renderer::new(config.color.should_color(), config.verbosity.is_quiet());

    match cli.command {
        Commands::Run(args) => run_keys(&config, &renderer, &args),
        Commands::Interactive => run_interactive(&config, &renderer),
        Commands::Keypad => {
            renderer.print(&renderer.format_keypad(&Keypad::new()))?;
            Ok(())
        }
    }
}

/// File values first, then flags that were actually given
fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    let mut config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::new(),
    };

    if cli.quiet || cli.verbose > 0 {
        config = config.with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose));
    }
    if let Some(color) = cli.color {
        config = config.with_color(color.into());
    }
    Ok(config.with_strict(cli.strict))
}

fn run_keys(config: &CliConfig, renderer: &Renderer, args: &RunArgs) -> CliResult<()> {
    let commands = parse_keys(&args.keys)?;
    info!(keys = %args.keys, count = commands.len(), "running key script");

    let mut engine = Engine::with_config(config.engine);
    let mut steps = Vec::with_capacity(commands.len());
    for command in commands {
        let display = engine.dispatch(command);
        steps.push(Step::new(command, display));
    }
    let display = engine.snapshot();

    let copied = if args.copy {
        copy_answer(&engine, renderer)?
    } else {
        false
    };

    let format = args.format.map_or(config.format, OutputFormat::from);
    match format {
        OutputFormat::Json => {
            let report = RunReport {
                display,
                steps: args.steps.then_some(steps),
                history: args
                    .history
                    .then(|| engine.history().iter().cloned().collect()),
                copied,
            };
            renderer.print(&Renderer::format_json(&report)?)?;
        }
        OutputFormat::Text => {
            if args.steps {
                for step in &steps {
                    renderer.print(&renderer.format_step(step))?;
                }
            } else {
                renderer.print(&renderer.format_display(&display))?;
            }
            if args.history {
                renderer.header("History");
                renderer.print(&renderer.format_history(engine.history()))?;
            }
        }
    }
    Ok(())
}

fn copy_answer(engine: &Engine, renderer: &Renderer) -> CliResult<bool> {
    let Some(text) = engine.copy_text() else {
        renderer.warning("nothing to copy: the last key did not complete an equation");
        return Ok(false);
    };
    copy_to_clipboard(&text)?;
    renderer.success(&format!("copied {text} to clipboard"));
    Ok(true)
}
