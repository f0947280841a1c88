//! Demo entry-point: register a config struct as flags, parse the process
//! arguments, and print the result.
//!
//! ```text
//! RUST_LOG=flagstruct=debug cargo run --example demo -- --in apple --count 37 a b c
//! ```

use std::io::{self, Write};
use std::time::Duration;

use flagstruct::{ClapFlags, FlagStruct, register};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, FlagStruct)]
struct Config {
    #[flag = "in,The path of the input file"]
    pub input: String,
    #[flag = "out,The path of the output file"]
    pub output: String,
    #[flag = "count,The number of lines to process"]
    pub count: i32,
    #[flag = "timeout,How long to wait for input"]
    #[flag_default = "5s"]
    pub timeout: Duration,
    #[flag = "verbose,Print the remaining arguments too"]
    pub verbose: bool,
    pub untagged: String,
    #[flag = "hidden,Never registered"]
    hidden: u64,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .init();
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_tracing();

    let mut config = Config {
        input: String::from("default"),
        output: String::new(),
        count: 17,
        timeout: Duration::ZERO,
        verbose: false,
        untagged: String::from("blub"),
        hidden: 7,
    };

    let mut flags = ClapFlags::new("demo").about("Registers a config struct as command-line flags");
    register(&mut config, &mut flags)?;
    let rest = match flags.try_parse() {
        Ok(rest) => rest,
        Err(err) => {
            if let Some(request) = err.as_display_request() {
                request.exit();
            }
            return Err(err.into());
        }
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{config:#?}")?;
    if config.verbose {
        writeln!(stdout, "remaining: {rest:?}")?;
    }
    Ok(())
}

