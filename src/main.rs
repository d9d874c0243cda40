use std::{ffi::OsString, process};

use arduino_util::{MAKEFILE_TEMPLATE, cli};
use color_eyre::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = std::env::args_os().collect::<Vec<OsString>>();

    let cli = match cli::parse_from(&args) {
        Ok(cli) => cli,
        Err(e) => {
            e.print()?;
            if cli::needs_help(&e) {
                eprintln!("\n{}", cli::help());
            }
            process::exit(cli::exit_code(&e));
        }
    };

    color_eyre::config::HookBuilder::default()
        .display_location_section(cli.debug())
        .display_env_section(cli.debug())
        .install()?;

    if cli.debug() {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .with_env_filter(EnvFilter::from_default_env())
            .init();
    }

    let executable = cli::executable_name(args.first().map(OsString::as_os_str));

    cli::run(cli, &executable, MAKEFILE_TEMPLATE, std::io::stdout().lock())?;

    Ok(())
}
