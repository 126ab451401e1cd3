use clap::Parser;
use ipv4_subnet_calc::batch::{read_requests, run_batch};
use ipv4_subnet_calc::cli::{Action, Cli};
use ipv4_subnet_calc::config::Config;
use ipv4_subnet_calc::logging;
use ipv4_subnet_calc::output::{render_batch, render_report};
use ipv4_subnet_calc::processing::run;
use std::error::Error;
use std::process::ExitCode;

fn main() -> Result<ExitCode, Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    let config = Config::from_env()?;
    logging::init(&config)?;
    config.apply_color();
    log::info!("#Start main()");

    let cli = Cli::parse();
    let format = cli.format.unwrap_or(config.format);

    match cli.command.into_action() {
        Action::Batch(file) => {
            let items = run_batch(read_requests(&file)?);
            print!("{}", render_batch(&items, format)?);
            if items.iter().any(|i| i.error.is_some()) {
                return Ok(ExitCode::FAILURE);
            }
        }
        Action::Run(request) => match run(&request) {
            Ok(report) => println!("{}", render_report(&report, format)?),
            Err(e) => {
                eprintln!("Error: {e}");
                return Ok(ExitCode::FAILURE);
            }
        },
    }

    Ok(ExitCode::SUCCESS)
}
