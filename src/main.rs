//! CK Mining Tools
//!
//! Block race probabilities and stratum header reconstruction.

use ck_mining_tools::{
    config::{Args, Command, Config, OutputFormat},
    core::reconstruct,
    error::{Error, Result},
    output::{render_header, render_race},
    utils, APP_NAME, VERSION,
};
use clap::Parser;
use tracing::{error, info};

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::from_args(&args)?;

    if args.print_config {
        print_config(&config)?;
        return Ok(());
    }

    utils::init_logging(&config.logging.level, &config.logging.format);
    info!(version = VERSION, command = args.command.name(), "{} starting", APP_NAME);

    match run(&args.command, &config, args.output) {
        Ok(rendered) => {
            println!("{}", rendered);
            Ok(())
        }
        Err(e) => {
            error!(category = e.category(), "{}", e);
            Err(e)
        }
    }
}

/// Run the selected computation and render its result
fn run(command: &Command, config: &Config, output: OutputFormat) -> Result<String> {
    match command {
        Command::Race(_) => {
            let report = config.race.parameters()?.evaluate()?;
            render_race(&report, output)
        }
        Command::Header(_) => {
            let reconstruction = reconstruct(&config.header)?;
            info!(
                block_hash = %reconstruction.block_hash(),
                meets_target = reconstruction.meets_target(),
                "Header reconstructed"
            );
            render_header(&reconstruction, output)
        }
    }
}

fn print_config(config: &Config) -> Result<()> {
    let yaml = serde_yaml::to_string(config)
        .map_err(|e| Error::config(format!("Failed to serialize config: {}", e)))?;
    println!("{}", yaml);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_header_defaults() {
        let args = Args::try_parse_from(["ck-mining-tools", "header"]).unwrap();
        let config = Config::from_args(&args).unwrap();
        let rendered = run(&args.command, &config, OutputFormat::Plain).unwrap();

        assert!(rendered.ends_with("00000000000ca519334a48cf1aa924e0c8c1ca8944c7075352117671db50737a"));
    }

    #[test]
    fn test_run_race_defaults() {
        let args = Args::try_parse_from(["ck-mining-tools", "race"]).unwrap();
        let config = Config::from_args(&args).unwrap();
        let rendered = run(&args.command, &config, OutputFormat::Plain).unwrap();

        assert_eq!(rendered.lines().count(), 6);
    }

    #[test]
    fn test_run_surfaces_bad_input() {
        let args = Args::try_parse_from(["ck-mining-tools", "header", "--bits", "1d00ff"]).unwrap();
        let config = Config::from_args(&args).unwrap();
        assert!(run(&args.command, &config, OutputFormat::Plain).is_err());
    }
}
