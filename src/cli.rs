use crate::config::{ResolvedConfig, ResolvedConfigFile};
use crate::constants::ENTITY_HELP_TEXT;
use crate::errors::{AppError, AppResult};
use crate::exporter::export_entities;
use crate::models::EntityKind;
use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;
use tracing::info;

// CLI metadata constants
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const APP_AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
const APP_ABOUT: &str = env!("CARGO_PKG_DESCRIPTION");

/// Parses command-line arguments and executes the export command.
///
/// This function handles two subcommands:
/// - `cli`: Manual CLI with default configuration
/// - `toml`: Run using a TOML configuration file
///
/// Both subcommands execute the same workflow: locate the dump file for each
/// requested entity kind, stream it into typed records, and write the
/// records out as relational CSV tables.
pub fn cli() -> AppResult<()> {
    let cmd = Command::new("discogs-dump-cli")
        .version(APP_VERSION)
        .author(APP_AUTHOR)
        .about(APP_ABOUT)
        .subcommand(
            Command::new("cli")
                .about("Export one or more entity kinds from dump files to CSV tables")
                .after_help(
                    "Example:\n  discogs-dump-cli cli -e artist -e label -i data/dumps -o data/csv --compress",
                )
                .arg(
                    Arg::new("entity")
                        .short('e')
                        .long("entity")
                        .help(ENTITY_HELP_TEXT)
                        .required(true)
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("input")
                        .short('i')
                        .long("input")
                        .help("Dump file or directory containing discogs_<date>_<kind>s.xml[.gz] files")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help("Directory for the produced CSV tables")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("limit")
                        .short('l')
                        .long("limit")
                        .help("Stop after this many entities per kind (0 = no limit)")
                        .value_parser(clap::value_parser!(u64))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("batch_size")
                        .short('b')
                        .long("batch-size")
                        .alias("bs")
                        .help("Rows buffered per table before a CSV batch is flushed")
                        .value_parser(clap::value_parser!(usize))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("compress")
                        .short('c')
                        .long("compress")
                        .help("Gzip-compress the produced CSV files")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("toml")
                .about("Run using a TOML configuration file")
                .arg(
                    Arg::new("config")
                        .help("Path to the TOML config file")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        );

    let mut cmd_for_help = cmd.clone();
    let matches = cmd.get_matches();

    match matches.subcommand() {
        Some(("cli", sub)) => {
            let kinds = sub
                .get_many::<String>("entity")
                .expect("entity is required")
                .map(|alias| EntityKind::from_alias(alias))
                .collect::<AppResult<Vec<_>>>()?;

            let mut resolved_config = ResolvedConfig::default();
            if let Some(input) = sub.get_one::<PathBuf>("input") {
                resolved_config.input_dir = input.clone();
            }
            if let Some(output) = sub.get_one::<PathBuf>("output") {
                resolved_config.csv_dir = output.clone();
            }
            if let Some(&limit) = sub.get_one::<u64>("limit") {
                resolved_config.limit = limit;
            }
            if let Some(&batch_size) = sub.get_one::<usize>("batch_size") {
                if batch_size == 0 {
                    return Err(AppError::InvalidInput(
                        "Batch size must be greater than 0".into(),
                    ));
                }
                resolved_config.batch_size = batch_size;
            }
            if sub.get_flag("compress") {
                resolved_config.compress = true;
            }

            run_workflow(&kinds, &resolved_config)?;
        }
        Some(("toml", sub)) => {
            let config_path = sub
                .get_one::<PathBuf>("config")
                .expect("config is required");

            let file_config = ResolvedConfigFile::from_toml_file(config_path)?;
            let kinds = file_config.entity_kinds()?;

            run_workflow(&kinds, &file_config.resolved)?;
        }
        _ => {
            cmd_for_help
                .print_help()
                .map_err(|e| AppError::IoError(format!("Failed to print help: {e}")))?;
        }
    }

    Ok(())
}

fn run_workflow(kinds: &[EntityKind], resolved_config: &ResolvedConfig) -> AppResult<()> {
    print_export_info(kinds, resolved_config);

    export_entities(resolved_config, kinds)?;

    info!(
        entities = kinds.len(),
        "All operations completed successfully"
    );
    Ok(())
}

fn print_export_info(kinds: &[EntityKind], config: &ResolvedConfig) {
    let names: Vec<&str> = kinds.iter().map(|k| k.display_name()).collect();
    info!(
        entities = names.join(", "),
        input = %config.input_dir.display(),
        output = %config.csv_dir.display(),
        limit = config.limit,
        compress = config.compress,
        "Starting export run"
    );
}
