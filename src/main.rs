use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

use neatgen::{convert_file, scan_directory, FileLoader, RenderContext};

fn cli() -> Command {
    Command::new("neatgen")
        .about("Generate reflection registrations from a C++ module interface graph")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_negates_reqs(true)
        .arg(
            Arg::new("input")
                .help("Module graph to convert (.json or .json.zst)")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("output")
                .help("C++ file to write")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::new("reflect-private")
                .long("reflect-private")
                .help("Reflect private members of every exported type")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log every conversion step")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("scan")
                .about("Convert every module graph in a directory")
                .arg(Arg::new("in_dir").required(true).index(1))
                .arg(Arg::new("out_dir").required(true).index(2)),
        )
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn path_arg(matches: &ArgMatches, name: &str) -> PathBuf {
    matches
        .get_one::<String>(name)
        .map(PathBuf::from)
        .unwrap_or_default()
}

/// Global flags may be given before or after the subcommand.
fn flag(matches: &ArgMatches, name: &str) -> bool {
    matches.get_flag(name)
        || matches
            .subcommand()
            .is_some_and(|(_, subcommand)| subcommand.get_flag(name))
}

fn run(matches: &ArgMatches) -> Result<()> {
    let context = RenderContext::new().with_show_private(flag(matches, "reflect-private"));
    let loader = FileLoader;

    match matches.subcommand() {
        Some(("scan", scan)) => {
            let converted = scan_directory(
                &loader,
                &path_arg(scan, "in_dir"),
                &path_arg(scan, "out_dir"),
                &context,
            )?;
            tracing::info!(converted, "scan finished");
        }
        _ => {
            convert_file(
                &loader,
                &path_arg(matches, "input"),
                &path_arg(matches, "output"),
                &context,
            )?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let matches = cli().get_matches();
    init_logging(flag(&matches, "verbose"));

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
