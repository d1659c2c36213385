//! Command line front end: read a word list, sort it concurrently, write it back.

use std::path::Path;
use std::process;
use std::time::Instant;

use clap::{Arg, ArgAction, Command};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use word_sort::{
    check::check_sorted,
    config::{SortConfig, SortConfigBuilder, ThreadSetting},
    error::{SortError, SortResult},
    word_file::{read_word_list, write_words},
    WordSorter, EXIT_SUCCESS,
};

fn main() {
    match run() {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("wordsort: {}", e);
            process::exit(e.exit_code());
        }
    }
}

fn run() -> SortResult<i32> {
    let matches = build_cli().get_matches();
    let config = parse_config_from_matches(&matches)?;
    init_logging(&config);
    execute(&config)?;
    Ok(EXIT_SUCCESS)
}

fn build_cli() -> Command {
    Command::new("wordsort")
        .version(env!("CARGO_PKG_VERSION"))
        .override_usage("wordsort [OPTIONS] <THREADS> <INPUT> <OUTPUT>")
        .about("Sort a word list using concurrent workers")
        .long_about("Sort a word list using concurrent workers.\n\nINPUT holds the number of words on its first line followed by one word per line. The sorted words are written to OUTPUT, one per line.")
        .arg(Arg::new("threads")
            .help("Number of threads to sort with, or 'auto' for one per CPU")
            .required(true)
            .value_name("THREADS"))
        .arg(Arg::new("input")
            .help("Word list to sort")
            .required(true)
            .value_name("INPUT"))
        .arg(Arg::new("output")
            .help("File to write the sorted words to")
            .required(true)
            .value_name("OUTPUT"))
        .arg(Arg::new("verify")
            .long("verify")
            .help("Check that the result is sorted before writing it")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("debug")
            .long("debug")
            .help("Print scheduling diagnostics to stderr")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("quiet")
            .short('q')
            .long("quiet")
            .help("Do not print the timing summary")
            .action(ArgAction::SetTrue))
}

/// Parse configuration from command line matches
fn parse_config_from_matches(matches: &clap::ArgMatches) -> SortResult<SortConfig> {
    let mut builder = SortConfigBuilder::new();

    if let Some(threads) = matches.get_one::<String>("threads") {
        builder = builder.threads(threads.parse::<ThreadSetting>()?);
    }
    if let Some(input) = matches.get_one::<String>("input") {
        builder = builder.input_file(input.clone());
    }
    if let Some(output) = matches.get_one::<String>("output") {
        builder = builder.output_file(output.clone());
    }

    if matches.get_flag("verify") {
        builder = builder.verify();
    }
    if matches.get_flag("debug") {
        builder = builder.debug();
    }
    if matches.get_flag("quiet") {
        builder = builder.quiet();
    }

    builder.build()
}

fn init_logging(config: &SortConfig) {
    let filter = if config.debug {
        EnvFilter::new(config.log_directive())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_directive()))
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

fn execute(config: &SortConfig) -> SortResult<()> {
    let (input, output) = match (&config.input_file, &config.output_file) {
        (Some(input), Some(output)) => (Path::new(input), Path::new(output)),
        _ => return Err(SortError::parse_error("input and output files are required")),
    };
    let threads = config.effective_thread_count();
    let sorter = WordSorter::new(threads)?;
    let started = Instant::now();

    let phase = Instant::now();
    let list = read_word_list(input)?;
    tracing::info!(elapsed_ms = phase.elapsed().as_millis() as u64, "load");

    let declared = list.declared;
    let phase = Instant::now();
    let sorted = sorter.sort(list.words)?;
    tracing::info!(elapsed_ms = phase.elapsed().as_millis() as u64, threads, "sort");

    if config.verify {
        check_sorted(&sorted)?;
    }

    let phase = Instant::now();
    write_words(output, &sorted, declared)?;
    tracing::info!(elapsed_ms = phase.elapsed().as_millis() as u64, "write");

    if !config.quiet {
        println!(
            "Using {} threads, {} words was sorted in {} milliseconds.",
            threads,
            sorted.len(),
            started.elapsed().as_millis()
        );
    }

    Ok(())
}
