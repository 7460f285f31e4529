use clap::Parser;
use log::LevelFilter;
use snafu::ErrorCompat;

mod args;
mod atlas;

fn main() {
    let parsed = args::Args::parse();

    let mut builder = env_logger::Builder::from_default_env();
    if parsed.verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();

    if let Err(e) = atlas::run_report(&parsed) {
        eprintln!("An error occured: {}", e);
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            eprintln!("trace: {}", bt);
        }
        std::process::exit(1);
    }
}
