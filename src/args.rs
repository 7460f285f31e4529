use clap::Parser;

/// Aggregates per-country personality type survey counts into percentage
/// profiles and global statistics.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The CSV file with one row per country: a `Country` column
    /// followed by one numeric column per `<Type>-<Variant>` label.
    #[clap(short, long, value_parser, default_value = "data/countries.csv")]
    pub countries: String,

    /// (file path) The CSV file describing each type: `Type`, `Nickname`,
    /// `Description` and the four binary trait columns `E`, `N`, `T`, `J`.
    #[clap(short, long, value_parser, default_value = "data/types.csv")]
    pub types: String,

    /// (file path or 'stdout') If specified, the JSON summary is written to
    /// the given location instead of the standard output.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference summary in JSON format. If provided, mbtiatlas
    /// will check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (repeatable) Restrict the emitted profiles to the given country
    /// names. All countries are emitted when not specified.
    #[clap(long, value_parser)]
    pub country: Vec<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
