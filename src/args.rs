use clap::Parser;

/// This is an election-night seat projection and outcome simulation program.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The JSON configuration of the contest: party set, baseline
    /// projection, thresholds and simulation settings. The built-in defaults are used when
    /// omitted. For more information about the file format, read the documentation.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path or empty) The snapshot of live seat counts, in CSV or JSON format. When
    /// omitted, the projection falls back to the pre-election baseline.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default csv) The type of the input. See documentation for all the input types.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the forecast will be written
    /// in JSON format to the given location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing the summary of a previous run in JSON format.
    /// If provided, seatcast will check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (integer, optional) Seed for the trial generator. Overrides the randomSeed of the
    /// configuration; a seeded run is exactly reproducible.
    #[clap(long, value_parser)]
    pub seed: Option<u64>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
