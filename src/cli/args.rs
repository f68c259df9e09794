// args.rs - Command line arguments definition

use argh::FromArgs;

#[derive(FromArgs)]
/// seqfam - group high-frequency sequences into edit-distance families
pub struct Args {
    /// input FASTA files, one per sample (.fas, .fasta, .fa, .fna)
    #[argh(positional)]
    pub inputs: Vec<String>,

    /// maximum Levenshtein distance between a member and its family reference (default: 1)
    #[argh(option, default = "1")]
    pub max_distance: i64,

    /// number of families to build (default: 10)
    #[argh(option, default = "10")]
    pub families: i64,

    /// minimum occurrences across all samples for a sequence to be clustered (default: 1000)
    #[argh(option, default = "1000")]
    pub min_occurrence: u64,

    /// output directory (default: .)
    #[argh(option, default = "String::from(\".\")")]
    pub output_dir: String,

    /// number of threads (default: auto-detect)
    #[argh(option)]
    pub threads: Option<usize>,

    /// regex whose first capture group names the sample from the file name (default: file stem)
    #[argh(option)]
    pub sample_pattern: Option<String>,

    /// write per-family statistics (entropy, frequencies, profiles, occupancy)
    #[argh(switch)]
    pub stats: bool,

    /// position label of the first base in positional profiles (default: 1)
    #[argh(option, default = "1")]
    pub profile_offset: usize,

    /// skip the expanded (one line per read) membership files
    #[argh(switch)]
    pub no_expanded: bool,

    /// write a JSON run summary to this file
    #[argh(option)]
    pub summary: Option<String>,

    /// hide progress bars
    #[argh(switch)]
    pub quiet: bool,

    /// validate inputs and report counts without clustering (dry run)
    #[argh(switch)]
    pub dry_run: bool,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,
}
