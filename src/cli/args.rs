use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Student identifier (e.g. the homework repository name)
    #[arg(long = "id", alias = "repo-name")]
    pub identifier: String,

    /// Submission CSV file, `-` or omitted reads stdin
    #[arg(long, short)]
    pub submission: Option<PathBuf>,

    /// Inclusive limit on the summed count error
    #[arg(long, alias = "max-invalid-letters-count")]
    pub max_error_budget: Option<u64>,

    /// Points reported when the submission is accepted
    #[arg(long, alias = "result-points", allow_negative_numbers = true)]
    pub reward_points: Option<i64>,

    /// Override the configured reference directory
    #[arg(long)]
    pub reference_dir: Option<PathBuf>,

    /// Accept submissions that leave reference letters unreported
    #[arg(long)]
    pub lenient: bool,
}

#[derive(Args, Debug, Clone)]
pub struct VariantArgs {
    /// Student identifier (e.g. the homework repository name)
    #[arg(long = "id", alias = "repo-name")]
    pub identifier: String,
}
