use rand::rngs::StdRng;
use rand::SeedableRng;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use structopt::StructOpt;
use tabreg::report;
use tabreg::{Dataset, DecisionTreeOptions, DecisionTreeRegressor, Regressor as _};

/// Fits a decision tree regressor on a CSV file and prints one prediction per
/// input row, space separated, on a single line.
#[derive(Debug, StructOpt)]
#[structopt(name = "dtree")]
struct Opt {
    /// Input CSV file (header row required, all cells numeric).
    #[structopt(default_value = "toy.csv")]
    input: PathBuf,

    /// Target column name. Defaults to the rightmost column.
    #[structopt(long)]
    target: Option<String>,

    /// Maximum number of split levels below the root.
    #[structopt(long, default_value = "5")]
    max_depth: NonZeroUsize,

    /// Minimum number of rows a node needs to be split.
    #[structopt(long, default_value = "2")]
    min_samples_split: usize,

    /// Seed for the feature scan order and split tie breaking.
    #[structopt(long, default_value = "42")]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    let opt = Opt::from_args();

    let dataset = Dataset::from_path(&opt.input)?;
    let target = dataset.target_index(opt.target.as_deref())?;
    let table = dataset.table(target)?;

    let options = DecisionTreeOptions {
        max_depth: Some(opt.max_depth),
        min_samples_split: opt.min_samples_split,
        max_features: None,
    };
    let mut rng = StdRng::seed_from_u64(opt.seed);
    let regressor = DecisionTreeRegressor::fit(&mut rng, table, options);

    let predictions = regressor.predict_batch(dataset.feature_rows(target));
    println!("{}", report::format_predictions(&predictions));
    Ok(())
}
