use std::path::PathBuf;
use structopt::StructOpt;
use tabreg::report;
use tabreg::{Dataset, LinearRegression, Regressor as _};

/// Fits an ordinary least squares regression on a CSV file and prints one
/// prediction per input row, space separated, on a single line.
#[derive(Debug, StructOpt)]
#[structopt(name = "linreg")]
struct Opt {
    /// Input CSV file (header row required, all cells numeric).
    #[structopt(default_value = "advertising.csv")]
    input: PathBuf,

    /// Target column name. Defaults to the rightmost column.
    #[structopt(long)]
    target: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let opt = Opt::from_args();

    let dataset = Dataset::from_path(&opt.input)?;
    let target = dataset.target_index(opt.target.as_deref())?;
    let regression = LinearRegression::fit(&dataset.table(target)?)?;

    let predictions = regression.predict_batch(dataset.feature_rows(target));
    println!("{}", report::format_predictions(&predictions));
    Ok(())
}
