pub use dataset::{Dataset, LoadError};
pub use decision_tree::{DecisionTreeOptions, DecisionTreeRegressor};
pub use linear::{LinearFitError, LinearRegression};
pub use model::Regressor;
pub use table::{Table, TableError};

pub mod report;

mod dataset;
mod decision_tree;
mod functions;
mod linear;
mod model;
mod table;
