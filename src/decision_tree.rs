use crate::functions;
use crate::model::Regressor;
use crate::table::Table;
use rand::seq::SliceRandom as _;
use rand::Rng;
use std::num::NonZeroUsize;

/// Stopping and feature-sampling knobs for tree fitting.
#[derive(Debug, Clone)]
pub struct DecisionTreeOptions {
    /// Maximum number of split levels below the root. `None` grows the tree
    /// until every leaf is pure or unsplittable.
    pub max_depth: Option<NonZeroUsize>,

    /// A node with fewer rows than this becomes a leaf.
    pub min_samples_split: usize,

    /// Number of candidate feature columns per node. `None` considers all of
    /// them. The supplied rng fixes the scan order either way, so ties between
    /// equal-gain splits break reproducibly.
    pub max_features: Option<usize>,
}

impl Default for DecisionTreeOptions {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            max_features: None,
        }
    }
}

#[derive(Debug)]
pub struct DecisionTreeRegressor {
    tree: Tree,
}

impl DecisionTreeRegressor {
    pub fn fit<R: Rng + ?Sized>(rng: &mut R, table: Table, options: DecisionTreeOptions) -> Self {
        let tree = Tree::fit(rng, table, options);
        Self { tree }
    }
}

impl Regressor for DecisionTreeRegressor {
    fn predict(&self, xs: &[f64]) -> f64 {
        self.tree.predict(xs)
    }
}

#[derive(Debug)]
struct Tree {
    root: Node,
}

impl Tree {
    fn fit<R: Rng + ?Sized>(rng: &mut R, mut table: Table, options: DecisionTreeOptions) -> Self {
        let mut builder = NodeBuilder { rng, options };
        let root = builder.build(&mut table, 0);
        Self { root }
    }

    fn predict(&self, xs: &[f64]) -> f64 {
        self.root.predict(xs)
    }
}

#[derive(Debug)]
struct Node {
    label: f64,
    children: Option<Children>,
}

impl Node {
    fn new(label: f64) -> Self {
        Self {
            label,
            children: None,
        }
    }

    fn predict(&self, xs: &[f64]) -> f64 {
        if let Some(children) = &self.children {
            if xs[children.split.feature] <= children.split.threshold {
                children.left.predict(xs)
            } else {
                children.right.predict(xs)
            }
        } else {
            self.label
        }
    }
}

#[derive(Debug)]
struct Children {
    split: SplitPoint,
    left: Box<Node>,
    right: Box<Node>,
}

#[derive(Debug)]
struct SplitPoint {
    information_gain: f64,
    feature: usize,
    threshold: f64,
}

#[derive(Debug)]
struct NodeBuilder<'a, R: ?Sized> {
    rng: &'a mut R,
    options: DecisionTreeOptions,
}

impl<'a, R: Rng + ?Sized> NodeBuilder<'a, R> {
    fn build(&mut self, table: &mut Table, depth: usize) -> Node {
        if table.is_single_target() {
            let label = table.target().next().expect("never fails");
            return Node::new(label);
        }

        let label = functions::mean(table.target());
        let mut node = Node::new(label);

        if self
            .options
            .max_depth
            .map_or(false, |max| depth >= max.get())
        {
            return node;
        }
        if table.rows_len() < self.options.min_samples_split {
            return node;
        }

        let impurity = functions::mse(table.target());
        let rows = table.rows_len();

        let max_features = self
            .options
            .max_features
            .unwrap_or_else(|| table.features_len());
        let candidates = (0..table.features_len())
            .filter(|&i| !table.feature(i).any(|x| x.is_nan()))
            .collect::<Vec<_>>();

        let mut best: Option<SplitPoint> = None;
        for &feature in
            candidates.choose_multiple(self.rng, std::cmp::min(candidates.len(), max_features))
        {
            table.sort_rows_by_feature(feature);
            for (row, threshold) in table.thresholds(feature) {
                let impurity_l = functions::mse(table.target().take(row));
                let impurity_r = functions::mse(table.target().skip(row));
                let n_l = row as f64 / rows as f64;
                let n_r = 1.0 - n_l;

                let information_gain = impurity - (n_l * impurity_l + n_r * impurity_r);
                if best
                    .as_ref()
                    .map_or(true, |t| t.information_gain < information_gain)
                {
                    best = Some(SplitPoint {
                        information_gain,
                        feature,
                        threshold,
                    });
                }
            }
        }

        if let Some(best) = best {
            node.children = Some(self.build_children(table, best, depth));
        }
        node
    }

    fn build_children(&mut self, table: &mut Table, split: SplitPoint, depth: usize) -> Children {
        table.sort_rows_by_feature(split.feature);
        let row = table
            .feature(split.feature)
            .take_while(|&x| x <= split.threshold)
            .count();
        let (left, right) = table.with_split(row, |table| Box::new(self.build(table, depth + 1)));
        Children { split, left, right }
    }
}
