use std::error::Error;

use treesweep::entropy::Criterion;
use treesweep::metrics::accuracy;
use treesweep::traits::{Fit, Predict};
use treesweep_dtree::DecisionTree;

fn main() -> Result<(), Box<dyn Error>> {
    // load Moons dataset
    let dataset = treesweep_datasets::make_moons(300, 0.2, 42)?;

    for depth in 1..=5 {
        let model = DecisionTree::params()
            .criterion(Criterion::Gini)
            .max_depth(Some(depth))
            .fit(&dataset)?;
        let pred = model.predict(dataset.records())?;

        println!(
            "max_depth {}: {:?}, accuracy {:.3}",
            depth,
            model.stats(),
            accuracy(&pred, &dataset.targets)?
        );
        if depth == 2 {
            println!("Model: \n{}", model.str());
        }
    }

    Ok(())
}
