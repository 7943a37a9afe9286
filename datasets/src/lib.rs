//! Seeded synthetic datasets with two features and two classes
//!
//! Every generator takes an explicit seed and draws from an `Isaac64Rng`, so
//! the same parameters always produce the same points in the same order.
//!
use std::f64::consts::PI;

use ndarray::{array, concatenate, Array1, Array2, Axis};
use ndarray_rand::rand_distr::{StandardNormal, Uniform};
use ndarray_rand::RandomExt;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_isaac::Isaac64Rng;
use serde::{Deserialize, Serialize};

use treesweep::{Dataset, Error, Label, Result};

/// Parameters of [`make_classification`].
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ClassificationParams {
    pub n_samples: usize,
    /// Half the side of the hypercube the class centroids sit on.
    pub class_sep: f64,
    /// Fraction of labels reassigned at random.
    pub flip_y: f64,
}

impl Default for ClassificationParams {
    fn default() -> Self {
        ClassificationParams {
            n_samples: 300,
            class_sep: 1.0,
            flip_y: 0.01,
        }
    }
}

fn check_n_samples(n_samples: usize) -> Result<()> {
    if n_samples < 2 {
        return Err(Error::invalid_parameter(format!(
            "n_samples must be at least 2, got {}",
            n_samples
        )));
    }
    Ok(())
}

fn check_noise(noise: f64) -> Result<()> {
    if !(noise >= 0.0) {
        return Err(Error::invalid_parameter(format!(
            "noise must be non-negative, got {}",
            noise
        )));
    }
    Ok(())
}

/// Shuffles rows of `records` and `targets` together.
fn shuffle_rows(
    records: Array2<f64>,
    targets: Array1<Label>,
    rng: &mut Isaac64Rng,
) -> (Array2<f64>, Array1<Label>) {
    let mut idx = (0..records.nrows()).collect::<Vec<usize>>();
    idx.shuffle(rng);
    (records.select(Axis(0), &idx), targets.select(Axis(0), &idx))
}

fn add_noise(records: &mut Array2<f64>, noise: f64, rng: &mut Isaac64Rng) {
    if noise > 0.0 {
        let jitter = Array2::<f64>::random_using(records.raw_dim(), StandardNormal, rng);
        records.scaled_add(noise, &jitter);
    }
}

/// Two gaussian clusters, one per class, in two informative dimensions.
///
/// Centroids are two distinct vertices of the square `[-class_sep,
/// class_sep]^2`. Each cluster is standard normal noise passed through its
/// own random linear map with entries in `[-1, 1)`.
pub fn make_classification(params: &ClassificationParams, seed: u64) -> Result<Dataset> {
    check_n_samples(params.n_samples)?;
    if !(0.0..=1.0).contains(&params.flip_y) {
        return Err(Error::invalid_parameter(format!(
            "flip_y must lie in [0, 1], got {}",
            params.flip_y
        )));
    }
    let mut rng = Isaac64Rng::seed_from_u64(seed);

    let mut vertices = vec![0usize, 1, 2, 3];
    vertices.shuffle(&mut rng);

    let sizes = [params.n_samples / 2, params.n_samples - params.n_samples / 2];
    let mut clusters = Vec::with_capacity(2);
    for (class, &n) in sizes.iter().enumerate() {
        let v = vertices[class];
        let centroid = array![(v & 1) as f64, ((v >> 1) & 1) as f64]
            .mapv(|c| c * 2.0 * params.class_sep - params.class_sep);
        let points = Array2::<f64>::random_using((n, 2), StandardNormal, &mut rng);
        let cov = Array2::<f64>::random_using((2, 2), Uniform::new(-1.0, 1.0), &mut rng);
        clusters.push(points.dot(&cov) + &centroid);
    }
    let records = concatenate(Axis(0), &[clusters[0].view(), clusters[1].view()])
        .map_err(|e| Error::shape_mismatch(e.to_string()))?;
    let mut targets = Array1::from_shape_fn(params.n_samples, |i| if i < sizes[0] { 0 } else { 1 });

    for t in targets.iter_mut() {
        if rng.gen::<f64>() < params.flip_y {
            *t = rng.gen_range(0..2);
        }
    }

    let (records, targets) = shuffle_rows(records, targets, &mut rng);
    Dataset::new(records, targets)
}

/// Two interleaving half circles.
///
/// Class 0 is the upper arc `(cos t, sin t)`, class 1 the lower arc
/// `(1 - cos t, 0.5 - sin t)`, with `t` evenly spaced over `[0, pi]`.
pub fn make_moons(n_samples: usize, noise: f64, seed: u64) -> Result<Dataset> {
    check_n_samples(n_samples)?;
    check_noise(noise)?;
    let mut rng = Isaac64Rng::seed_from_u64(seed);

    let n_out = n_samples / 2;
    let n_in = n_samples - n_out;
    let step = |n: usize| if n > 1 { PI / (n - 1) as f64 } else { 0.0 };
    let (s_out, s_in) = (step(n_out), step(n_in));

    let records = Array2::from_shape_fn((n_samples, 2), |(i, j)| {
        if i < n_out {
            let t = i as f64 * s_out;
            if j == 0 {
                t.cos()
            } else {
                t.sin()
            }
        } else {
            let t = (i - n_out) as f64 * s_in;
            if j == 0 {
                1.0 - t.cos()
            } else {
                0.5 - t.sin()
            }
        }
    });
    let targets = Array1::from_shape_fn(n_samples, |i| if i < n_out { 0 } else { 1 });

    let (mut records, targets) = shuffle_rows(records, targets, &mut rng);
    add_noise(&mut records, noise, &mut rng);
    Dataset::new(records, targets)
}

/// A large circle (class 0) around a smaller one (class 1) of radius
/// `factor`. Angles are evenly spaced over `[0, 2pi)`.
pub fn make_circles(n_samples: usize, noise: f64, factor: f64, seed: u64) -> Result<Dataset> {
    check_n_samples(n_samples)?;
    check_noise(noise)?;
    if !(0.0..1.0).contains(&factor) {
        return Err(Error::invalid_parameter(format!(
            "factor must lie in [0, 1), got {}",
            factor
        )));
    }
    let mut rng = Isaac64Rng::seed_from_u64(seed);

    let n_out = n_samples / 2;
    let n_in = n_samples - n_out;

    let records = Array2::from_shape_fn((n_samples, 2), |(i, j)| {
        let (t, r) = if i < n_out {
            (2.0 * PI * i as f64 / n_out as f64, 1.0)
        } else {
            (2.0 * PI * (i - n_out) as f64 / n_in as f64, factor)
        };
        if j == 0 {
            r * t.cos()
        } else {
            r * t.sin()
        }
    });
    let targets = Array1::from_shape_fn(n_samples, |i| if i < n_out { 0 } else { 1 });

    let (mut records, targets) = shuffle_rows(records, targets, &mut rng);
    add_noise(&mut records, noise, &mut rng);
    Dataset::new(records, targets)
}

/// Generator settings shared by the three demo datasets.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DatasetConfig {
    pub n_samples: usize,
    pub seed: u64,
    pub class_sep: f64,
    pub flip_y: f64,
    pub moons_noise: f64,
    pub circles_noise: f64,
    pub circles_factor: f64,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        DatasetConfig {
            n_samples: 300,
            seed: 42,
            class_sep: 1.0,
            flip_y: 0.01,
            moons_noise: 0.2,
            circles_noise: 0.1,
            circles_factor: 0.5,
        }
    }
}

/// The three demo datasets.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SyntheticDataset {
    Linear,
    Moons,
    Circles,
}

impl SyntheticDataset {
    pub const ALL: [SyntheticDataset; 3] = [
        SyntheticDataset::Linear,
        SyntheticDataset::Moons,
        SyntheticDataset::Circles,
    ];

    /// Short name, used in output file names.
    pub fn name(self) -> &'static str {
        match self {
            SyntheticDataset::Linear => "linear",
            SyntheticDataset::Moons => "moons",
            SyntheticDataset::Circles => "circles",
        }
    }

    /// Human readable title, used in figure captions.
    pub fn title(self) -> &'static str {
        match self {
            SyntheticDataset::Linear => "Linearly Separable",
            SyntheticDataset::Moons => "Moons",
            SyntheticDataset::Circles => "Circles",
        }
    }

    pub fn generate(self, config: &DatasetConfig) -> Result<Dataset> {
        match self {
            SyntheticDataset::Linear => make_classification(
                &ClassificationParams {
                    n_samples: config.n_samples,
                    class_sep: config.class_sep,
                    flip_y: config.flip_y,
                },
                config.seed,
            ),
            SyntheticDataset::Moons => make_moons(config.n_samples, config.moons_noise, config.seed),
            SyntheticDataset::Circles => make_circles(
                config.n_samples,
                config.circles_noise,
                config.circles_factor,
                config.seed,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn generators_are_deterministic() {
        let config = DatasetConfig::default();
        for kind in SyntheticDataset::ALL.iter() {
            let a = kind.generate(&config).unwrap();
            let b = kind.generate(&config).unwrap();
            assert_eq!(a, b, "{} differs between runs", kind.name());
        }
    }

    #[test]
    fn different_seeds_differ() {
        let a = make_moons(100, 0.1, 1).unwrap();
        let b = make_moons(100, 0.1, 2).unwrap();
        assert_ne!(a.records, b.records);
    }

    #[test]
    fn default_shapes_and_balance() {
        let config = DatasetConfig::default();
        for kind in [SyntheticDataset::Moons, SyntheticDataset::Circles].iter() {
            let ds = kind.generate(&config).unwrap();
            assert_eq!(ds.records.shape(), &[300, 2]);
            assert_eq!(ds.class_counts(), vec![150, 150]);
        }

        let linear = SyntheticDataset::Linear.generate(&config).unwrap();
        assert_eq!(linear.nsamples(), 300);
        assert_eq!(linear.nclasses(), 2);
    }

    #[test]
    fn odd_sample_counts_favour_class_one() {
        let ds = make_circles(7, 0.0, 0.5, 0).unwrap();
        assert_eq!(ds.class_counts(), vec![3, 4]);
    }

    #[test]
    fn noiseless_circles_have_exact_radii() {
        let ds = make_circles(40, 0.0, 0.3, 9).unwrap();
        for (row, &label) in ds.records.outer_iter().zip(ds.targets.iter()) {
            let r = (row[0] * row[0] + row[1] * row[1]).sqrt();
            let expected = if label == 0 { 1.0 } else { 0.3 };
            assert_abs_diff_eq!(r, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn noiseless_moons_lie_on_arcs() {
        let ds = make_moons(50, 0.0, 5).unwrap();
        for (row, &label) in ds.records.outer_iter().zip(ds.targets.iter()) {
            let (cx, cy) = if label == 0 { (0.0, 0.0) } else { (1.0, 0.5) };
            let r = ((row[0] - cx).powi(2) + (row[1] - cy).powi(2)).sqrt();
            assert_abs_diff_eq!(r, 1.0, epsilon = 1e-12);
            if label == 0 {
                assert!(row[1] >= -1e-12);
            } else {
                assert!(row[1] <= 0.5 + 1e-12);
            }
        }
    }

    #[test]
    fn classification_clusters_sit_near_centroids() {
        let params = ClassificationParams {
            n_samples: 400,
            class_sep: 3.0,
            flip_y: 0.0,
        };
        let ds = make_classification(&params, 11).unwrap();
        let mut means = [[0.0; 2]; 2];
        let counts = ds.class_counts();
        for (row, &label) in ds.records.outer_iter().zip(ds.targets.iter()) {
            means[label][0] += row[0] / counts[label] as f64;
            means[label][1] += row[1] / counts[label] as f64;
        }
        for m in means.iter() {
            for c in m.iter() {
                assert!((c.abs() - 3.0).abs() < 0.5, "centroid coordinate {}", c);
            }
        }
        assert!(means[0] != means[1]);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        assert!(make_moons(1, 0.1, 0).is_err());
        assert!(make_moons(10, -0.1, 0).is_err());
        assert!(make_circles(10, 0.1, 1.0, 0).is_err());
        let params = ClassificationParams {
            flip_y: 1.5,
            ..ClassificationParams::default()
        };
        assert!(make_classification(&params, 0).is_err());
    }
}
