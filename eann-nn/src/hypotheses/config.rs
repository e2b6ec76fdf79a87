use serde::{Deserialize, Serialize};

use std::num::NonZeroUsize;

/// Whether every hypothesis in a run keeps the same
/// number of hidden neurons, or carries its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Topology {
    /// All hypotheses have exactly [`hidden_count`] hidden neurons.
    ///
    /// [`hidden_count`]: GeneticConfig::hidden_count
    Fixed,
    /// Hypotheses start with between 1 and [`hidden_count`]
    /// hidden neurons, and crossover may grow or shrink them
    /// up to [`max_hidden_count`].
    ///
    /// [`hidden_count`]: GeneticConfig::hidden_count
    /// [`max_hidden_count`]: GeneticConfig::max_hidden_count
    Variable,
}

/// Configuration data for hypothesis generation
/// and genetic operators.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneticConfig {
    /// Number of network inputs; must match the
    /// attribute count of the training set.
    pub input_count: NonZeroUsize,
    /// Number of network outputs.
    pub output_count: NonZeroUsize,
    pub topology: Topology,
    /// Hidden neuron count of [`Fixed`] hypotheses, or the
    /// upper bound of the initial count of [`Variable`] ones.
    ///
    /// [`Fixed`]: Topology::Fixed
    /// [`Variable`]: Topology::Variable
    pub hidden_count: NonZeroUsize,
    /// Largest hidden layer crossover may produce.
    /// Cannot exceed the network's per-layer maximum.
    pub max_hidden_count: NonZeroUsize,
    /// Weights are randomized uniformly over ±`weight_bound`.
    pub weight_bound: f64,
    /// Standard deviation of the Gaussian noise added by mutation.
    pub mutation_power: f64,
}

impl GeneticConfig {
    /// Returns a "zero-valued" default configuration.
    /// All values are 0, or in the case of `NonZeroUsize`s, 1.
    /// The topology is [`Fixed`], and [`mutation_power`] is 1.
    ///
    /// [`mutation_power`]: GeneticConfig::mutation_power
    ///
    /// [`Fixed`]: Topology::Fixed
    ///
    /// # Note
    /// This value is not suitable for use in most experiments.
    /// It is meant as a way to fill in unused values during
    /// configuration instantiation.
    ///
    /// # Examples
    /// ```
    /// use eann_nn::hypotheses::{GeneticConfig, Topology};
    /// use std::num::NonZeroUsize;
    ///
    /// let config = GeneticConfig {
    ///     input_count: NonZeroUsize::new(4).unwrap(),
    ///     topology: Topology::Variable,
    ///     weight_bound: 1.0,
    ///     ..GeneticConfig::zero()
    /// };
    /// assert_eq!(config.output_count.get(), 1);
    /// ```
    pub const fn zero() -> GeneticConfig {
        GeneticConfig {
            // SAFETY: 1 is a valid NonZeroUsize.
            input_count: unsafe { NonZeroUsize::new_unchecked(1) },
            output_count: unsafe { NonZeroUsize::new_unchecked(1) },
            topology: Topology::Fixed,
            hidden_count: unsafe { NonZeroUsize::new_unchecked(1) },
            max_hidden_count: unsafe { NonZeroUsize::new_unchecked(1) },
            weight_bound: 0.0,
            mutation_power: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_roundtrip() {
        let config = GeneticConfig {
            input_count: NonZeroUsize::new(4).unwrap(),
            topology: Topology::Variable,
            hidden_count: NonZeroUsize::new(3).unwrap(),
            max_hidden_count: NonZeroUsize::new(10).unwrap(),
            weight_bound: 1.0,
            mutation_power: 0.5,
            ..GeneticConfig::zero()
        };
        let serialized = serde_json::to_string(&config).unwrap();
        assert_eq!(
            serde_json::from_str::<GeneticConfig>(&serialized).unwrap(),
            config
        );
        assert!(serde_json::from_str::<GeneticConfig>(
            &serialized.replace("\"input_count\":4", "\"input_count\":0")
        )
        .is_err());
    }

    #[test]
    fn zero_keeps_unit_mutation_power() {
        let config = GeneticConfig::zero();
        assert_eq!(config.mutation_power, 1.0);
        assert_eq!(config.weight_bound, 0.0);
        assert_eq!(config.hidden_count.get(), 1);
    }
}
