use super::errors::PopulationConfigError;

use serde::{Deserialize, Serialize};

use std::num::NonZeroUsize;

/// Configuration data for population generation
/// and evolution.
///
/// # Note
/// Fitness is minimized. [`replacement_fraction`] must be
/// in (0.0, 1.0] and [`mutation_rate`] in [0.0, 1.0];
/// [`validate`] checks both.
///
/// [`replacement_fraction`]: PopulationConfig::replacement_fraction
/// [`mutation_rate`]: PopulationConfig::mutation_rate
/// [`validate`]: PopulationConfig::validate
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Size of the population.
    pub size: NonZeroUsize,
    /// Fraction of the population replaced by
    /// offspring each generation.
    pub replacement_fraction: f64,
    /// Chance that an offspring is mutated.
    pub mutation_rate: f64,
    /// Top n of the population which is never
    /// replaced by offspring.
    pub elitism: usize,
    /// How parents are chosen for crossover.
    pub selection: SelectionPolicy,
    /// Seed of the population's random number generator.
    pub seed: u64,
    /// Whether fitness is evaluated on all available
    /// threads. Results are identical either way.
    pub parallel_evaluation: bool,
}

impl PopulationConfig {
    /// Returns a "zero-valued" default configuration.
    /// All values are 0, or in the case of
    /// `NonZeroUsize`s, 1. Selection is by
    /// binary tournament.
    ///
    /// # Note
    /// A replacement fraction of 0 is not valid, so this
    /// value is meant as a way to abbreviate configuration
    /// instantiation.
    ///
    /// # Examples
    /// ```
    /// use eann::PopulationConfig;
    /// use std::num::NonZeroUsize;
    ///
    /// let config = PopulationConfig {
    ///     size: NonZeroUsize::new(20).unwrap(),
    ///     replacement_fraction: 0.5,
    ///     mutation_rate: 0.1,
    ///     ..PopulationConfig::zero()
    /// };
    /// assert!(config.validate().is_ok());
    /// ```
    pub const fn zero() -> PopulationConfig {
        PopulationConfig {
            // SAFETY: 1 is a valid NonZeroUsize.
            size: unsafe { NonZeroUsize::new_unchecked(1) },
            replacement_fraction: 0.0,
            mutation_rate: 0.0,
            elitism: 0,
            selection: SelectionPolicy::Tournament {
                // SAFETY: 2 is a valid NonZeroUsize.
                size: unsafe { NonZeroUsize::new_unchecked(2) },
            },
            seed: 0,
            parallel_evaluation: false,
        }
    }

    /// Checks that all values are within their valid ranges.
    ///
    /// # Errors
    /// Returns the first out-of-range value found.
    pub fn validate(&self) -> Result<(), PopulationConfigError> {
        if !(self.replacement_fraction > 0.0 && self.replacement_fraction <= 1.0) {
            return Err(PopulationConfigError::ReplacementFraction(
                self.replacement_fraction,
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(PopulationConfigError::MutationRate(self.mutation_rate));
        }
        if self.elitism >= self.size.get() {
            return Err(PopulationConfigError::Elitism {
                elitism: self.elitism,
                size: self.size.get(),
            });
        }
        Ok(())
    }

    /// Number of offspring produced each generation:
    /// `round(replacement_fraction × size)`, at least 1,
    /// and never eating into the elite.
    ///
    /// # Examples
    /// ```
    /// use eann::PopulationConfig;
    /// use std::num::NonZeroUsize;
    ///
    /// let config = PopulationConfig {
    ///     size: NonZeroUsize::new(20).unwrap(),
    ///     replacement_fraction: 0.5,
    ///     ..PopulationConfig::zero()
    /// };
    /// assert_eq!(config.offspring_count(), 10);
    /// ```
    pub fn offspring_count(&self) -> usize {
        let size = self.size.get();
        let allotted = (self.replacement_fraction * size as f64).round() as usize;
        allotted.clamp(1, size.saturating_sub(self.elitism).max(1))
    }
}

/// Parent selection schemes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionPolicy {
    /// The best of `size` uniformly drawn members
    /// (drawn with replacement).
    Tournament { size: NonZeroUsize },
    /// Members are drawn with probability proportional
    /// to the inverse of their fitness.
    FitnessProportionate,
}

/// Stopping criteria for [`Population::run`].
///
/// [`Population::run`]: crate::Population::run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// Run exactly this many generations.
    Generations(usize),
    /// Stop once the best fitness has not improved for
    /// `patience` generations, or after `max_generations`.
    Stagnation {
        patience: NonZeroUsize,
        max_generations: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(size: usize, replacement_fraction: f64, elitism: usize) -> PopulationConfig {
        PopulationConfig {
            size: NonZeroUsize::new(size).unwrap(),
            replacement_fraction,
            elitism,
            ..PopulationConfig::zero()
        }
    }

    #[test]
    fn validate() {
        assert!(config(10, 0.5, 0).validate().is_ok());
        assert!(config(10, 1.0, 9).validate().is_ok());
        assert!(matches!(
            config(10, 0.0, 0).validate(),
            Err(PopulationConfigError::ReplacementFraction(_))
        ));
        assert!(matches!(
            config(10, 1.5, 0).validate(),
            Err(PopulationConfigError::ReplacementFraction(_))
        ));
        assert!(matches!(
            config(10, f64::NAN, 0).validate(),
            Err(PopulationConfigError::ReplacementFraction(_))
        ));
        assert!(matches!(
            config(10, 0.5, 10).validate(),
            Err(PopulationConfigError::Elitism { elitism: 10, size: 10 })
        ));
        let mut bad_rate = config(10, 0.5, 0);
        bad_rate.mutation_rate = -0.1;
        assert!(matches!(
            bad_rate.validate(),
            Err(PopulationConfigError::MutationRate(_))
        ));
    }

    #[test]
    fn offspring_count() {
        assert_eq!(config(20, 0.5, 0).offspring_count(), 10);
        assert_eq!(config(20, 0.33, 0).offspring_count(), 7);
        assert_eq!(config(10, 0.01, 0).offspring_count(), 1);
        assert_eq!(config(10, 1.0, 0).offspring_count(), 10);
        assert_eq!(config(10, 1.0, 3).offspring_count(), 7);
        assert_eq!(config(1, 1.0, 0).offspring_count(), 1);
    }

    #[test]
    fn serde_roundtrip() {
        let config = PopulationConfig {
            selection: SelectionPolicy::FitnessProportionate,
            ..config(20, 0.5, 1)
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<PopulationConfig>(&json).unwrap(), config);
    }
}
