//! A genetic search driver for evolving neural network weights
//! (and, optionally, hidden layer sizes) instead of training
//! them by gradient descent.
//!
//! Hypotheses are arbitrary user-defined genomes implementing
//! the [`Hypothesis`] trait; fitness is an error to be minimized.
//! A [`Population`] breeds them generation after generation:
//! parents are selected, recombined and mutated, and offspring
//! replace the weakest members. All randomness comes from a single
//! generator seeded by the [`PopulationConfig`], so runs are
//! reproducible. Generational snapshots are supported through
//! the [`logging`] module.
//!
//! Feed-forward network hypotheses, with fixed or variable hidden
//! layer sizes, are supplied by the `eann-nn` crate.
//!
//! # Example usage: evolving a small classifier, using `eann-nn`
//! ```
//! use eann::{Population, PopulationConfig, Termination};
//! use eann_nn::data::{DataSet, Example};
//! use eann_nn::hypotheses::{AnnHypothesis, EvaluationContext, GeneticConfig, Topology};
//! use eann_nn::networks::NetworkConfig;
//! use std::num::NonZeroUsize;
//! use std::sync::Arc;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Label is true iff the first attribute exceeds the second.
//!     let training_set = DataSet::new(
//!         [(0.9, 0.1), (0.2, 0.8), (0.7, 0.3), (0.1, 0.6), (1.0, 0.0), (0.3, 0.9)]
//!             .iter()
//!             .map(|&(a, b)| Example::new(vec![a, b], a > b))
//!             .collect(),
//!     )?;
//!
//!     let genetic_config = GeneticConfig {
//!         input_count: NonZeroUsize::new(2).unwrap(),
//!         output_count: NonZeroUsize::new(1).unwrap(),
//!         topology: Topology::Variable,
//!         hidden_count: NonZeroUsize::new(4).unwrap(),
//!         max_hidden_count: NonZeroUsize::new(12).unwrap(),
//!         weight_bound: 1.0,
//!         mutation_power: 1.0,
//!     };
//!     let context = EvaluationContext::new(
//!         genetic_config,
//!         NetworkConfig::default(),
//!         Arc::new(training_set),
//!     )?;
//!
//!     let population_config = PopulationConfig {
//!         size: NonZeroUsize::new(20).unwrap(),
//!         replacement_fraction: 0.5,
//!         mutation_rate: 0.1,
//!         seed: 7,
//!         ..PopulationConfig::zero()
//!     };
//!
//!     let mut population = Population::<AnnHypothesis>::new(population_config, context)?;
//!     let initial = population.best_fitness();
//!     population.run(Termination::Generations(25), |p| {
//!         println!("generation {}: {:?}", p.generation(), p.best_fitness());
//!     })?;
//!     assert!(population.best_fitness() <= initial);
//!     Ok(())
//! }
//! ```

mod hypothesis;
pub mod logging;
mod populations;

pub use hypothesis::*;
pub use populations::*;
