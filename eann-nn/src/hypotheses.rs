//! Neural network hypotheses: genomes holding the weights
//! of a single hidden layer, scored by injecting them into
//! a throwaway network and measuring its RMS error on the
//! training set.
//!
//! [`FixedHypothesis`] keeps the hidden layer size constant,
//! [`VariableHypothesis`] lets crossover change it, and
//! [`AnnHypothesis`] picks between them at run time
//! according to the configured [`Topology`].
mod config;
mod context;
mod errors;
mod evaluation;
mod fixed;
mod representation;
mod variable;

pub use config::{GeneticConfig, Topology};
pub use context::EvaluationContext;
pub use errors::{ContextError, GenomeError};
pub use evaluation::{build_network, truncate_fitness, FITNESS_DECIMALS};
pub use fixed::FixedHypothesis;
pub use representation::{HiddenNeuron, Representation};
pub use variable::VariableHypothesis;

use crate::networks::NeuralNet;

use eann::Hypothesis;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A hypothesis of either topology.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub enum AnnHypothesis {
    Fixed(FixedHypothesis),
    Variable(VariableHypothesis),
}

impl AnnHypothesis {
    pub fn hidden_count(&self) -> usize {
        self.genome().hidden_count()
    }

    /// The genome, without copying it.
    pub fn genome(&self) -> &Representation {
        match self {
            Self::Fixed(h) => h.genome(),
            Self::Variable(h) => h.genome(),
        }
    }

    pub fn topology(&self) -> Topology {
        match self {
            Self::Fixed(_) => Topology::Fixed,
            Self::Variable(_) => Topology::Variable,
        }
    }

    /// Builds the network this hypothesis encodes.
    ///
    /// # Errors
    /// Returns an error if the genome doesn't fit the context.
    pub fn to_network(&self, context: &EvaluationContext) -> Result<NeuralNet, GenomeError> {
        build_network(self.genome(), context)
    }

    /// Returns the fraction of the training set classified correctly.
    ///
    /// # Errors
    /// Returns an error if the scoring network can't be built.
    pub fn training_accuracy(&self, context: &EvaluationContext) -> Result<f64, GenomeError> {
        match self {
            Self::Fixed(h) => h.training_accuracy(context),
            Self::Variable(h) => h.training_accuracy(context),
        }
    }

    /// Returns the fraction of the evaluation set classified
    /// correctly, if the context has one.
    ///
    /// # Errors
    /// Returns an error if the scoring network can't be built.
    pub fn evaluation_accuracy(&self, context: &EvaluationContext) -> Result<Option<f64>, GenomeError> {
        match self {
            Self::Fixed(h) => h.evaluation_accuracy(context),
            Self::Variable(h) => h.evaluation_accuracy(context),
        }
    }
}

impl Hypothesis for AnnHypothesis {
    type Context = EvaluationContext;
    type Representation = Representation;
    type Error = GenomeError;

    /// Returns a random hypothesis of the configured [`Topology`].
    fn random<R: Rng + ?Sized>(context: &EvaluationContext, rng: &mut R) -> AnnHypothesis {
        match context.genetic_config().topology {
            Topology::Fixed => Self::Fixed(FixedHypothesis::random(context, rng)),
            Topology::Variable => Self::Variable(VariableHypothesis::random(context, rng)),
        }
    }

    fn randomize<R: Rng + ?Sized>(&mut self, context: &EvaluationContext, rng: &mut R) {
        match self {
            Self::Fixed(h) => h.randomize(context, rng),
            Self::Variable(h) => h.randomize(context, rng),
        }
    }

    fn evaluate_fitness(&mut self, context: &EvaluationContext) -> Result<f64, GenomeError> {
        match self {
            Self::Fixed(h) => h.evaluate_fitness(context),
            Self::Variable(h) => h.evaluate_fitness(context),
        }
    }

    fn fitness(&self) -> Option<f64> {
        match self {
            Self::Fixed(h) => h.fitness(),
            Self::Variable(h) => h.fitness(),
        }
    }

    /// Crosses hypotheses of the same topology with their own operator.
    /// Mixed pairs are crossed with the variable-size operator, and
    /// produce a variable hypothesis.
    fn crossover<R: Rng + ?Sized>(
        &self,
        other: &AnnHypothesis,
        context: &EvaluationContext,
        rng: &mut R,
    ) -> AnnHypothesis {
        match (self, other) {
            (Self::Fixed(h1), Self::Fixed(h2)) => Self::Fixed(h1.crossover(h2, context, rng)),
            (Self::Variable(h1), Self::Variable(h2)) => {
                Self::Variable(h1.crossover(h2, context, rng))
            }
            _ => Self::Variable(VariableHypothesis::unscored(variable::random_splice(
                self.genome(),
                other.genome(),
                context,
                rng,
            ))),
        }
    }

    fn mutate<R: Rng + ?Sized>(&mut self, context: &EvaluationContext, rng: &mut R) {
        match self {
            Self::Fixed(h) => h.mutate(context, rng),
            Self::Variable(h) => h.mutate(context, rng),
        }
    }

    fn representation(&self) -> Representation {
        self.genome().clone()
    }

    fn set_representation(
        &mut self,
        representation: Representation,
        context: &EvaluationContext,
    ) -> Result<(), GenomeError> {
        match self {
            Self::Fixed(h) => h.set_representation(representation, context),
            Self::Variable(h) => h.set_representation(representation, context),
        }
    }

    fn size(&self) -> usize {
        self.hidden_count()
    }
}

impl From<FixedHypothesis> for AnnHypothesis {
    fn from(h: FixedHypothesis) -> AnnHypothesis {
        AnnHypothesis::Fixed(h)
    }
}

impl From<VariableHypothesis> for AnnHypothesis {
    fn from(h: VariableHypothesis) -> AnnHypothesis {
        AnnHypothesis::Variable(h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DataSet, Example};
    use crate::networks::NetworkConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::num::NonZeroUsize;
    use std::sync::Arc;

    fn context(topology: Topology) -> EvaluationContext {
        EvaluationContext::new(
            GeneticConfig {
                input_count: NonZeroUsize::new(2).unwrap(),
                topology,
                hidden_count: NonZeroUsize::new(3).unwrap(),
                max_hidden_count: NonZeroUsize::new(5).unwrap(),
                weight_bound: 1.0,
                mutation_power: 1.0,
                ..GeneticConfig::zero()
            },
            NetworkConfig::default(),
            Arc::new(
                DataSet::new(vec![
                    Example::new(vec![0.0, 1.0], true),
                    Example::new(vec![1.0, 0.0], false),
                    Example::new(vec![1.0, 1.0], true),
                ])
                .unwrap(),
            ),
        )
        .unwrap()
    }

    #[test]
    fn random_follows_topology() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        for topology in [Topology::Fixed, Topology::Variable] {
            let hypothesis = AnnHypothesis::random(&context(topology), &mut rng);
            assert_eq!(hypothesis.topology(), topology);
        }
    }

    #[test]
    fn same_topology_crossover() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for topology in [Topology::Fixed, Topology::Variable] {
            let context = context(topology);
            let first = AnnHypothesis::random(&context, &mut rng);
            let second = AnnHypothesis::random(&context, &mut rng);
            let child = first.crossover(&second, &context, &mut rng);
            assert_eq!(child.topology(), topology);
            assert_eq!(child.fitness(), None);
            if topology == Topology::Fixed {
                assert_eq!(child.hidden_count(), 3);
            }
        }
    }

    #[test]
    fn mixed_crossover_is_variable() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let context = context(Topology::Variable);
        let fixed = AnnHypothesis::from(FixedHypothesis::random(&context, &mut rng));
        let variable = AnnHypothesis::random(&context, &mut rng);
        for (first, second) in [(&fixed, &variable), (&variable, &fixed)] {
            for _ in 0..20 {
                let child = first.crossover(second, &context, &mut rng);
                assert_eq!(child.topology(), Topology::Variable);
                assert!((2..=5).contains(&child.hidden_count()));
                assert!(child.genome().validate(context.genetic_config(), 5).is_ok());
            }
        }
    }

    #[test]
    fn network_matches_fitness() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let context = context(Topology::Variable);
        let mut hypothesis = AnnHypothesis::random(&context, &mut rng);
        let fitness = hypothesis.evaluate_fitness(&context).unwrap();
        let mut network = hypothesis.to_network(&context).unwrap();
        assert_eq!(network.layer_sizes(), [2, hypothesis.hidden_count(), 1]);
        let rms = network.compute_rms(context.training_set()).unwrap();
        assert_eq!(truncate_fitness(rms), fitness);
        assert_eq!(hypothesis.size(), hypothesis.hidden_count());
        assert_eq!(hypothesis.evaluation_accuracy(&context).unwrap(), None);
        let accuracy = hypothesis.training_accuracy(&context).unwrap();
        assert!((0.0..=1.0).contains(&accuracy));
    }

    #[test]
    fn serde_roundtrip() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let context = context(Topology::Fixed);
        let mut hypothesis = AnnHypothesis::random(&context, &mut rng);
        hypothesis.evaluate_fitness(&context).unwrap();
        let serialized = serde_json::to_string(&hypothesis).unwrap();
        assert_eq!(
            serde_json::from_str::<AnnHypothesis>(&serialized).unwrap(),
            hypothesis
        );
    }
}
