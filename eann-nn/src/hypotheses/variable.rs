use super::evaluation::{accuracy, check_fitness, score};
use super::{EvaluationContext, FixedHypothesis, GenomeError, Representation};

use eann::Hypothesis;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A hypothesis carrying its own hidden neuron count,
/// which crossover may grow or shrink.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(
    try_from = "(Representation, Option<f64>)",
    into = "(Representation, Option<f64>)"
)]
pub struct VariableHypothesis {
    representation: Representation,
    fitness: Option<f64>,
}

impl VariableHypothesis {
    /// Two-point crossover: the child takes neurons `0..=split1` from
    /// `self`, followed by neurons `split2..` from `other`, for
    /// `split1 + 1 + (h2 - split2)` hidden neurons in total.
    ///
    /// Splits are clamped to the last hidden neuron of their parent.
    /// Children larger than [`max_hidden_count`] keep their first
    /// `max_hidden_count` neurons.
    ///
    /// [`max_hidden_count`]: super::GeneticConfig::max_hidden_count
    ///
    /// # Examples
    /// ```
    /// use eann::Hypothesis;
    /// use eann_nn::data::{DataSet, Example};
    /// use eann_nn::hypotheses::{EvaluationContext, GeneticConfig, HiddenNeuron, Representation, Topology, VariableHypothesis};
    /// use eann_nn::networks::NetworkConfig;
    /// use rand::SeedableRng;
    /// use rand_chacha::ChaCha8Rng;
    /// use std::num::NonZeroUsize;
    /// use std::sync::Arc;
    ///
    /// let context = EvaluationContext::new(
    ///     GeneticConfig {
    ///         topology: Topology::Variable,
    ///         hidden_count: NonZeroUsize::new(5).unwrap(),
    ///         max_hidden_count: NonZeroUsize::new(10).unwrap(),
    ///         ..GeneticConfig::zero()
    ///     },
    ///     NetworkConfig::default(),
    ///     Arc::new(DataSet::new(vec![Example::new(vec![1.0], true)]).unwrap()),
    /// ).unwrap();
    ///
    /// let mut rng = ChaCha8Rng::seed_from_u64(0);
    /// let mut first = VariableHypothesis::random(&context, &mut rng);
    /// let mut second = VariableHypothesis::random(&context, &mut rng);
    /// let neurons = |n| Representation::new(vec![HiddenNeuron::new(vec![0.0], vec![0.0]); n]);
    /// first.set_representation(neurons(3), &context).unwrap();
    /// second.set_representation(neurons(5), &context).unwrap();
    ///
    /// let child = first.crossover_at(&second, 2, 1, &context);
    /// assert_eq!(child.hidden_count(), 2 + 1 + (5 - 1));
    /// ```
    pub fn crossover_at(
        &self,
        other: &VariableHypothesis,
        split1: usize,
        split2: usize,
        context: &EvaluationContext,
    ) -> VariableHypothesis {
        VariableHypothesis {
            representation: splice_capped(
                &self.representation,
                split1,
                &other.representation,
                split2,
                context,
            ),
            fitness: None,
        }
    }

    pub(super) fn unscored(representation: Representation) -> VariableHypothesis {
        VariableHypothesis {
            representation,
            fitness: None,
        }
    }

    pub fn hidden_count(&self) -> usize {
        self.representation.hidden_count()
    }

    /// The genome, without copying it.
    pub fn genome(&self) -> &Representation {
        &self.representation
    }

    /// Returns the fraction of the training set classified correctly.
    ///
    /// # Errors
    /// Returns an error if the scoring network can't be built.
    pub fn training_accuracy(&self, context: &EvaluationContext) -> Result<f64, GenomeError> {
        accuracy(&self.representation, context, context.training_set())
    }

    /// Returns the fraction of the evaluation set classified
    /// correctly, if the context has one.
    ///
    /// # Errors
    /// Returns an error if the scoring network can't be built.
    pub fn evaluation_accuracy(&self, context: &EvaluationContext) -> Result<Option<f64>, GenomeError> {
        context
            .evaluation_set()
            .map(|set| accuracy(&self.representation, context, set))
            .transpose()
    }
}

/// Draws both split points and splices the parents' genomes.
pub(super) fn random_splice<R: Rng + ?Sized>(
    first: &Representation,
    second: &Representation,
    context: &EvaluationContext,
    rng: &mut R,
) -> Representation {
    let split1 = rng.gen_range(0..first.hidden_count());
    let split2 = rng.gen_range(0..second.hidden_count());
    splice_capped(first, split1, second, split2, context)
}

fn splice_capped(
    first: &Representation,
    split1: usize,
    second: &Representation,
    split2: usize,
    context: &EvaluationContext,
) -> Representation {
    let split1 = split1.min(first.hidden_count() - 1);
    let split2 = split2.min(second.hidden_count() - 1);
    let mut child = Representation::splice(first, split1, second, split2);

    let cap = context.genetic_config().max_hidden_count.get();
    if child.hidden_count() > cap {
        log::debug!(
            "crossover produced {} hidden neurons, truncating to {}",
            child.hidden_count(),
            cap
        );
        child.truncate(cap);
    }
    child
}

impl From<FixedHypothesis> for VariableHypothesis {
    /// Keeps the genome and its fitness; only
    /// the genetic operators change.
    fn from(fixed: FixedHypothesis) -> VariableHypothesis {
        VariableHypothesis {
            representation: fixed.representation,
            fitness: fixed.fitness,
        }
    }
}

impl TryFrom<(Representation, Option<f64>)> for VariableHypothesis {
    type Error = GenomeError;

    fn try_from(
        (representation, fitness): (Representation, Option<f64>),
    ) -> Result<VariableHypothesis, GenomeError> {
        Ok(VariableHypothesis {
            representation,
            fitness: check_fitness(fitness)?,
        })
    }
}

impl From<VariableHypothesis> for (Representation, Option<f64>) {
    fn from(h: VariableHypothesis) -> (Representation, Option<f64>) {
        (h.representation, h.fitness)
    }
}

impl Hypothesis for VariableHypothesis {
    type Context = EvaluationContext;
    type Representation = Representation;
    type Error = GenomeError;

    /// Returns a hypothesis with between 1 and
    /// [`hidden_count`] hidden neurons.
    ///
    /// [`hidden_count`]: super::GeneticConfig::hidden_count
    fn random<R: Rng + ?Sized>(context: &EvaluationContext, rng: &mut R) -> VariableHypothesis {
        let config = context.genetic_config();
        let count = rng.gen_range(1..=config.hidden_count.get());
        VariableHypothesis {
            representation: Representation::random(count, config, rng),
            fitness: None,
        }
    }

    fn randomize<R: Rng + ?Sized>(&mut self, context: &EvaluationContext, rng: &mut R) {
        self.representation
            .randomize(context.genetic_config().weight_bound, rng);
        self.fitness = None;
    }

    fn evaluate_fitness(&mut self, context: &EvaluationContext) -> Result<f64, GenomeError> {
        let fitness = score(&self.representation, context)?;
        self.fitness = Some(fitness);
        Ok(fitness)
    }

    fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    fn crossover<R: Rng + ?Sized>(
        &self,
        other: &VariableHypothesis,
        context: &EvaluationContext,
        rng: &mut R,
    ) -> VariableHypothesis {
        VariableHypothesis {
            representation: random_splice(&self.representation, &other.representation, context, rng),
            fitness: None,
        }
    }

    fn mutate<R: Rng + ?Sized>(&mut self, context: &EvaluationContext, rng: &mut R) {
        self.representation
            .mutate(context.genetic_config().mutation_power, rng);
        self.fitness = None;
    }

    fn representation(&self) -> Representation {
        self.representation.clone()
    }

    /// # Errors
    /// Returns an error if the representation is malformed,
    /// or larger than [`max_hidden_count`].
    ///
    /// [`max_hidden_count`]: super::GeneticConfig::max_hidden_count
    fn set_representation(
        &mut self,
        representation: Representation,
        context: &EvaluationContext,
    ) -> Result<(), GenomeError> {
        let config = context.genetic_config();
        representation.validate(config, config.max_hidden_count.get())?;
        self.representation = representation;
        self.fitness = None;
        Ok(())
    }

    fn size(&self) -> usize {
        self.hidden_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DataSet, Example};
    use crate::hypotheses::{GeneticConfig, HiddenNeuron, Topology};
    use crate::networks::NetworkConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::num::NonZeroUsize;
    use std::sync::Arc;

    fn context(hidden_count: usize, max_hidden_count: usize) -> EvaluationContext {
        EvaluationContext::new(
            GeneticConfig {
                input_count: NonZeroUsize::new(3).unwrap(),
                topology: Topology::Variable,
                hidden_count: NonZeroUsize::new(hidden_count).unwrap(),
                max_hidden_count: NonZeroUsize::new(max_hidden_count).unwrap(),
                weight_bound: 1.0,
                mutation_power: 1.0,
                ..GeneticConfig::zero()
            },
            NetworkConfig::default(),
            Arc::new(
                DataSet::new(vec![
                    Example::new(vec![0.0, 0.5, 1.0], true),
                    Example::new(vec![1.0, 0.5, 0.0], false),
                ])
                .unwrap(),
            ),
        )
        .unwrap()
    }

    /// A hypothesis whose neurons are tagged `tag, tag + 1, ...`
    /// through their first incoming weight.
    fn tagged(count: usize, tag: f64, context: &EvaluationContext) -> VariableHypothesis {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut hypothesis = VariableHypothesis::random(context, &mut rng);
        hypothesis
            .set_representation(
                Representation::new(
                    (0..count)
                        .map(|i| HiddenNeuron::new(vec![tag + i as f64, 0.0, 0.0], vec![0.0]))
                        .collect(),
                ),
                context,
            )
            .unwrap();
        hypothesis
    }

    fn tags(hypothesis: &VariableHypothesis) -> Vec<f64> {
        hypothesis
            .genome()
            .hidden_neurons()
            .iter()
            .map(|n| n.incoming()[0])
            .collect()
    }

    #[test]
    fn random_counts_within_bound() {
        let context = context(5, 10);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let counts: Vec<usize> = (0..200)
            .map(|_| VariableHypothesis::random(&context, &mut rng).hidden_count())
            .collect();
        assert!(counts.iter().all(|&c| (1..=5).contains(&c)));
        assert!(counts.contains(&1));
        assert!(counts.contains(&5));
    }

    #[test]
    fn crossover_count_formula() {
        let context = context(5, 60);
        for h1 in 1..=5 {
            for h2 in 1..=5 {
                let first = tagged(h1, 100.0, &context);
                let second = tagged(h2, 200.0, &context);
                for s1 in 0..h1 {
                    for s2 in 0..h2 {
                        let child = first.crossover_at(&second, s1, s2, &context);
                        assert_eq!(child.hidden_count(), s1 + 1 + (h2 - s2));
                        assert!(child.hidden_count() >= 2);
                        let expected: Vec<f64> = (0..=s1)
                            .map(|i| 100.0 + i as f64)
                            .chain((s2..h2).map(|i| 200.0 + i as f64))
                            .collect();
                        assert_eq!(tags(&child), expected);
                    }
                }
            }
        }
    }

    #[test]
    fn self_crossover_reads_snapshot() {
        let context = context(5, 60);
        let parent = tagged(4, 0.0, &context);
        let child = parent.crossover_at(&parent, 3, 0, &context);
        assert_eq!(tags(&child), [0.0, 1.0, 2.0, 3.0, 0.0, 1.0, 2.0, 3.0]);
        assert_eq!(tags(&parent), [0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn crossover_respects_cap() {
        let context = context(5, 6);
        let first = tagged(5, 100.0, &context);
        let second = tagged(5, 200.0, &context);
        let child = first.crossover_at(&second, 4, 0, &context);
        assert_eq!(tags(&child), [100.0, 101.0, 102.0, 103.0, 104.0, 200.0]);

        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for _ in 0..100 {
            let child = first.crossover(&second, &context, &mut rng);
            assert!((2..=6).contains(&child.hidden_count()));
        }
    }

    #[test]
    fn mutate_keeps_lengths() {
        let context = context(5, 10);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut hypothesis = VariableHypothesis::random(&context, &mut rng);
        let count = hypothesis.hidden_count();
        hypothesis.evaluate_fitness(&context).unwrap();
        hypothesis.mutate(&context, &mut rng);
        assert_eq!(hypothesis.fitness(), None);
        assert_eq!(hypothesis.hidden_count(), count);
        assert!(hypothesis
            .genome()
            .validate(context.genetic_config(), 10)
            .is_ok());
    }

    #[test]
    fn set_representation_enforces_cap() {
        let context = context(2, 3);
        let mut hypothesis = tagged(2, 0.0, &context);
        let large = Representation::new(vec![HiddenNeuron::new(vec![0.0; 3], vec![0.0]); 4]);
        assert_eq!(
            hypothesis.set_representation(large, &context),
            Err(GenomeError::HiddenCountAboveCap { count: 4, max: 3 })
        );
        assert_eq!(hypothesis.hidden_count(), 2);
    }

    #[test]
    fn infinite_weights_never_score() {
        let context = EvaluationContext::new(
            GeneticConfig {
                topology: Topology::Variable,
                ..GeneticConfig::zero()
            },
            NetworkConfig::default(),
            Arc::new(DataSet::new(vec![Example::new(vec![0.0], true)]).unwrap()),
        )
        .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut hypothesis = VariableHypothesis::random(&context, &mut rng);
        let infinite = Representation::new(vec![HiddenNeuron::new(vec![f64::INFINITY], vec![1.0])]);
        assert_eq!(
            hypothesis.set_representation(infinite, &context),
            Err(GenomeError::NonFiniteWeight {
                neuron: 0,
                weight: f64::INFINITY
            })
        );
        let fitness = hypothesis.evaluate_fitness(&context).unwrap();
        assert!(fitness.is_finite() && fitness >= 0.0);
    }

    #[test]
    fn deserialized_genomes_cross_over() {
        let context = context(3, 6);
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let parent = VariableHypothesis::random(&context, &mut rng);
        let json = serde_json::to_string(&parent).unwrap();
        let copy = serde_json::from_str::<VariableHypothesis>(&json).unwrap();
        assert_eq!(copy, parent);
        let child = copy.crossover(&parent, &context, &mut rng);
        assert!((2..=6).contains(&child.hidden_count()));

        assert!(serde_json::from_str::<VariableHypothesis>("[[], null]").is_err());
    }

    #[test]
    fn from_fixed() {
        let fixed_context = EvaluationContext::new(
            GeneticConfig {
                topology: Topology::Fixed,
                ..context(3, 6).genetic_config().clone()
            },
            NetworkConfig::default(),
            Arc::new(context(3, 6).training_set().clone()),
        )
        .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut fixed = FixedHypothesis::random(&fixed_context, &mut rng);
        let fitness = fixed.evaluate_fitness(&fixed_context).unwrap();

        let variable = VariableHypothesis::from(fixed.clone());
        assert_eq!(variable.fitness(), Some(fitness));
        assert_eq!(variable.genome(), fixed.genome());
        assert_eq!(variable.hidden_count(), 3);
    }
}
