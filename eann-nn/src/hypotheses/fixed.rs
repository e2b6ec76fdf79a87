use super::evaluation::{accuracy, check_fitness, score};
use super::{EvaluationContext, GenomeError, Representation};

use eann::Hypothesis;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A hypothesis whose hidden layer always holds exactly
/// [`hidden_count`] neurons.
///
/// [`hidden_count`]: super::GeneticConfig::hidden_count
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(
    try_from = "(Representation, Option<f64>)",
    into = "(Representation, Option<f64>)"
)]
pub struct FixedHypothesis {
    pub(super) representation: Representation,
    pub(super) fitness: Option<f64>,
}

impl FixedHypothesis {
    /// Single-point crossover: the child takes neurons `0..=split`
    /// from `self` and the rest from `other`, keeping the
    /// hidden count unchanged.
    ///
    /// `split` is clamped to the last hidden neuron.
    pub fn crossover_at(&self, other: &FixedHypothesis, split: usize) -> FixedHypothesis {
        let split = split.min(self.representation.hidden_count() - 1);
        FixedHypothesis {
            representation: Representation::splice(
                &self.representation,
                split,
                &other.representation,
                split + 1,
            ),
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

impl TryFrom<(Representation, Option<f64>)> for FixedHypothesis {
    type Error = GenomeError;

    /// Rebuilds a hypothesis from its genome and stored fitness.
    /// The genome is only checked against a configuration
    /// by [`set_representation`](Hypothesis::set_representation).
    fn try_from(
        (representation, fitness): (Representation, Option<f64>),
    ) -> Result<FixedHypothesis, GenomeError> {
        Ok(FixedHypothesis {
            representation,
            fitness: check_fitness(fitness)?,
        })
    }
}

impl From<FixedHypothesis> for (Representation, Option<f64>) {
    fn from(h: FixedHypothesis) -> (Representation, Option<f64>) {
        (h.representation, h.fitness)
    }
}

impl Hypothesis for FixedHypothesis {
    type Context = EvaluationContext;
    type Representation = Representation;
    type Error = GenomeError;

    fn random<R: Rng + ?Sized>(context: &EvaluationContext, rng: &mut R) -> FixedHypothesis {
        let config = context.genetic_config();
        FixedHypothesis {
            representation: Representation::random(config.hidden_count.get(), config, rng),
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
        other: &FixedHypothesis,
        _: &EvaluationContext,
        rng: &mut R,
    ) -> FixedHypothesis {
        let split = rng.gen_range(0..self.hidden_count());
        self.crossover_at(other, split)
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
    /// or its hidden count isn't the configured one.
    fn set_representation(
        &mut self,
        representation: Representation,
        context: &EvaluationContext,
    ) -> Result<(), GenomeError> {
        let config = context.genetic_config();
        representation.validate(config, usize::MAX)?;
        if representation.hidden_count() != config.hidden_count.get() {
            return Err(GenomeError::HiddenCountMismatch {
                expected: config.hidden_count.get(),
                found: representation.hidden_count(),
            });
        }
        self.representation = representation;
        self.fitness = None;
        Ok(())
    }

    fn size(&self) -> usize {
        self.hidden_count()
    }
}
