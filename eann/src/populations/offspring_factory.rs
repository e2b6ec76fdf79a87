use super::*;

use rand::distributions::{Distribution, WeightedIndex};

/// Keeps proportionate selection weights finite
/// for hypotheses with a perfect (zero) fitness.
const FITNESS_EPSILON: f64 = 1e-3;

/// Auxiliary type for offspring generation.
/// Handles selecting parents from a ranked population,
/// mating them and mutating the children according
/// to the population's configuration.
pub(super) struct OffspringFactory<'a, H: Hypothesis> {
    ranked: &'a [H],
    context: &'a H::Context,
    population_config: &'a PopulationConfig,
    weights: Option<WeightedIndex<f64>>,
}

impl<'a, H: Hypothesis> OffspringFactory<'a, H> {
    /// `ranked` must be sorted from best to worst.
    pub(super) fn new(
        ranked: &'a [H],
        context: &'a H::Context,
        population_config: &'a PopulationConfig,
    ) -> OffspringFactory<'a, H> {
        let weights = match population_config.selection {
            SelectionPolicy::FitnessProportionate => WeightedIndex::new(
                ranked
                    .iter()
                    .map(|h| h.fitness().map_or(0.0, |f| 1.0 / (f + FITNESS_EPSILON))),
            )
            .ok(),
            SelectionPolicy::Tournament { .. } => None,
        };
        OffspringFactory {
            ranked,
            context,
            population_config,
            weights,
        }
    }

    /// Generate `count` unscored offspring.
    pub(super) fn generate_offspring<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<H> {
        (0..count)
            .map(|_| {
                let parent1 = self.select_parent(rng);
                let parent2 = self.select_parent(rng);
                let mut child = parent1.crossover(parent2, self.context, rng);
                if rng.gen_bool(self.population_config.mutation_rate) {
                    child.mutate(self.context, rng);
                }
                child
            })
            .collect()
    }

    /// Choose a parent according to the configured selection policy.
    fn select_parent<R: Rng + ?Sized>(&self, rng: &mut R) -> &'a H {
        match self.population_config.selection {
            SelectionPolicy::Tournament { size } => {
                // Members are ranked, so the lowest drawn index wins.
                let winner = (0..size.get())
                    .map(|_| rng.gen_range(0..self.ranked.len()))
                    .min()
                    .unwrap_or(0);
                &self.ranked[winner]
            }
            SelectionPolicy::FitnessProportionate => match &self.weights {
                Some(weights) => &self.ranked[weights.sample(rng)],
                // All weights were degenerate; fall back to uniform choice.
                None => &self.ranked[rng.gen_range(0..self.ranked.len())],
            },
        }
    }
}
