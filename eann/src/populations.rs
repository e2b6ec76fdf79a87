//! A Population is a fixed-size collection of hypotheses,
//! evolved generation by generation: parents are selected,
//! recombined and mutated, and their offspring replace
//! the weakest members.
mod config;
mod errors;
mod offspring_factory;

use crate::hypothesis::{rank, Hypothesis};
pub use config::{PopulationConfig, SelectionPolicy, Termination};
pub use errors::PopulationConfigError;
use offspring_factory::OffspringFactory;

use rand::prelude::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use std::error::Error;

/// The random number generator driving evolution.
/// Seeded from [`PopulationConfig::seed`], so runs
/// are reproducible.
pub type EvolutionRng = ChaCha8Rng;

/// A population of hypotheses.
pub struct Population<H: Hypothesis> {
    members: Vec<H>,
    context: H::Context,
    population_config: PopulationConfig,
    rng: EvolutionRng,
    generation: usize,
    /// Best fitness ever held by a member; drives stagnation only.
    best_ever: Option<f64>,
    stagnation: usize,
}

impl<H> Population<H>
where
    H: Hypothesis + Send,
    H::Context: Sync,
{
    /// Creates a new population of randomized hypotheses
    /// and evaluates all of them.
    ///
    /// The type of `context` depends on the implementation
    /// of [`Hypothesis`], and is effectively opaque to the population.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid,
    /// or if any hypothesis fails to evaluate.
    ///
    /// # Examples
    /// ```
    /// use eann::{Population, PopulationConfig};
    /// use eann_nn::data::{DataSet, Example};
    /// use eann_nn::hypotheses::{AnnHypothesis, EvaluationContext, GeneticConfig, Topology};
    /// use eann_nn::networks::NetworkConfig;
    /// use std::num::NonZeroUsize;
    /// use std::sync::Arc;
    ///
    /// let training_set = DataSet::new(vec![
    ///     Example::new(vec![0.0, 1.0], true),
    ///     Example::new(vec![1.0, 0.0], false),
    /// ]).unwrap();
    /// let context = EvaluationContext::new(
    ///     GeneticConfig {
    ///         input_count: NonZeroUsize::new(2).unwrap(),
    ///         hidden_count: NonZeroUsize::new(3).unwrap(),
    ///         topology: Topology::Variable,
    ///         ..GeneticConfig::zero()
    ///     },
    ///     NetworkConfig::default(),
    ///     Arc::new(training_set),
    /// ).unwrap();
    ///
    /// let population = Population::<AnnHypothesis>::new(
    ///     PopulationConfig {
    ///         size: NonZeroUsize::new(10).unwrap(),
    ///         replacement_fraction: 0.5,
    ///         ..PopulationConfig::zero()
    ///     },
    ///     context,
    /// ).unwrap();
    /// assert_eq!(population.hypotheses().count(), 10);
    /// assert!(population.best_fitness().is_some());
    /// ```
    pub fn new(
        population_config: PopulationConfig,
        context: H::Context,
    ) -> Result<Population<H>, Box<dyn Error>> {
        population_config.validate()?;
        let mut rng = EvolutionRng::seed_from_u64(population_config.seed);
        let members = (0..population_config.size.get())
            .map(|_| H::random(&context, &mut rng))
            .collect();
        log::info!(
            "created population of {} hypotheses (seed {})",
            population_config.size,
            population_config.seed
        );

        let mut population = Population {
            members,
            context,
            population_config,
            rng,
            generation: 0,
            best_ever: None,
            stagnation: 0,
        };
        population.evaluate_fitness()?;
        population.best_ever = population.champion().fitness();
        Ok(population)
    }

    /// Evaluates the fitness of every unscored hypothesis.
    ///
    /// Already scored hypotheses are skipped, as their genome
    /// has not changed since their last evaluation.
    ///
    /// # Errors
    /// Returns the first evaluation error encountered.
    pub fn evaluate_fitness(&mut self) -> Result<(), Box<dyn Error>> {
        evaluate_all(
            &mut self.members,
            &self.context,
            self.population_config.parallel_evaluation,
        )
    }

    /// Advances the population by one generation.
    ///
    /// Parents are chosen by the configured [selection policy]
    /// from the current members, `round(r × P)` offspring are bred,
    /// each is mutated with probability [mutation rate], and the
    /// evaluated offspring replace the weakest members. The
    /// [elite] is never replaced.
    ///
    /// [selection policy]: PopulationConfig::selection
    /// [mutation rate]: PopulationConfig::mutation_rate
    /// [elite]: PopulationConfig::elitism
    ///
    /// # Errors
    /// Returns an error if a hypothesis fails to evaluate. Members
    /// may have been re-sorted and the generator advanced by then,
    /// but no member is replaced and the generation count is kept.
    pub fn evolve(&mut self) -> Result<(), Box<dyn Error>> {
        self.evaluate_fitness()?;
        self.sort_members_by_rank();

        let offspring_count = self.population_config.offspring_count();
        let mut offspring = OffspringFactory::new(
            &self.members,
            &self.context,
            &self.population_config,
        )
        .generate_offspring(offspring_count, &mut self.rng);
        evaluate_all(
            &mut offspring,
            &self.context,
            self.population_config.parallel_evaluation,
        )?;

        let survivors = self.members.len() - offspring_count;
        self.members.truncate(survivors);
        self.members.append(&mut offspring);
        self.generation += 1;
        self.update_stagnation();

        log::debug!(
            "generation {}: best fitness {:?}, mean size {:.2}, stagnated for {}",
            self.generation,
            self.best_fitness(),
            self.members.iter().map(|h| h.size()).sum::<usize>() as f64
                / self.members.len() as f64,
            self.stagnation
        );
        Ok(())
    }

    /// Evolves the population until `termination` is met,
    /// calling `observer` with the population after the initial
    /// state and after every generation. Returns the number of
    /// generations run.
    ///
    /// # Errors
    /// Returns the first error raised by [`evolve`].
    ///
    /// [`evolve`]: Population::evolve
    pub fn run<O>(&mut self, termination: Termination, mut observer: O) -> Result<usize, Box<dyn Error>>
    where
        O: FnMut(&Population<H>),
    {
        let start = self.generation;
        observer(self);
        loop {
            let elapsed = self.generation - start;
            let done = match termination {
                Termination::Generations(generations) => elapsed >= generations,
                Termination::Stagnation {
                    patience,
                    max_generations,
                } => elapsed >= max_generations || self.stagnation >= patience.get(),
            };
            if done {
                return Ok(elapsed);
            }
            self.evolve()?;
            observer(self);
        }
    }

    /// Sorts members from best to worst.
    fn sort_members_by_rank(&mut self) {
        self.members.sort_by(rank);
    }

    /// Records whether this generation's champion beat
    /// the best fitness seen so far.
    fn update_stagnation(&mut self) {
        let current = self.champion().fitness();
        match (current, self.best_ever) {
            (Some(current), Some(best)) if current >= best => self.stagnation += 1,
            (None, _) => self.stagnation += 1,
            _ => {
                self.best_ever = current;
                self.stagnation = 0;
            }
        }
    }

    /// Resets the population to a freshly randomized
    /// and evaluated state, reusing its configuration and
    /// context. The generator is re-seeded, so a reset
    /// population retraces the original run.
    ///
    /// # Errors
    /// Returns an error if any hypothesis fails to evaluate.
    pub fn reset(&mut self) -> Result<(), Box<dyn Error>> {
        self.rng = EvolutionRng::seed_from_u64(self.population_config.seed);
        for member in &mut self.members {
            *member = H::random(&self.context, &mut self.rng);
        }
        self.generation = 0;
        self.stagnation = 0;
        self.evaluate_fitness()?;
        self.best_ever = self.champion().fitness();
        Ok(())
    }
}

impl<H: Hypothesis> Population<H> {
    /// Returns the currently best-performing hypothesis:
    /// the lowest fitness, and the smallest genome among ties.
    ///
    /// # Examples
    /// ```
    /// # use eann::{Population, PopulationConfig, Hypothesis};
    /// # use eann_nn::data::{DataSet, Example};
    /// # use eann_nn::hypotheses::{AnnHypothesis, EvaluationContext, GeneticConfig};
    /// # use eann_nn::networks::NetworkConfig;
    /// # use std::num::NonZeroUsize;
    /// # use std::sync::Arc;
    /// # let training_set = DataSet::new(vec![Example::new(vec![1.0], true)]).unwrap();
    /// # let context = EvaluationContext::new(
    /// #     GeneticConfig::zero(),
    /// #     NetworkConfig::default(),
    /// #     Arc::new(training_set),
    /// # ).unwrap();
    /// let population = Population::<AnnHypothesis>::new(
    ///     PopulationConfig {
    ///         size: NonZeroUsize::new(8).unwrap(),
    ///         replacement_fraction: 0.25,
    ///         ..PopulationConfig::zero()
    ///     },
    ///     context,
    /// ).unwrap();
    ///
    /// let champion = population.champion();
    /// assert!(population
    ///     .hypotheses()
    ///     .all(|h| h.fitness().unwrap() >= champion.fitness().unwrap()));
    /// ```
    pub fn champion(&self) -> &H {
        // Populations are never empty.
        self.members
            .iter()
            .min_by(|h1, h2| rank(*h1, *h2))
            .unwrap_or(&self.members[0])
    }

    /// Returns the current champion's fitness. When every
    /// member is replaced and no elite is kept, this may be
    /// worse than in an earlier generation.
    pub fn best_fitness(&self) -> Option<f64> {
        self.champion().fitness()
    }

    /// Returns an iterator over all current hypotheses.
    pub fn hypotheses(&self) -> impl Iterator<Item = &H> {
        self.members.iter()
    }

    /// Returns a representation snapshot of every
    /// current hypothesis, in population order.
    pub fn representations(&self) -> Vec<H::Representation> {
        self.members.iter().map(H::representation).collect()
    }

    /// Returns the current generation number.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Returns the number of consecutive generations
    /// in which the best fitness did not improve.
    pub fn generations_without_improvement(&self) -> usize {
        self.stagnation
    }

    /// Returns the context shared by all hypotheses.
    pub fn context(&self) -> &H::Context {
        &self.context
    }

    /// Returns the population's configuration.
    pub fn config(&self) -> &PopulationConfig {
        &self.population_config
    }
}

/// Evaluates all unscored hypotheses, optionally in parallel.
/// Evaluation draws no random numbers, so both paths
/// produce identical fitnesses.
fn evaluate_all<H>(members: &mut [H], context: &H::Context, parallel: bool) -> Result<(), Box<dyn Error>>
where
    H: Hypothesis + Send,
    H::Context: Sync,
{
    if parallel {
        members
            .par_iter_mut()
            .filter(|h| h.fitness().is_none())
            .try_for_each(|h| h.evaluate_fitness(context).map(|_| ()))?;
    } else {
        for member in members.iter_mut().filter(|h| h.fitness().is_none()) {
            member.evaluate_fitness(context)?;
        }
    }
    Ok(())
}
