//! Generational snapshots of a population, for
//! reporting and for tracking genome size drift.
use crate::hypothesis::Hypothesis;
use crate::populations::Population;

use std::fmt;

/// Defines different possible reporting levels for logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportingLevel {
    /// Clones the entire population.
    AllHypotheses,
    /// Clones only the population champion.
    PopulationChampion,
    /// Clones no hypotheses.
    NoHypotheses,
}

/// A snapshot of a population.
#[derive(Clone, Debug)]
pub struct Log<G> {
    pub generation_number: usize,
    pub generation_sample: GenerationMemberRecord<G>,
    pub best_fitness: Option<f64>,
    pub hypothesis_stats: Vec<(String, Stats)>,
}

impl<G> fmt::Display for Log<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Log {{\n\
            \tgeneration_number: {:?}\n\
            \tbest_fitness: {:?}\n\
            {}\
            }}",
            &self.generation_number,
            &self.best_fitness,
            self.hypothesis_stats
                .iter()
                .map(|(name, stats)| format!("\t{}: {:?}\n", name, stats))
                .collect::<Vec<_>>()
                .join("")
        )
    }
}

/// A struct for reporting basic statistical data.
#[derive(Clone, Debug, PartialEq)]
pub struct Stats {
    pub maximum: f64,
    pub minimum: f64,
    pub mean: f64,
    pub median: f64,
}

impl Stats {
    /// Returns statistics about numbers in a sequence.
    /// All values are NaN for an empty sequence.
    ///
    /// # Examples
    /// ```
    /// use eann::logging::Stats;
    ///
    /// let stats = Stats::from([-2.0, -1.0, 0.5, 1.0, 1.5].iter().copied());
    /// assert_eq!(stats.maximum, 1.5);
    /// assert_eq!(stats.minimum, -2.0);
    /// assert_eq!(stats.mean, 0.0);
    /// assert_eq!(stats.median, 0.5);
    /// ```
    pub fn from(data: impl Iterator<Item = f64>) -> Stats {
        let mut data: Vec<f64> = data.collect();
        if data.is_empty() {
            return Stats {
                maximum: f64::NAN,
                minimum: f64::NAN,
                mean: f64::NAN,
                median: f64::NAN,
            };
        }
        data.sort_unstable_by(f64::total_cmp);
        let mid = data.len() / 2;
        let median = if data.len() % 2 == 0 {
            (data[mid - 1] + data[mid]) / 2.0
        } else {
            data[mid]
        };
        Stats {
            maximum: data[data.len() - 1],
            minimum: data[0],
            mean: data.iter().sum::<f64>() / data.len() as f64,
            median,
        }
    }
}

/// A reporting-level dependant store
/// of hypotheses from a population.
#[derive(Clone, Debug)]
pub enum GenerationMemberRecord<G> {
    /// Every member's representation.
    AllHypotheses(Vec<G>),
    /// Only the population champion's representation.
    PopulationChampion(G),
    /// Empty.
    None,
}

/// A log of the evolution of a population over time.
#[derive(Clone, Debug)]
pub struct EvolutionLogger<G> {
    reporting_level: ReportingLevel,
    logs: Vec<Log<G>>,
}

impl<G: Clone> EvolutionLogger<G> {
    /// Returns a logger with the appropiate reporting level.
    ///
    /// # Examples
    /// ```
    /// # use eann_nn::hypotheses::Representation as G;
    /// use eann::logging::{EvolutionLogger, ReportingLevel};
    ///
    /// // With `G` the representation type of a suitable `Hypothesis`...
    /// let logger = EvolutionLogger::<G>::new(ReportingLevel::NoHypotheses);
    /// ```
    pub fn new(reporting_level: ReportingLevel) -> EvolutionLogger<G> {
        EvolutionLogger {
            reporting_level,
            logs: vec![],
        }
    }

    /// Store a snapshot of a population.
    ///
    /// The `stat_extractor` provides a way of
    /// obtaining arbitrary statistics on the population,
    /// where each statistic is named by `stat_names`.
    ///
    /// # Examples
    /// ```
    /// # use eann_nn::data::{DataSet, Example};
    /// # use eann_nn::hypotheses::{AnnHypothesis, EvaluationContext, GeneticConfig};
    /// # use eann_nn::networks::NetworkConfig;
    /// # use std::num::NonZeroUsize;
    /// # use std::sync::Arc;
    /// use eann::{Hypothesis, Population, PopulationConfig};
    /// use eann::logging::{EvolutionLogger, ReportingLevel};
    ///
    /// # let training_set = DataSet::new(vec![Example::new(vec![1.0], true)]).unwrap();
    /// # let context = EvaluationContext::new(
    /// #     GeneticConfig::zero(),
    /// #     NetworkConfig::default(),
    /// #     Arc::new(training_set),
    /// # ).unwrap();
    /// let mut logger = EvolutionLogger::new(ReportingLevel::PopulationChampion);
    /// let population = Population::<AnnHypothesis>::new(
    ///     PopulationConfig {
    ///         size: NonZeroUsize::new(4).unwrap(),
    ///         replacement_fraction: 0.5,
    ///         ..PopulationConfig::zero()
    ///     },
    ///     context,
    /// ).unwrap();
    ///
    /// logger.log(
    ///     &population,
    ///     &|h| [h.fitness().unwrap_or(f64::NAN), h.size() as f64],
    ///     ["fitness", "hidden neurons"],
    /// );
    /// assert_eq!(logger.iter().count(), 1);
    /// ```
    pub fn log<H, SE, const N: usize>(
        &mut self,
        population: &Population<H>,
        stat_extractor: &SE,
        stat_names: [&str; N],
    ) where
        H: Hypothesis<Representation = G>,
        SE: Fn(&H) -> [f64; N],
    {
        let stats: Vec<[f64; N]> = population.hypotheses().map(stat_extractor).collect();
        let hypothesis_stats = stat_names
            .iter()
            .map(|name| String::from(*name))
            .zip(unzip_n_vecs(stats.into_iter()))
            .map(|(name, data)| (name, Stats::from(data.into_iter())))
            .collect();
        let generation_sample = match self.reporting_level {
            ReportingLevel::AllHypotheses => {
                GenerationMemberRecord::AllHypotheses(population.representations())
            }
            ReportingLevel::PopulationChampion => {
                GenerationMemberRecord::PopulationChampion(population.champion().representation())
            }
            ReportingLevel::NoHypotheses => GenerationMemberRecord::None,
        };
        log::trace!("logged generation {}", population.generation());
        self.logs.push(Log {
            generation_number: population.generation(),
            generation_sample,
            best_fitness: population.best_fitness(),
            hypothesis_stats,
        })
    }

    /// Iterate over all logged snapshots.
    pub fn iter(&self) -> impl Iterator<Item = &Log<G>> {
        self.logs.iter()
    }

    /// Returns the most recent snapshot.
    pub fn last(&self) -> Option<&Log<G>> {
        self.logs.last()
    }
}

fn unzip_n_vecs<T: Clone, const N: usize>(iter: impl Iterator<Item = [T; N]>) -> Vec<Vec<T>> {
    let mut vecs = vec![Vec::default(); N];
    for items in iter {
        for (vec, item) in vecs.iter_mut().zip(items) {
            vec.push(item);
        }
    }
    vecs
}
