use eann::logging::{EvolutionLogger, ReportingLevel, Stats};
use eann::{Hypothesis, Population, PopulationConfig, SelectionPolicy, Termination};
use eann_nn::data::{DataSet, DataSetError, Example};
use eann_nn::hypotheses::{
    AnnHypothesis, EvaluationContext, GeneticConfig, Representation, Topology,
};
use eann_nn::networks::NetworkConfig;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use std::error::Error;
use std::fs;
use std::num::NonZeroUsize;
use std::sync::Arc;

const BITS: usize = 4;
/// Maximum perturbation of evaluation set attributes.
const JITTER: f64 = 0.1;

/// Boolean functions of the input bits to learn.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
enum Task {
    /// True iff an odd number of bits are set.
    Parity,
    /// True iff more than half the bits are set.
    Majority,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct RunConfig {
    task: Task,
    runs: usize,
    termination: Termination,
    population: PopulationConfig,
    genetic: GeneticConfig,
    network: NetworkConfig,
}

impl RunConfig {
    fn default_for(task: Task) -> RunConfig {
        RunConfig {
            task,
            runs: 8,
            termination: Termination::Stagnation {
                patience: NonZeroUsize::new(40).unwrap(),
                max_generations: 300,
            },
            population: PopulationConfig {
                size: NonZeroUsize::new(60).unwrap(),
                replacement_fraction: 0.5,
                mutation_rate: 0.2,
                elitism: 1,
                selection: SelectionPolicy::Tournament {
                    size: NonZeroUsize::new(3).unwrap(),
                },
                seed: 0,
                parallel_evaluation: false,
            },
            genetic: GeneticConfig {
                input_count: NonZeroUsize::new(BITS).unwrap(),
                output_count: NonZeroUsize::new(1).unwrap(),
                topology: Topology::Fixed,
                hidden_count: NonZeroUsize::new(6).unwrap(),
                max_hidden_count: NonZeroUsize::new(24).unwrap(),
                weight_bound: 2.0,
                mutation_power: 1.0,
            },
            network: NetworkConfig::default(),
        }
    }
}

/// Outcome of a single evolutionary run.
struct RunSummary {
    generations: usize,
    fitness: f64,
    hidden_count: usize,
    training_accuracy: f64,
    evaluation_accuracy: f64,
    mean_hidden_drift: f64,
    champion: Representation,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let configs = match std::env::args().nth(1) {
        Some(path) => vec![ron::from_str::<RunConfig>(&fs::read_to_string(path)?)?],
        None => vec![
            RunConfig::default_for(Task::Parity),
            RunConfig::default_for(Task::Majority),
        ],
    };

    for config in configs {
        let (training_set, evaluation_set) = data_sets(config.task, config.population.seed)?;
        for topology in [Topology::Fixed, Topology::Variable] {
            let genetic = GeneticConfig {
                topology,
                ..config.genetic.clone()
            };
            let context = EvaluationContext::new(
                genetic,
                config.network.clone(),
                Arc::new(training_set.clone()),
            )?
            .with_evaluation_set(Arc::new(evaluation_set.clone()))?;
            log::info!(
                "{:?}, {:?} topology: {} runs",
                config.task,
                topology,
                config.runs
            );

            let summaries = (0..config.runs as u64)
                .into_par_iter()
                .map(|run| {
                    let population_config = PopulationConfig {
                        seed: config.population.seed + run,
                        ..config.population.clone()
                    };
                    evolve(population_config, context.clone(), config.termination)
                })
                .collect::<Result<Vec<_>, String>>()?;
            report(&summaries);
        }
    }
    Ok(())
}

/// Every combination of input bits, and a copy with every
/// attribute perturbed by up to ±[`JITTER`] for evaluation.
fn data_sets(task: Task, seed: u64) -> Result<(DataSet, DataSet), DataSetError> {
    let label = |bits: usize| match task {
        Task::Parity => bits.count_ones() % 2 == 1,
        Task::Majority => bits.count_ones() as usize > BITS / 2,
    };
    let examples: Vec<Example> = (0..1 << BITS)
        .map(|bits: usize| {
            let attributes = (0..BITS).map(|i| ((bits >> i) & 1) as f64).collect();
            Example::new(attributes, label(bits))
        })
        .collect();

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let jittered = examples
        .iter()
        .map(|e| {
            let attributes = e
                .attributes()
                .iter()
                .map(|a| a + rng.gen_range(-JITTER..=JITTER))
                .collect();
            Example::new(attributes, e.label())
        })
        .collect();

    Ok((DataSet::new(examples)?, DataSet::new(jittered)?))
}

fn evolve(
    population_config: PopulationConfig,
    context: EvaluationContext,
    termination: Termination,
) -> Result<RunSummary, String> {
    let mut population =
        Population::<AnnHypothesis>::new(population_config, context).map_err(|e| e.to_string())?;
    let mut logger = EvolutionLogger::new(ReportingLevel::NoHypotheses);
    let generations = population
        .run(termination, |p| {
            logger.log(
                p,
                &|h: &AnnHypothesis| [h.fitness().unwrap_or(f64::NAN), h.size() as f64],
                ["fitness", "hidden neurons"],
            )
        })
        .map_err(|e| e.to_string())?;

    let mean_sizes: Vec<f64> = logger
        .iter()
        .map(|entry| entry.hypothesis_stats[1].1.mean)
        .collect();
    let mean_hidden_drift = match (mean_sizes.first(), mean_sizes.last()) {
        (Some(first), Some(last)) => last - first,
        _ => 0.0,
    };
    if let Some(last) = logger.last() {
        log::debug!("final generation: {}", last);
    }

    let context = population.context();
    let champion = population.champion();
    Ok(RunSummary {
        generations,
        fitness: champion.fitness().unwrap_or(f64::NAN),
        hidden_count: champion.hidden_count(),
        training_accuracy: champion
            .training_accuracy(context)
            .map_err(|e| e.to_string())?,
        evaluation_accuracy: champion
            .evaluation_accuracy(context)
            .map_err(|e| e.to_string())?
            .unwrap_or(f64::NAN),
        mean_hidden_drift,
        champion: champion.representation(),
    })
}

fn report(summaries: &[RunSummary]) {
    let stats = |f: fn(&RunSummary) -> f64| Stats::from(summaries.iter().map(f));
    println!("generations:          {:?}", stats(|s| s.generations as f64));
    println!("champion fitness:     {:?}", stats(|s| s.fitness));
    println!("champion hidden size: {:?}", stats(|s| s.hidden_count as f64));
    println!("mean size drift:      {:?}", stats(|s| s.mean_hidden_drift));
    println!("training accuracy:    {:?}", stats(|s| s.training_accuracy));
    println!("evaluation accuracy:  {:?}", stats(|s| s.evaluation_accuracy));

    let best = summaries.iter().min_by(|s1, s2| {
        s1.fitness
            .total_cmp(&s2.fitness)
            .then(s1.hidden_count.cmp(&s2.hidden_count))
    });
    if let Some(best) = best {
        match ron::ser::to_string_pretty(&best.champion, ron::ser::PrettyConfig::default()) {
            Ok(serialized) => println!("best champion:\n{}", serialized),
            Err(e) => eprintln!("{}", e),
        }
    }
}
