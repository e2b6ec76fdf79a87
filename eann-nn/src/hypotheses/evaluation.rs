//! Scoring genomes: every evaluation builds a throwaway
//! three-layer network, injects the genome's weights and
//! measures it on a data set. Nothing is ever trained.
use super::{EvaluationContext, GenomeError, Representation};
use crate::data::DataSet;
use crate::networks::NeuralNet;

/// Number of decimals fitness values are truncated to.
pub const FITNESS_DECIMALS: i32 = 3;

/// Truncates (not rounds) an error measure to
/// [`FITNESS_DECIMALS`] decimals.
///
/// # Examples
/// ```
/// use eann_nn::hypotheses::truncate_fitness;
///
/// assert_eq!(truncate_fitness(0.12389), 0.123);
/// assert_eq!(truncate_fitness(0.0), 0.0);
/// ```
pub fn truncate_fitness(error: f64) -> f64 {
    let scale = 10f64.powi(FITNESS_DECIMALS);
    (error * scale).trunc() / scale
}

/// Builds the network a genome encodes: `input_count` inputs,
/// one hidden neuron per genome entry and `output_count` outputs,
/// with every weight taken from the genome.
///
/// # Errors
/// Returns an error if the genome holds a non-finite weight,
/// or doesn't fit the context's input and output counts
/// or the network's layer limits.
///
/// # Examples
/// ```
/// use eann_nn::data::{DataSet, Example};
/// use eann_nn::hypotheses::{build_network, EvaluationContext, GeneticConfig, HiddenNeuron, Representation};
/// use eann_nn::networks::NetworkConfig;
/// use std::num::NonZeroUsize;
/// use std::sync::Arc;
///
/// let context = EvaluationContext::new(
///     GeneticConfig {
///         input_count: NonZeroUsize::new(2).unwrap(),
///         ..GeneticConfig::zero()
///     },
///     NetworkConfig::default(),
///     Arc::new(DataSet::new(vec![Example::new(vec![1.0, 0.5], true)]).unwrap()),
/// ).unwrap();
/// let genome = Representation::new(vec![
///     HiddenNeuron::new(vec![0.5, -0.5], vec![1.0]),
///     HiddenNeuron::new(vec![0.25, 0.75], vec![-1.0]),
/// ]);
///
/// let network = build_network(&genome, &context).unwrap();
/// assert_eq!(network.layer_sizes(), [2, 2, 1]);
/// ```
pub fn build_network(
    representation: &Representation,
    context: &EvaluationContext,
) -> Result<NeuralNet, GenomeError> {
    representation.check_finite()?;
    let config = context.genetic_config();
    let layer_sizes = [
        config.input_count.get(),
        representation.hidden_count(),
        config.output_count.get(),
    ];
    let mut network = NeuralNet::zeroed(&layer_sizes, context.network_config().clone())?;
    for (i, neuron) in representation.hidden_neurons().iter().enumerate() {
        network.set_hidden_neuron_weights(i, neuron.incoming(), neuron.outgoing())?;
    }
    Ok(network)
}

/// Returns the genome's truncated RMS error on the training set.
pub(super) fn score(
    representation: &Representation,
    context: &EvaluationContext,
) -> Result<f64, GenomeError> {
    let mut network = build_network(representation, context)?;
    Ok(truncate_fitness(network.compute_rms(context.training_set())?))
}

/// Passes through a stored fitness if it is one [`score`]
/// could have produced.
pub(super) fn check_fitness(fitness: Option<f64>) -> Result<Option<f64>, GenomeError> {
    match fitness {
        Some(f) if !(f.is_finite() && f >= 0.0) => Err(GenomeError::InvalidFitness(f)),
        _ => Ok(fitness),
    }
}

/// Returns the fraction of `data_set` the genome classifies correctly.
pub(super) fn accuracy(
    representation: &Representation,
    context: &EvaluationContext,
    data_set: &DataSet,
) -> Result<f64, GenomeError> {
    let mut network = build_network(representation, context)?;
    Ok(network.test_data_set(data_set)?)
}
