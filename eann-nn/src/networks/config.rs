use serde::{Deserialize, Serialize};

/// Default maximum number of neurons in a single layer.
pub const MAX_NEURONS_PER_LAYER: usize = 60;

/// When backpropagated weight changes are applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrainingMode {
    /// After a full pass over the training set.
    Batch,
    /// After every example.
    Stochastic,
}

/// Hyperparameters of a network.
///
/// The learning rate and momentum only affect training
/// by backpropagation; scoring hypotheses never trains.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Step size of weight updates.
    pub learning_rate: f64,
    /// Fraction of the previous weight update
    /// added to the next one.
    pub momentum: f64,
    pub mode: TrainingMode,
    /// Largest allowed layer.
    pub max_neurons_per_layer: usize,
}

impl Default for NetworkConfig {
    /// A batch-trained network with a learning rate of 0.3,
    /// momentum of 0.2 and at most 60 neurons per layer.
    fn default() -> NetworkConfig {
        NetworkConfig {
            learning_rate: 0.3,
            momentum: 0.2,
            mode: TrainingMode::Batch,
            max_neurons_per_layer: MAX_NEURONS_PER_LAYER,
        }
    }
}
