use crate::networks::NetworkError;

use std::error::Error;
use std::fmt;

/// An error type indicating an evaluation context
/// built from inconsistent parts.
#[derive(Debug, Clone, PartialEq)]
pub enum ContextError {
    /// A data set's attribute count differs from the input count.
    AttributeCountMismatch { expected: usize, found: usize },
    /// The initial hidden count exceeds the growth cap.
    HiddenCountAboveCap {
        hidden_count: usize,
        max_hidden_count: usize,
    },
    /// A layer would exceed the network's per-layer maximum.
    LayerTooLarge {
        layer: &'static str,
        size: usize,
        max: usize,
    },
    /// The weight bound is negative or not finite.
    WeightBound(f64),
    /// The mutation power is negative or not finite.
    MutationPower(f64),
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AttributeCountMismatch { expected, found } => write!(
                f,
                "data set has {} attributes, but hypotheses have {} inputs",
                found, expected
            ),
            Self::HiddenCountAboveCap {
                hidden_count,
                max_hidden_count,
            } => write!(
                f,
                "hidden count {} exceeds the maximum hidden count {}",
                hidden_count, max_hidden_count
            ),
            Self::LayerTooLarge { layer, size, max } => write!(
                f,
                "{} layer of {} neurons exceeds the network maximum of {}",
                layer, size, max
            ),
            Self::WeightBound(bound) => write!(
                f,
                "weight bound must be finite and non-negative, got {}",
                bound
            ),
            Self::MutationPower(power) => write!(
                f,
                "mutation power must be finite and non-negative, got {}",
                power
            ),
        }
    }
}

impl Error for ContextError {}

/// An error type indicating a genome that doesn't fit its
/// evaluation context, or a failure to score it.
#[derive(Debug, Clone, PartialEq)]
pub enum GenomeError {
    /// The genome has no hidden neurons.
    Empty,
    /// A fixed-topology genome has the wrong number of hidden neurons.
    HiddenCountMismatch { expected: usize, found: usize },
    /// A variable-topology genome exceeds the growth cap.
    HiddenCountAboveCap { count: usize, max: usize },
    /// A hidden neuron's incoming weights don't match the input count.
    IncomingWeightCount {
        neuron: usize,
        expected: usize,
        found: usize,
    },
    /// A hidden neuron's outgoing weights don't match the output count.
    OutgoingWeightCount {
        neuron: usize,
        expected: usize,
        found: usize,
    },
    /// A hidden neuron has an infinite or NaN weight.
    NonFiniteWeight { neuron: usize, weight: f64 },
    /// A stored fitness is negative or not finite.
    InvalidFitness(f64),
    /// The scoring network rejected the genome or data.
    Network(NetworkError),
}

impl fmt::Display for GenomeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "genome has no hidden neurons"),
            Self::HiddenCountMismatch { expected, found } => write!(
                f,
                "fixed genome has {} hidden neurons, expected {}",
                found, expected
            ),
            Self::HiddenCountAboveCap { count, max } => write!(
                f,
                "genome has {} hidden neurons, exceeding the maximum of {}",
                count, max
            ),
            Self::IncomingWeightCount {
                neuron,
                expected,
                found,
            } => write!(
                f,
                "hidden neuron {} has {} incoming weights, expected {}",
                neuron, found, expected
            ),
            Self::OutgoingWeightCount {
                neuron,
                expected,
                found,
            } => write!(
                f,
                "hidden neuron {} has {} outgoing weights, expected {}",
                neuron, found, expected
            ),
            Self::NonFiniteWeight { neuron, weight } => write!(
                f,
                "hidden neuron {} has non-finite weight {}",
                neuron, weight
            ),
            Self::InvalidFitness(fitness) => write!(
                f,
                "fitness must be finite and non-negative, got {}",
                fitness
            ),
            Self::Network(_) => write!(f, "failed to score genome"),
        }
    }
}

impl Error for GenomeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Network(e) => Some(e),
            _ => None,
        }
    }
}

impl From<NetworkError> for GenomeError {
    fn from(e: NetworkError) -> GenomeError {
        GenomeError::Network(e)
    }
}
