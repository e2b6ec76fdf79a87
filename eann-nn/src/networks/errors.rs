use std::error::Error;
use std::fmt;

/// An error type indicating a malformed network
/// configuration, or a network used with data or
/// weights of the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// Fewer than two layers were requested.
    TooFewLayers(usize),
    /// A layer was given no neurons.
    EmptyLayer(usize),
    /// A layer exceeds the configured maximum size.
    LayerTooLarge {
        layer: usize,
        size: usize,
        max: usize,
    },
    /// An example's attribute count differs from
    /// the number of input neurons.
    AttributeCountMismatch { expected: usize, found: usize },
    /// Direct weight injection needs exactly one hidden layer.
    NotSingleHiddenLayer(usize),
    /// The hidden neuron does not exist.
    HiddenIndexOutOfRange { index: usize, hidden_count: usize },
    /// A weight vector's length differs from the size
    /// of the layer it connects to.
    WeightCountMismatch { expected: usize, found: usize },
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewLayers(n) => {
                write!(f, "network needs at least 2 layers, {} requested", n)
            }
            Self::EmptyLayer(layer) => write!(f, "layer {} has no neurons", layer),
            Self::LayerTooLarge { layer, size, max } => write!(
                f,
                "layer {} has {} neurons, exceeding the maximum of {}",
                layer, size, max
            ),
            Self::AttributeCountMismatch { expected, found } => write!(
                f,
                "example with {} attributes given to a network with {} inputs",
                found, expected
            ),
            Self::NotSingleHiddenLayer(layers) => write!(
                f,
                "hidden neuron weights can only be set on 3-layer networks, this one has {}",
                layers
            ),
            Self::HiddenIndexOutOfRange {
                index,
                hidden_count,
            } => write!(
                f,
                "hidden neuron {} does not exist in a layer of {}",
                index, hidden_count
            ),
            Self::WeightCountMismatch { expected, found } => write!(
                f,
                "{} weights given where {} were expected",
                found, expected
            ),
        }
    }
}

impl Error for NetworkError {}
