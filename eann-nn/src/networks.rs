//! A fully-connected, layered feed-forward network.
//!
//! Neurons and edges live in flat arenas owned by the
//! [`NeuralNet`], and refer to each other by index. Every
//! neuron in layer `i + 1` has exactly one incoming edge from
//! every neuron in layer `i`; layer 0 is the input layer and
//! the last layer is the output layer.
//!
//! Networks can be trained by backpropagation in batch or
//! stochastic mode, or have the weights of their hidden
//! neurons set directly, which is how evolved hypotheses
//! are scored.
mod config;
mod edge;
mod errors;
mod neuron;

pub use config::{NetworkConfig, TrainingMode, MAX_NEURONS_PER_LAYER};
pub use edge::Edge;
pub use errors::NetworkError;
pub use neuron::Neuron;

use crate::data::{DataSet, Example};

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Index of a neuron in its network.
pub type NeuronId = usize;
/// Index of an edge in its network.
pub type EdgeId = usize;

/// Output activations above this are classified as `true`.
pub const CLASSIFICATION_THRESHOLD: f64 = 0.5;

/// A multilayer perceptron with sigmoid units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NeuralNet {
    neurons: Vec<Neuron>,
    edges: Vec<Edge>,
    layers: Vec<Vec<NeuronId>>,
    config: NetworkConfig,
    error_sum: f64,
}

impl NeuralNet {
    /// Builds a network with `layer_sizes[i]` neurons in layer `i`,
    /// fully connecting adjacent layers, and randomizes every edge
    /// weight uniformly in (-w, w), with `w = 1/sqrt(fan-in)`.
    ///
    /// # Errors
    /// Returns an error if fewer than two layers are given,
    /// or if any layer is empty or larger than
    /// [`config.max_neurons_per_layer`].
    ///
    /// [`config.max_neurons_per_layer`]: NetworkConfig::max_neurons_per_layer
    ///
    /// # Examples
    /// ```
    /// use eann_nn::networks::{NetworkConfig, NeuralNet};
    /// use rand::SeedableRng;
    /// use rand_chacha::ChaCha8Rng;
    ///
    /// let mut rng = ChaCha8Rng::seed_from_u64(0);
    /// let network = NeuralNet::new(&[4, 3, 1], NetworkConfig::default(), &mut rng).unwrap();
    /// assert_eq!(network.neurons().len(), 4 + 3 + 1);
    /// assert_eq!(network.edges().len(), 4 * 3 + 3 * 1);
    ///
    /// assert!(NeuralNet::new(&[4, 0, 1], NetworkConfig::default(), &mut rng).is_err());
    /// ```
    pub fn new<R: Rng + ?Sized>(
        layer_sizes: &[usize],
        config: NetworkConfig,
        rng: &mut R,
    ) -> Result<NeuralNet, NetworkError> {
        let mut network = NeuralNet::zeroed(layer_sizes, config)?;
        for edge in network.edges.iter_mut() {
            let fan_in = network.neurons[edge.dest()].incoming().len();
            edge.reset(fan_in, rng);
        }
        Ok(network)
    }

    /// Builds a network like [`new`], but with every
    /// edge weight set to 0. Used when all weights are
    /// about to be overwritten.
    ///
    /// [`new`]: NeuralNet::new
    ///
    /// # Errors
    /// Same as [`new`].
    pub fn zeroed(layer_sizes: &[usize], config: NetworkConfig) -> Result<NeuralNet, NetworkError> {
        if layer_sizes.len() < 2 {
            return Err(NetworkError::TooFewLayers(layer_sizes.len()));
        }
        for (layer, &size) in layer_sizes.iter().enumerate() {
            if size == 0 {
                return Err(NetworkError::EmptyLayer(layer));
            }
            if size > config.max_neurons_per_layer {
                return Err(NetworkError::LayerTooLarge {
                    layer,
                    size,
                    max: config.max_neurons_per_layer,
                });
            }
        }

        let mut neurons = vec![];
        let mut layers = Vec::with_capacity(layer_sizes.len());
        for &size in layer_sizes {
            let first = neurons.len();
            neurons.extend((first..first + size).map(Neuron::new));
            layers.push((first..first + size).collect::<Vec<_>>());
        }

        let mut network = NeuralNet {
            neurons,
            edges: vec![],
            layers,
            config,
            error_sum: 0.0,
        };
        network.connect_layers();
        Ok(network)
    }

    /// Creates an edge from each neuron in layer `i` to
    /// each neuron in layer `i + 1`.
    fn connect_layers(&mut self) {
        for pair in self.layers.windows(2) {
            for &parent in &pair[0] {
                for &child in &pair[1] {
                    let id = self.edges.len();
                    self.edges.push(Edge::new(id, parent, child));
                    self.neurons[parent].add_outgoing(id);
                    self.neurons[child].add_incoming(id);
                }
            }
        }
    }

    /// Overwrites the incoming and outgoing weights of
    /// hidden neuron `hidden_index`, bypassing training.
    /// `incoming[j]` is the weight from input `j`, and
    /// `outgoing[k]` the weight to output `k`.
    ///
    /// # Errors
    /// Returns an error if the network doesn't have exactly
    /// three layers, the hidden neuron doesn't exist, or the
    /// weight vectors don't match the input and output counts.
    ///
    /// # Examples
    /// ```
    /// use eann_nn::data::Example;
    /// use eann_nn::networks::{NetworkConfig, NeuralNet};
    ///
    /// fn sigmoid(x: f64) -> f64 {
    ///     1.0 / (1.0 + (-x).exp())
    /// }
    ///
    /// let mut network = NeuralNet::zeroed(&[1, 1, 1], NetworkConfig::default()).unwrap();
    /// network.set_hidden_neuron_weights(0, &[2.0], &[1.5]).unwrap();
    /// network.forward_propagate(&Example::new(vec![0.25], true)).unwrap();
    ///
    /// let expected = sigmoid(1.5 * sigmoid(2.0 * 0.25));
    /// assert!((network.outputs()[0] - expected).abs() < 1e-12);
    /// ```
    pub fn set_hidden_neuron_weights(
        &mut self,
        hidden_index: usize,
        incoming: &[f64],
        outgoing: &[f64],
    ) -> Result<(), NetworkError> {
        if self.layers.len() != 3 {
            return Err(NetworkError::NotSingleHiddenLayer(self.layers.len()));
        }
        let neuron = *self.layers[1]
            .get(hidden_index)
            .ok_or(NetworkError::HiddenIndexOutOfRange {
                index: hidden_index,
                hidden_count: self.layers[1].len(),
            })?;
        for (weights, edges) in [
            (incoming, self.neurons[neuron].incoming()),
            (outgoing, self.neurons[neuron].outgoing()),
        ] {
            if weights.len() != edges.len() {
                return Err(NetworkError::WeightCountMismatch {
                    expected: edges.len(),
                    found: weights.len(),
                });
            }
        }

        let neuron = &self.neurons[neuron];
        for (&edge, &weight) in neuron
            .incoming()
            .iter()
            .chain(neuron.outgoing())
            .zip(incoming.iter().chain(outgoing))
        {
            self.edges[edge].set_weight(weight);
        }
        Ok(())
    }

    /// Sets the input neurons to the example's attributes, then
    /// computes every other neuron's value layer by layer as the
    /// sigmoid of the weighted sum of its inputs.
    ///
    /// # Errors
    /// Returns an error if the example's attribute count
    /// differs from the number of input neurons.
    pub fn forward_propagate(&mut self, example: &Example) -> Result<(), NetworkError> {
        self.run(example.attributes())
    }

    /// Runs the network on `attributes` and returns
    /// the output activations.
    ///
    /// # Errors
    /// Returns an error if the attribute count differs
    /// from the number of input neurons.
    pub fn evaluate(&mut self, attributes: &[f64]) -> Result<Vec<f64>, NetworkError> {
        self.run(attributes)?;
        Ok(self.outputs())
    }

    fn run(&mut self, attributes: &[f64]) -> Result<(), NetworkError> {
        self.check_attribute_count(attributes.len())?;
        for (&id, &value) in self.layers[0].iter().zip(attributes) {
            self.neurons[id].set_value(value);
        }
        for layer in 1..self.layers.len() {
            for position in 0..self.layers[layer].len() {
                let id = self.layers[layer][position];
                let sum: f64 = self.neurons[id]
                    .incoming()
                    .iter()
                    .map(|&e| {
                        let edge = &self.edges[e];
                        edge.weight() * self.neurons[edge.source()].value()
                    })
                    .sum();
                self.neurons[id].set_value(sigmoid(sum));
            }
        }
        Ok(())
    }

    fn check_attribute_count(&self, found: usize) -> Result<(), NetworkError> {
        let expected = self.input_count();
        if found != expected {
            return Err(NetworkError::AttributeCountMismatch { expected, found });
        }
        Ok(())
    }

    /// Runs the network on the example, then computes each neuron's
    /// error term, output layer first, and accumulates a weight change
    /// of `learning_rate × error × upstream activation` on every edge.
    ///
    /// In [stochastic mode] the changes are applied right away;
    /// in [batch mode] they wait for [`update_weights`].
    ///
    /// [stochastic mode]: TrainingMode::Stochastic
    /// [batch mode]: TrainingMode::Batch
    /// [`update_weights`]: NeuralNet::update_weights
    ///
    /// # Errors
    /// Returns an error if the example's attribute count
    /// differs from the number of input neurons.
    pub fn back_propagate(&mut self, example: &Example) -> Result<(), NetworkError> {
        self.forward_propagate(example)?;
        let target = example.target();

        let output_layer = self.layers.len() - 1;
        for &id in &self.layers[output_layer] {
            let output = self.neurons[id].value();
            self.error_sum += (target - output).powi(2);
            self.neurons[id].set_error(output * (1.0 - output) * (target - output));
        }
        for layer in (1..output_layer).rev() {
            for position in 0..self.layers[layer].len() {
                let id = self.layers[layer][position];
                let downstream: f64 = self.neurons[id]
                    .outgoing()
                    .iter()
                    .map(|&e| {
                        let edge = &self.edges[e];
                        edge.weight() * self.neurons[edge.dest()].error()
                    })
                    .sum();
                let value = self.neurons[id].value();
                self.neurons[id].set_error(value * (1.0 - value) * downstream);
            }
        }

        let learning_rate = self.config.learning_rate;
        for edge in self.edges.iter_mut() {
            let error = self.neurons[edge.dest()].error();
            let activation = self.neurons[edge.source()].value();
            edge.accumulate(learning_rate, error, activation);
        }

        if self.config.mode == TrainingMode::Stochastic {
            self.update_weights();
        }
        Ok(())
    }

    /// Applies every pending weight change, with momentum.
    pub fn update_weights(&mut self) {
        let momentum = self.config.momentum;
        for edge in self.edges.iter_mut() {
            edge.apply(momentum);
        }
    }

    /// Backpropagates every example once, applying the weight
    /// changes as the training mode dictates. Returns the RMS
    /// error seen during the pass, before the final update.
    ///
    /// # Errors
    /// Returns an error if the data set's attribute count
    /// differs from the number of input neurons.
    pub fn train_epoch(&mut self, data_set: &DataSet) -> Result<f64, NetworkError> {
        self.check_attribute_count(data_set.attribute_count())?;
        self.error_sum = 0.0;
        for example in data_set.iter() {
            self.back_propagate(example)?;
        }
        if self.config.mode == TrainingMode::Batch {
            self.update_weights();
        }
        Ok((self.error_sum / (data_set.len() * self.output_count()) as f64).sqrt())
    }

    /// Trains the network for `epochs` passes over `data_set`,
    /// returning the RMS error on `data_set` after each pass.
    ///
    /// # Errors
    /// Returns an error if the data set's attribute count
    /// differs from the number of input neurons.
    ///
    /// # Examples
    /// ```
    /// use eann_nn::data::{DataSet, Example};
    /// use eann_nn::networks::{NetworkConfig, NeuralNet, TrainingMode};
    /// use rand::SeedableRng;
    /// use rand_chacha::ChaCha8Rng;
    ///
    /// let or = DataSet::new(vec![
    ///     Example::new(vec![0.0, 0.0], false),
    ///     Example::new(vec![0.0, 1.0], true),
    ///     Example::new(vec![1.0, 0.0], true),
    ///     Example::new(vec![1.0, 1.0], true),
    /// ]).unwrap();
    /// let config = NetworkConfig {
    ///     mode: TrainingMode::Stochastic,
    ///     ..NetworkConfig::default()
    /// };
    /// let mut rng = ChaCha8Rng::seed_from_u64(3);
    /// let mut network = NeuralNet::new(&[2, 3, 1], config, &mut rng).unwrap();
    ///
    /// let before = network.compute_rms(&or).unwrap();
    /// let history = network.train(&or, 500).unwrap();
    /// assert_eq!(history.len(), 500);
    /// assert!(history[499] < before);
    /// ```
    pub fn train(&mut self, data_set: &DataSet, epochs: usize) -> Result<Vec<f64>, NetworkError> {
        let mut history = Vec::with_capacity(epochs);
        for _ in 0..epochs {
            self.train_epoch(data_set)?;
            history.push(self.compute_rms(data_set)?);
        }
        Ok(history)
    }

    /// Returns the root mean squared error between the output
    /// activations and the label of every example.
    ///
    /// # Errors
    /// Returns an error if the data set's attribute count
    /// differs from the number of input neurons.
    pub fn compute_rms(&mut self, data_set: &DataSet) -> Result<f64, NetworkError> {
        self.check_attribute_count(data_set.attribute_count())?;
        let mut squared_error = 0.0;
        for example in data_set.iter() {
            self.forward_propagate(example)?;
            let target = example.target();
            squared_error += self
                .output_neurons()
                .map(|n| (target - n.value()).powi(2))
                .sum::<f64>();
        }
        Ok((squared_error / (data_set.len() * self.output_count()) as f64).sqrt())
    }

    /// Returns the network's prediction for the example:
    /// whether the first output exceeds [`CLASSIFICATION_THRESHOLD`].
    ///
    /// # Errors
    /// Returns an error if the example's attribute count
    /// differs from the number of input neurons.
    pub fn classify(&mut self, example: &Example) -> Result<bool, NetworkError> {
        self.forward_propagate(example)?;
        Ok(self.outputs()[0] > CLASSIFICATION_THRESHOLD)
    }

    /// Returns the fraction of examples in `data_set`
    /// that are classified correctly.
    ///
    /// # Errors
    /// Returns an error if the data set's attribute count
    /// differs from the number of input neurons.
    pub fn test_data_set(&mut self, data_set: &DataSet) -> Result<f64, NetworkError> {
        self.check_attribute_count(data_set.attribute_count())?;
        let mut correct = 0;
        for example in data_set.iter() {
            if self.classify(example)? == example.label() {
                correct += 1;
            }
        }
        Ok(correct as f64 / data_set.len() as f64)
    }

    /// Returns the current output activations.
    pub fn outputs(&self) -> Vec<f64> {
        self.output_neurons().map(Neuron::value).collect()
    }

    fn output_neurons(&self) -> impl Iterator<Item = &Neuron> {
        self.layers[self.layers.len() - 1]
            .iter()
            .map(move |&id| &self.neurons[id])
    }

    /// Returns the neuron at `position` in `layer`.
    pub fn neuron(&self, layer: usize, position: usize) -> Option<&Neuron> {
        self.layers
            .get(layer)
            .and_then(|l| l.get(position))
            .map(|&id| &self.neurons[id])
    }

    /// All neurons, ordered by layer.
    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    /// All edges, ordered by source then destination neuron.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The layer index table: neuron ids by layer and position.
    pub fn layers(&self) -> &[Vec<NeuronId>] {
        &self.layers
    }

    pub fn layer_sizes(&self) -> Vec<usize> {
        self.layers.iter().map(Vec::len).collect()
    }

    pub fn input_count(&self) -> usize {
        self.layers[0].len()
    }

    pub fn output_count(&self) -> usize {
        self.layers[self.layers.len() - 1].len()
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }
}

/// The logistic function, evaluated without
/// overflowing for large negative inputs.
pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn logistic(x: f64) -> f64 {
        1.0 / (1.0 + (-x).exp())
    }

    fn and_set() -> DataSet {
        DataSet::new(vec![
            Example::new(vec![0.0, 0.0], false),
            Example::new(vec![0.0, 1.0], false),
            Example::new(vec![1.0, 0.0], false),
            Example::new(vec![1.0, 1.0], true),
        ])
        .unwrap()
    }

    #[test]
    fn construction_errors() {
        let config = NetworkConfig::default();
        assert_eq!(
            NeuralNet::zeroed(&[3], config.clone()),
            Err(NetworkError::TooFewLayers(1))
        );
        assert_eq!(
            NeuralNet::zeroed(&[3, 0, 1], config.clone()),
            Err(NetworkError::EmptyLayer(1))
        );
        assert_eq!(
            NeuralNet::zeroed(&[3, 61, 1], config),
            Err(NetworkError::LayerTooLarge {
                layer: 1,
                size: 61,
                max: 60
            })
        );
        let small = NetworkConfig {
            max_neurons_per_layer: 2,
            ..NetworkConfig::default()
        };
        assert!(NeuralNet::zeroed(&[2, 2, 3], small).is_err());
    }

    #[test]
    fn fully_connected() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let sizes = [4, 5, 3, 2];
        let network = NeuralNet::new(&sizes, NetworkConfig::default(), &mut rng).unwrap();
        assert_eq!(network.layer_sizes(), sizes);
        assert_eq!(network.edges().len(), 4 * 5 + 5 * 3 + 3 * 2);
        for layer in 1..sizes.len() {
            for position in 0..sizes[layer] {
                let neuron = network.neuron(layer, position).unwrap();
                assert_eq!(neuron.incoming().len(), sizes[layer - 1]);
                let sources: Vec<NeuronId> = neuron
                    .incoming()
                    .iter()
                    .map(|&e| network.edges()[e].source())
                    .collect();
                assert_eq!(sources, network.layers()[layer - 1]);
                let bound = 1.0 / (sizes[layer - 1] as f64).sqrt();
                assert!(neuron
                    .incoming()
                    .iter()
                    .all(|&e| network.edges()[e].weight().abs() <= bound));
            }
        }
        assert!(network.neuron(0, 0).unwrap().incoming().is_empty());
        assert!(network.neuron(3, 1).unwrap().outgoing().is_empty());
        assert!(network.neuron(4, 0).is_none());
    }

    #[test]
    fn forward_is_deterministic() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut network = NeuralNet::new(&[3, 4, 2], NetworkConfig::default(), &mut rng).unwrap();
        let first = network.evaluate(&[0.3, -1.2, 2.0]).unwrap();
        network.evaluate(&[5.0, 5.0, 5.0]).unwrap();
        let second = network.evaluate(&[0.3, -1.2, 2.0]).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn golden_2_2_1() {
        let mut network = NeuralNet::zeroed(&[2, 2, 1], NetworkConfig::default()).unwrap();
        network
            .set_hidden_neuron_weights(0, &[0.5, -0.5], &[1.0])
            .unwrap();
        network
            .set_hidden_neuron_weights(1, &[0.25, 0.75], &[-1.0])
            .unwrap();
        network
            .forward_propagate(&Example::new(vec![1.0, 0.5], true))
            .unwrap();

        let h0 = logistic(0.5 * 1.0 - 0.5 * 0.5);
        let h1 = logistic(0.25 * 1.0 + 0.75 * 0.5);
        assert!((network.neuron(1, 0).unwrap().value() - h0).abs() < 1e-12);
        assert!((network.neuron(1, 1).unwrap().value() - h1).abs() < 1e-12);
        let output = logistic(h0 - h1);
        assert!((network.outputs()[0] - output).abs() < 1e-12);
        assert!((output - 0.477_720).abs() < 1e-5);
    }

    #[test]
    fn set_hidden_neuron_weights_errors() {
        let mut network = NeuralNet::zeroed(&[2, 2, 1], NetworkConfig::default()).unwrap();
        assert_eq!(
            network.set_hidden_neuron_weights(2, &[0.0, 0.0], &[0.0]),
            Err(NetworkError::HiddenIndexOutOfRange {
                index: 2,
                hidden_count: 2
            })
        );
        assert_eq!(
            network.set_hidden_neuron_weights(0, &[0.0], &[0.0]),
            Err(NetworkError::WeightCountMismatch {
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            network.set_hidden_neuron_weights(0, &[0.0, 0.0], &[0.0, 0.0]),
            Err(NetworkError::WeightCountMismatch {
                expected: 1,
                found: 2
            })
        );
        let mut deep = NeuralNet::zeroed(&[2, 2, 2, 1], NetworkConfig::default()).unwrap();
        assert_eq!(
            deep.set_hidden_neuron_weights(0, &[0.0, 0.0], &[0.0, 0.0]),
            Err(NetworkError::NotSingleHiddenLayer(4))
        );
    }

    #[test]
    fn attribute_count_mismatch() {
        let mut network = NeuralNet::zeroed(&[3, 2, 1], NetworkConfig::default()).unwrap();
        let expected = Err(NetworkError::AttributeCountMismatch {
            expected: 3,
            found: 2,
        });
        assert_eq!(
            network.forward_propagate(&Example::new(vec![0.0, 1.0], true)),
            expected.clone()
        );
        assert_eq!(network.compute_rms(&and_set()), expected.clone().map(|_: ()| 0.0));
        assert_eq!(network.test_data_set(&and_set()), expected.clone().map(|_: ()| 0.0));
        assert_eq!(network.train(&and_set(), 1), expected.map(|_: ()| vec![]));
    }

    #[test]
    fn rms_zero_on_exact_outputs() {
        // Saturated weights drive every activation to exactly 0 or 1.
        let mut network = NeuralNet::zeroed(&[1, 2, 1], NetworkConfig::default()).unwrap();
        network.set_hidden_neuron_weights(0, &[1000.0], &[1000.0]).unwrap();
        network.set_hidden_neuron_weights(1, &[-1000.0], &[-1000.0]).unwrap();
        let data_set = DataSet::new(vec![
            Example::new(vec![1.0], true),
            Example::new(vec![-1.0], false),
            Example::new(vec![2.0], true),
        ])
        .unwrap();
        assert_eq!(network.compute_rms(&data_set).unwrap(), 0.0);
        assert_eq!(network.test_data_set(&data_set).unwrap(), 1.0);
    }

    #[test]
    fn rms_and_accuracy() {
        // All-zero weights output 0.5 for every example.
        let mut network = NeuralNet::zeroed(&[2, 2, 1], NetworkConfig::default()).unwrap();
        assert!((network.compute_rms(&and_set()).unwrap() - 0.5).abs() < 1e-12);
        // 0.5 is not above the threshold, so everything is classified false.
        assert_eq!(network.test_data_set(&and_set()).unwrap(), 0.75);
    }

    #[test]
    fn sigmoid_is_stable() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert_eq!(sigmoid(1000.0), 1.0);
        assert_eq!(sigmoid(-1000.0), 0.0);
        assert!(sigmoid(-1000.0).is_finite());
        for x in -20..=20 {
            let x = x as f64 / 4.0;
            assert!((sigmoid(x) - logistic(x)).abs() < 1e-15);
        }
    }

    #[test]
    fn batch_defers_updates() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut network = NeuralNet::new(&[2, 2, 1], NetworkConfig::default(), &mut rng).unwrap();
        let weights: Vec<f64> = network.edges().iter().map(Edge::weight).collect();
        network
            .back_propagate(&Example::new(vec![1.0, 1.0], true))
            .unwrap();
        assert_eq!(
            network.edges().iter().map(Edge::weight).collect::<Vec<_>>(),
            weights
        );
        assert!(network.edges().iter().any(|e| e.pending_delta() != 0.0));
        network.update_weights();
        assert_ne!(
            network.edges().iter().map(Edge::weight).collect::<Vec<_>>(),
            weights
        );
        assert!(network.edges().iter().all(|e| e.pending_delta() == 0.0));
    }

    #[test]
    fn stochastic_updates_immediately() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let config = NetworkConfig {
            mode: TrainingMode::Stochastic,
            ..NetworkConfig::default()
        };
        let mut network = NeuralNet::new(&[2, 2, 1], config, &mut rng).unwrap();
        let weights: Vec<f64> = network.edges().iter().map(Edge::weight).collect();
        network
            .back_propagate(&Example::new(vec![1.0, 1.0], true))
            .unwrap();
        assert_ne!(
            network.edges().iter().map(Edge::weight).collect::<Vec<_>>(),
            weights
        );
    }

    #[test]
    fn output_error_moves_output_towards_target() {
        let mut network = NeuralNet::zeroed(&[1, 1, 1], NetworkConfig::default()).unwrap();
        network.set_hidden_neuron_weights(0, &[1.0], &[1.0]).unwrap();
        let example = Example::new(vec![1.0], true);
        network.forward_propagate(&example).unwrap();
        let before = network.outputs()[0];
        network.back_propagate(&example).unwrap();
        let output_error = network.neuron(2, 0).unwrap().error();
        assert!((output_error - before * (1.0 - before) * (1.0 - before)).abs() < 1e-12);
        network.update_weights();
        network.forward_propagate(&example).unwrap();
        assert!(network.outputs()[0] > before);
    }

    #[test]
    fn training_reduces_error() {
        for mode in [TrainingMode::Batch, TrainingMode::Stochastic] {
            let mut rng = ChaCha8Rng::seed_from_u64(7);
            let config = NetworkConfig {
                mode,
                ..NetworkConfig::default()
            };
            let mut network = NeuralNet::new(&[2, 3, 1], config, &mut rng).unwrap();
            let before = network.compute_rms(&and_set()).unwrap();
            let history = network.train(&and_set(), 2000).unwrap();
            assert!(history[history.len() - 1] < before, "{:?}", mode);
        }
    }
}
