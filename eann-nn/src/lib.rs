//! # EANN-NN
//! A feed-forward neural network engine, and neural network
//! hypotheses implementing the [`eann` crate](../eann/index.html)'s
//! `Hypothesis` trait.
//!
//! Provides:
//! - [`NeuralNet`]: a fully-connected multilayer perceptron with sigmoid
//!   units, trainable by batch or stochastic backpropagation.
//! - [`AnnHypothesis`]: a genome holding the weights of a single hidden
//!   layer, of [fixed] or [variable] size, scored by the RMS error of the
//!   network it encodes. Evolving these replaces gradient descent.
//! - [`DataSet`]: the labeled examples both are measured on.
//!
//! [`NeuralNet`]: crate::networks::NeuralNet
//! [`AnnHypothesis`]: crate::hypotheses::AnnHypothesis
//! [fixed]: crate::hypotheses::FixedHypothesis
//! [variable]: crate::hypotheses::VariableHypothesis
//! [`DataSet`]: crate::data::DataSet
//!
//! # Example usage: training a network conventionally
//! ```
//! use eann_nn::data::{DataSet, Example};
//! use eann_nn::networks::{NetworkConfig, NeuralNet};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let and = DataSet::new(vec![
//!     Example::new(vec![0.0, 0.0], false),
//!     Example::new(vec![0.0, 1.0], false),
//!     Example::new(vec![1.0, 0.0], false),
//!     Example::new(vec![1.0, 1.0], true),
//! ]).unwrap();
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(0);
//! let mut network = NeuralNet::new(&[2, 3, 1], NetworkConfig::default(), &mut rng).unwrap();
//! let initial = network.compute_rms(&and).unwrap();
//! let history = network.train(&and, 1000).unwrap();
//! assert!(history[999] < initial);
//! println!("accuracy: {}", network.test_data_set(&and).unwrap());
//! ```

pub mod data;
pub mod hypotheses;
pub mod networks;
