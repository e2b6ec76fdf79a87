use super::{GeneticConfig, GenomeError};

use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

use std::fmt;

/// The weights of a single hidden neuron: one per
/// input, feeding it, and one per output, fed by it.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct HiddenNeuron {
    incoming: Vec<f64>,
    outgoing: Vec<f64>,
}

impl HiddenNeuron {
    /// Returns a new hidden neuron with the specified weights.
    ///
    /// # Examples
    /// ```
    /// use eann_nn::hypotheses::HiddenNeuron;
    ///
    /// let neuron = HiddenNeuron::new(vec![0.5, -0.5], vec![1.0]);
    /// assert_eq!(neuron.incoming(), &[0.5, -0.5]);
    /// assert_eq!(neuron.outgoing(), &[1.0]);
    /// ```
    pub fn new(incoming: Vec<f64>, outgoing: Vec<f64>) -> HiddenNeuron {
        HiddenNeuron { incoming, outgoing }
    }

    fn random<R: Rng + ?Sized>(config: &GeneticConfig, rng: &mut R) -> HiddenNeuron {
        let mut neuron = HiddenNeuron {
            incoming: vec![0.0; config.input_count.get()],
            outgoing: vec![0.0; config.output_count.get()],
        };
        neuron.randomize(config.weight_bound, rng);
        neuron
    }

    fn randomize<R: Rng + ?Sized>(&mut self, bound: f64, rng: &mut R) {
        for weight in self.incoming.iter_mut().chain(self.outgoing.iter_mut()) {
            *weight = rng.gen_range(-bound..=bound);
        }
    }

    /// Adds Gaussian noise to the first incoming
    /// and first outgoing weight.
    fn mutate<R: Rng + ?Sized>(&mut self, power: f64, rng: &mut R) {
        for weight in [self.incoming.first_mut(), self.outgoing.first_mut()]
            .into_iter()
            .flatten()
        {
            *weight += power * rng.sample::<f64, _>(StandardNormal);
        }
    }

    /// Weights from each input, in input order.
    pub fn incoming(&self) -> &[f64] {
        &self.incoming
    }

    /// Weights to each output, in output order.
    pub fn outgoing(&self) -> &[f64] {
        &self.outgoing
    }
}

/// A complete snapshot of a hypothesis' genome:
/// the weights of every hidden neuron, in layer order.
///
/// Deserialized representations are checked for shape
/// consistency and finite weights.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(try_from = "Vec<HiddenNeuron>", into = "Vec<HiddenNeuron>")]
pub struct Representation {
    hidden: Vec<HiddenNeuron>,
}

impl Representation {
    /// Returns a new representation. It is only checked
    /// against a configuration when given to a hypothesis.
    pub fn new(hidden: Vec<HiddenNeuron>) -> Representation {
        Representation { hidden }
    }

    /// Returns `count` hidden neurons with weights drawn
    /// uniformly from ±[`weight_bound`].
    ///
    /// [`weight_bound`]: GeneticConfig::weight_bound
    pub(super) fn random<R: Rng + ?Sized>(
        count: usize,
        config: &GeneticConfig,
        rng: &mut R,
    ) -> Representation {
        Representation {
            hidden: (0..count).map(|_| HiddenNeuron::random(config, rng)).collect(),
        }
    }

    pub fn hidden_count(&self) -> usize {
        self.hidden.len()
    }

    pub fn hidden_neurons(&self) -> &[HiddenNeuron] {
        &self.hidden
    }

    /// Checks that the genome is non-empty, no larger than
    /// `max_hidden_count`, that every weight vector matches
    /// the configured input and output counts, and that
    /// every weight is finite.
    ///
    /// # Errors
    /// Returns the first inconsistency found.
    pub fn validate(&self, config: &GeneticConfig, max_hidden_count: usize) -> Result<(), GenomeError> {
        if self.hidden.is_empty() {
            return Err(GenomeError::Empty);
        }
        self.check_finite()?;
        if self.hidden.len() > max_hidden_count {
            return Err(GenomeError::HiddenCountAboveCap {
                count: self.hidden.len(),
                max: max_hidden_count,
            });
        }
        for (neuron, hidden) in self.hidden.iter().enumerate() {
            if hidden.incoming.len() != config.input_count.get() {
                return Err(GenomeError::IncomingWeightCount {
                    neuron,
                    expected: config.input_count.get(),
                    found: hidden.incoming.len(),
                });
            }
            if hidden.outgoing.len() != config.output_count.get() {
                return Err(GenomeError::OutgoingWeightCount {
                    neuron,
                    expected: config.output_count.get(),
                    found: hidden.outgoing.len(),
                });
            }
        }
        Ok(())
    }

    /// # Errors
    /// Returns the first infinite or NaN weight found.
    pub(super) fn check_finite(&self) -> Result<(), GenomeError> {
        for (neuron, hidden) in self.hidden.iter().enumerate() {
            if let Some(&weight) = hidden
                .incoming
                .iter()
                .chain(&hidden.outgoing)
                .find(|w| !w.is_finite())
            {
                return Err(GenomeError::NonFiniteWeight { neuron, weight });
            }
        }
        Ok(())
    }

    pub(super) fn randomize<R: Rng + ?Sized>(&mut self, bound: f64, rng: &mut R) {
        for neuron in &mut self.hidden {
            neuron.randomize(bound, rng);
        }
    }

    /// Perturbs the first incoming and outgoing weight of every
    /// hidden neuron with N(0, `power`²) noise. Vector lengths
    /// never change.
    pub(super) fn mutate<R: Rng + ?Sized>(&mut self, power: f64, rng: &mut R) {
        for neuron in &mut self.hidden {
            neuron.mutate(power, rng);
        }
    }

    /// Returns a new genome made of `first`'s neurons up to and
    /// including `first_end`, followed by `second`'s neurons
    /// from `second_start` onwards. Both parents are only read.
    pub(super) fn splice(
        first: &Representation,
        first_end: usize,
        second: &Representation,
        second_start: usize,
    ) -> Representation {
        let head = &first.hidden[..(first_end + 1).min(first.hidden.len())];
        let tail = &second.hidden[second_start.min(second.hidden.len())..];
        Representation {
            hidden: head.iter().chain(tail).cloned().collect(),
        }
    }

    /// Drops every hidden neuron past the first `count`.
    pub(super) fn truncate(&mut self, count: usize) {
        self.hidden.truncate(count);
    }
}

impl TryFrom<Vec<HiddenNeuron>> for Representation {
    type Error = GenomeError;

    /// Checks what can be checked without a configuration: the
    /// genome is non-empty, every neuron has as many weights as
    /// the first, and every weight is finite.
    fn try_from(hidden: Vec<HiddenNeuron>) -> Result<Representation, GenomeError> {
        let first = hidden.first().ok_or(GenomeError::Empty)?;
        let (inputs, outputs) = (first.incoming.len(), first.outgoing.len());
        for (neuron, h) in hidden.iter().enumerate() {
            if h.incoming.len() != inputs {
                return Err(GenomeError::IncomingWeightCount {
                    neuron,
                    expected: inputs,
                    found: h.incoming.len(),
                });
            }
            if h.outgoing.len() != outputs {
                return Err(GenomeError::OutgoingWeightCount {
                    neuron,
                    expected: outputs,
                    found: h.outgoing.len(),
                });
            }
        }
        let representation = Representation { hidden };
        representation.check_finite()?;
        Ok(representation)
    }
}

impl From<Representation> for Vec<HiddenNeuron> {
    fn from(representation: Representation) -> Vec<HiddenNeuron> {
        representation.hidden
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, neuron) in self.hidden.iter().enumerate() {
            writeln!(f, "hidden {}: in {:?} out {:?}", i, neuron.incoming, neuron.outgoing)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::num::NonZeroUsize;

    fn config() -> GeneticConfig {
        GeneticConfig {
            input_count: NonZeroUsize::new(4).unwrap(),
            output_count: NonZeroUsize::new(2).unwrap(),
            weight_bound: 0.5,
            mutation_power: 1.0,
            ..GeneticConfig::zero()
        }
    }

    fn labeled(count: usize, label: f64) -> Representation {
        Representation::new(
            (0..count)
                .map(|i| HiddenNeuron::new(vec![label + i as f64], vec![label]))
                .collect(),
        )
    }

    #[test]
    fn random_respects_bounds_and_shape() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let representation = Representation::random(5, &config(), &mut rng);
        assert_eq!(representation.hidden_count(), 5);
        assert!(representation.validate(&config(), 5).is_ok());
        assert!(representation.hidden_neurons().iter().all(|n| n
            .incoming()
            .iter()
            .chain(n.outgoing())
            .all(|w| w.abs() <= 0.5)));
    }

    #[test]
    fn mutate_only_touches_first_weights() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let original = Representation::random(3, &config(), &mut rng);
        let mut mutated = original.clone();
        mutated.mutate(1.0, &mut rng);
        for (before, after) in original.hidden_neurons().iter().zip(mutated.hidden_neurons()) {
            assert_eq!(after.incoming().len(), 4);
            assert_eq!(after.outgoing().len(), 2);
            assert_ne!(before.incoming()[0], after.incoming()[0]);
            assert_ne!(before.outgoing()[0], after.outgoing()[0]);
            assert_eq!(before.incoming()[1..], after.incoming()[1..]);
            assert_eq!(before.outgoing()[1..], after.outgoing()[1..]);
        }
    }

    #[test]
    fn zero_power_mutation_is_identity() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let original = Representation::random(3, &config(), &mut rng);
        let mut mutated = original.clone();
        mutated.mutate(0.0, &mut rng);
        assert_eq!(original, mutated);
    }

    #[test]
    fn splice() {
        let first = labeled(4, 10.0);
        let second = labeled(5, 20.0);
        let child = Representation::splice(&first, 1, &second, 3);
        assert_eq!(child.hidden_count(), 1 + 1 + (5 - 3));
        let labels: Vec<f64> = child.hidden_neurons().iter().map(|n| n.outgoing()[0]).collect();
        assert_eq!(labels, [10.0, 10.0, 20.0, 20.0]);
        assert_eq!(child.hidden_neurons()[2].incoming(), &[23.0]);
        // Parents are untouched.
        assert_eq!(first, labeled(4, 10.0));
        assert_eq!(second, labeled(5, 20.0));
    }

    #[test]
    fn validate() {
        let config = config();
        assert_eq!(
            Representation::new(vec![]).validate(&config, 3),
            Err(GenomeError::Empty)
        );
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(
            Representation::random(4, &config, &mut rng).validate(&config, 3),
            Err(GenomeError::HiddenCountAboveCap { count: 4, max: 3 })
        );
        assert_eq!(
            Representation::new(vec![HiddenNeuron::new(vec![0.0; 3], vec![0.0; 2])])
                .validate(&config, 3),
            Err(GenomeError::IncomingWeightCount {
                neuron: 0,
                expected: 4,
                found: 3
            })
        );
        assert_eq!(
            Representation::new(vec![
                HiddenNeuron::new(vec![0.0; 4], vec![0.0; 2]),
                HiddenNeuron::new(vec![0.0; 4], vec![0.0; 1]),
            ])
            .validate(&config, 3),
            Err(GenomeError::OutgoingWeightCount {
                neuron: 1,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn validate_rejects_non_finite_weights() {
        let config = config();
        let mut outgoing = vec![0.5; 2];
        outgoing[1] = f64::NAN;
        let nan = Representation::new(vec![
            HiddenNeuron::new(vec![0.0; 4], vec![0.0; 2]),
            HiddenNeuron::new(vec![0.0; 4], outgoing),
        ]);
        assert!(matches!(
            nan.validate(&config, 3),
            Err(GenomeError::NonFiniteWeight { neuron: 1, weight }) if weight.is_nan()
        ));

        let mut incoming = vec![0.0; 4];
        incoming[2] = f64::NEG_INFINITY;
        assert_eq!(
            Representation::new(vec![HiddenNeuron::new(incoming, vec![0.0; 2])])
                .validate(&config, 3),
            Err(GenomeError::NonFiniteWeight {
                neuron: 0,
                weight: f64::NEG_INFINITY
            })
        );
    }

    #[test]
    fn serde_roundtrip() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let representation = Representation::random(3, &config(), &mut rng);
        let serialized = serde_json::to_string(&representation).unwrap();
        assert_eq!(
            serde_json::from_str::<Representation>(&serialized).unwrap(),
            representation
        );
    }

    #[test]
    fn deserialize_rejects_malformed_genomes() {
        assert!(serde_json::from_str::<Representation>("[]").is_err());
        let ragged = r#"[
            {"incoming": [0.0, 1.0], "outgoing": [1.0]},
            {"incoming": [0.0], "outgoing": [1.0]}
        ]"#;
        assert!(serde_json::from_str::<Representation>(ragged).is_err());
        assert_eq!(
            Representation::try_from(vec![HiddenNeuron::new(vec![f64::INFINITY], vec![1.0])]),
            Err(GenomeError::NonFiniteWeight {
                neuron: 0,
                weight: f64::INFINITY
            })
        );
    }
}
