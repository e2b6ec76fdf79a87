use super::{EdgeId, NeuronId};

use rand::Rng;
use serde::{Deserialize, Serialize};

use std::fmt;

/// A weighted connection between a neuron in one layer
/// and a neuron in the next. Keeps the bookkeeping
/// needed for momentum-based weight updates.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    id: EdgeId,
    source: NeuronId,
    dest: NeuronId,
    weight: f64,
    delta_weight: f64,
    delta_weight_old: f64,
}

impl Edge {
    /// Returns a new zero-weighted edge.
    pub(super) fn new(id: EdgeId, source: NeuronId, dest: NeuronId) -> Edge {
        Edge {
            id,
            source,
            dest,
            weight: 0.0,
            delta_weight: 0.0,
            delta_weight_old: 0.0,
        }
    }

    /// Randomizes the weight uniformly in (-w, w),
    /// with `w = 1/sqrt(fan_in)`, and clears all
    /// pending updates.
    pub(super) fn reset<R: Rng + ?Sized>(&mut self, fan_in: usize, rng: &mut R) {
        let bound = 1.0 / (fan_in as f64).sqrt();
        self.weight = rng.gen_range(-bound..bound);
        self.delta_weight = 0.0;
        self.delta_weight_old = 0.0;
    }

    /// Adds `learning_rate × error × activation`
    /// to the pending weight change.
    pub(super) fn accumulate(&mut self, learning_rate: f64, error: f64, activation: f64) {
        self.delta_weight += learning_rate * error * activation;
    }

    /// Applies the pending change, plus `momentum` times the
    /// previously applied change, and clears it.
    pub(super) fn apply(&mut self, momentum: f64) {
        let delta = self.delta_weight + momentum * self.delta_weight_old;
        self.weight += delta;
        self.delta_weight_old = delta;
        self.delta_weight = 0.0;
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    /// Returns the neuron this edge leaves from.
    pub fn source(&self) -> NeuronId {
        self.source
    }

    /// Returns the neuron this edge feeds into.
    pub fn dest(&self) -> NeuronId {
        self.dest
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Overwrites the weight. Pending and previous
    /// changes are discarded.
    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
        self.delta_weight = 0.0;
        self.delta_weight_old = 0.0;
    }

    /// Returns the weight change accumulated since
    /// the last update.
    pub fn pending_delta(&self) -> f64 {
        self.delta_weight
    }
}

impl fmt::Debug for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} {:.9}", self.source, self.dest, self.weight)
    }
}
