use super::{EdgeId, NeuronId};

use serde::{Deserialize, Serialize};

/// A unit holding an activation value, wired to the
/// previous layer by its incoming edges and to the
/// next layer by its outgoing edges.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Neuron {
    id: NeuronId,
    value: f64,
    error: f64,
    incoming: Vec<EdgeId>,
    outgoing: Vec<EdgeId>,
}

impl Neuron {
    pub(super) fn new(id: NeuronId) -> Neuron {
        Neuron {
            id,
            value: 0.0,
            error: 0.0,
            incoming: vec![],
            outgoing: vec![],
        }
    }

    pub fn id(&self) -> NeuronId {
        self.id
    }

    /// Returns the current activation value.
    pub fn value(&self) -> f64 {
        self.value
    }

    pub(super) fn set_value(&mut self, value: f64) {
        self.value = value;
    }

    /// Returns the error term computed by the
    /// last backpropagation pass.
    pub fn error(&self) -> f64 {
        self.error
    }

    pub(super) fn set_error(&mut self, error: f64) {
        self.error = error;
    }

    /// Incoming edges, ordered by source position
    /// in the previous layer.
    pub fn incoming(&self) -> &[EdgeId] {
        &self.incoming
    }

    /// Outgoing edges, ordered by destination position
    /// in the next layer.
    pub fn outgoing(&self) -> &[EdgeId] {
        &self.outgoing
    }

    pub(super) fn add_incoming(&mut self, edge: EdgeId) {
        self.incoming.push(edge);
    }

    pub(super) fn add_outgoing(&mut self, edge: EdgeId) {
        self.outgoing.push(edge);
    }
}
