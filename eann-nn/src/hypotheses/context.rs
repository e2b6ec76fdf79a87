use super::{ContextError, GeneticConfig};
use crate::data::DataSet;
use crate::networks::NetworkConfig;

use std::sync::Arc;

/// Everything a hypothesis needs to be created, scored
/// and recombined: the genetic and network configurations
/// and the shared, read-only data sets.
///
/// The context is owned by the driving population and
/// handed to every hypothesis operation.
#[derive(Clone, Debug)]
pub struct EvaluationContext {
    genetic_config: GeneticConfig,
    network_config: NetworkConfig,
    training_set: Arc<DataSet>,
    evaluation_set: Option<Arc<DataSet>>,
}

impl EvaluationContext {
    /// Returns a new context scoring hypotheses on `training_set`.
    ///
    /// # Errors
    /// Returns an error if the training set's attribute count differs
    /// from [`input_count`], if [`hidden_count`] exceeds
    /// [`max_hidden_count`], if any layer would exceed the network's
    /// [maximum size], or if the weight bound or mutation power is
    /// negative or not finite.
    ///
    /// [`input_count`]: GeneticConfig::input_count
    /// [`hidden_count`]: GeneticConfig::hidden_count
    /// [`max_hidden_count`]: GeneticConfig::max_hidden_count
    /// [maximum size]: NetworkConfig::max_neurons_per_layer
    ///
    /// # Examples
    /// ```
    /// use eann_nn::data::{DataSet, Example};
    /// use eann_nn::hypotheses::{ContextError, EvaluationContext, GeneticConfig};
    /// use eann_nn::networks::NetworkConfig;
    /// use std::num::NonZeroUsize;
    /// use std::sync::Arc;
    ///
    /// let training_set = Arc::new(DataSet::new(vec![Example::new(vec![0.0, 1.0], true)]).unwrap());
    ///
    /// let result = EvaluationContext::new(
    ///     GeneticConfig::zero(),
    ///     NetworkConfig::default(),
    ///     training_set.clone(),
    /// );
    /// assert_eq!(
    ///     result.unwrap_err(),
    ///     ContextError::AttributeCountMismatch { expected: 1, found: 2 }
    /// );
    ///
    /// let context = EvaluationContext::new(
    ///     GeneticConfig {
    ///         input_count: NonZeroUsize::new(2).unwrap(),
    ///         ..GeneticConfig::zero()
    ///     },
    ///     NetworkConfig::default(),
    ///     training_set,
    /// ).unwrap();
    /// assert!(context.evaluation_set().is_none());
    /// ```
    pub fn new(
        genetic_config: GeneticConfig,
        network_config: NetworkConfig,
        training_set: Arc<DataSet>,
    ) -> Result<EvaluationContext, ContextError> {
        check_attribute_count(&genetic_config, &training_set)?;

        let hidden_count = genetic_config.hidden_count.get();
        let max_hidden_count = genetic_config.max_hidden_count.get();
        if hidden_count > max_hidden_count {
            return Err(ContextError::HiddenCountAboveCap {
                hidden_count,
                max_hidden_count,
            });
        }
        let max = network_config.max_neurons_per_layer;
        for (layer, size) in [
            ("input", genetic_config.input_count.get()),
            ("hidden", max_hidden_count),
            ("output", genetic_config.output_count.get()),
        ] {
            if size > max {
                return Err(ContextError::LayerTooLarge { layer, size, max });
            }
        }

        if !(genetic_config.weight_bound.is_finite() && genetic_config.weight_bound >= 0.0) {
            return Err(ContextError::WeightBound(genetic_config.weight_bound));
        }
        if !(genetic_config.mutation_power.is_finite() && genetic_config.mutation_power >= 0.0) {
            return Err(ContextError::MutationPower(genetic_config.mutation_power));
        }

        Ok(EvaluationContext {
            genetic_config,
            network_config,
            training_set,
            evaluation_set: None,
        })
    }

    /// Attaches a held-out set hypotheses can be tested on.
    /// It never affects fitness.
    ///
    /// # Errors
    /// Returns an error if the set's attribute count
    /// differs from the input count.
    pub fn with_evaluation_set(
        mut self,
        evaluation_set: Arc<DataSet>,
    ) -> Result<EvaluationContext, ContextError> {
        check_attribute_count(&self.genetic_config, &evaluation_set)?;
        self.evaluation_set = Some(evaluation_set);
        Ok(self)
    }

    pub fn genetic_config(&self) -> &GeneticConfig {
        &self.genetic_config
    }

    pub fn network_config(&self) -> &NetworkConfig {
        &self.network_config
    }

    /// The data set fitness is computed on.
    pub fn training_set(&self) -> &DataSet {
        &self.training_set
    }

    pub fn evaluation_set(&self) -> Option<&DataSet> {
        self.evaluation_set.as_deref()
    }
}

fn check_attribute_count(config: &GeneticConfig, data_set: &DataSet) -> Result<(), ContextError> {
    let expected = config.input_count.get();
    let found = data_set.attribute_count();
    if expected != found {
        return Err(ContextError::AttributeCountMismatch { expected, found });
    }
    Ok(())
}
