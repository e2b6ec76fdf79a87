//! Labeled examples and the read-only data sets
//! networks are trained and scored on. Parsing them
//! from files is left to the caller.
use serde::{Deserialize, Serialize};

use std::error::Error;
use std::fmt;

/// A real-valued attribute vector with a binary class label.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Example {
    attributes: Vec<f64>,
    label: bool,
}

impl Example {
    /// Returns a new example.
    ///
    /// # Examples
    /// ```
    /// use eann_nn::data::Example;
    ///
    /// let example = Example::new(vec![0.5, 1.0], true);
    /// assert_eq!(example.attributes(), &[0.5, 1.0]);
    /// assert_eq!(example.target(), 1.0);
    /// ```
    pub fn new(attributes: Vec<f64>, label: bool) -> Example {
        Example { attributes, label }
    }

    pub fn attributes(&self) -> &[f64] {
        &self.attributes
    }

    pub fn label(&self) -> bool {
        self.label
    }

    /// The label as a network output target: 1 or 0.
    pub fn target(&self) -> f64 {
        if self.label {
            1.0
        } else {
            0.0
        }
    }
}

/// A non-empty collection of examples which all
/// have the same number of attributes.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(try_from = "Vec<Example>", into = "Vec<Example>")]
pub struct DataSet {
    examples: Vec<Example>,
}

impl DataSet {
    /// Returns a new data set.
    ///
    /// # Errors
    /// Returns an error if `examples` is empty, or if
    /// the examples' attribute counts differ.
    ///
    /// # Examples
    /// ```
    /// use eann_nn::data::{DataSet, Example};
    ///
    /// let set = DataSet::new(vec![
    ///     Example::new(vec![0.0, 1.0], false),
    ///     Example::new(vec![1.0, 1.0], true),
    /// ]).unwrap();
    /// assert_eq!(set.len(), 2);
    /// assert_eq!(set.attribute_count(), 2);
    ///
    /// assert!(DataSet::new(vec![
    ///     Example::new(vec![0.0, 1.0], false),
    ///     Example::new(vec![1.0], true),
    /// ]).is_err());
    /// ```
    pub fn new(examples: Vec<Example>) -> Result<DataSet, DataSetError> {
        let attribute_count = match examples.first() {
            Some(example) => example.attributes.len(),
            None => return Err(DataSetError::Empty),
        };
        if let Some((index, example)) = examples
            .iter()
            .enumerate()
            .find(|(_, e)| e.attributes.len() != attribute_count)
        {
            return Err(DataSetError::InconsistentAttributes {
                index,
                expected: attribute_count,
                found: example.attributes.len(),
            });
        }
        Ok(DataSet { examples })
    }

    /// Number of attributes of every example.
    pub fn attribute_count(&self) -> usize {
        self.examples[0].attributes.len()
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    /// Always false; data sets can't be empty.
    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    pub fn examples(&self) -> &[Example] {
        &self.examples
    }

    pub fn iter(&self) -> impl Iterator<Item = &Example> {
        self.examples.iter()
    }

    /// Fraction of examples labeled `true`.
    pub fn positive_fraction(&self) -> f64 {
        self.examples.iter().filter(|e| e.label).count() as f64 / self.len() as f64
    }
}

impl TryFrom<Vec<Example>> for DataSet {
    type Error = DataSetError;

    fn try_from(examples: Vec<Example>) -> Result<DataSet, DataSetError> {
        DataSet::new(examples)
    }
}

impl From<DataSet> for Vec<Example> {
    fn from(set: DataSet) -> Vec<Example> {
        set.examples
    }
}

/// An error type indicating an invalid data set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSetError {
    /// No examples were given.
    Empty,
    /// An example's attribute count differs from the first's.
    InconsistentAttributes {
        index: usize,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for DataSetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "data set has no examples"),
            Self::InconsistentAttributes {
                index,
                expected,
                found,
            } => write!(
                f,
                "example {} has {} attributes, expected {}",
                index, found, expected
            ),
        }
    }
}

impl Error for DataSetError {}
