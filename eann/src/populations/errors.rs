use std::error::Error;
use std::fmt;

/// An error type indicating an out-of-range
/// population configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum PopulationConfigError {
    /// The replacement fraction is not in (0, 1].
    ReplacementFraction(f64),
    /// The mutation rate is not in [0, 1].
    MutationRate(f64),
    /// The elite would take up the whole population.
    Elitism { elitism: usize, size: usize },
}

impl fmt::Display for PopulationConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReplacementFraction(r) => {
                write!(f, "replacement fraction {} is not in (0, 1]", r)
            }
            Self::MutationRate(m) => write!(f, "mutation rate {} is not in [0, 1]", m),
            Self::Elitism { elitism, size } => write!(
                f,
                "elitism of {} leaves no room for offspring in a population of {}",
                elitism, size
            ),
        }
    }
}

impl Error for PopulationConfigError {}
