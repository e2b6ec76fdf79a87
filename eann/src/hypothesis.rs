use rand::Rng;

use std::cmp::Ordering;
use std::error::Error;

/// An interface for hypotheses that can be evolved by a [`Population`].
///
/// Fitness is an error measure: lower is better, and it
/// should never be negative.
///
/// [`Population`]: crate::Population
pub trait Hypothesis: Sized {
    /// Shared, read-only data every hypothesis needs
    /// in order to be created, scored and recombined.
    type Context;
    /// A complete snapshot of the hypothesis' genome.
    type Representation: Clone;
    type Error: Error + Send + Sync + 'static;

    /// Returns a new randomized hypothesis.
    fn random<R: Rng + ?Sized>(context: &Self::Context, rng: &mut R) -> Self;

    /// Re-randomizes every value of the genome,
    /// leaving the hypothesis unscored.
    fn randomize<R: Rng + ?Sized>(&mut self, context: &Self::Context, rng: &mut R);

    /// Computes, stores and returns the hypothesis' fitness.
    fn evaluate_fitness(&mut self, context: &Self::Context) -> Result<f64, Self::Error>;

    /// Returns the last computed fitness, or `None` if the
    /// genome changed since it was last evaluated.
    fn fitness(&self) -> Option<f64>;

    /// Combines two hypotheses and returns an unscored child.
    fn crossover<R: Rng + ?Sized>(&self, other: &Self, context: &Self::Context, rng: &mut R)
        -> Self;

    /// Mutates the hypothesis in place, leaving it unscored.
    fn mutate<R: Rng + ?Sized>(&mut self, context: &Self::Context, rng: &mut R);

    /// Returns a snapshot of the genome.
    fn representation(&self) -> Self::Representation;

    /// Replaces the genome with `representation`, leaving
    /// the hypothesis unscored.
    ///
    /// # Errors
    /// Returns an error if the representation is not
    /// valid under `context`.
    fn set_representation(
        &mut self,
        representation: Self::Representation,
        context: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Returns a measure of the genome's size, used to
    /// prefer smaller hypotheses when fitnesses tie.
    fn size(&self) -> usize;
}

/// Orders hypotheses from best to worst: scored before unscored,
/// lower fitness first, and smaller genomes first on equal fitness.
pub fn rank<H: Hypothesis>(first: &H, second: &H) -> Ordering {
    match (first.fitness(), second.fitness()) {
        (Some(f1), Some(f2)) => f1
            .total_cmp(&f2)
            .then_with(|| first.size().cmp(&second.size())),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => first.size().cmp(&second.size()),
    }
}
