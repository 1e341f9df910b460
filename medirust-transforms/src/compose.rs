use medirust_core::MediRustError;

use crate::randomizable::RandomState;
use crate::transform::Transform;

/// Applies a sequence of transforms in order.
///
/// `Compose` is itself a [`Transform`], so pipelines nest. Reseeding a
/// `Compose` reseeds its own state and hands every child a seed drawn from it.
pub struct Compose<I> {
    transforms: Vec<Box<dyn Transform<I>>>,
    state: RandomState,
}

impl<I> Compose<I> {
    pub fn new(transforms: Vec<Box<dyn Transform<I>>>) -> Self {
        Compose {
            transforms,
            state: RandomState::new(),
        }
    }

    /// Appends a transform to the end of the chain.
    pub fn with<T: Transform<I> + 'static>(mut self, transform: T) -> Self {
        self.transforms.push(Box::new(transform));
        self
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

impl<I> Default for Compose<I> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<I> Transform<I> for Compose<I> {
    fn apply(&mut self, input: I) -> Result<I, MediRustError> {
        let total = self.transforms.len();
        let mut current = input;
        for (i, transform) in self.transforms.iter_mut().enumerate() {
            log::trace!("Compose: applying transform {}/{}", i + 1, total);
            current = transform.apply(current)?;
        }
        Ok(current)
    }

    fn set_random_state(&mut self, seed: u64) {
        self.state.reseed(seed);
        for transform in self.transforms.iter_mut() {
            transform.set_random_state(self.state.next_seed());
        }
    }
}

#[cfg(test)]
#[path = "compose_test.rs"]
mod tests;
