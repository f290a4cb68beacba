// Poster pool assembly: shuffle once per grid build, repeat to fill, truncate to the exact tile count.

use rand::seq::SliceRandom;
use rand::Rng;

/// Anything that may carry a poster image reference.
pub trait PosterSource {
    fn poster(&self) -> Option<&str>;
}

/// Fixed-size sequence of entries backing one tile grid.
#[derive(Debug, Clone, PartialEq)]
pub struct PosterPool<T> {
    entries: Vec<T>,
}

impl<T: Clone> PosterPool<T> {
    /// Shuffle `source` uniformly (Fisher–Yates), then repeat it until `required` entries exist.
    pub fn assemble<R: Rng + ?Sized>(source: &[T], required: usize, rng: &mut R) -> Self {
        let mut shuffled = source.to_vec();
        shuffled.shuffle(rng);
        PosterPool::repeat_to(shuffled, required)
    }

    /// Repeat `source` in its given order until `required` entries exist.
    pub fn from_ordered(source: &[T], required: usize) -> Self {
        PosterPool::repeat_to(source.to_vec(), required)
    }

    fn repeat_to(unit: Vec<T>, required: usize) -> Self {
        if unit.is_empty() || required == 0 {
            return PosterPool {
                entries: Vec::new(),
            };
        }

        let entries = unit.iter().cycle().take(required).cloned().collect();
        PosterPool { entries }
    }
}

impl<T> PosterPool<T> {
    /// Nominal size, including entries that will not render.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }
}

impl<T: PosterSource> PosterPool<T> {
    /// Entries that actually produce an image.
    pub fn renderable(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().filter(|e| e.poster().is_some())
    }
}
