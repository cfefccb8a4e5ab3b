//! Sources of die rolls.

use core::sync::atomic::{AtomicUsize, Ordering};

use alloc::sync::Arc;
use alloc::vec::Vec;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::sync::Mutex;

/// Lowest face of the die.
pub const MIN_FACE: u8 = 1;

/// Highest face of the die.
pub const MAX_FACE: u8 = 6;

/// Produces die faces in `1..=6`.
///
/// Implementations are shared by every roll in a service, so they must be
/// callable from many threads at once.
pub trait DieSource: Send + Sync {
    /// Rolls the die once.
    fn roll(&self) -> u8;
}

impl<T: DieSource + ?Sized> DieSource for Arc<T> {
    fn roll(&self) -> u8 {
        (**self).roll()
    }
}

/// A uniformly distributed die backed by a seeded `ChaCha8` generator.
pub struct SeededDie {
    rng: Mutex<ChaCha8Rng>,
}

impl SeededDie {
    /// Creates a die with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }
}

impl DieSource for SeededDie {
    fn roll(&self) -> u8 {
        self.rng.lock().random_range(MIN_FACE..=MAX_FACE)
    }
}

/// A die that replays a fixed script of faces, cycling when it runs out.
///
/// Faces outside `1..=6` are clamped into range.
///
/// ```
/// use pigrs::{DieSource, FixedDie};
///
/// let die = FixedDie::new([4, 1]);
/// assert_eq!(die.roll(), 4);
/// assert_eq!(die.roll(), 1);
/// assert_eq!(die.roll(), 4);
/// ```
#[derive(Debug)]
pub struct FixedDie {
    faces: Vec<u8>,
    cursor: AtomicUsize,
}

impl FixedDie {
    /// Creates a die from a script of faces.
    ///
    /// # Panics
    ///
    /// Panics if `faces` is empty.
    #[must_use]
    pub fn new(faces: impl Into<Vec<u8>>) -> Self {
        let faces: Vec<u8> = faces
            .into()
            .into_iter()
            .map(|face| face.clamp(MIN_FACE, MAX_FACE))
            .collect();
        assert!(!faces.is_empty(), "a fixed die needs at least one face");
        Self {
            faces,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Creates a die that always shows `face`.
    #[must_use]
    pub fn constant(face: u8) -> Self {
        Self::new([face])
    }

    /// Returns how many faces have been rolled so far.
    #[must_use]
    pub fn rolls(&self) -> usize {
        self.cursor.load(Ordering::SeqCst)
    }
}

impl DieSource for FixedDie {
    fn roll(&self) -> u8 {
        let index = self.cursor.fetch_add(1, Ordering::SeqCst);
        self.faces[index % self.faces.len()]
    }
}
