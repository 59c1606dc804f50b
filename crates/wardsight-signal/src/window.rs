//! Fixed-capacity FIFO sample windows.

/// A bounded sequence of samples with FIFO eviction.
///
/// Capacity is fixed at construction; appending beyond capacity evicts
/// the oldest sample. Samples are stored oldest first and exposed as a
/// contiguous slice for spectral analysis.
#[derive(Debug, Clone)]
pub struct SampleWindow<T> {
    samples: Vec<T>,
    capacity: usize,
}

impl<T: Copy> SampleWindow<T> {
    /// Create a window with the given capacity (at least 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, evicting the oldest if the window is full.
    pub fn push(&mut self, sample: T) {
        if self.samples.len() >= self.capacity {
            self.samples.remove(0);
        }
        self.samples.push(sample);
    }

    /// Number of buffered samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the window holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Fixed capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Readiness predicate: `len >= min_samples`.
    #[must_use]
    pub fn is_ready(&self, min_samples: usize) -> bool {
        self.samples.len() >= min_samples
    }

    /// Buffered samples, oldest first.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.samples
    }

    /// Discard all buffered samples. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}
