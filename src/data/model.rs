// ---------------------------------------------------------------------------
// Measurements – the loaded dataset
// ---------------------------------------------------------------------------

/// The two parallel measurement series extracted from a file.
///
/// Index-aligned: sample *i* has energy `energy[i]` and duration
/// `duration[i]`. The loader drops unparseable cells independently per
/// column, so the two series *can* end up with different lengths; callers
/// that need aligned pairs should check [`Measurements::is_aligned`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Measurements {
    /// Energy values, joules.
    pub energy: Vec<f64>,
    /// Signal duration values, milliseconds.
    pub duration: Vec<f64>,
}

impl Measurements {
    /// Number of complete (energy, duration) pairs.
    pub fn len(&self) -> usize {
        self.energy.len().min(self.duration.len())
    }

    /// Whether no complete pair exists.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether both series have the same length.
    pub fn is_aligned(&self) -> bool {
        self.energy.len() == self.duration.len()
    }
}
