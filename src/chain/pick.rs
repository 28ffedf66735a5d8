use crate::foundation::math::SplitMix64;

/// A continuation the controller may pick next.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    /// Index into the library's segment list.
    pub segment: usize,
    /// Precomputed boundary distance; lower is smoother.
    pub distance: f64,
}

/// Chooses one candidate from a non-empty list, returning its position in the slice.
///
/// Returning `None` (or an out-of-range position) makes the controller fall back to
/// the ordered list.
pub trait CandidatePicker: Send {
    /// Pick among `candidates`.
    fn pick(&mut self, candidates: &[Candidate]) -> Option<usize>;
}

impl<F> CandidatePicker for F
where
    F: FnMut(&[Candidate]) -> Option<usize> + Send,
{
    fn pick(&mut self, candidates: &[Candidate]) -> Option<usize> {
        self(candidates)
    }
}

/// Uniform choice driven by a seeded generator, so a run can be replayed.
#[derive(Clone, Debug)]
pub struct RandomPick {
    rng: SplitMix64,
}

impl RandomPick {
    /// Picker seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SplitMix64::new(seed),
        }
    }
}

impl CandidatePicker for RandomPick {
    fn pick(&mut self, candidates: &[Candidate]) -> Option<usize> {
        if candidates.is_empty() {
            return None;
        }
        Some(self.rng.below(candidates.len()))
    }
}

/// Smallest distance wins; ties go to the earliest candidate.
#[derive(Clone, Copy, Debug, Default)]
pub struct BestPick;

impl CandidatePicker for BestPick {
    fn pick(&mut self, candidates: &[Candidate]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, c) in candidates.iter().enumerate() {
            match best {
                Some((_, d)) if c.distance >= d => {}
                _ => best = Some((i, c.distance)),
            }
        }
        best.map(|(i, _)| i)
    }
}

/// Configured picking strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidatePick {
    /// Uniformly random among candidates.
    #[default]
    Random,
    /// Lowest distance.
    Best,
}

impl CandidatePick {
    /// Build the picker this strategy names.
    pub fn picker(self, seed: u64) -> Box<dyn CandidatePicker> {
        match self {
            Self::Random => Box::new(RandomPick::new(seed)),
            Self::Best => Box::new(BestPick),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chain/pick.rs"]
mod tests;
