//! RNG module - block color generation
//!
//! New rows draw one color per slot from a [`ColorSource`]. The default source is
//! [`RandomColors`], a uniform draw backed by a small deterministic LCG so the same
//! seed always grows the same board. [`ScriptedColors`] replays a fixed sequence,
//! which is what tests and reproducible scenarios use.

use std::collections::VecDeque;

use crate::config::SpawnPolicy;
use crate::types::BlockColor;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits: the low bits of a power-of-two LCG cycle with a short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() >> 16) * max) >> 16
    }

    /// Current internal state (feeding it back into `new` resumes the sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Supplies the color of each newly spawned block.
pub trait ColorSource {
    fn next_color(&mut self, policy: SpawnPolicy) -> BlockColor;
}

/// Uniform random colors.
///
/// `SpawnPolicy::Full` draws from the five solid colors; `SpawnPolicy::Sparse`
/// also admits `Empty`, one chance in six.
#[derive(Debug, Clone)]
pub struct RandomColors {
    seed: u32,
    rng: SimpleRng,
}

impl RandomColors {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            rng: SimpleRng::new(seed),
        }
    }

    /// The seed this source was created with.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Current generator state; changes with every draw.
    pub fn state(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for RandomColors {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ColorSource for RandomColors {
    fn next_color(&mut self, policy: SpawnPolicy) -> BlockColor {
        match policy {
            SpawnPolicy::Full => {
                let idx = self.rng.next_range(BlockColor::SOLID.len() as u32) as usize;
                BlockColor::SOLID[idx]
            }
            SpawnPolicy::Sparse => {
                let idx = self.rng.next_range(BlockColor::ALL.len() as u32) as usize;
                BlockColor::ALL[idx]
            }
        }
    }
}

/// Replays a fixed color sequence, wrapping around when exhausted.
///
/// The spawn policy is ignored: the script is taken as written, `Empty` included.
/// An empty script yields `Empty` forever.
#[derive(Debug, Clone, Default)]
pub struct ScriptedColors {
    script: VecDeque<BlockColor>,
}

impl ScriptedColors {
    pub fn new(colors: impl IntoIterator<Item = BlockColor>) -> Self {
        Self {
            script: colors.into_iter().collect(),
        }
    }

    /// Parse a whitespace separated script such as `"r r r b b g"`.
    ///
    /// Returns `None` on the first unknown token.
    pub fn parse(script: &str) -> Option<Self> {
        script
            .split_whitespace()
            .map(BlockColor::from_str)
            .collect::<Option<VecDeque<_>>>()
            .map(|script| Self { script })
    }

    pub fn len(&self) -> usize {
        self.script.len()
    }

    pub fn is_empty(&self) -> bool {
        self.script.is_empty()
    }
}

impl ColorSource for ScriptedColors {
    fn next_color(&mut self, _policy: SpawnPolicy) -> BlockColor {
        match self.script.pop_front() {
            Some(color) => {
                self.script.push_back(color);
                color
            }
            None => BlockColor::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed_is_remapped() {
        let mut zero = SimpleRng::new(0);
        let mut one = SimpleRng::new(1);
        assert_eq!(zero.next_u32(), one.next_u32());
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..10_000 {
            assert!(rng.next_range(6) < 6);
        }
    }

    #[test]
    fn test_seed_is_kept_while_state_advances() {
        let mut colors = RandomColors::new(42);
        let before = colors.state();
        colors.next_color(SpawnPolicy::Full);
        colors.next_color(SpawnPolicy::Sparse);
        assert_eq!(colors.seed(), 42);
        assert_ne!(colors.state(), before);
        assert_eq!(RandomColors::default().seed(), 1);
    }

    #[test]
    fn test_full_policy_never_yields_empty() {
        let mut colors = RandomColors::new(99);
        for _ in 0..5_000 {
            assert!(!colors.next_color(SpawnPolicy::Full).is_empty());
        }
    }

    #[test]
    fn test_full_policy_covers_every_solid_color() {
        let mut colors = RandomColors::new(3);
        let mut seen = [false; 5];
        for _ in 0..1_000 {
            let c = colors.next_color(SpawnPolicy::Full);
            let idx = BlockColor::SOLID.iter().position(|s| *s == c).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|s| *s), "missing colors: {:?}", seen);
    }

    #[test]
    fn test_sparse_policy_admits_empty() {
        let mut colors = RandomColors::new(11);
        let empties = (0..6_000)
            .filter(|_| colors.next_color(SpawnPolicy::Sparse).is_empty())
            .count();
        // Expected around 1000.
        assert!(empties > 500 && empties < 1_500, "empties = {}", empties);
    }

    #[test]
    fn test_scripted_colors_wrap() {
        let mut colors = ScriptedColors::new([BlockColor::Red, BlockColor::Blue]);
        let drawn: Vec<_> = (0..5)
            .map(|_| colors.next_color(SpawnPolicy::Full))
            .collect();
        assert_eq!(
            drawn,
            vec![
                BlockColor::Red,
                BlockColor::Blue,
                BlockColor::Red,
                BlockColor::Blue,
                BlockColor::Red
            ]
        );
    }

    #[test]
    fn test_scripted_colors_parse() {
        let colors = ScriptedColors::parse("r r r b b g").unwrap();
        assert_eq!(colors.len(), 6);
        assert!(ScriptedColors::parse("r x").is_none());
    }

    #[test]
    fn test_empty_script_yields_empty() {
        let mut colors = ScriptedColors::default();
        assert_eq!(colors.next_color(SpawnPolicy::Full), BlockColor::Empty);
    }
}
