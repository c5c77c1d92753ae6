//! Bar colours for chart data.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Supplies one colour per bar.
pub trait ColorSource {
    /// Next colour, as a CSS `rgba(r, g, b)` string.
    fn next_color(&mut self) -> String;

    /// `count` colours in a row.
    fn colors(&mut self, count: usize) -> Vec<String> {
        (0..count).map(|_| self.next_color()).collect()
    }
}

const BASE: f64 = 128.0;
const RANGE: f64 = 127.0;

/// Pastel colours: each channel is `128 + |sin(u + k) * 127|` for a uniform
/// `u` in `[0, 1)` and channel offset `k`.
#[derive(Debug, Clone)]
pub struct RandomColorSource {
    rng: StdRng,
}

impl RandomColorSource {
    /// Source seeded from the OS.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible source.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn channel(&mut self, offset: f64) -> u8 {
        let u: f64 = self.rng.gen();
        (BASE + ((u + offset).sin() * RANGE).abs()) as u8
    }
}

impl ColorSource for RandomColorSource {
    fn next_color(&mut self) -> String {
        let r = self.channel(1.0);
        let g = self.channel(2.0);
        let b = self.channel(3.0);
        format!("rgba({r}, {g}, {b})")
    }
}

/// Cycles through a fixed list of colours.
#[derive(Debug, Clone)]
pub struct FixedPalette {
    colors: Vec<String>,
    next: usize,
}

impl FixedPalette {
    /// Palette over the given colours. An empty list falls back to the default.
    #[must_use]
    pub fn new(colors: Vec<String>) -> Self {
        if colors.is_empty() {
            return Self::default();
        }
        Self { colors, next: 0 }
    }
}

impl Default for FixedPalette {
    fn default() -> Self {
        Self {
            colors: [
                "rgba(234, 192, 140)",
                "rgba(151, 223, 189)",
                "rgba(146, 178, 237)",
                "rgba(240, 160, 170)",
                "rgba(201, 168, 232)",
            ]
            .iter()
            .map(|c| (*c).to_string())
            .collect(),
            next: 0,
        }
    }
}

impl ColorSource for FixedPalette {
    fn next_color(&mut self) -> String {
        let color = self.colors[self.next % self.colors.len()].clone();
        self.next = (self.next + 1) % self.colors.len();
        color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channels(color: &str) -> Vec<u16> {
        color
            .trim_start_matches("rgba(")
            .trim_end_matches(')')
            .split(", ")
            .map(|c| c.parse().unwrap())
            .collect()
    }

    #[test]
    fn test_random_colors_in_range() {
        let mut source = RandomColorSource::seeded(42);
        for color in source.colors(100) {
            let ch = channels(&color);
            assert_eq!(ch.len(), 3);
            assert!(ch.iter().all(|c| (128..=255).contains(c)), "{color}");
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let a = RandomColorSource::seeded(9).colors(5);
        let b = RandomColorSource::seeded(9).colors(5);
        assert_eq!(a, b);
    }

    #[test]
    fn test_palette_cycles() {
        let mut palette = FixedPalette::new(vec!["a".into(), "b".into()]);
        assert_eq!(palette.colors(5), vec!["a", "b", "a", "b", "a"]);
        assert_eq!(FixedPalette::new(Vec::new()).colors(1).len(), 1);
    }
}
