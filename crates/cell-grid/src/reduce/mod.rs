//! Dominant color reduction.
//!
//! A cell's representative color is its statistical mode: the exact RGB
//! value that occurs most often among the cell's pixels. Terrameter
//! cross-sections are rendered with a small discrete color legend, so the
//! mode picks the legend color a cell belongs to while ignoring
//! anti-aliasing, grid lines, and labels that would skew an average.
//!
//! Ties are broken by first-encountered order. [`ColorHistogram`] keeps its
//! entries in insertion order, so the same pixel sequence always yields the
//! same mode.

use std::collections::HashMap;

use crate::color::Rgb;

/// Insertion-ordered color frequency counter.
///
/// # Example
///
/// ```
/// use cell_grid::{ColorHistogram, Rgb};
///
/// let red = Rgb::new(255, 0, 0);
/// let blue = Rgb::new(0, 0, 255);
///
/// let histogram: ColorHistogram = [red, blue, blue].into_iter().collect();
/// assert_eq!(histogram.mode(), Some((blue, 2)));
/// assert_eq!(histogram.total(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ColorHistogram {
    /// Position of each color in `entries`.
    index: HashMap<Rgb, usize>,
    /// (color, count) in first-seen order.
    entries: Vec<(Rgb, u32)>,
    total: u32,
}

impl ColorHistogram {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one pixel.
    pub fn add(&mut self, color: Rgb) {
        match self.index.get(&color) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(color, self.entries.len());
                self.entries.push((color, 1));
            }
        }
        self.total += 1;
    }

    /// Count every pixel in `colors`.
    pub fn add_all(&mut self, colors: &[Rgb]) {
        for &color in colors {
            self.add(color);
        }
    }

    /// Number of distinct colors seen.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no pixels have been counted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of pixels counted.
    #[inline]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Number of pixels with exactly this color.
    pub fn count(&self, color: Rgb) -> u32 {
        self.index
            .get(&color)
            .map(|&slot| self.entries[slot].1)
            .unwrap_or(0)
    }

    /// Fraction of counted pixels with this color, `0.0` when empty.
    pub fn share(&self, color: Rgb) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(color) as f64 / self.total as f64
    }

    /// Most frequent color and its count; ties go to the color seen first.
    pub fn mode(&self) -> Option<(Rgb, u32)> {
        let mut best: Option<(Rgb, u32)> = None;
        for &(color, count) in &self.entries {
            // Strictly greater keeps the earlier entry on ties.
            if best.map_or(true, |(_, best_count)| count > best_count) {
                best = Some((color, count));
            }
        }
        best
    }

    /// Distinct colors with counts, in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (Rgb, u32)> + '_ {
        self.entries.iter().copied()
    }
}

impl FromIterator<Rgb> for ColorHistogram {
    fn from_iter<I: IntoIterator<Item = Rgb>>(iter: I) -> Self {
        let mut histogram = Self::new();
        for color in iter {
            histogram.add(color);
        }
        histogram
    }
}

/// Most frequent color in `pixels`, or `None` if there are no pixels.
///
/// ```
/// use cell_grid::{dominant_color, Rgb};
///
/// let bg = Rgb::new(20, 40, 200);
/// let noise = Rgb::new(250, 250, 0);
/// assert_eq!(dominant_color([bg, bg, noise, bg]), Some(bg));
/// assert_eq!(dominant_color(std::iter::empty()), None);
/// ```
pub fn dominant_color(pixels: impl IntoIterator<Item = Rgb>) -> Option<Rgb> {
    pixels
        .into_iter()
        .collect::<ColorHistogram>()
        .mode()
        .map(|(color, _)| color)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(255, 0, 0);
    const GREEN: Rgb = Rgb::new(0, 255, 0);
    const BLUE: Rgb = Rgb::new(0, 0, 255);

    #[test]
    fn test_uniform_cell_has_full_share() {
        let histogram: ColorHistogram = std::iter::repeat(GREEN).take(64).collect();

        assert_eq!(histogram.mode(), Some((GREEN, 64)));
        assert_eq!(histogram.share(GREEN), 1.0);
        assert_eq!(histogram.len(), 1);
    }

    #[test]
    fn test_empty_histogram() {
        let histogram = ColorHistogram::new();

        assert!(histogram.is_empty());
        assert_eq!(histogram.mode(), None);
        assert_eq!(histogram.share(RED), 0.0);
        assert_eq!(histogram.count(RED), 0);
    }

    #[test]
    fn test_tie_goes_to_first_seen() {
        let histogram: ColorHistogram = [BLUE, RED, RED, BLUE].into_iter().collect();
        assert_eq!(histogram.mode(), Some((BLUE, 2)));

        let histogram: ColorHistogram = [RED, BLUE, BLUE, RED].into_iter().collect();
        assert_eq!(histogram.mode(), Some((RED, 2)));
    }

    #[test]
    fn test_three_way_tie() {
        assert_eq!(dominant_color([GREEN, BLUE, RED]), Some(GREEN));
    }

    #[test]
    fn test_later_majority_wins() {
        assert_eq!(dominant_color([RED, BLUE, BLUE]), Some(BLUE));
    }

    #[test]
    fn test_counts_and_order() {
        let mut histogram = ColorHistogram::new();
        histogram.add_all(&[RED, GREEN, RED, BLUE, RED]);

        assert_eq!(histogram.total(), 5);
        assert_eq!(histogram.count(RED), 3);
        assert_eq!(histogram.count(GREEN), 1);
        assert!((histogram.share(RED) - 0.6).abs() < 1e-12);

        let order: Vec<Rgb> = histogram.iter().map(|(c, _)| c).collect();
        assert_eq!(order, vec![RED, GREEN, BLUE]);
    }

    #[test]
    fn test_near_colors_are_distinct() {
        // Byte-exact counting: 254 is not 255
        let almost_red = Rgb::new(254, 0, 0);
        assert_eq!(dominant_color([almost_red, RED, RED]), Some(RED));
        assert_eq!(
            [almost_red, RED].into_iter().collect::<ColorHistogram>().len(),
            2
        );
    }
}
