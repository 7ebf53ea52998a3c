//! Color lookup tables for mapping normalized scalars to colors.
//!
//! A [`ColorTable`] is an ordered palette; [`color_of`] buckets a value in
//! `[0, 1]` into one of its entries.
//!
//! # References
//!
//! - van der Walt, S., & Smith, N. (2015). "A Better Default Colormap for Matplotlib."
//!   SciPy 2015.

use crate::color::{Rgb, Rgba};
use crate::error::{Error, Result};
use std::path::Path;

/// Number of entries in the reference viridis table.
pub const VIRIDIS_LEN: usize = 100;

/// Reference viridis palette, 100 entries sampled evenly from dark purple to yellow.
#[rustfmt::skip]
pub const VIRIDIS: [[f32; 3]; VIRIDIS_LEN] = [
    [0.267004, 0.004874, 0.329415],
    [0.269944, 0.014625, 0.341379],
    [0.273809, 0.031497, 0.358853],
    [0.276022, 0.044167, 0.370164],
    [0.278791, 0.062145, 0.386592],
    [0.280267, 0.073417, 0.397163],
    [0.281924, 0.089666, 0.412415],
    [0.28291, 0.105393, 0.426902],
    [0.283197, 0.11568, 0.436115],
    [0.283072, 0.130895, 0.449241],
    [0.282623, 0.140926, 0.457517],
    [0.281412, 0.155834, 0.469201],
    [0.279574, 0.170599, 0.479997],
    [0.278012, 0.180367, 0.486697],
    [0.275191, 0.194905, 0.496005],
    [0.273006, 0.20452, 0.501721],
    [0.269308, 0.218818, 0.509577],
    [0.26658, 0.228262, 0.514349],
    [0.262138, 0.242286, 0.520837],
    [0.257322, 0.25613, 0.526563],
    [0.253935, 0.265254, 0.529983],
    [0.248629, 0.278775, 0.534556],
    [0.244972, 0.287675, 0.53726],
    [0.239346, 0.300855, 0.540844],
    [0.233603, 0.313828, 0.543914],
    [0.229739, 0.322361, 0.545706],
    [0.223925, 0.334994, 0.548053],
    [0.220057, 0.343307, 0.549413],
    [0.214298, 0.355619, 0.551184],
    [0.210503, 0.363727, 0.552206],
    [0.204903, 0.375746, 0.553533],
    [0.19943, 0.387607, 0.554642],
    [0.19586, 0.395433, 0.555276],
    [0.190631, 0.407061, 0.556089],
    [0.187231, 0.414746, 0.556547],
    [0.182256, 0.426184, 0.55712],
    [0.177423, 0.437527, 0.557565],
    [0.174274, 0.445044, 0.557792],
    [0.169646, 0.456262, 0.55803],
    [0.166617, 0.463708, 0.558119],
    [0.162142, 0.474838, 0.55814],
    [0.157729, 0.485932, 0.558013],
    [0.154815, 0.493313, 0.55784],
    [0.150476, 0.504369, 0.55743],
    [0.147607, 0.511733, 0.557049],
    [0.143343, 0.522773, 0.556295],
    [0.140536, 0.530132, 0.555659],
    [0.136408, 0.541173, 0.554483],
    [0.132444, 0.552216, 0.553018],
    [0.129933, 0.559582, 0.551864],
    [0.126453, 0.570633, 0.549841],
    [0.124395, 0.578002, 0.548287],
    [0.121831, 0.589055, 0.545623],
    [0.120092, 0.600104, 0.54253],
    [0.119512, 0.607464, 0.540218],
    [0.119699, 0.61849, 0.536347],
    [0.120638, 0.625828, 0.533488],
    [0.123444, 0.636809, 0.528763],
    [0.126326, 0.644107, 0.525311],
    [0.132268, 0.655014, 0.519661],
    [0.14021, 0.665859, 0.513427],
    [0.146616, 0.67305, 0.508936],
    [0.157851, 0.683765, 0.501686],
    [0.166383, 0.690856, 0.496502],
    [0.180653, 0.701402, 0.488189],
    [0.196571, 0.711827, 0.479221],
    [0.20803, 0.718701, 0.472873],
    [0.226397, 0.728888, 0.462789],
    [0.239374, 0.735588, 0.455688],
    [0.259857, 0.745492, 0.444467],
    [0.281477, 0.755203, 0.432552],
    [0.296479, 0.761561, 0.424223],
    [0.319809, 0.770914, 0.411152],
    [0.335885, 0.777018, 0.402049],
    [0.360741, 0.785964, 0.387814],
    [0.377779, 0.791781, 0.377939],
    [0.404001, 0.800275, 0.362552],
    [0.430983, 0.808473, 0.346476],
    [0.449368, 0.813768, 0.335384],
    [0.477504, 0.821444, 0.318195],
    [0.496615, 0.826376, 0.306377],
    [0.525776, 0.833491, 0.288127],
    [0.555484, 0.840254, 0.269281],
    [0.575563, 0.844566, 0.256415],
    [0.606045, 0.850733, 0.236712],
    [0.626579, 0.854645, 0.223353],
    [0.657642, 0.860219, 0.203082],
    [0.678489, 0.863742, 0.189503],
    [0.709898, 0.868751, 0.169257],
    [0.741388, 0.873449, 0.149561],
    [0.762373, 0.876424, 0.137064],
    [0.79376, 0.880678, 0.120005],
    [0.814576, 0.883393, 0.110347],
    [0.845561, 0.887322, 0.099702],
    [0.876168, 0.891125, 0.09525],
    [0.89632, 0.893616, 0.096335],
    [0.926106, 0.89733, 0.104071],
    [0.945636, 0.899815, 0.112838],
    [0.974417, 0.90359, 0.130215],
    [0.993248, 0.906157, 0.143936],
];

/// Bucket index for `value` in a table of `len` entries.
///
/// The value is clamped to `[0, 1]` first (NaN counts as 0), then
/// `floor(value * len)` is clamped to `[0, len - 1]`.
#[must_use]
pub fn bucket_index(value: f32, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    ((value * len as f32).floor() as usize).min(len - 1)
}

/// Look up the color for `value` in `table`.
///
/// Out-of-range inputs saturate at the first or last entry. Returns black for
/// an empty slice; [`ColorTable`] never holds one.
#[must_use]
pub fn color_of(value: f32, table: &[Rgb]) -> Rgb {
    table
        .get(bucket_index(value, table.len()))
        .copied()
        .unwrap_or_default()
}

/// Immutable, non-empty color lookup table.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorTable {
    entries: Vec<Rgb>,
    /// Pre-quantized pixels, one per entry.
    pixels: Vec<Rgba>,
}

impl ColorTable {
    /// Create a table from RGB entries.
    ///
    /// # Errors
    ///
    /// Returns an error if `entries` is empty.
    pub fn new(entries: Vec<Rgb>) -> Result<Self> {
        if entries.is_empty() {
            return Err(Error::InvalidColorTable("table has no entries".to_string()));
        }
        let pixels = entries.iter().map(|c| c.to_rgba()).collect();
        Ok(Self { entries, pixels })
    }

    /// The reference 100-entry viridis table.
    #[must_use]
    pub fn viridis() -> Self {
        let entries: Vec<Rgb> = VIRIDIS.iter().map(|&c| Rgb::from_array(c)).collect();
        let pixels = entries.iter().map(|c| c.to_rgba()).collect();
        Self { entries, pixels }
    }

    /// Parse a table from a JSON array of `[r, g, b]` triples.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, empty, or a channel is
    /// outside `[0, 1]`.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: Vec<[f32; 3]> = serde_json::from_str(json)?;
        if let Some(idx) = raw
            .iter()
            .position(|c| c.iter().any(|ch| !(0.0..=1.0).contains(ch)))
        {
            return Err(Error::InvalidColorTable(format!(
                "entry {idx} has a channel outside [0, 1]"
            )));
        }
        Self::new(raw.into_iter().map(Rgb::from_array).collect())
    }

    /// Load a table from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.entries.get(index).copied()
    }

    /// All entries in order.
    #[must_use]
    pub fn entries(&self) -> &[Rgb] {
        &self.entries
    }

    /// Color for `value`, see [`color_of`].
    #[must_use]
    pub fn color_of(&self, value: f32) -> Rgb {
        color_of(value, &self.entries)
    }

    /// 8-bit pixel for `value`.
    #[must_use]
    pub fn pixel_of(&self, value: f32) -> Rgba {
        self.pixels[bucket_index(value, self.pixels.len())]
    }
}

impl Default for ColorTable {
    fn default() -> Self {
        Self::viridis()
    }
}
