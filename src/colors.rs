//! Stable per-species color assignment.
//!
//! Charts on different pages render series for the same species; assigning
//! colors from one registry per aggregation pass keeps a species the same
//! color no matter which chart asks first. The registry is rebuilt whenever
//! the occurrence table is reloaded and is read-only afterwards.

use std::collections::{BTreeMap, BTreeSet};

/// Species the previous classification model reported that were never valid
/// sightings at the feeder. They are dropped from tables, legends and color
/// assignment.
pub const UNRELIABLE_SPECIES: [&str; 25] = [
    "Rock Pigeon",
    "Pine Grosbeak",
    "Indigo Bunting",
    "Eurasian Collared-Dove",
    "White-crowned Sparrow",
    "Lark Sparrow",
    "Chipping Sparrow",
    "Pine Siskin",
    "Vesper Sparrow",
    "White-throated Sparrow",
    "Common Ground-Dove",
    "Cedar Waxwing",
    "Lincoln's Sparrow",
    "Evening Grosbeak",
    "American Tree Sparrow",
    "Harris's Sparrow",
    "Field Sparrow",
    "American Crow",
    "Brewer's Blackbird",
    "White-breasted Nuthatch",
    "Song Sparrow",
    "Chestnut-backed Chickadee",
    "Fox Sparrow",
    "Black Phoebe",
    "Canada Goose",
];

/// Named-color palette for per-species chart series.
pub const CHART_PALETTE: [&str; 100] = [
    "#F0F8FF", "#FAEBD7", "#00FFFF", "#7FFFD4", "#F0FFFF",
    "#F5F5DC", "#FFCEF4", "#FFB6C1", "#FFDAB9", "#CD853F",
    "#F0E68C", "#FFFFE0", "#008B8B", "#9ACD32", "#00BFFF",
    "#87CEFA", "#7FFFD4", "#66CDAA", "#00CED1", "#90EE90",
    "#D3D3D3", "#9AC6CD", "#8B8B8B", "#808080", "#9400D3",
    "#FF1493", "#B22222", "#228B22", "#DAA520", "#800000",
    "#00008B", "#0000CD", "#0000FF", "#4B0082", "#8B0000",
    "#808000", "#FFFF00", "#00FF00", "#808080", "#000000",
    "#8B4513", "#A0522D", "#C0C0C0", "#808080", "#800080",
    "#FFA500", "#FF4500", "#DA70D6", "#EEE8AA", "#98FB98",
    "#AFEEEE", "#ADD8E6", "#DDA0DD", "#D8BFD8", "#FF00FF",
    "#DC143C", "#00FFFF", "#0000FF", "#8A2BE2", "#A52A2A",
    "#DEB887", "#5F9EA0", "#7FFF00", "#D2691E", "#CD853F",
    "#FFD700", "#DAA520", "#808000", "#008000", "#800080",
    "#FF00FF", "#BC8F8F", "#483D8B", "#2F4F4F", "#00CED1",
    "#9400D3", "#FF1493", "#00BFFF", "#66CDAA", "#008B8B",
    "#B0C4DE", "#FFFFE0", "#00FF00", "#FF0000", "#8B008B",
    "#808080", "#9ACD32", "#6B8E23", "#FFA07A", "#20B2AA",
    "#87CEEB", "#6A5ACD", "#708090", "#778899", "#B0C4DE",
    "#FFFFE0", "#00FF00", "#FF0000", "#8B008B", "#808080",
];

/// Viridis sequential palette used by the histogram charts.
pub const HISTOGRAM_PALETTE: [&str; 10] = [
    "#440154", "#482878", "#3e4989", "#31688e", "#26828e",
    "#1f9e89", "#35b779", "#6ece58", "#b5de2b", "#fde725",
];

pub fn is_unreliable(common_name: &str) -> bool {
    UNRELIABLE_SPECIES.contains(&common_name)
}

/// Common name to color token mapping.
pub type ColorMap = BTreeMap<String, &'static str>;

/// Per-pass color registry shared by every chart in one render pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpeciesColors {
    /// Sorted, deduplicated common names after exclusion. Doubles as the
    /// chart category order.
    pub names: Vec<String>,
    /// Named-color assignment for line/bar series
    pub chart: ColorMap,
    /// Viridis assignment for histogram series
    pub histogram: ColorMap,
}

impl SpeciesColors {
    /// Rebuild the registry from the common names observed in the occurrence
    /// table. Deterministic: sort, dedupe, drop unreliable names, then zip
    /// against each fixed palette. When species outnumber palette entries the
    /// palette wraps around, so every species always gets a color.
    pub fn rebuild<'a, I>(common_names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let distinct: BTreeSet<&str> = common_names
            .into_iter()
            .filter(|name| !is_unreliable(name))
            .collect();
        let names: Vec<String> = distinct.into_iter().map(str::to_string).collect();

        let chart = Self::assign(&names, &CHART_PALETTE);
        let histogram = Self::assign(&names, &HISTOGRAM_PALETTE);

        Self {
            names,
            chart,
            histogram,
        }
    }

    fn assign(names: &[String], palette: &'static [&'static str]) -> ColorMap {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), palette[i % palette.len()]))
            .collect()
    }

    pub fn chart_color(&self, common_name: &str) -> Option<&'static str> {
        self.chart.get(common_name).copied()
    }

    pub fn histogram_color(&self, common_name: &str) -> Option<&'static str> {
        self.histogram.get(common_name).copied()
    }
}
