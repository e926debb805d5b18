use clap::ValueEnum;

use crate::layers::style::{AciColor, LayerStyle};
use crate::osm::model::TagMap;

/// Output mode of the drawing: a simplified key plan or a detailed location
/// plan. The variant decides which features are styled and drawn.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanVariant {
    KeyPlan,
    LocationPlan,
}

impl PlanVariant {
    pub fn name(&self) -> &'static str {
        match self {
            PlanVariant::KeyPlan => "key-plan",
            PlanVariant::LocationPlan => "location-plan",
        }
    }
}

impl std::fmt::Display for PlanVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Styling rules for one recognized tag key: explicit per-value entries plus
/// an optional default used for values that are not listed.
struct KeyRules {
    key: &'static str,
    explicit: Vec<(&'static str, LayerStyle)>,
    default: Option<LayerStyle>,
}

/// Maps a feature's tags to a drawing layer and style.
///
/// The rule table is built once per instance and never mutated afterwards.
/// Keys are evaluated in table order, so a feature carrying several
/// recognized tags always resolves to the same layer.
pub struct LayerClassifier {
    rules: Vec<KeyRules>,
    use_colors: bool,
}

impl LayerClassifier {
    pub fn new(variant: PlanVariant, use_colors: bool) -> Self {
        let mut rules = full_rule_table();
        if variant == PlanVariant::KeyPlan {
            // Key plans leave minor pedestrian routes unstyled.
            for key_rules in rules.iter_mut().filter(|rules| rules.key == "highway") {
                key_rules
                    .explicit
                    .retain(|(value, _)| *value != "footway" && *value != "path");
            }
        }
        Self { rules, use_colors }
    }

    /// Resolve tags to a layer style. The lookup order is explicit value
    /// entry, then the key's default, then a synthesized `{KEY}_OTHER`
    /// fallback; features without any recognized key land on `MISC`.
    pub fn classify(&self, tags: &TagMap) -> LayerStyle {
        for key_rules in &self.rules {
            let value = match tags.get(key_rules.key) {
                Some(value) => value,
                None => continue,
            };
            let mut style = key_rules
                .explicit
                .iter()
                .find(|(candidate, _)| *candidate == value.as_str())
                .map(|(_, style)| style.clone())
                .or_else(|| key_rules.default.clone())
                .unwrap_or_else(|| {
                    LayerStyle::new(
                        &format!("{}_OTHER", key_rules.key.to_uppercase()),
                        AciColor::White,
                        10,
                    )
                });
            if !self.use_colors {
                style.color = AciColor::White;
            }
            return style;
        }

        let color = if self.use_colors {
            AciColor::Gray
        } else {
            AciColor::White
        };
        LayerStyle::new("MISC", color, 5)
    }
}

fn full_rule_table() -> Vec<KeyRules> {
    vec![
        KeyRules {
            key: "highway",
            explicit: vec![
                (
                    "motorway",
                    LayerStyle::new("HIGHWAY_MOTORWAY", AciColor::Red, 100),
                ),
                ("trunk", LayerStyle::new("HIGHWAY_TRUNK", AciColor::Red, 80)),
                (
                    "primary",
                    LayerStyle::new("HIGHWAY_PRIMARY", AciColor::Yellow, 60),
                ),
                (
                    "secondary",
                    LayerStyle::new("HIGHWAY_SECONDARY", AciColor::Cyan, 40),
                ),
                (
                    "tertiary",
                    LayerStyle::new("HIGHWAY_TERTIARY", AciColor::Green, 30),
                ),
                (
                    "residential",
                    LayerStyle::new("HIGHWAY_RESIDENTIAL", AciColor::White, 20),
                ),
                (
                    "service",
                    LayerStyle::new("HIGHWAY_SERVICE", AciColor::Gray, 10),
                ),
                (
                    "footway",
                    LayerStyle::new("HIGHWAY_FOOTWAY", AciColor::Magenta, 5),
                ),
                (
                    "cycleway",
                    LayerStyle::new("HIGHWAY_CYCLEWAY", AciColor::Blue, 5),
                ),
                ("path", LayerStyle::new("HIGHWAY_PATH", AciColor::Green, 5)),
            ],
            default: None,
        },
        KeyRules {
            key: "building",
            explicit: Vec::new(),
            default: Some(LayerStyle::new("BUILDING", AciColor::Gray, 25)),
        },
        KeyRules {
            key: "waterway",
            explicit: vec![
                (
                    "river",
                    LayerStyle::new("WATERWAY_RIVER", AciColor::Blue, 50),
                ),
                (
                    "stream",
                    LayerStyle::new("WATERWAY_STREAM", AciColor::Blue, 20),
                ),
                (
                    "canal",
                    LayerStyle::new("WATERWAY_CANAL", AciColor::Blue, 30),
                ),
                (
                    "drain",
                    LayerStyle::new("WATERWAY_DRAIN", AciColor::Cyan, 10),
                ),
            ],
            default: None,
        },
        KeyRules {
            key: "natural",
            explicit: vec![
                ("water", LayerStyle::new("NATURAL_WATER", AciColor::Blue, 25)),
                (
                    "coastline",
                    LayerStyle::new("NATURAL_COASTLINE", AciColor::Blue, 50),
                ),
                ("tree", LayerStyle::new("NATURAL_TREE", AciColor::Green, 5)),
                (
                    "forest",
                    LayerStyle::new("NATURAL_FOREST", AciColor::Green, 25),
                ),
            ],
            default: None,
        },
        KeyRules {
            key: "amenity",
            explicit: Vec::new(),
            default: Some(LayerStyle::new("AMENITY", AciColor::Magenta, 15)),
        },
        KeyRules {
            key: "landuse",
            explicit: Vec::new(),
            default: Some(LayerStyle::new("LANDUSE", AciColor::Yellow, 15)),
        },
    ]
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{LayerClassifier, PlanVariant};
    use crate::layers::style::AciColor;
    use crate::osm::model::TagMap;

    fn tags(pairs: &[(&str, &str)]) -> TagMap {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[rstest]
    #[case(&[("highway", "motorway")], "HIGHWAY_MOTORWAY", AciColor::Red, 100)]
    #[case(&[("highway", "residential")], "HIGHWAY_RESIDENTIAL", AciColor::White, 20)]
    #[case(&[("highway", "footway")], "HIGHWAY_FOOTWAY", AciColor::Magenta, 5)]
    #[case(&[("highway", "path")], "HIGHWAY_PATH", AciColor::Green, 5)]
    #[case(&[("waterway", "stream")], "WATERWAY_STREAM", AciColor::Blue, 20)]
    #[case(&[("natural", "coastline")], "NATURAL_COASTLINE", AciColor::Blue, 50)]
    #[case(&[("building", "yes")], "BUILDING", AciColor::Gray, 25)]
    #[case(&[("building", "apartments")], "BUILDING", AciColor::Gray, 25)]
    #[case(&[("amenity", "cafe")], "AMENITY", AciColor::Magenta, 15)]
    #[case(&[("landuse", "meadow")], "LANDUSE", AciColor::Yellow, 15)]
    #[case(&[("highway", "busway")], "HIGHWAY_OTHER", AciColor::White, 10)]
    #[case(&[("natural", "scrub")], "NATURAL_OTHER", AciColor::White, 10)]
    #[case(&[("name", "Main Street")], "MISC", AciColor::Gray, 5)]
    fn test_classify_location_plan(
        #[case] tag_pairs: &[(&str, &str)],
        #[case] expected_layer: &str,
        #[case] expected_color: AciColor,
        #[case] expected_weight: i16,
    ) {
        let classifier = LayerClassifier::new(PlanVariant::LocationPlan, true);
        let style = classifier.classify(&tags(tag_pairs));
        assert_eq!(expected_layer, style.layer);
        assert_eq!(expected_color, style.color);
        assert_eq!(expected_weight, style.line_weight);
    }

    #[test]
    fn test_classify_empty_tags() {
        let classifier = LayerClassifier::new(PlanVariant::LocationPlan, true);
        let style = classifier.classify(&TagMap::new());
        assert_eq!("MISC", style.layer);
        assert_eq!(AciColor::Gray, style.color);
        assert_eq!(5, style.line_weight);
    }

    #[rstest]
    #[case(&[("highway", "motorway")])]
    #[case(&[("waterway", "river")])]
    #[case(&[("amenity", "school")])]
    #[case(&[("highway", "busway")])]
    #[case(&[])]
    fn test_classify_monochrome_is_always_white(#[case] tag_pairs: &[(&str, &str)]) {
        for variant in [PlanVariant::KeyPlan, PlanVariant::LocationPlan] {
            let classifier = LayerClassifier::new(variant, false);
            let style = classifier.classify(&tags(tag_pairs));
            assert_eq!(AciColor::White, style.color);
        }
    }

    #[test]
    fn test_classify_key_order_wins_over_tag_order() {
        let classifier = LayerClassifier::new(PlanVariant::LocationPlan, true);

        // highway is evaluated before natural, whatever order the map yields.
        let style = classifier.classify(&tags(&[("natural", "water"), ("highway", "primary")]));
        assert_eq!("HIGHWAY_PRIMARY", style.layer);

        // building is evaluated before landuse.
        let style = classifier.classify(&tags(&[("landuse", "residential"), ("building", "yes")]));
        assert_eq!("BUILDING", style.layer);
    }

    #[rstest]
    #[case("footway")]
    #[case("path")]
    fn test_key_plan_drops_minor_path_styles(#[case] value: &str) {
        let classifier = LayerClassifier::new(PlanVariant::KeyPlan, true);
        let style = classifier.classify(&tags(&[("highway", value)]));
        // Without their explicit entries these fall through to the highway
        // fallback instead of the footway/path styles.
        assert_eq!("HIGHWAY_OTHER", style.layer);
        assert_eq!(AciColor::White, style.color);
        assert_eq!(10, style.line_weight);
    }

    #[test]
    fn test_key_plan_keeps_other_highway_styles() {
        let classifier = LayerClassifier::new(PlanVariant::KeyPlan, true);
        let style = classifier.classify(&tags(&[("highway", "cycleway")]));
        assert_eq!("HIGHWAY_CYCLEWAY", style.layer);
        assert_eq!(AciColor::Blue, style.color);
    }
}
