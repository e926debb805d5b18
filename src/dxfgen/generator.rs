use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::anyhow;
use dxf::entities::{Circle, Entity, EntityType, LwPolyline};
use dxf::enums::AcadVersion;
use dxf::tables::Layer;
use dxf::{Color, Drawing, LineWeight, LwPolylineVertex};
use indicatif::ProgressBar;

use crate::crs::projector::{Projector, WGS84};
use crate::layers::rules::{LayerClassifier, PlanVariant};
use crate::layers::style::LayerStyle;
use crate::osm::model::{OsmNode, OsmWay};

/// Radius of the marker circle drawn for point features, in drawing units.
const POINT_MARKER_RADIUS: f64 = 5.0;

/// Nodes are only drawn as markers when they carry at least one of these keys.
const POINT_FEATURE_KEYS: [&str; 4] = ["amenity", "shop", "tourism", "highway"];

/// Assembles a DXF drawing from OSM features: projects coordinates,
/// classifies tags into layers and emits circle and polyline entities.
pub struct DxfGenerator {
    drawing: Drawing,
    classifier: LayerClassifier,
    projector: Projector,
    created_layers: HashSet<String>,
    variant: PlanVariant,
}

impl DxfGenerator {
    pub fn new(target_crs: &str, use_colors: bool, variant: PlanVariant) -> anyhow::Result<Self> {
        let mut drawing = Drawing::new();
        drawing.header.version = AcadVersion::R2010;
        Ok(Self {
            drawing,
            classifier: LayerClassifier::new(variant, use_colors),
            projector: Projector::new(WGS84, target_crs)?,
            created_layers: HashSet::new(),
            variant,
        })
    }

    /// Create the layer in the drawing unless it already exists. Calling this
    /// repeatedly with the same name adds a single layer table entry.
    pub fn ensure_layer(&mut self, style: &LayerStyle) {
        if self.created_layers.contains(&style.layer) {
            return;
        }
        let layer = Layer {
            name: style.layer.clone(),
            color: Color::from_index(style.color.index()),
            line_weight: LineWeight::from_raw_value(style.line_weight),
            ..Default::default()
        };
        self.drawing.add_layer(layer);
        self.created_layers.insert(style.layer.clone());
    }

    /// Project every node into the target CRS and draw markers for the ones
    /// tagged as point features.
    pub fn process_nodes(&mut self, nodes: &mut HashMap<i64, OsmNode>) -> anyhow::Result<()> {
        log::info!("Processing {} nodes...", nodes.len());

        for node in nodes.values_mut() {
            let (x, y) = self.projector.project(node.lon, node.lat)?;
            node.planar = Some(geo::Coord { x, y });

            if node
                .tags
                .keys()
                .any(|key| POINT_FEATURE_KEYS.contains(&key.as_str()))
            {
                let style = self.classifier.classify(&node.tags);
                self.ensure_layer(&style);

                let mut circle = Circle::default();
                circle.center = dxf::Point::new(x, y, 0.0);
                circle.radius = POINT_MARKER_RADIUS;
                let mut entity = Entity::new(EntityType::Circle(circle));
                entity.common.layer = style.layer.clone();
                self.drawing.add_entity(entity);
            }
        }
        Ok(())
    }

    /// Resolve each way's node references into planar geometry and emit it as
    /// an open polyline, or a closed one for area-like features.
    pub fn process_ways(&mut self, ways: &mut [OsmWay], nodes: &HashMap<i64, OsmNode>) {
        log::info!("Processing {} ways...", ways.len());

        let bar = ProgressBar::new(ways.len() as u64);
        for way in ways.iter_mut() {
            bar.inc(1);
            if way.tags.is_empty() {
                continue;
            }

            // Key plans drop minor pedestrian routes entirely.
            if self.variant == PlanVariant::KeyPlan
                && matches!(
                    way.tags.get("highway").map(String::as_str),
                    Some("footway") | Some("path")
                )
            {
                continue;
            }

            // References missing from the node table are omitted, not errors.
            way.geometry = way
                .node_refs
                .iter()
                .filter_map(|id| nodes.get(id).and_then(|node| node.planar))
                .collect();
            if way.geometry.len() < 2 {
                continue;
            }

            let style = self.classifier.classify(&way.tags);
            self.ensure_layer(&style);

            let closed = way.tags.get("area").map(String::as_str) == Some("yes")
                || way.tags.contains_key("building")
                || way.tags.contains_key("landuse");
            if closed {
                // Close the outline on an emitted copy; the resolved geometry
                // stays as looked up.
                let mut coords = way.geometry.clone();
                if coords.first() != coords.last() {
                    let first = coords[0];
                    coords.push(first);
                }
                self.add_polyline(&coords, true, &style.layer);
            } else {
                self.add_polyline(&way.geometry, false, &style.layer);
            }
        }
    }

    fn add_polyline(&mut self, coords: &[geo::Coord], closed: bool, layer: &str) {
        let mut polyline = LwPolyline::default();
        polyline.vertices = coords
            .iter()
            .map(|coord| LwPolylineVertex {
                x: coord.x,
                y: coord.y,
                id: 0,
                starting_width: 0.0,
                ending_width: 0.0,
                bulge: 0.0,
            })
            .collect();
        if closed {
            polyline.flags = 1;
        }
        let mut entity = Entity::new(EntityType::LwPolyline(polyline));
        entity.common.layer = layer.to_string();
        self.drawing.add_entity(entity);
    }

    pub fn save(&mut self, output_filepath: &Path) -> anyhow::Result<()> {
        let path = output_filepath
            .to_str()
            .ok_or_else(|| anyhow!("Output path {:?} is not valid UTF-8", output_filepath))?;
        self.drawing
            .save_file(path)
            .map_err(|err| anyhow!("Could not save DXF to {:?}, {:?}", output_filepath, err))?;
        log::info!("DXF file saved to {:?}", output_filepath);
        Ok(())
    }

    pub fn layer_count(&self) -> usize {
        self.created_layers.len()
    }

    pub fn drawing(&self) -> &Drawing {
        &self.drawing
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use approx::assert_abs_diff_eq;
    use dxf::entities::EntityType;
    use rstest::rstest;
    use testdir::testdir;

    use super::DxfGenerator;
    use crate::layers::rules::PlanVariant;
    use crate::layers::style::{AciColor, LayerStyle};
    use crate::osm::model::{OsmNode, OsmWay, TagMap};

    fn tags(pairs: &[(&str, &str)]) -> TagMap {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    fn generator(variant: PlanVariant) -> DxfGenerator {
        DxfGenerator::new("EPSG:3857", true, variant).unwrap()
    }

    /// Three untagged nodes forming a small triangle near the origin.
    fn triangle_nodes() -> HashMap<i64, OsmNode> {
        HashMap::from([
            (1, OsmNode::new(1, 0.0, 0.0, TagMap::new())),
            (2, OsmNode::new(2, 0.001, 0.001, TagMap::new())),
            (3, OsmNode::new(3, 0.0, 0.002, TagMap::new())),
        ])
    }

    #[test]
    fn test_process_nodes_draws_marker_for_point_features() {
        let mut nodes = HashMap::from([(
            1,
            OsmNode::new(1, 0.0, 0.0, tags(&[("amenity", "cafe")])),
        )]);
        let mut generator = generator(PlanVariant::KeyPlan);
        generator.process_nodes(&mut nodes).unwrap();

        let entities: Vec<_> = generator.drawing().entities().collect();
        assert_eq!(1, entities.len());
        assert_eq!("AMENITY", entities[0].common.layer);
        match &entities[0].specific {
            EntityType::Circle(circle) => {
                assert_abs_diff_eq!(circle.center.x, 0.0, epsilon = 1e-9);
                assert_abs_diff_eq!(circle.center.y, 0.0, epsilon = 1e-9);
                assert_abs_diff_eq!(circle.radius, 5.0, epsilon = 1e-9);
            }
            other => panic!("Expected a circle, got {:?}", other),
        }
    }

    #[rstest]
    #[case(&[])]
    #[case(&[("name", "A nameless place")])]
    fn test_process_nodes_projects_without_drawing(#[case] tag_pairs: &[(&str, &str)]) {
        let mut nodes = HashMap::from([(1, OsmNode::new(1, 0.0, 0.0, tags(tag_pairs)))]);
        let mut generator = generator(PlanVariant::KeyPlan);
        generator.process_nodes(&mut nodes).unwrap();

        assert_eq!(0, generator.drawing().entities().count());
        // The coordinate is projected even when no marker is drawn.
        assert!(nodes.get(&1).unwrap().planar.is_some());
    }

    #[test]
    fn test_process_ways_building_is_closed() {
        let mut nodes = triangle_nodes();
        let mut ways = vec![OsmWay::new(10, vec![1, 2, 3], tags(&[("building", "yes")]))];
        let mut generator = generator(PlanVariant::KeyPlan);
        generator.process_nodes(&mut nodes).unwrap();
        generator.process_ways(&mut ways, &nodes);

        let entities: Vec<_> = generator.drawing().entities().collect();
        assert_eq!(1, entities.len());
        assert_eq!("BUILDING", entities[0].common.layer);
        match &entities[0].specific {
            EntityType::LwPolyline(polyline) => {
                // The closure vertex is appended to the emitted copy.
                assert_eq!(4, polyline.vertices.len());
                assert_eq!(polyline.vertices[0].x, polyline.vertices[3].x);
                assert_eq!(polyline.vertices[0].y, polyline.vertices[3].y);
                assert_eq!(1, polyline.flags & 1);
            }
            other => panic!("Expected a polyline, got {:?}", other),
        }
        // The resolved geometry itself is not closed.
        assert_eq!(3, ways[0].geometry.len());
    }

    #[test]
    fn test_process_ways_already_closed_area_gains_no_vertex() {
        let mut nodes = triangle_nodes();
        let mut ways = vec![OsmWay::new(
            10,
            vec![1, 2, 3, 1],
            tags(&[("landuse", "meadow")]),
        )];
        let mut generator = generator(PlanVariant::KeyPlan);
        generator.process_nodes(&mut nodes).unwrap();
        generator.process_ways(&mut ways, &nodes);

        let entities: Vec<_> = generator.drawing().entities().collect();
        assert_eq!(1, entities.len());
        assert_eq!("LANDUSE", entities[0].common.layer);
        match &entities[0].specific {
            EntityType::LwPolyline(polyline) => {
                assert_eq!(4, polyline.vertices.len());
                assert_eq!(1, polyline.flags & 1);
            }
            other => panic!("Expected a polyline, got {:?}", other),
        }
    }

    #[test]
    fn test_process_ways_open_highway() {
        let mut nodes = triangle_nodes();
        let mut ways = vec![OsmWay::new(
            10,
            vec![1, 2, 3],
            tags(&[("highway", "residential")]),
        )];
        let mut generator = generator(PlanVariant::KeyPlan);
        generator.process_nodes(&mut nodes).unwrap();
        generator.process_ways(&mut ways, &nodes);

        let entities: Vec<_> = generator.drawing().entities().collect();
        assert_eq!(1, entities.len());
        assert_eq!("HIGHWAY_RESIDENTIAL", entities[0].common.layer);
        match &entities[0].specific {
            EntityType::LwPolyline(polyline) => {
                assert_eq!(3, polyline.vertices.len());
                assert_eq!(0, polyline.flags & 1);
            }
            other => panic!("Expected a polyline, got {:?}", other),
        }
    }

    #[rstest]
    #[case("footway")]
    #[case("path")]
    fn test_process_ways_key_plan_skips_minor_paths(#[case] value: &str) {
        let mut nodes = triangle_nodes();
        let mut ways = vec![OsmWay::new(10, vec![1, 2, 3], tags(&[("highway", value)]))];
        let mut generator = generator(PlanVariant::KeyPlan);
        generator.process_nodes(&mut nodes).unwrap();
        generator.process_ways(&mut ways, &nodes);

        assert_eq!(0, generator.drawing().entities().count());
        assert_eq!(0, generator.layer_count());
    }

    #[test]
    fn test_process_ways_location_plan_keeps_footway() {
        let mut nodes = triangle_nodes();
        let mut ways = vec![OsmWay::new(
            10,
            vec![1, 2, 3],
            tags(&[("highway", "footway")]),
        )];
        let mut generator = generator(PlanVariant::LocationPlan);
        generator.process_nodes(&mut nodes).unwrap();
        generator.process_ways(&mut ways, &nodes);

        let entities: Vec<_> = generator.drawing().entities().collect();
        assert_eq!(1, entities.len());
        assert_eq!("HIGHWAY_FOOTWAY", entities[0].common.layer);
        match &entities[0].specific {
            EntityType::LwPolyline(polyline) => assert_eq!(0, polyline.flags & 1),
            other => panic!("Expected a polyline, got {:?}", other),
        }
    }

    #[test]
    fn test_process_ways_skips_untagged() {
        let mut nodes = triangle_nodes();
        let mut ways = vec![OsmWay::new(10, vec![1, 2, 3], TagMap::new())];
        let mut generator = generator(PlanVariant::KeyPlan);
        generator.process_nodes(&mut nodes).unwrap();
        generator.process_ways(&mut ways, &nodes);

        assert_eq!(0, generator.drawing().entities().count());
    }

    #[test]
    fn test_process_ways_missing_references_are_omitted() {
        let mut nodes = triangle_nodes();
        let mut ways = vec![OsmWay::new(
            10,
            vec![1, 99, 3],
            tags(&[("highway", "service")]),
        )];
        let mut generator = generator(PlanVariant::KeyPlan);
        generator.process_nodes(&mut nodes).unwrap();
        generator.process_ways(&mut ways, &nodes);

        let entities: Vec<_> = generator.drawing().entities().collect();
        assert_eq!(1, entities.len());
        match &entities[0].specific {
            EntityType::LwPolyline(polyline) => assert_eq!(2, polyline.vertices.len()),
            other => panic!("Expected a polyline, got {:?}", other),
        }
        assert_eq!(2, ways[0].geometry.len());
    }

    #[test]
    fn test_process_ways_degenerate_way_is_not_emitted() {
        let mut nodes = triangle_nodes();
        // Only one of the two references resolves.
        let mut ways = vec![OsmWay::new(10, vec![1, 99], tags(&[("building", "yes")]))];
        let mut generator = generator(PlanVariant::KeyPlan);
        generator.process_nodes(&mut nodes).unwrap();
        generator.process_ways(&mut ways, &nodes);

        assert_eq!(0, generator.drawing().entities().count());
    }

    #[test]
    fn test_ensure_layer_is_idempotent() {
        let mut generator = generator(PlanVariant::KeyPlan);
        let style = LayerStyle::new("BUILDING", AciColor::Gray, 25);
        generator.ensure_layer(&style);
        generator.ensure_layer(&style);

        assert_eq!(1, generator.layer_count());
        assert_eq!(
            1,
            generator
                .drawing()
                .layers()
                .filter(|layer| layer.name == "BUILDING")
                .count()
        );
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let mut nodes = HashMap::from([(
            1,
            OsmNode::new(1, 0.0, 0.0, tags(&[("amenity", "cafe")])),
        )]);
        let mut generator = generator(PlanVariant::KeyPlan);
        generator.process_nodes(&mut nodes).unwrap();

        let test_dir = testdir!();
        let dxf_filepath = test_dir.join("output.dxf");
        generator.save(&dxf_filepath).unwrap();

        assert!(std::fs::metadata(&dxf_filepath).unwrap().len() > 0);
        let reloaded = dxf::Drawing::load_file(dxf_filepath.to_str().unwrap()).unwrap();
        assert_eq!(1, reloaded.entities().count());
        assert!(reloaded.layers().any(|layer| layer.name == "AMENITY"));
    }
}
