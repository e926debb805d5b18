extern crate osm_xml as osm;
use std::{collections::HashMap, fs::File, path::Path};

use crate::osm::model::{MemberKind, OsmNode, OsmRelation, OsmWay, RelationMember, TagMap};

/// All elements read from one OSM input file.
pub struct OsmData {
    pub nodes: HashMap<i64, OsmNode>,
    pub ways: Vec<OsmWay>,
    pub relations: Vec<OsmRelation>,
}

pub fn read_osm_file(filepath: &Path) -> anyhow::Result<OsmData> {
    let infile = File::open(filepath)?;
    let data = osm::OSM::parse(infile)?;

    let nodes: HashMap<i64, OsmNode> = data
        .nodes
        .iter()
        .map(|(id, node)| {
            (
                *id,
                OsmNode::new(*id, node.lat, node.lon, tags_to_map(&node.tags)),
            )
        })
        .collect();

    let mut ways: Vec<OsmWay> = data
        .ways
        .values()
        .map(|way| {
            let node_refs = way
                .nodes
                .iter()
                .filter_map(|reference| match reference {
                    osm::UnresolvedReference::Node(id) => Some(*id),
                    _ => None,
                })
                .collect();
            OsmWay::new(way.id, node_refs, tags_to_map(&way.tags))
        })
        .collect();
    // The parser keeps ways and relations in hash maps, sort by id so repeated
    // runs emit entities in the same order.
    ways.sort_by_key(|way| way.id);

    let mut relations: Vec<OsmRelation> = data.relations.values().map(convert_relation).collect();
    relations.sort_by_key(|relation| relation.id);

    Ok(OsmData {
        nodes,
        ways,
        relations,
    })
}

fn tags_to_map(tags: &[osm::Tag]) -> TagMap {
    tags.iter()
        .map(|tag| (tag.key.clone(), tag.val.clone()))
        .collect()
}

fn convert_relation(relation: &osm::Relation) -> OsmRelation {
    let members = relation
        .members
        .iter()
        .map(|member| match member {
            osm::Member::Node(reference, role) => RelationMember {
                kind: MemberKind::Node,
                reference: reference_id(reference),
                role: role.clone(),
            },
            osm::Member::Way(reference, role) => RelationMember {
                kind: MemberKind::Way,
                reference: reference_id(reference),
                role: role.clone(),
            },
            osm::Member::Relation(reference, role) => RelationMember {
                kind: MemberKind::Relation,
                reference: reference_id(reference),
                role: role.clone(),
            },
        })
        .collect();
    OsmRelation {
        id: relation.id,
        members,
        tags: tags_to_map(&relation.tags),
    }
}

fn reference_id(reference: &osm::UnresolvedReference) -> i64 {
    match reference {
        osm::UnresolvedReference::Node(id)
        | osm::UnresolvedReference::Way(id)
        | osm::UnresolvedReference::Relation(id) => *id,
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use testdir::testdir;

    use super::read_osm_file;
    use crate::osm::model::MemberKind;

    const SAMPLE_OSM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<osm version="0.6" generator="osm2dxf-test">
  <node id="1" lat="35.6862101" lon="139.7895073" version="1"/>
  <node id="2" lat="35.6870132" lon="139.7912979" version="1">
    <tag k="amenity" v="cafe"/>
    <tag k="name" v="Corner Cafe"/>
  </node>
  <node id="3" lat="35.6862357" lon="139.7919128" version="1"/>
  <way id="20" version="1">
    <nd ref="1"/>
    <nd ref="2"/>
    <nd ref="3"/>
    <tag k="highway" v="residential"/>
  </way>
  <way id="10" version="1">
    <nd ref="3"/>
    <nd ref="1"/>
  </way>
  <relation id="30" version="1">
    <member type="way" ref="20" role="outer"/>
    <member type="node" ref="2" role=""/>
    <tag k="type" v="multipolygon"/>
  </relation>
</osm>
"#;

    #[test]
    fn test_read_osm_file() {
        let test_dir = testdir!();
        let osm_filepath = test_dir.join("sample.osm");
        fs::write(&osm_filepath, SAMPLE_OSM).unwrap();

        let data = read_osm_file(&osm_filepath).unwrap();

        assert_eq!(3, data.nodes.len());
        let tagged_node = data.nodes.get(&2).unwrap();
        assert_eq!(2, tagged_node.tags.len());
        assert_eq!(Some(&"cafe".to_string()), tagged_node.tags.get("amenity"));
        assert!(tagged_node.planar.is_none());

        // Sorted by id regardless of document order.
        assert_eq!(2, data.ways.len());
        assert_eq!(10, data.ways[0].id);
        assert_eq!(20, data.ways[1].id);
        assert_eq!(vec![1, 2, 3], data.ways[1].node_refs);
        assert!(data.ways[1].geometry.is_empty());
        assert!(data.ways[0].tags.is_empty());

        assert_eq!(1, data.relations.len());
        let relation = &data.relations[0];
        assert_eq!(2, relation.members.len());
        assert_eq!(MemberKind::Way, relation.members[0].kind);
        assert_eq!(20, relation.members[0].reference);
        assert_eq!("outer", relation.members[0].role);
        assert_eq!(
            Some(&"multipolygon".to_string()),
            relation.tags.get("type")
        );
    }

    #[test]
    fn test_read_osm_file_missing_file() {
        let test_dir = testdir!();
        assert!(read_osm_file(&test_dir.join("nonexistent.osm")).is_err());
    }
}
