use std::collections::HashMap;

/// Free-form key/value tags attached to an OSM element.
pub type TagMap = HashMap<String, String>;

/// An OSM node: a geodetic coordinate with tags.
///
/// `planar` starts out empty and is set exactly once, when the node is
/// projected into the target CRS.
#[derive(Debug)]
pub struct OsmNode {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
    pub tags: TagMap,
    pub planar: Option<geo::Coord>,
}

impl OsmNode {
    pub fn new(id: i64, lat: f64, lon: f64, tags: TagMap) -> Self {
        Self {
            id,
            lat,
            lon,
            tags,
            planar: None,
        }
    }
}

/// An OSM way: an ordered list of node references with tags.
///
/// `node_refs` are weak references into the node table. `geometry` holds the
/// projected coordinates of the references that could be resolved, filled in
/// during assembly; it is never longer than `node_refs`.
#[derive(Debug)]
pub struct OsmWay {
    pub id: i64,
    pub node_refs: Vec<i64>,
    pub tags: TagMap,
    pub geometry: Vec<geo::Coord>,
}

impl OsmWay {
    pub fn new(id: i64, node_refs: Vec<i64>, tags: TagMap) -> Self {
        Self {
            id,
            node_refs,
            tags,
            geometry: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Node,
    Way,
    Relation,
}

#[derive(Debug)]
pub struct RelationMember {
    pub kind: MemberKind,
    pub reference: i64,
    pub role: String,
}

/// An OSM relation. Members are carried through for counting but no geometry
/// is assembled from them.
#[derive(Debug)]
pub struct OsmRelation {
    pub id: i64,
    pub members: Vec<RelationMember>,
    pub tags: TagMap,
}
