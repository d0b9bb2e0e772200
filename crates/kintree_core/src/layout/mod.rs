//! Generation-tier layout engine.
//!
//! # Responsibility
//! - Turn a filtered member sequence into node boxes and connector geometry
//!   for an external renderer.
//! - Stay a pure function of its inputs: same members, same canvas width,
//!   same config, byte-identical output.
//!
//! # Invariants
//! - Tiers are generation values sorted ascending; rows keep input order.
//! - Connectors are only emitted between boxes that are both present in the
//!   positioned set; a filtered-out parent or spouse silently drops its
//!   connector.
//! - Each spouse pair yields exactly one segment, keyed by the unordered id
//!   pair.

use crate::model::member::{Member, MemberId};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Geometry constants for the tree canvas, in logical pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub node_width: f64,
    pub node_height: f64,
    /// Vertical distance between tier tops.
    pub tier_spacing: f64,
    /// Horizontal distance between node origins within a tier.
    pub node_spacing: f64,
    /// Top offset of the first tier.
    pub base_offset: f64,
    /// Extra space under the last tier in the suggested container height.
    pub bottom_margin: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 180.0,
            node_height: 100.0,
            tier_spacing: 250.0,
            node_spacing: 200.0,
            base_offset: 50.0,
            bottom_margin: 50.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// One straight line piece with explicit endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

/// Typed connector geometry handed to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum Connector {
    /// L-shaped parent-child link: vertical drop from the parent's
    /// bottom-center, then a horizontal run to the child's top-center.
    Parent {
        parent_id: MemberId,
        child_id: MemberId,
        drop: Segment,
        run: Segment,
    },
    /// Horizontal link between the facing edge centers of a spouse pair,
    /// ordered left box to right box.
    Spouse {
        left_id: MemberId,
        right_id: MemberId,
        line: Segment,
    },
}

/// Positioned member box.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeBox {
    pub member: Member,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl NodeBox {
    fn top_center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y,
        }
    }

    fn bottom_center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height,
        }
    }

    fn left_center(&self) -> Point {
        Point {
            x: self.x,
            y: self.y + self.height / 2.0,
        }
    }

    fn right_center(&self) -> Point {
        Point {
            x: self.x + self.width,
            y: self.y + self.height / 2.0,
        }
    }
}

/// Complete layout output for one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeLayout {
    pub nodes: Vec<NodeBox>,
    pub connectors: Vec<Connector>,
    /// Max tier y + node height + bottom margin; 0 when there are no nodes.
    pub suggested_height: f64,
}

/// Computes node placements and connector segments for the filtered set.
///
/// Tier y is `base_offset + tier_index * tier_spacing`; within a tier the
/// row is centered under `canvas_width`:
/// `x_i = (canvas_width - (count - 1) * node_spacing) / 2 + i * node_spacing`.
pub fn layout_tree(members: &[Member], canvas_width: f64, config: &LayoutConfig) -> TreeLayout {
    let mut tiers: BTreeMap<u32, Vec<&Member>> = BTreeMap::new();
    for member in members {
        tiers.entry(member.generation.max(1)).or_default().push(member);
    }

    let mut nodes: Vec<NodeBox> = Vec::with_capacity(members.len());
    let mut index_by_id: HashMap<MemberId, usize> = HashMap::with_capacity(members.len());
    for (tier_index, row) in tiers.values().enumerate() {
        let y = config.base_offset + tier_index as f64 * config.tier_spacing;
        let start_x =
            (canvas_width - (row.len() as f64 - 1.0) * config.node_spacing) / 2.0;
        for (slot, member) in row.iter().enumerate() {
            index_by_id.insert(member.id, nodes.len());
            nodes.push(NodeBox {
                member: (*member).clone(),
                x: start_x + slot as f64 * config.node_spacing,
                y,
                width: config.node_width,
                height: config.node_height,
            });
        }
    }

    let mut connectors = Vec::new();
    let mut linked_pairs: HashSet<(MemberId, MemberId)> = HashSet::new();
    for node in &nodes {
        let parent_ids = [node.member.father_id, node.member.mother_id];
        for parent_id in parent_ids.into_iter().flatten() {
            if let Some(&parent_index) = index_by_id.get(&parent_id) {
                connectors.push(parent_connector(&nodes[parent_index], node));
            }
        }

        if let Some(spouse_id) = node.member.spouse_id {
            if let Some(&spouse_index) = index_by_id.get(&spouse_id) {
                if linked_pairs.insert(pair_key(node.member.id, spouse_id)) {
                    connectors.push(spouse_connector(node, &nodes[spouse_index]));
                }
            }
        }
    }

    let suggested_height = nodes
        .iter()
        .map(|node| node.y)
        .fold(None, |max: Option<f64>, y| Some(max.map_or(y, |m| m.max(y))))
        .map_or(0.0, |max_y| max_y + config.node_height + config.bottom_margin);

    TreeLayout {
        nodes,
        connectors,
        suggested_height,
    }
}

fn parent_connector(parent: &NodeBox, child: &NodeBox) -> Connector {
    let start = parent.bottom_center();
    let elbow = Point {
        x: start.x,
        y: child.y,
    };
    Connector::Parent {
        parent_id: parent.member.id,
        child_id: child.member.id,
        drop: Segment {
            from: start,
            to: elbow,
        },
        run: Segment {
            from: elbow,
            to: child.top_center(),
        },
    }
}

fn spouse_connector(a: &NodeBox, b: &NodeBox) -> Connector {
    // Order by position (id as tiebreak) so the segment direction does not
    // depend on which partner was visited first.
    let (left, right) = if b.x < a.x || (b.x == a.x && b.member.id < a.member.id) {
        (b, a)
    } else {
        (a, b)
    };
    Connector::Spouse {
        left_id: left.member.id,
        right_id: right.member.id,
        line: Segment {
            from: left.right_center(),
            to: right.left_center(),
        },
    }
}

/// Canonical unordered pair key for spouse deduplication.
fn pair_key(a: MemberId, b: MemberId) -> (MemberId, MemberId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
