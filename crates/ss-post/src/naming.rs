//! Column naming.
//!
//! Names follow `{object}_{locator}_{variable}` with every space removed from
//! the variable, e.g. `Line1_NodeA_Tension`, `Line2_EndSeg3_DynamicRx`.

use ss_core::format_value;
use ss_engine::ObjectRef;

use crate::spec::LineEnd;

pub fn strip_spaces(variable: &str) -> String {
    variable.chars().filter(|c| !c.is_whitespace()).collect()
}

pub fn column_name(object: ObjectRef, locator: &str, variable: &str) -> String {
    format!("{}_{}_{}", object, locator, strip_spaces(variable))
}

/// Locator of 1-based node `node` on a line with `node_count` nodes.
///
/// The first and last nodes are the physical ends and are always named `A`
/// and `B`; a node is never called `Node1` or `Node{N}`.
pub fn node_locator(node: usize, node_count: usize) -> String {
    if node == 1 {
        "NodeA".to_string()
    } else if node == node_count {
        "NodeB".to_string()
    } else {
        format!("Node{}", node)
    }
}

pub fn end_locator(end: LineEnd) -> &'static str {
    match end {
        LineEnd::A => "NodeA",
        LineEnd::B => "NodeB",
    }
}

/// Segments are numbered from 1 in names, from 0 in selectors.
pub fn segment_locator(segment: usize) -> String {
    format!("EndSeg{}", segment + 1)
}

pub fn arc_length_locator(arc_length: f64) -> String {
    format!("ArcLen{}", format_value(arc_length))
}
