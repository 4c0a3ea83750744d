//! Legacy resolution of nested step identifiers by their trailing segment.
//!
//! Generated substeps are named by joining their section path with `_`
//! (`"1_3_a"` lives in section `"1_3"`, itself inside section `"1"`). Callers
//! may address such a step as `"a"`. This lookup only succeeds when the
//! ancestor chain reproduces every prefix of the identifier exactly, so an
//! identifier that legitimately contains `_` outside this convention does not
//! resolve.

use crate::core::tree::{ROOT, StepTree};
use crate::step::Step;

const SEGMENT_SEPARATOR: &str = "_";

/// First node in pre-order whose identifier ends in the segment `identifier`
/// and whose ancestors spell out the remaining prefixes up to the root.
pub fn resolve_legacy_shorthand<'a>(tree: &StepTree<'a>, identifier: &str) -> Option<&'a Step> {
    tree.preorder()
        .iter()
        .copied()
        .find(|&index| matches_shorthand(tree, index, identifier))
        .and_then(|index| tree.node(index).step)
}

fn matches_shorthand(tree: &StepTree<'_>, index: usize, identifier: &str) -> bool {
    let node = tree.node(index);
    let Some(own_id) = node.identifier() else {
        return false;
    };
    let segments: Vec<&str> = own_id.split(SEGMENT_SEPARATOR).collect();
    if segments.last() != Some(&identifier) {
        return false;
    }

    let mut ancestor = node.parent;
    for depth in (1..segments.len()).rev() {
        let expected = segments[..depth].join(SEGMENT_SEPARATOR);
        match ancestor.map(|parent| tree.node(parent)) {
            Some(parent) if parent.identifier() == Some(expected.as_str()) => {
                ancestor = parent.parent;
            }
            _ => return false,
        }
    }
    ancestor == Some(ROOT)
}
