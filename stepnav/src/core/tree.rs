//! Node arena over a borrowed step list.
//!
//! The arena is built once; both traversal orders are precomputed so that
//! next/previous lookups are a scan over a flat sequence instead of a
//! recursive walk with shared state.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::step::Step;

/// Index of the synthetic root node.
pub const ROOT: usize = 0;

/// A step in the arena, or the unlabeled root.
#[derive(Debug, Clone)]
pub struct Node<'a> {
    pub step: Option<&'a Step>,
    pub parent: Option<usize>,
    /// `None` exactly when the node is a leaf.
    pub children: Option<Vec<usize>>,
}

impl<'a> Node<'a> {
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn identifier(&self) -> Option<&'a str> {
        self.step.map(|step| step.identifier.as_str())
    }
}

/// Step tree plus identifier index and traversal orders.
#[derive(Debug, Clone)]
pub struct StepTree<'a> {
    nodes: Vec<Node<'a>>,
    by_id: HashMap<&'a str, &'a Step>,
    indexed: Vec<&'a Step>,
    /// Pre-order: node, then children left to right. Root excluded.
    forward: Vec<usize>,
    /// Reverse pre-order: node, then children right to left. Root excluded.
    backward: Vec<usize>,
    forward_pos: HashMap<&'a str, usize>,
    backward_pos: HashMap<&'a str, usize>,
}

impl<'a> StepTree<'a> {
    pub fn new(steps: &'a [Step]) -> Self {
        let mut tree = StepTree {
            nodes: vec![Node {
                step: None,
                parent: None,
                children: None,
            }],
            by_id: HashMap::new(),
            indexed: Vec::new(),
            forward: Vec::new(),
            backward: Vec::new(),
            forward_pos: HashMap::new(),
            backward_pos: HashMap::new(),
        };
        let root_children = tree.add_children(ROOT, steps);
        tree.nodes[ROOT].children = root_children;

        let mut forward = Vec::with_capacity(tree.nodes.len());
        tree.collect_order(ROOT, false, &mut forward);
        let mut backward = Vec::with_capacity(tree.nodes.len());
        tree.collect_order(ROOT, true, &mut backward);

        tree.forward_pos = tree.first_positions(&forward);
        tree.backward_pos = tree.first_positions(&backward);
        tree.forward = forward;
        tree.backward = backward;
        tree.build_index();
        tree
    }

    fn add_children(&mut self, parent: usize, steps: &'a [Step]) -> Option<Vec<usize>> {
        if steps.is_empty() {
            return None;
        }
        let mut children = Vec::with_capacity(steps.len());
        for step in steps {
            let index = self.nodes.len();
            self.nodes.push(Node {
                step: Some(step),
                parent: Some(parent),
                children: None,
            });
            if step.is_section() {
                let grandchildren = self.add_children(index, &step.steps);
                self.nodes[index].children = grandchildren;
            }
            children.push(index);
        }
        Some(children)
    }

    fn collect_order(&self, index: usize, reverse: bool, out: &mut Vec<usize>) {
        if index != ROOT {
            out.push(index);
        }
        let Some(children) = &self.nodes[index].children else {
            return;
        };
        if reverse {
            for &child in children.iter().rev() {
                self.collect_order(child, reverse, out);
            }
        } else {
            for &child in children {
                self.collect_order(child, reverse, out);
            }
        }
    }

    fn first_positions(&self, order: &[usize]) -> HashMap<&'a str, usize> {
        let mut positions = HashMap::with_capacity(order.len());
        for (position, &index) in order.iter().enumerate() {
            if let Some(id) = self.nodes[index].identifier() {
                positions.entry(id).or_insert(position);
            }
        }
        positions
    }

    /// Every step reachable through sections, first registration wins.
    fn build_index(&mut self) {
        for &index in &self.forward {
            let Some(step) = self.nodes[index].step else {
                continue;
            };
            if let Entry::Vacant(slot) = self.by_id.entry(step.identifier.as_str()) {
                slot.insert(step);
                self.indexed.push(step);
            }
        }
    }

    pub fn node(&self, index: usize) -> &Node<'a> {
        &self.nodes[index]
    }

    /// Node indices in pre-order, root excluded.
    pub fn preorder(&self) -> &[usize] {
        &self.forward
    }

    /// Direct identifier lookup (no shorthand resolution).
    pub fn get(&self, identifier: &str) -> Option<&'a Step> {
        self.by_id.get(identifier).copied()
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.forward_pos.contains_key(identifier)
    }

    /// Indexed steps in pre-order.
    pub fn steps(&self) -> &[&'a Step] {
        &self.indexed
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.by_id.keys().copied()
    }

    /// Position of `identifier` in the flattened pre-order.
    pub fn position(&self, identifier: &str) -> Option<usize> {
        self.forward_pos.get(identifier).copied()
    }

    pub fn first_leaf(&self) -> Option<&'a Step> {
        self.leaves_after(None)?.next()
    }

    /// First leaf after `identifier` in pre-order.
    ///
    /// A section matches too, in which case its first leaf is returned.
    /// `None` when `identifier` is not in the tree or nothing follows it.
    pub fn next_leaf(&self, identifier: &str) -> Option<&'a Step> {
        self.leaves_after(Some(identifier))?.next()
    }

    /// First leaf after `identifier` in reverse pre-order.
    pub fn previous_leaf(&self, identifier: &str) -> Option<&'a Step> {
        self.leaves_before(identifier)?.next()
    }

    /// Leaves following `identifier` in pre-order, nearest first. Every leaf
    /// when `identifier` is `None`; `None` when it is not in the tree.
    ///
    /// Each position is visited once, so repeated identifiers cannot send a
    /// caller back to a leaf it has already seen.
    pub fn leaves_after(&self, identifier: Option<&str>) -> Option<Leaves<'_, 'a>> {
        let start = match identifier {
            Some(identifier) => self.forward_pos.get(identifier)? + 1,
            None => 0,
        };
        Some(self.leaves_in(&self.forward[start..]))
    }

    /// Leaves preceding `identifier`, nearest first.
    pub fn leaves_before(&self, identifier: &str) -> Option<Leaves<'_, 'a>> {
        let start = self.backward_pos.get(identifier)? + 1;
        Some(self.leaves_in(&self.backward[start..]))
    }

    /// An iterator that yields nothing.
    pub fn no_leaves(&self) -> Leaves<'_, 'a> {
        self.leaves_in(&[])
    }

    fn leaves_in<'t>(&'t self, order: &'t [usize]) -> Leaves<'t, 'a> {
        Leaves {
            tree: self,
            order: order.iter(),
        }
    }
}

/// Leaves along one traversal order, see [`StepTree::leaves_after`].
#[derive(Debug, Clone)]
pub struct Leaves<'t, 'a> {
    tree: &'t StepTree<'a>,
    order: std::slice::Iter<'t, usize>,
}

impl<'a> Iterator for Leaves<'_, 'a> {
    type Item = &'a Step;

    fn next(&mut self) -> Option<&'a Step> {
        let tree = self.tree;
        self.order
            .by_ref()
            .map(|&index| tree.node(index))
            .find(|node| node.is_leaf())
            .and_then(|node| node.step)
    }
}
