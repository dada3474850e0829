//! The slipnet: a spreading-activation semantic network of numbers, arithmetic concepts,
//! arithmetic-fact instances, and the relationship nodes that label the edges between them
//! (§4.2). Relationships ("requires", "produces", "similar", "additive operand", ...) are
//! themselves slipnet nodes, so codelets look link kinds up generically by label rather than
//! matching on a closed enum.

pub mod link;
pub mod node;

pub use link::{Direction, SlipLink};
pub use node::{Operation, SlipNode, ACTIVATION_HIGHEST};

use crate::codelet::Codelet;
use crate::rack::{URGENCY_HIGH, URGENCY_HIGHEST};
use crate::Activation;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

pub struct Slipnet {
    graph: DiGraph<SlipNode, SlipLink>,
    top: HashMap<String, NodeIndex>,
}

impl Slipnet {
    /// an unseeded slipnet, for tests that only exercise a handful of hand-built nodes
    pub fn empty() -> Self {
        Self {
            graph: DiGraph::new(),
            top: HashMap::new(),
        }
    }

    /// inserts a node, registering it in the top-level label map if it's top-level
    pub fn add(&mut self, node: SlipNode) -> NodeIndex {
        let top = node.top;
        let label = node.label.clone();
        let index = self.graph.add_node(node);
        if top {
            self.top.insert(label, index);
        }
        index
    }

    pub fn get(&self, label: &str) -> Option<NodeIndex> {
        self.top.get(label).copied()
    }

    pub fn node(&self, index: NodeIndex) -> &SlipNode {
        &self.graph[index]
    }

    pub fn node_mut(&mut self, index: NodeIndex) -> &mut SlipNode {
        &mut self.graph[index]
    }

    /// adds a labeled link from `from` to `to`; `Direction::Bi` also adds the reverse edge
    /// with the same relationship and weight
    pub fn link(&mut self, from: NodeIndex, to: NodeIndex, relationship: NodeIndex, weight: f64, direction: Direction) {
        self.graph.add_edge(from, to, SlipLink { relationship, weight });
        if direction == Direction::Bi {
            self.graph.add_edge(to, from, SlipLink { relationship, weight });
        }
    }

    /// the target of `node`'s first outbound edge carrying `relationship`, i.e. its one
    /// concrete instance of that relationship
    fn linked_via(&self, node: NodeIndex, relationship: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .edges(node)
            .find(|e| e.weight().relationship == relationship)
            .map(|e| e.target())
    }

    /// all labels reachable from `node` via outbound edges carrying `relationship`, in
    /// edge-insertion order
    pub fn linked_labels(&self, node: NodeIndex, relationship: NodeIndex) -> Vec<String> {
        self.graph
            .edges(node)
            .filter(|e| e.weight().relationship == relationship)
            .map(|e| self.graph[e.target()].label.clone())
            .collect()
    }

    /// the role-marker node a concept declares via a "requires" or "produces" edge
    /// (e.g. `addition --requires--> additive operand`)
    pub fn role_for(&self, concept: NodeIndex, relationship_label: &str) -> Option<NodeIndex> {
        let relationship = self.get(relationship_label)?;
        self.linked_via(concept, relationship)
    }

    /// true if `node` has an outbound edge under `relationship_label` to a node labeled
    /// `target_label`
    pub fn has_relationship(&self, node: NodeIndex, relationship_label: &str, target_label: &str) -> bool {
        let Some(relationship) = self.get(relationship_label) else {
            return false;
        };
        self.graph.edges(node).any(|e| {
            e.weight().relationship == relationship && self.graph[e.target()].label == target_label
        })
    }

    /// every instance node whose `parent_type` points back to `parent`
    pub fn children_of(&self, parent: NodeIndex) -> Vec<NodeIndex> {
        self.graph
            .node_indices()
            .filter(|&i| self.graph[i].parent_type == Some(parent))
            .collect()
    }

    /// raises `index`'s activation by `level`, fires it if it crosses `FIRING_THRESHOLD`, and
    /// spreads one hop along its outbound links (no transitive fan-out within a single call,
    /// to bound the work a single codelet can trigger)
    pub fn activate(&mut self, index: NodeIndex, level: Activation) -> Vec<(Codelet, u32)> {
        self.graph[index].raise(level);

        let mut codelets = Vec::new();
        if self.graph[index].fires() {
            codelets.extend(self.fire(index));
        }

        let activation = self.graph[index].activation;
        let neighbors: Vec<(NodeIndex, f64)> = self
            .graph
            .edges(index)
            .map(|e| (e.target(), e.weight().weight))
            .collect();
        for (neighbor, weight) in neighbors {
            let delta = (weight * activation as f64).round() as Activation;
            if delta > 0 {
                self.graph[neighbor].raise(delta);
            }
        }
        codelets
    }

    /// emits `ProposeOperation` codelets: one per non-`children_only` template bound to `index`
    /// itself, and one per `children_only` template bound to each of `index`'s instance
    /// children (§4.2's "propagates to instance children" rule)
    fn fire(&mut self, index: NodeIndex) -> Vec<(Codelet, u32)> {
        let activation = self.graph[index].activation;
        let urgency = if activation >= ACTIVATION_HIGHEST {
            URGENCY_HIGHEST
        } else {
            URGENCY_HIGH
        };
        log::trace!("slipnet node {} fires at {activation}", self.graph[index].label);

        let templates = self.graph[index].templates.clone();
        let mut codelets = Vec::new();
        for template in templates.iter().filter(|t| !t.children_only) {
            codelets.push((
                Codelet::ProposeOperation {
                    operation: template.operation,
                    instance: index,
                },
                urgency,
            ));
        }

        let children_only: Vec<_> = templates.iter().filter(|t| t.children_only).collect();
        if !children_only.is_empty() {
            for child in self.children_of(index) {
                for template in &children_only {
                    codelets.push((
                        Codelet::ProposeOperation {
                            operation: template.operation,
                            instance: child,
                        },
                        urgency,
                    ));
                }
            }
        }
        codelets
    }

    /// decays every non-fixed node toward zero; called once per driver tick (§4.5)
    pub fn step_decay(&mut self) {
        for node in self.graph.node_weights_mut() {
            node.decay();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slipnet::node::{ACTIVATION_HIGH, ACTIVATION_MID};

    fn with_requires_produces() -> (Slipnet, NodeIndex, NodeIndex, NodeIndex) {
        let mut net = Slipnet::empty();
        let requires = net.add(SlipNode::new("requires").fixed(100));
        let produces = net.add(SlipNode::new("produces").fixed(100));
        let operand_role = net.add(SlipNode::new("additive operand").fixed(100));
        let sum_role = net.add(SlipNode::new("sum").fixed(100));
        let addition = net.add(
            SlipNode::new("addition")
                .fixed(0)
                .with_template(Operation::Add, true),
        );
        net.link(addition, operand_role, requires, 1.0, Direction::Uni);
        net.link(addition, sum_role, produces, 1.0, Direction::Uni);
        (net, addition, operand_role, sum_role)
    }

    #[test]
    fn activate_below_threshold_does_not_fire() {
        let (mut net, addition, _, _) = with_requires_produces();
        let codelets = net.activate(addition, ACTIVATION_MID);
        assert!(codelets.is_empty());
    }

    #[test]
    fn firing_concept_propagates_only_to_instance_children() {
        let (mut net, addition, operand_role, sum_role) = with_requires_produces();
        let instance = net.add(SlipNode::new("2+3").instance_of(addition));
        let two = net.add(SlipNode::new("2").fixed(0));
        let three = net.add(SlipNode::new("3").fixed(0));
        let five = net.add(SlipNode::new("5").fixed(0));
        net.link(instance, two, operand_role, 1.0, Direction::Uni);
        net.link(instance, three, operand_role, 1.0, Direction::Uni);
        net.link(instance, five, sum_role, 1.0, Direction::Uni);

        let codelets = net.activate(addition, ACTIVATION_HIGH);
        assert_eq!(codelets.len(), 1);
        match &codelets[0].0 {
            Codelet::ProposeOperation { operation, instance: bound } => {
                assert_eq!(*operation, Operation::Add);
                assert_eq!(*bound, instance);
            }
            other => panic!("expected ProposeOperation, got {other:?}"),
        }

        assert_eq!(net.linked_labels(instance, operand_role), vec!["2", "3"]);
        assert_eq!(net.linked_labels(instance, sum_role), vec!["5"]);
    }

    #[test]
    fn spreading_activation_raises_one_hop_neighbor() {
        let mut net = Slipnet::empty();
        let similar = net.add(SlipNode::new("similar").fixed(100));
        let a = net.add(SlipNode::new("30"));
        let b = net.add(SlipNode::new("32"));
        net.link(a, b, similar, 0.5, Direction::Bi);

        net.activate(a, ACTIVATION_MID);
        assert!(net.node(b).activation > 0);
        assert!(net.has_relationship(a, "similar", "32"));
    }

    #[test]
    fn decay_leaves_fixed_nodes_untouched() {
        let mut net = Slipnet::empty();
        let fixed = net.add(SlipNode::new("requires").fixed(100));
        let floating = net.add(SlipNode::new("7").activation(50));
        net.step_decay();
        assert_eq!(net.node(fixed).activation, 100);
        assert!(net.node(floating).activation < 50);
    }
}
