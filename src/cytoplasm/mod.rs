//! The cytoplasm: the mutable workspace of bricks, blocks, and targets, plus the temperature
//! scalar that drives creative/destructive pressure (§4.3).

pub mod node;
pub use node::*;

use crate::animation::{AnimationEvent, AnimationSink};
use crate::codelet::Codelet;
use crate::rack::{URGENCY_HIGH, URGENCY_HIGHEST, URGENCY_MID};
use crate::slipnet::node::{Operation, ACTIVATION_MID};
use crate::slipnet::Slipnet;
use crate::Temperature;
use petgraph::graph::{DiGraph, NodeIndex};

const BLOCK_TEMP_STEP: Temperature = 20;

pub struct Cytoplasm {
    graph: DiGraph<CytoNode, ()>,
    temperature: Temperature,
    done: bool,
    target_label: String,
}

impl Cytoplasm {
    pub fn new(target: i64) -> Self {
        Self {
            graph: DiGraph::new(),
            temperature: 50,
            done: false,
            target_label: target.to_string(),
        }
    }

    pub fn node(&self, index: NodeIndex) -> &CytoNode {
        &self.graph[index]
    }

    pub fn node_mut(&mut self, index: NodeIndex) -> &mut CytoNode {
        &mut self.graph[index]
    }

    pub fn temperature(&self) -> Temperature {
        self.temperature
    }

    pub fn done(&self) -> bool {
        self.done
    }

    pub fn mark_done(&mut self) {
        self.done = true;
    }

    pub fn target_value(&self) -> i64 {
        self.target_label.parse().unwrap_or(0)
    }

    pub fn retire_node(&mut self, index: NodeIndex, sink: &mut dyn AnimationSink) {
        self.retire(index, sink);
    }

    pub fn len(&self) -> usize {
        self.graph
            .node_weights()
            .filter(|n| n.status != Status::Destroyed)
            .count()
    }

    /// appends a cyto node, wiring its declared structural links as graph edges, and emits
    /// the animation events for it
    pub fn append(&mut self, node: CytoNode, sink: &mut dyn AnimationSink) -> NodeIndex {
        let links = node.links.clone();
        let label = node.label.clone();
        let index = self.graph.add_node(node);
        sink.record(AnimationEvent::AddNode {
            id: index.index(),
            label: label.clone(),
        });
        sink.record(AnimationEvent::LabelNode {
            id: index.index(),
            label,
        });
        for target in links {
            self.graph.add_edge(index, target, ());
            sink.record(AnimationEvent::AddEdge {
                from: index.index(),
                to: target.index(),
            });
        }
        sink.record(AnimationEvent::NextStep);
        index
    }

    fn relabel(&mut self, index: NodeIndex, sink: &mut dyn AnimationSink) {
        let label = self.graph[index].label.clone();
        sink.record(AnimationEvent::LabelNode {
            id: index.index(),
            label,
        });
    }

    fn retire(&mut self, index: NodeIndex, sink: &mut dyn AnimationSink) {
        self.graph[index].status = Status::Destroyed;
        sink.record(AnimationEvent::RemoveNode { id: index.index() });
    }

    /// first free cyto node with this label among the allowed kinds; a match that exists but
    /// isn't free is a failed search, not a fallback to the next candidate
    pub fn find_exact(&self, label: &str, kinds: &[Kind]) -> Option<NodeIndex> {
        self.graph
            .node_indices()
            .find(|&i| self.graph[i].label == label && kinds.contains(&self.graph[i].kind))
            .filter(|&i| self.graph[i].status == Status::Free)
    }

    /// first free cyto node among the allowed kinds whose slipnet concept has a "similar"
    /// link to a concept with the given label
    pub fn find_near(&self, slipnet: &Slipnet, label: &str, kinds: &[Kind]) -> Option<NodeIndex> {
        self.graph.node_indices().find(|&i| {
            let node = &self.graph[i];
            node.status == Status::Free
                && kinds.contains(&node.kind)
                && node
                    .concept
                    .map(|concept| slipnet.has_relationship(concept, "similar", label))
                    .unwrap_or(false)
        })
    }

    pub fn find_by_kind(&self, kinds: &[Kind], statuses: &[Status]) -> Vec<NodeIndex> {
        self.graph
            .node_indices()
            .filter(|&i| kinds.contains(&self.graph[i].kind) && statuses.contains(&self.graph[i].status))
            .collect()
    }

    /// renders a block's structure recursively as `(opLEFTopRIGHT)`; a leaf brick renders as
    /// its bare label (spec.md §6's output grammar)
    pub fn render(&self, index: NodeIndex) -> String {
        let node = &self.graph[index];
        if node.kind != Kind::Block {
            return node.label.clone();
        }
        let operation = node.links[0];
        let op = &self.graph[operation];
        let left = self.render(op.links[0]);
        let right = self.render(op.links[1]);
        format!("({left}{}{right})", op.label)
    }

    /// minimum distance between `value` and any live TARGET/SECONDARY label, used to
    /// rate the urgency of a proposed arithmetic result
    pub fn distance_to_nearest_goal(&self, value: i64) -> i64 {
        self.graph
            .node_weights()
            .filter(|n| matches!(n.kind, Kind::Target | Kind::Secondary))
            .map(|n| (n.value() - value).abs())
            .min()
            .unwrap_or(i64::MAX)
    }

    /// marks both operands taken, creates the OPERATION and BLOCK nodes, updates temperature
    /// and the solved flag, and returns the follow-up codelets from §4.3
    pub fn create_block(
        &mut self,
        operation: Operation,
        result: i64,
        left: NodeIndex,
        right: NodeIndex,
        slipnet: &mut Slipnet,
        sink: &mut dyn AnimationSink,
    ) -> Vec<(Codelet, u32)> {
        self.graph[left].status = Status::Taken;
        self.graph[right].status = Status::Taken;
        self.relabel(left, sink);
        self.relabel(right, sink);

        let op_node = CytoNode::new(operation.symbol(), Kind::Operation)
            .with_links(vec![left, right]);
        let op_index = self.append(op_node, sink);

        let label = result.to_string();
        let concept = slipnet.get(&label);
        let block_node = CytoNode::new(label.clone(), Kind::Block)
            .with_concept(concept)
            .with_attractiveness(result)
            .with_links(vec![op_index]);
        let block_index = self.append(block_node, sink);

        if label == self.target_label {
            self.done = true;
            log::info!("target matched by newly created block {label}");
        }

        let mut codelets = vec![(Codelet::MatchTarget { block: block_index }, URGENCY_HIGHEST)];
        match concept {
            Some(concept) => codelets.extend(slipnet.activate(concept, ACTIVATION_MID)),
            None => codelets.push((
                Codelet::FindSyntacticallySimilar { node: block_index },
                URGENCY_MID,
            )),
        }
        codelets.extend(self.adjust_temp(-BLOCK_TEMP_STEP, sink));
        codelets
    }

    /// frees the block's operands, destroys its operation and secondaries, and returns the
    /// spreading-activation codelets produced by re-activating the freed operands' concepts
    pub fn destroy_block(
        &mut self,
        block: NodeIndex,
        slipnet: &mut Slipnet,
        sink: &mut dyn AnimationSink,
    ) -> Vec<(Codelet, u32)> {
        debug_assert_eq!(self.graph[block].kind, Kind::Block);
        log::debug!("destroying block {}", self.graph[block].label);
        let operation = self.graph[block].links[0];
        let operands = self.graph[operation].links.clone();

        let mut codelets = Vec::new();
        for operand in operands {
            self.graph[operand].status = Status::Free;
            self.relabel(operand, sink);
            sink.record(AnimationEvent::RemoveEdge {
                from: operation.index(),
                to: operand.index(),
            });
            let label = self.graph[operand].label.clone();
            if let Some(concept) = slipnet.get(&label) {
                codelets.extend(slipnet.activate(concept, crate::slipnet::node::ACTIVATION_LOW));
            }
        }
        self.retire(operation, sink);
        self.retire(block, sink);
        if let Some(secondaries) = self.graph[block].secondaries.take() {
            for secondary in secondaries {
                self.retire(secondary, sink);
            }
        }
        codelets.extend(self.adjust_temp(-BLOCK_TEMP_STEP, sink));
        codelets
    }

    /// every free BLOCK with positive attractiveness loses one point of it
    pub fn step_attractiveness(&mut self, sink: &mut dyn AnimationSink) {
        let indices: Vec<NodeIndex> = self
            .graph
            .node_indices()
            .filter(|&i| {
                let n = &self.graph[i];
                n.kind == Kind::Block && n.status == Status::Free && n.attractiveness > 0
            })
            .collect();
        for index in indices {
            self.graph[index].attractiveness -= 1;
            self.relabel(index, sink);
        }
    }

    /// clamps temperature to [0, 100]; overheating enqueues a destruction codelet, undercooling
    /// is just clamped and logged (§4.3, §7 "Undercool")
    pub fn adjust_temp(&mut self, delta: Temperature, _sink: &mut dyn AnimationSink) -> Vec<(Codelet, u32)> {
        let raised = self.temperature + delta;
        if raised > 100 {
            self.temperature = 100;
            log::debug!("temperature overheated, proposing destruction");
            return vec![(Codelet::ProposeDestruction, URGENCY_HIGH)];
        }
        if raised < 0 {
            log::warn!("temperature undercooled below 0, clamping");
            self.temperature = 0;
        } else {
            self.temperature = raised;
        }
        Vec::new()
    }
}
