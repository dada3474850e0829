use petgraph::graph::NodeIndex;

/// whether a conceptual link is traversed one way or both ways when built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Uni,
    Bi,
}

/// a directed edge between two slipnet nodes. The relationship is itself a slipnet node
/// ("requires", "produces", "similar", "additive operand", ...), so codelets can look up
/// link kinds by label instead of matching on a closed enum.
#[derive(Debug, Clone, Copy)]
pub struct SlipLink {
    pub relationship: NodeIndex,
    pub weight: f64,
}
