use petgraph::graph::NodeIndex;

/// the kind of problem-instance node a cyto node represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Target,
    Secondary,
    Brick,
    Block,
    Operation,
}

/// a cyto node's place in the free -> pending -> taken|destroyed state machine (§4.3)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Free,
    Pending,
    Taken,
    Destroyed,
}

/// a workspace element: a brick, a constructed block, its operation, or a (secondary) target
pub struct CytoNode {
    pub label: String,
    pub kind: Kind,
    /// back-reference to the slipnet concept with the same label, if one exists
    pub concept: Option<NodeIndex>,
    pub status: Status,
    pub attractiveness: i64,
    /// outbound structural links: for a BLOCK, exactly one entry (its OPERATION);
    /// for an OPERATION, exactly two entries (left operand, then right operand)
    pub links: Vec<NodeIndex>,
    /// secondary targets spawned from this BLOCK, if any
    pub secondaries: Option<Vec<NodeIndex>>,
}

impl CytoNode {
    pub fn new(label: impl Into<String>, kind: Kind) -> Self {
        Self {
            label: label.into(),
            kind,
            concept: None,
            status: Status::Free,
            attractiveness: 0,
            links: Vec::new(),
            secondaries: None,
        }
    }

    pub fn with_concept(mut self, concept: Option<NodeIndex>) -> Self {
        self.concept = concept;
        self
    }

    pub fn with_attractiveness(mut self, attractiveness: i64) -> Self {
        self.attractiveness = attractiveness;
        self
    }

    pub fn with_links(mut self, links: Vec<NodeIndex>) -> Self {
        self.links = links;
        self
    }

    pub fn value(&self) -> i64 {
        self.label.parse().unwrap_or(0)
    }
}
