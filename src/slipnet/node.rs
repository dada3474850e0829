use crate::Activation;
use petgraph::graph::NodeIndex;

pub const ACTIVATION_LOW: Activation = 20;
pub const ACTIVATION_MID: Activation = 50;
pub const ACTIVATION_HIGH: Activation = 80;
pub const ACTIVATION_HIGHEST: Activation = 100;

/// a node fires once its activation reaches this band
pub const FIRING_THRESHOLD: Activation = ACTIVATION_HIGH;

/// how much a non-fixed node's activation decays toward zero per `step_decay()`
pub const DECAY_STEP: Activation = 3;

/// the three arithmetic operations Numbo is allowed to combine bricks with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
}

impl Operation {
    pub fn symbol(self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply => "*",
        }
    }

    /// the slipnet concept label this operation corresponds to
    pub fn concept_label(self) -> &'static str {
        match self {
            Operation::Add => "addition",
            Operation::Subtract => "subtraction",
            Operation::Multiply => "multiplication",
        }
    }

    /// evaluates left `op` right, honoring each operation's precondition
    /// (subtract requires a positive result, multiply refuses a `1` operand)
    pub fn apply(self, left: i64, right: i64) -> Option<i64> {
        match self {
            Operation::Add => Some(left + right),
            Operation::Subtract => {
                let result = left - right;
                if result > 0 {
                    Some(result)
                } else {
                    None
                }
            }
            Operation::Multiply => {
                if left == 1 || right == 1 {
                    None
                } else {
                    Some(left * right)
                }
            }
        }
    }
}

/// a partial codelet specification carried by a concept node, concretized into a
/// `Codelet::ProposeOperation` when the node (or, for `children_only` templates, one of its
/// instance children) fires
#[derive(Debug, Clone, Copy)]
pub struct CodeletTemplate {
    pub operation: Operation,
    /// when true this template is not emitted for the firing node itself, but once per
    /// instance child whose `parent_type` points back to the firing node
    pub children_only: bool,
}

/// a concept node in the slipnet: a number, an arithmetic-fact instance, a relationship,
/// or an arithmetic concept such as "addition"
pub struct SlipNode {
    pub label: String,
    pub activation: Activation,
    /// fixed nodes never decay (used for relationship nodes, which are permanent scaffolding)
    pub fixed: bool,
    /// top-level nodes are unique by label and are valid lookup roots via `Slipnet::get`
    pub top: bool,
    /// for instance nodes (e.g. the fact "3+4") that specialize a concept (e.g. "addition")
    pub parent_type: Option<NodeIndex>,
    pub description: Option<String>,
    pub templates: Vec<CodeletTemplate>,
}

impl SlipNode {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            activation: 0,
            fixed: false,
            top: true,
            parent_type: None,
            description: None,
            templates: Vec::new(),
        }
    }

    pub fn fixed(mut self, activation: Activation) -> Self {
        self.fixed = true;
        self.activation = activation;
        self
    }

    pub fn activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }

    pub fn instance_of(mut self, parent_type: NodeIndex) -> Self {
        self.top = false;
        self.parent_type = Some(parent_type);
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_template(mut self, operation: Operation, children_only: bool) -> Self {
        self.templates.push(CodeletTemplate {
            operation,
            children_only,
        });
        self
    }

    /// raises activation by `level`, clamped to [0, 100]
    pub fn raise(&mut self, level: Activation) {
        self.activation = (self.activation + level).clamp(0, ACTIVATION_HIGHEST);
    }

    pub fn fires(&self) -> bool {
        self.activation >= FIRING_THRESHOLD
    }

    pub fn decay(&mut self) {
        if !self.fixed {
            self.activation = (self.activation - DECAY_STEP).max(0);
        }
    }
}
