//! The codelet catalog (§4.4): the dozen small, stochastically-scheduled actions that read and
//! mutate the slipnet and cytoplasm. A [`Codelet`] is a tagged variant carrying whatever payload
//! it closed over when it was enqueued (mirroring this codebase's existing `Action`/`Edge`
//! tagged-enum style); [`Codelet::run`] is its one uniform operation.

mod arithmetic;
mod destroy;
mod perception;
mod propose;
mod target;

use crate::animation::AnimationSink;
use crate::cytoplasm::Cytoplasm;
use crate::slipnet::node::Operation;
use crate::slipnet::Slipnet;
use petgraph::graph::NodeIndex;
use rand::rngs::SmallRng;

/// everything a codelet needs to read, mutate, and spawn further codelets
pub struct Context<'a> {
    pub slipnet: &'a mut Slipnet,
    pub cytoplasm: &'a mut Cytoplasm,
    pub rng: &'a mut SmallRng,
    pub sink: &'a mut dyn AnimationSink,
    pub bricks: &'a mut Vec<i64>,
}

/// an arithmetic codelet not yet bound to operands; `seek_reasonable_facsimile` binds one of
/// these to the two cyto nodes it finds once both desired operand labels are satisfied
#[derive(Debug, Clone, Copy)]
pub enum FollowupTemplate {
    Add,
    Subtract,
    Multiply,
}

impl FollowupTemplate {
    pub fn bind(self, left: NodeIndex, right: NodeIndex) -> Codelet {
        match self {
            FollowupTemplate::Add => Codelet::OperationAdd { left, right },
            FollowupTemplate::Subtract => Codelet::OperationSubtract { left, right },
            FollowupTemplate::Multiply => Codelet::OperationMultiply { left, right },
        }
    }
}

#[derive(Debug, Clone)]
pub enum Codelet {
    ReadTarget {
        target: i64,
    },
    ReadBrick,
    FindSyntacticallySimilar {
        node: NodeIndex,
    },
    ProposeOperation {
        operation: Operation,
        instance: NodeIndex,
    },
    SeekReasonableFacsimile {
        desired: Vec<String>,
        proposed: String,
        followups: Vec<FollowupTemplate>,
        attempt: u8,
    },
    OperationAdd {
        left: NodeIndex,
        right: NodeIndex,
    },
    OperationSubtract {
        left: NodeIndex,
        right: NodeIndex,
    },
    OperationMultiply {
        left: NodeIndex,
        right: NodeIndex,
    },
    CreateBlock {
        operation: Operation,
        result: i64,
        left: NodeIndex,
        right: NodeIndex,
    },
    MatchTarget {
        block: NodeIndex,
    },
    CreateSecondaryTarget {
        block: NodeIndex,
    },
    ProposeRandomOperation,
    ProposeDestruction,
    DestroyBlock {
        block: NodeIndex,
    },
}

impl Codelet {
    pub fn run(self, ctx: &mut Context) -> Vec<(Codelet, u32)> {
        match self {
            Codelet::ReadTarget { target } => perception::read_target(ctx, target),
            Codelet::ReadBrick => perception::read_brick(ctx),
            Codelet::FindSyntacticallySimilar { node } => {
                perception::find_syntactically_similar(ctx, node)
            }
            Codelet::ProposeOperation { operation, instance } => {
                propose::propose_operation(ctx, operation, instance)
            }
            Codelet::SeekReasonableFacsimile {
                desired,
                proposed,
                followups,
                attempt,
            } => propose::seek_reasonable_facsimile(ctx, desired, proposed, followups, attempt),
            Codelet::OperationAdd { left, right } => {
                arithmetic::operation(ctx, Operation::Add, left, right)
            }
            Codelet::OperationSubtract { left, right } => {
                arithmetic::operation(ctx, Operation::Subtract, left, right)
            }
            Codelet::OperationMultiply { left, right } => {
                arithmetic::operation(ctx, Operation::Multiply, left, right)
            }
            Codelet::CreateBlock {
                operation,
                result,
                left,
                right,
            } => arithmetic::create_block(ctx, operation, result, left, right),
            Codelet::MatchTarget { block } => target::match_target(ctx, block),
            Codelet::CreateSecondaryTarget { block } => target::create_secondary_target(ctx, block),
            Codelet::ProposeRandomOperation => propose::propose_random_operation(ctx),
            Codelet::ProposeDestruction => destroy::propose_destruction(ctx),
            Codelet::DestroyBlock { block } => destroy::destroy_block(ctx, block),
        }
    }
}
