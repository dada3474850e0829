use super::{Codelet, Context};
use crate::cytoplasm::Status;
use crate::rack::{URGENCY_HIGH, URGENCY_LOW, URGENCY_MICRO};
use crate::slipnet::node::Operation;
use petgraph::graph::NodeIndex;

/// evaluates `op(left, right)`, honoring the operation's precondition; a stale operand (one
/// already claimed since this codelet was enqueued) or a failed precondition is a silent
/// no-op, not an error (§7)
pub fn operation(ctx: &mut Context, op: Operation, left: NodeIndex, right: NodeIndex) -> Vec<(Codelet, u32)> {
    if ctx.cytoplasm.node(left).status != Status::Free || ctx.cytoplasm.node(right).status != Status::Free {
        log::trace!("operation {op:?}: stale operand, no-op");
        return Vec::new();
    }
    let a = ctx.cytoplasm.node(left).value();
    let b = ctx.cytoplasm.node(right).value();
    let result = match op.apply(a, b) {
        Some(result) => result,
        None => {
            log::trace!("operation {op:?}({a}, {b}): precondition failed, no-op");
            return Vec::new();
        }
    };

    let distance = ctx.cytoplasm.distance_to_nearest_goal(result);
    let urgency = if distance <= 10 {
        URGENCY_HIGH
    } else if distance <= 20 {
        URGENCY_LOW
    } else {
        URGENCY_MICRO
    };
    vec![(
        Codelet::CreateBlock {
            operation: op,
            result,
            left,
            right,
        },
        urgency,
    )]
}

/// re-checks both operands are still free (they may have been claimed by another block since
/// `operation` enqueued this) before committing the cytoplasm mutation
pub fn create_block(
    ctx: &mut Context,
    operation: Operation,
    result: i64,
    left: NodeIndex,
    right: NodeIndex,
) -> Vec<(Codelet, u32)> {
    if ctx.cytoplasm.node(left).status != Status::Free || ctx.cytoplasm.node(right).status != Status::Free {
        log::trace!("create_block: stale operand, no-op");
        return Vec::new();
    }
    ctx.cytoplasm.create_block(operation, result, left, right, ctx.slipnet, ctx.sink)
}
