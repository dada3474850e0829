use super::{Codelet, Context};
use crate::cytoplasm::{CytoNode, Kind, Status};
use crate::rack::URGENCY_HIGH;
use crate::slipnet::node::ACTIVATION_MID;
use petgraph::graph::NodeIndex;

/// checks a newly created BLOCK's value against the TARGET and any SECONDARY targets still
/// standing. A TARGET hit ends the run; a SECONDARY hit bumps the block's attractiveness,
/// re-activates its concept, and retires the now-satisfied secondary. No match proposes one.
pub fn match_target(ctx: &mut Context, block: NodeIndex) -> Vec<(Codelet, u32)> {
    let label = ctx.cytoplasm.node(block).label.clone();
    match ctx.cytoplasm.find_exact(&label, &[Kind::Target, Kind::Secondary]) {
        Some(hit) if ctx.cytoplasm.node(hit).kind == Kind::Target => {
            log::info!("target matched: {label}");
            ctx.cytoplasm.mark_done();
            Vec::new()
        }
        Some(hit) => {
            log::debug!("secondary target matched: {label}");
            ctx.cytoplasm.node_mut(block).attractiveness += 10;
            let mut codelets = Vec::new();
            if let Some(concept) = ctx.cytoplasm.node(hit).concept {
                codelets.extend(ctx.slipnet.activate(concept, ACTIVATION_MID));
            }
            ctx.cytoplasm.retire_node(hit, ctx.sink);
            codelets
        }
        None => vec![(Codelet::CreateSecondaryTarget { block }, URGENCY_HIGH)],
    }
}

/// spawns a SECONDARY target at |block - target|, and (when target divides or is divided by
/// the block evenly) a second one at the integer ratio — both give the codelet catalog a
/// nearer goalpost to aim subsequent arithmetic at (§4.4)
pub fn create_secondary_target(ctx: &mut Context, block: NodeIndex) -> Vec<(Codelet, u32)> {
    if ctx.cytoplasm.node(block).status != Status::Free {
        return Vec::new();
    }
    let value = ctx.cytoplasm.node(block).value();
    let target = ctx.cytoplasm.target_value();

    let mut secondaries = Vec::new();
    let mut codelets = Vec::new();

    let delta = (value - target).abs();
    spawn_secondary(ctx, delta.to_string(), &mut secondaries, &mut codelets);

    if target != 0 && value != 0 {
        if value > target && value % target == 0 {
            spawn_secondary(ctx, (value / target).to_string(), &mut secondaries, &mut codelets);
        } else if target > value && target % value == 0 {
            spawn_secondary(ctx, (target / value).to_string(), &mut secondaries, &mut codelets);
        }
    }

    ctx.cytoplasm.node_mut(block).secondaries = Some(secondaries);
    codelets
}

fn spawn_secondary(
    ctx: &mut Context,
    label: String,
    secondaries: &mut Vec<NodeIndex>,
    codelets: &mut Vec<(Codelet, u32)>,
) {
    let concept = ctx.slipnet.get(&label);
    let index = ctx
        .cytoplasm
        .append(CytoNode::new(label, Kind::Secondary).with_concept(concept), ctx.sink);
    secondaries.push(index);
    if let Some(concept) = concept {
        codelets.extend(ctx.slipnet.activate(concept, ACTIVATION_MID));
    }
}
