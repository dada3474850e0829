use super::{Codelet, Context};
use crate::cytoplasm::{CytoNode, Kind};
use crate::rack::URGENCY_MID;
use crate::slipnet::node::{ACTIVATION_HIGH, ACTIVATION_LOW};
use petgraph::graph::NodeIndex;
use rand::Rng;

/// appends a TARGET node, activates the slipnet concept (or defers to syntactic similarity),
/// and primes addition/subtraction or multiplication depending on the target's size
pub fn read_target(ctx: &mut Context, target: i64) -> Vec<(Codelet, u32)> {
    log::debug!("read_target: {target}");
    let label = target.to_string();
    let concept = ctx.slipnet.get(&label);
    let node = CytoNode::new(label, Kind::Target).with_concept(concept);
    let index = ctx.cytoplasm.append(node, ctx.sink);

    let mut codelets = match concept {
        Some(concept) => ctx.slipnet.activate(concept, ACTIVATION_HIGH),
        None => vec![(
            Codelet::FindSyntacticallySimilar { node: index },
            URGENCY_MID,
        )],
    };

    if target > 20 {
        if let Some(multiplication) = ctx.slipnet.get("multiplication") {
            codelets.extend(ctx.slipnet.activate(multiplication, ACTIVATION_HIGH));
        }
    } else {
        if let Some(addition) = ctx.slipnet.get("addition") {
            codelets.extend(ctx.slipnet.activate(addition, ACTIVATION_HIGH));
        }
        if let Some(subtraction) = ctx.slipnet.get("subtraction") {
            codelets.extend(ctx.slipnet.activate(subtraction, ACTIVATION_HIGH));
        }
    }
    codelets
}

/// pops one brick uniformly at random from the remaining input and appends it as a BRICK node
pub fn read_brick(ctx: &mut Context) -> Vec<(Codelet, u32)> {
    if ctx.bricks.is_empty() {
        log::trace!("read_brick: no bricks left, no-op");
        return Vec::new();
    }
    let pick = ctx.rng.random_range(0..ctx.bricks.len());
    let value = ctx.bricks.remove(pick);
    log::debug!("read_brick: {value}");

    let label = value.to_string();
    let concept = ctx.slipnet.get(&label);
    let node = CytoNode::new(label, Kind::Brick)
        .with_concept(concept)
        .with_attractiveness(value);
    let index = ctx.cytoplasm.append(node, ctx.sink);

    match concept {
        Some(concept) => ctx.slipnet.activate(concept, ACTIVATION_HIGH),
        None => vec![(
            Codelet::FindSyntacticallySimilar { node: index },
            URGENCY_MID,
        )],
    }
}

/// rounds a label to its leading digit, zero-filled (37 -> 30, 114 -> 100), and activates
/// the matching slipnet concept at LOW if one exists, anchoring the cyto node to it
pub fn find_syntactically_similar(ctx: &mut Context, node: NodeIndex) -> Vec<(Codelet, u32)> {
    let label = ctx.cytoplasm.node(node).label.clone();
    let rounded = round_label(&label);
    log::debug!("find_syntactically_similar: {label} -> {rounded}");
    match ctx.slipnet.get(&rounded) {
        Some(concept) => {
            ctx.cytoplasm.node_mut(node).concept = Some(concept);
            ctx.slipnet.activate(concept, ACTIVATION_LOW)
        }
        None => {
            log::trace!("find_syntactically_similar: no concept for {rounded}");
            Vec::new()
        }
    }
}

fn round_label(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => {
            let zeros = "0".repeat(chars.count());
            format!("{first}{zeros}")
        }
        None => String::new(),
    }
}
