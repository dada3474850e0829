use super::{Codelet, Context, FollowupTemplate};
use crate::cytoplasm::{Kind, Status};
use crate::rack::{Rack, URGENCY_LOW, URGENCY_MICRO};
use crate::slipnet::node::Operation;
use petgraph::graph::NodeIndex;
use rand::Rng;

/// reads `instance`'s concrete operand and result labels off the role-marker links the
/// firing concept declared ("requires"/"produces"), and queues a `seek_reasonable_facsimile`
/// to go find cyto nodes wearing those labels
pub fn propose_operation(ctx: &mut Context, operation: Operation, instance: NodeIndex) -> Vec<(Codelet, u32)> {
    let concept = match ctx.slipnet.get(operation.concept_label()) {
        Some(concept) => concept,
        None => return Vec::new(),
    };
    let requires_role = ctx.slipnet.role_for(concept, "requires");
    let produces_role = ctx.slipnet.role_for(concept, "produces");

    let desired: Vec<String> = requires_role
        .map(|role| ctx.slipnet.linked_labels(instance, role))
        .unwrap_or_default();
    let proposed = produces_role
        .and_then(|role| ctx.slipnet.linked_labels(instance, role).into_iter().next())
        .unwrap_or_else(|| ctx.slipnet.node(instance).label.clone());

    if desired.len() < 2 {
        log::trace!(
            "propose_operation: {} has no concrete operand pair, skipping",
            ctx.slipnet.node(instance).label
        );
        return Vec::new();
    }

    let followup = match operation {
        Operation::Add => FollowupTemplate::Add,
        Operation::Subtract => FollowupTemplate::Subtract,
        Operation::Multiply => FollowupTemplate::Multiply,
    };
    vec![(
        Codelet::SeekReasonableFacsimile {
            desired,
            proposed,
            followups: vec![followup],
            attempt: 1,
        },
        URGENCY_LOW,
    )]
}

/// hunts the cytoplasm for a free (or syntactically similar) node per desired label,
/// temporarily marking found nodes pending so the same node isn't claimed twice within one
/// search. A full match enqueues the bound arithmetic followups; a partial match retries once.
pub fn seek_reasonable_facsimile(
    ctx: &mut Context,
    desired: Vec<String>,
    proposed: String,
    followups: Vec<FollowupTemplate>,
    attempt: u8,
) -> Vec<(Codelet, u32)> {
    log::debug!("seek_reasonable_facsimile: desired={desired:?} proposed={proposed} attempt={attempt}");
    let mut found = Vec::new();
    for label in &desired {
        let candidate = ctx
            .cytoplasm
            .find_exact(label, &[Kind::Brick, Kind::Block])
            .or_else(|| ctx.cytoplasm.find_near(ctx.slipnet, label, &[Kind::Brick, Kind::Block]));
        match candidate {
            Some(index) => {
                ctx.cytoplasm.node_mut(index).status = Status::Pending;
                found.push(index);
            }
            None => {
                log::trace!("seek_reasonable_facsimile: unable to satisfy {label}");
                break;
            }
        }
    }
    for &index in &found {
        ctx.cytoplasm.node_mut(index).status = Status::Free;
    }

    let mut codelets = Vec::new();
    if found.len() == desired.len() && found.len() >= 2 {
        codelets.extend(ctx.cytoplasm.adjust_temp(-1, ctx.sink));
        for followup in &followups {
            codelets.push((followup.bind(found[0], found[1]), URGENCY_LOW));
        }
    } else {
        codelets.extend(ctx.cytoplasm.adjust_temp(1, ctx.sink));
        if attempt < 2 {
            codelets.push((
                Codelet::SeekReasonableFacsimile {
                    desired,
                    proposed,
                    followups,
                    attempt: attempt + 1,
                },
                URGENCY_LOW,
            ));
        }
    }
    codelets
}

/// picks two free bricks/blocks weighted by attractiveness, orders them larger-first, and
/// proposes whichever operation (favoring higher-activation concepts) its operands allow;
/// also requeues itself 30% of the time so the search keeps idling in the background
pub fn propose_random_operation(ctx: &mut Context) -> Vec<(Codelet, u32)> {
    let mut codelets = Vec::new();
    if ctx.rng.random_range(1..=100) <= 30 {
        codelets.push((Codelet::ProposeRandomOperation, URGENCY_MICRO));
    }

    let mut pool: Rack<NodeIndex> = Rack::new();
    for index in ctx.cytoplasm.find_by_kind(&[Kind::Brick, Kind::Block], &[Status::Free]) {
        let attractiveness = ctx.cytoplasm.node(index).attractiveness;
        if attractiveness > 0 {
            pool.add(index, attractiveness as u32);
        }
    }
    if pool.len() < 2 {
        return codelets;
    }
    let a = pool.take(ctx.rng);
    let b = pool.take(ctx.rng);
    let (left, right) = if ctx.cytoplasm.node(a).value() >= ctx.cytoplasm.node(b).value() {
        (a, b)
    } else {
        (b, a)
    };

    let left_is_one = ctx.cytoplasm.node(left).label == "1";
    let right_is_one = ctx.cytoplasm.node(right).label == "1";
    let mut operations: Rack<Operation> = Rack::new();
    for (operation, label) in [
        (Operation::Multiply, "multiplication"),
        (Operation::Subtract, "subtraction"),
        (Operation::Add, "addition"),
    ] {
        if operation == Operation::Multiply && (left_is_one || right_is_one) {
            continue;
        }
        if let Some(concept) = ctx.slipnet.get(label) {
            let activation = ctx.slipnet.node(concept).activation;
            if activation > 0 {
                operations.add(operation, activation as u32);
            }
        }
    }
    if operations.is_empty() {
        return codelets;
    }
    let operation = operations.take(ctx.rng);
    codelets.push((
        match operation {
            Operation::Add => Codelet::OperationAdd { left, right },
            Operation::Subtract => Codelet::OperationSubtract { left, right },
            Operation::Multiply => Codelet::OperationMultiply { left, right },
        },
        URGENCY_LOW,
    ));
    codelets
}
