use super::{Codelet, Context};
use crate::cytoplasm::{Kind, Status};
use crate::rack::URGENCY_LOW;
use petgraph::graph::NodeIndex;

/// picks the most attractive free BLOCK to tear down, breaking ties by encounter order; a
/// cytoplasm with no free blocks has nothing to destroy (§4.3's overheat pressure is then a
/// no-op until one exists)
pub fn propose_destruction(ctx: &mut Context) -> Vec<(Codelet, u32)> {
    let mut best: Option<NodeIndex> = None;
    for index in ctx.cytoplasm.find_by_kind(&[Kind::Block], &[Status::Free]) {
        let attractiveness = ctx.cytoplasm.node(index).attractiveness;
        let beats_current = match best {
            Some(current) => attractiveness > ctx.cytoplasm.node(current).attractiveness,
            None => true,
        };
        if beats_current {
            best = Some(index);
        }
    }
    match best {
        Some(block) => {
            log::debug!("propose_destruction: targeting {}", ctx.cytoplasm.node(block).label);
            vec![(Codelet::DestroyBlock { block }, URGENCY_LOW)]
        }
        None => {
            log::trace!("propose_destruction: no free block to destroy");
            Vec::new()
        }
    }
}

pub fn destroy_block(ctx: &mut Context, block: NodeIndex) -> Vec<(Codelet, u32)> {
    if ctx.cytoplasm.node(block).status != Status::Free {
        log::trace!("destroy_block: stale target, no-op");
        return Vec::new();
    }
    ctx.cytoplasm.destroy_block(block, ctx.slipnet, ctx.sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::NullSink;
    use crate::cytoplasm::{Cytoplasm, CytoNode};
    use crate::slipnet::Slipnet;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn ctx<'a>(
        slipnet: &'a mut Slipnet,
        cytoplasm: &'a mut Cytoplasm,
        rng: &'a mut SmallRng,
        sink: &'a mut dyn crate::animation::AnimationSink,
        bricks: &'a mut Vec<i64>,
    ) -> Context<'a> {
        Context { slipnet, cytoplasm, rng, sink, bricks }
    }

    #[test]
    fn propose_destruction_picks_most_attractive_free_block() {
        let mut slipnet = Slipnet::empty();
        let mut cytoplasm = Cytoplasm::new(999);
        let mut sink = NullSink;
        let mut rng = SmallRng::seed_from_u64(1);
        let mut bricks = Vec::new();
        let low = cytoplasm.append(CytoNode::new("4", Kind::Block).with_attractiveness(4), &mut sink);
        let high = cytoplasm.append(CytoNode::new("9", Kind::Block).with_attractiveness(9), &mut sink);
        let mut c = ctx(&mut slipnet, &mut cytoplasm, &mut rng, &mut sink, &mut bricks);
        let followups = propose_destruction(&mut c);
        assert_eq!(followups.len(), 1);
        match followups[0].0 {
            Codelet::DestroyBlock { block } => assert_eq!(block, high),
            _ => panic!("expected DestroyBlock"),
        }
        let _ = low;
    }

    #[test]
    fn propose_destruction_noops_with_no_free_blocks() {
        let mut slipnet = Slipnet::empty();
        let mut cytoplasm = Cytoplasm::new(999);
        let mut sink = NullSink;
        let mut rng = SmallRng::seed_from_u64(1);
        let mut bricks = Vec::new();
        let mut c = ctx(&mut slipnet, &mut cytoplasm, &mut rng, &mut sink, &mut bricks);
        assert!(propose_destruction(&mut c).is_empty());
    }

    #[test]
    fn destroy_block_noops_on_stale_block() {
        let mut slipnet = Slipnet::empty();
        let mut cytoplasm = Cytoplasm::new(999);
        let mut sink = NullSink;
        let mut rng = SmallRng::seed_from_u64(1);
        let mut bricks = Vec::new();
        let block = cytoplasm.append(CytoNode::new("9", Kind::Block).with_attractiveness(9), &mut sink);
        cytoplasm.node_mut(block).status = Status::Destroyed;
        let mut c = ctx(&mut slipnet, &mut cytoplasm, &mut rng, &mut sink, &mut bricks);
        assert!(destroy_block(&mut c, block).is_empty());
    }
}
