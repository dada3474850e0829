//! The driver loop (component F, §4.5): primes the rack from the input, then repeatedly draws
//! and runs codelets until the rack empties, the step cap is hit, or the cytoplasm reports done.

use crate::animation::AnimationSink;
use crate::codelet::{Codelet, Context};
use crate::cytoplasm::{Cytoplasm, Kind, Status};
use crate::input::Input;
use crate::rack::{Rack, URGENCY_HIGH, URGENCY_LOW, URGENCY_MID};
use crate::seed;
use crate::slipnet::node::ACTIVATION_MID;
use rand::rngs::SmallRng;
use rand::SeedableRng;

pub const DEFAULT_STEP_CAP: usize = 150;

/// a completed run: whether a block matching the target was found, its rendered tree if so,
/// and the number of steps actually taken
#[derive(Debug, Clone)]
pub struct Outcome {
    pub solved: bool,
    pub tree: Option<String>,
    pub steps: usize,
}

/// primes the rack, drives it to a termination condition, and reports the outcome. `seed`
/// pins the RNG for reproducible runs; omit it to draw entropy from the OS (§4.8).
pub fn run(input: Input, step_cap: usize, seed: Option<u64>, sink: &mut dyn AnimationSink) -> Outcome {
    let mut rng = SmallRng::seed_from_u64(seed.unwrap_or_else(rand::random::<u64>));
    let mut slipnet = seed::seed();
    let mut cytoplasm = Cytoplasm::new(input.target);
    let mut bricks = input.bricks.clone();
    let mut rack: Rack<Codelet> = Rack::new();

    rack.add(Codelet::ReadTarget { target: input.target }, URGENCY_HIGH);
    for _ in &input.bricks {
        rack.add(Codelet::ReadBrick, URGENCY_MID);
    }

    let brick_count = input.bricks.len();
    let mut steps = 0usize;
    while !rack.is_empty() && steps < step_cap && !cytoplasm.done() {
        let codelet = rack.take(&mut rng);
        let followups = {
            let mut ctx = Context {
                slipnet: &mut slipnet,
                cytoplasm: &mut cytoplasm,
                rng: &mut rng,
                sink: &mut *sink,
                bricks: &mut bricks,
            };
            codelet.run(&mut ctx)
        };

        if steps > 0 && steps % 10 == 0 {
            slipnet.step_decay();
            for index in cytoplasm.find_by_kind(&[Kind::Target, Kind::Brick], &[Status::Free]) {
                if let Some(concept) = cytoplasm.node(index).concept {
                    let ctx = Context {
                        slipnet: &mut slipnet,
                        cytoplasm: &mut cytoplasm,
                        rng: &mut rng,
                        sink: &mut *sink,
                        bricks: &mut bricks,
                    };
                    for (codelet, urgency) in ctx.slipnet.activate(concept, ACTIVATION_MID) {
                        rack.add(codelet, urgency);
                    }
                }
            }
        }

        for (codelet, urgency) in followups {
            rack.add(codelet, urgency);
        }

        cytoplasm.step_attractiveness(sink);

        let free_items = cytoplasm
            .find_by_kind(&[Kind::Brick, Kind::Block], &[Status::Free])
            .len();
        if free_items < 2 {
            rack.add(Codelet::ProposeDestruction, URGENCY_LOW);
        }

        // `brick_count` is the fixed total from input.bricks.len() taken once before the loop
        // (driver.rs:39), not a shrinking queue length: this is the literal reading of spec.md
        // §4.5's "at least as many steps have elapsed as there are bricks", not the original
        // Python's incidental aliasing of its own input list as it's drained by read_brick.
        let no_blocks = cytoplasm.find_by_kind(&[Kind::Block], &[Status::Free, Status::Taken, Status::Pending, Status::Destroyed]).is_empty();
        if rack.len() < 2 && steps >= brick_count && no_blocks {
            rack.add(Codelet::ProposeRandomOperation, URGENCY_LOW);
        }

        if steps > 20 {
            let temperature = cytoplasm.temperature();
            if temperature < 10 && rack.len() < 2 {
                rack.add(Codelet::ProposeDestruction, URGENCY_MID);
            } else if temperature >= 30 && rack.len() < 2 {
                rack.add(Codelet::ProposeRandomOperation, URGENCY_MID);
            }
        }

        steps += 1;
    }

    let tree = cytoplasm
        .find_exact(&input.target.to_string(), &[Kind::Block])
        .map(|block| cytoplasm.render(block));
    Outcome {
        solved: cytoplasm.done(),
        tree,
        steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::NullSink;

    fn solve(target: i64, bricks: &[i64], seed: u64) -> Outcome {
        let input = Input { target, bricks: bricks.to_vec() };
        let mut sink = NullSink;
        run(input, DEFAULT_STEP_CAP, Some(seed), &mut sink)
    }

    /// recursively evaluates a rendered `(opLEFTopRIGHT)` block tree, checking it really
    /// does equal the label at every level (§8's "recursively evaluating its subtree")
    fn eval_tree(tree: &str) -> i64 {
        let bytes = tree.as_bytes();
        if bytes[0] != b'(' {
            return tree.parse().unwrap();
        }
        // find the operator: the first +, -, or * not part of a nested parenthesized group
        let mut depth = 0;
        for (i, &b) in bytes.iter().enumerate() {
            match b {
                b'(' => depth += 1,
                b')' => depth -= 1,
                b'+' | b'-' | b'*' if depth == 1 => {
                    let left = &tree[1..i];
                    let right = &tree[i + 1..tree.len() - 1];
                    let l = eval_tree(left);
                    let r = eval_tree(right);
                    return match b {
                        b'+' => l + r,
                        b'-' => l - r,
                        b'*' => l * r,
                        _ => unreachable!(),
                    };
                }
                _ => {}
            }
        }
        panic!("no top-level operator found in {tree}");
    }

    #[test]
    fn scenario_11_from_2_3_5_6_solves_with_high_probability() {
        let mut solved = 0;
        const SEEDS: u64 = 100;
        for seed in 0..SEEDS {
            let outcome = solve(11, &[2, 3, 5, 6], seed);
            if outcome.solved {
                solved += 1;
                let tree = outcome.tree.expect("solved run has a tree");
                assert_eq!(eval_tree(&tree), 11);
            }
        }
        assert!(
            solved as f64 / SEEDS as f64 >= 0.9,
            "expected a >=90% solve rate (spec.md §8 scenario 1), got {solved}/{SEEDS}"
        );
    }

    #[test]
    fn scenario_10_from_5_2_3_uses_every_brick_as_leaves() {
        let mut any_solved = false;
        for seed in 0..50 {
            let outcome = solve(10, &[5, 2, 3], seed);
            if outcome.solved {
                any_solved = true;
                let tree = outcome.tree.expect("solved run has a tree");
                assert_eq!(eval_tree(&tree), 10);
                let mut leaves: Vec<i64> = tree
                    .split(|c: char| !c.is_ascii_digit())
                    .filter(|s| !s.is_empty())
                    .map(|s| s.parse().unwrap())
                    .collect();
                leaves.sort();
                assert!(leaves == vec![2, 3, 5], "leaves should be exactly {{2,3,5}}, got {leaves:?}");
                break;
            }
        }
        assert!(any_solved, "expected 5+2+3 (or similar) to be found for at least one seed");
    }

    #[test]
    fn scenario_100_from_5_20_can_reach_via_multiplication() {
        // target > 20 activates multiplication (§4.4 read_target); the 5*20 shortcut should be
        // reachable for at least one of a handful of seeds.
        let mut any_solved = false;
        for seed in 0..50 {
            let outcome = solve(100, &[5, 20], seed);
            if outcome.solved {
                any_solved = true;
                assert_eq!(eval_tree(&outcome.tree.unwrap()), 100);
            }
        }
        assert!(any_solved, "expected 5*20 to be found for at least one seed");
    }

    #[test]
    fn scenario_7_from_10_3_can_reach_via_subtraction() {
        let mut any_solved = false;
        for seed in 0..50 {
            let outcome = solve(7, &[10, 3], seed);
            if outcome.solved {
                any_solved = true;
                assert_eq!(eval_tree(&outcome.tree.unwrap()), 7);
            }
        }
        assert!(any_solved, "expected 10-3 to be found for at least one seed");
    }

    #[test]
    fn scenario_114_from_six_bricks_usually_stays_unsolved() {
        // not asserted as a hard requirement (§8: "solved-rate is documented, not asserted"),
        // but the driver must still terminate within the step cap either way.
        for seed in 0..10 {
            let outcome = solve(114, &[12, 20, 7, 1, 6, 11], seed);
            assert!(outcome.steps <= DEFAULT_STEP_CAP);
        }
    }

    #[test]
    fn every_run_terminates_within_the_step_cap() {
        for seed in 0..20 {
            let outcome = solve(42, &[2, 3, 4, 5, 6], seed);
            assert!(outcome.steps <= DEFAULT_STEP_CAP);
        }
    }

    #[test]
    fn each_input_brick_appears_at_most_once_across_live_blocks() {
        for seed in 0..20 {
            let input = Input { target: 30, bricks: vec![2, 3, 4, 5, 6, 7] };
            let mut sink = NullSink;
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut slipnet = seed::seed();
            let mut cytoplasm = Cytoplasm::new(input.target);
            let mut bricks = input.bricks.clone();
            let mut rack: Rack<Codelet> = Rack::new();
            rack.add(Codelet::ReadTarget { target: input.target }, URGENCY_HIGH);
            for _ in &input.bricks {
                rack.add(Codelet::ReadBrick, URGENCY_MID);
            }
            let mut steps = 0usize;
            while !rack.is_empty() && steps < DEFAULT_STEP_CAP && !cytoplasm.done() {
                let codelet = rack.take(&mut rng);
                let mut ctx = Context {
                    slipnet: &mut slipnet,
                    cytoplasm: &mut cytoplasm,
                    rng: &mut rng,
                    sink: &mut sink,
                    bricks: &mut bricks,
                };
                for (c, u) in codelet.run(&mut ctx) {
                    rack.add(c, u);
                }
                steps += 1;
            }

            // every live (non-destroyed) BRICK is taken by at most one block: walk the leaves
            // of every *root* block (one not itself embedded as another block's operand, i.e.
            // still Free) and assert no label is double-claimed. A Taken block is by definition
            // someone else's operand and gets visited through that parent instead.
            let blocks = cytoplasm.find_by_kind(&[Kind::Block], &[Status::Free]);
            let mut seen_leaves: Vec<String> = Vec::new();
            for block in blocks {
                collect_leaves(&cytoplasm, block, &mut seen_leaves);
            }
            let mut sorted = seen_leaves.clone();
            sorted.sort();
            let mut deduped = sorted.clone();
            deduped.dedup();
            assert_eq!(sorted, deduped, "a brick leaf appeared under more than one live block");
        }
    }

    fn collect_leaves(cytoplasm: &Cytoplasm, index: petgraph::graph::NodeIndex, out: &mut Vec<String>) {
        let node = cytoplasm.node(index);
        if node.kind == Kind::Block {
            let operation = cytoplasm.node(node.links[0]);
            for &operand in &operation.links {
                if cytoplasm.node(operand).kind == Kind::Brick {
                    out.push(cytoplasm.node(operand).label.clone());
                } else {
                    collect_leaves(cytoplasm, operand, out);
                }
            }
        }
    }
}
