//! The seeded slipnet builder (component E, §2): constructs the static arithmetic-fact graph
//! a fresh run starts from — numbers 1-12 and round hundreds, the "requires"/"produces"/
//! "similar" relationship nodes, and one instance fact per addition and multiplication pair.
//! Grounded in `original_source/numbo/numbo.py`'s `initPnet`/`pnet_add_add_facts`/
//! `pnet_add_mult_facts`.

use crate::slipnet::node::{Operation, ACTIVATION_MID};
use crate::slipnet::{Direction, SlipNode, Slipnet};
use petgraph::graph::NodeIndex;
use std::collections::HashMap;

fn number_at(net: &mut Slipnet, numbers: &mut HashMap<i64, NodeIndex>, value: i64) -> NodeIndex {
    if let Some(&index) = numbers.get(&value) {
        return index;
    }
    let index = net.add(SlipNode::new(value.to_string()));
    numbers.insert(value, index);
    index
}

/// builds a fresh slipnet pre-populated with numbers 1-12, round hundreds, and the addition
/// and multiplication fact instances for every pair 1 <= a <= b <= 10.
///
/// Subtraction gets a concept node and its "requires"/"produces" role links, but (matching
/// the original's commented-out `pnet_add_sub_facts` call) no instance facts: there is nothing
/// for the subtraction concept to fire on, so it's only ever reachable via
/// `propose_random_operation`'s direct operand search.
pub fn seed() -> Slipnet {
    let mut net = Slipnet::empty();
    let mut numbers: HashMap<i64, NodeIndex> = HashMap::new();

    let requires = net.add(SlipNode::new("requires").fixed(ACTIVATION_MID));
    let produces = net.add(SlipNode::new("produces").fixed(ACTIVATION_MID));
    let similar = net.add(SlipNode::new("similar").fixed(ACTIVATION_MID));

    let additive_operand = net.add(SlipNode::new("additive operand").activation(ACTIVATION_MID));
    let sum_role = net.add(SlipNode::new("sum").activation(ACTIVATION_MID));
    let addition = net.add(SlipNode::new("addition").with_template(Operation::Add, true));
    net.link(addition, additive_operand, requires, 1.0, Direction::Uni);
    net.link(addition, sum_role, produces, 1.0, Direction::Uni);

    let multiplicative_operand = net.add(SlipNode::new("multiplicative operand").activation(ACTIVATION_MID));
    let multiplicative_result = net.add(SlipNode::new("multiplicative result").activation(ACTIVATION_MID));
    let multiplication = net.add(SlipNode::new("multiplication").with_template(Operation::Multiply, true));
    net.link(multiplication, multiplicative_operand, requires, 1.0, Direction::Uni);
    net.link(multiplication, multiplicative_result, produces, 1.0, Direction::Uni);

    let minuend = net.add(SlipNode::new("minuend").activation(ACTIVATION_MID));
    let subtrahend = net.add(SlipNode::new("subtrahend").activation(ACTIVATION_MID));
    let difference = net.add(SlipNode::new("difference").activation(ACTIVATION_MID));
    let subtraction = net.add(SlipNode::new("subtraction").with_template(Operation::Subtract, true));
    net.link(subtraction, minuend, requires, 1.0, Direction::Uni);
    net.link(subtraction, subtrahend, requires, 1.0, Direction::Uni);
    net.link(subtraction, difference, produces, 1.0, Direction::Uni);

    for value in (20..=100).step_by(10) {
        number_at(&mut net, &mut numbers, value);
    }
    for value in 1..=12 {
        number_at(&mut net, &mut numbers, value);
    }

    for a in 1..=10 {
        let a_node = number_at(&mut net, &mut numbers, a);
        for b in a..=10 {
            let b_node = number_at(&mut net, &mut numbers, b);

            if b == a + 1 {
                net.link(a_node, b_node, similar, 1.0, Direction::Bi);
            }

            let sum_node = number_at(&mut net, &mut numbers, a + b);
            let plus = net.add(
                SlipNode::new(format!("{a}+{b}"))
                    .instance_of(addition)
                    .describe(format!("{a}+{b}")),
            );
            net.link(plus, a_node, additive_operand, 1.0, Direction::Bi);
            net.link(plus, b_node, additive_operand, 1.0, Direction::Bi);
            net.link(sum_node, plus, sum_role, 1.0, Direction::Bi);

            if a > 1 && b > 1 {
                let product_node = number_at(&mut net, &mut numbers, a * b);
                let times = net.add(
                    SlipNode::new(format!("{a}*{b}"))
                        .instance_of(multiplication)
                        .describe(format!("{a}*{b}")),
                );
                net.link(times, a_node, multiplicative_operand, 1.0, Direction::Bi);
                net.link(times, b_node, multiplicative_operand, 1.0, Direction::Bi);
                net.link(product_node, times, multiplicative_result, 1.0, Direction::Bi);
            }
        }
    }

    net
}
