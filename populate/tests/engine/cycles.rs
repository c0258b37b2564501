use super::*;

#[derive(Populate, Debug, Clone, Default)]
pub struct Parent {
    pub name: String,
    pub children: Vec<Child>,
}

#[derive(Populate, Debug, Clone, Default)]
pub struct Child {
    pub name: String,
    pub parent: Option<Box<Parent>>,
}

#[derive(Populate, Debug, Clone, Default)]
pub struct Node {
    pub label: String,
    pub next: Option<Box<Node>>,
}

fn count_parents(parent: &Parent) -> usize {
    1 + parent
        .children
        .iter()
        .filter_map(|child| child.parent.as_deref())
        .map(count_parents)
        .sum::<usize>()
}

fn chain_length(node: &Node) -> usize {
    1 + node.next.as_deref().map_or(0, chain_length)
}

#[test]
fn test_mutual_recursion_terminates() {
    let populator = Populator::with_config(Config::default().with_container_limit(3));
    populator.reseed(20);
    for _ in 0..20 {
        let parent: Parent = populator.new_instance().unwrap();
        // Parents sit at depths 1, 4 and 7, each with at most two children.
        assert!(count_parents(&parent) <= 1 + 2 + 4);
    }
}

#[test]
fn test_self_reference_stops_at_depth_ceiling() {
    let populator = seeded(21);
    let node: Node = populator.new_instance().unwrap();
    assert_eq!(chain_length(&node), 7);
}

#[test]
fn test_depth_ceiling_is_configurable() {
    let populator = Populator::with_config(Config::default().with_depth_limit(3));
    let node: Node = populator.new_instance().unwrap();
    assert_eq!(chain_length(&node), 2);
    assert!(node.next.unwrap().next.is_none());
}
