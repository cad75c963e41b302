//! A small residual network simplified for display.

use graft_tests::prelude::*;
use pretty_assertions::assert_eq;

/// input -> conv1 -> bn1 -> relu1 -> conv2 -> bn2 -> add -> relu2 -> pool -> fc1 -> fc2 -> out
///                                 relu1 ----------------> add
fn resnet_block() -> GraphFixture {
    GraphFixture::new()
        .typed("input", "Input")
        .node_with("conv1", "Conv", attrs! { "shape" => vec![3i64, 3] })
        .typed("bn1", "BatchNorm")
        .typed("relu1", "Relu")
        .node_with("conv2", "Conv", attrs! { "shape" => vec![3i64, 3] })
        .typed("bn2", "BatchNorm")
        .typed("add", "Add")
        .typed("relu2", "Relu")
        .typed("pool", "MaxPool")
        .typed("fc1", "Linear")
        .typed("fc2", "Linear")
        .typed("out", "Softmax")
        .chain(&["input", "conv1", "bn1", "relu1", "conv2", "bn2", "add", "relu2", "pool"])
        .chain(&["pool", "fc1", "fc2", "out"])
        .edge("relu1", "add")
}

fn simplify() -> Pipeline {
    Pipeline::new()
        .then(Fold::new("Conv[3x3] > BatchNorm > Relu", "ConvBnRelu").unwrap())
        .then(Fold::new("Conv > BatchNorm", "ConvBn").unwrap())
        .then(Fold::new("Add > Relu", "AddRelu").unwrap())
        .then(FoldDuplicates::new())
        .then(Rename::kind("^(Max|Avg)Pool$", r"\1").unwrap())
}

#[test]
fn test_pipeline_simplifies_residual_block() {
    // GIVEN
    let mut graph = resnet_block().build().unwrap();

    // WHEN
    let outcome = simplify().apply(&mut graph).unwrap();

    // THEN
    let kinds: Vec<String> = graph.nodes().map(Node::title).collect();
    assert_eq!(
        kinds,
        vec!["Input", "ConvBnRelu", "ConvBn", "AddRelu", "Max", "Linear x2", "Softmax"]
    );
    assert_eq!(outcome.matched, 5);
    assert_eq!(outcome.renamed, 1);

    let block = NodeId::from("conv1/bn1/relu1");
    let add = NodeId::from("add/relu2");
    assert_eq!(graph.outgoing(&block), vec![NodeId::from("conv2/bn2"), add.clone()]);
    assert_eq!(graph.incoming(&add).len(), 2);
}

#[test]
fn test_folded_node_keeps_last_shape() {
    let mut graph = resnet_block().build().unwrap();

    Fold::new("Conv > BatchNorm", "ConvBn")
        .unwrap()
        .apply(&mut graph)
        .unwrap();

    // BatchNorm carries no shape, so neither does the fold
    let folded = graph.node(&NodeId::from("conv1/bn1")).unwrap();
    assert_eq!(folded.name, "Conv > BatchNorm");
    assert!(folded.get_attr("shape").is_none());
}

#[test]
fn test_scenario_drops_classifier_head() {
    Scenario::new("drop_head")
        .graph(resnet_block())
        .step("prune_softmax", Prune::new("Linear > Softmax"), |a| {
            a.matched(1)
                .removed(2)
                .absent("fc2")
                .absent("out")
                .successors("fc1", &[])
        })
        .step("prune_pool", Prune::new("MaxPool"), |a| {
            a.removed(1).successors("relu2", &[]).predecessors("fc1", &[])
        })
        .run()
        .unwrap();
}

#[test]
fn test_prune_branch_on_a_chain_takes_everything_upstream() {
    // every ancestor of the classifier only feeds the classifier
    let graph = Scenario::new("prune_all")
        .graph(resnet_block())
        .step("prune_softmax", PruneBranch::new("Softmax"), |a| a.removed(12).nodes(0))
        .run()
        .unwrap();

    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn test_interchangeable_branches_match_once() {
    // x feeds two identical Relu branches that rejoin at y
    let graph = GraphFixture::new()
        .typed("x", "Input")
        .typed("r1", "Relu")
        .typed("r2", "Relu")
        .typed("y", "Add")
        .chain(&["x", "r1", "y"])
        .chain(&["x", "r2", "y"])
        .build()
        .unwrap();

    let result = search(&graph, &CompiledPattern::parse("Relu | Relu").unwrap()).unwrap();

    // both assignments cover the same nodes, so this is not ambiguous
    assert_eq!(result.len(), 1);
    assert_eq!(result.frontier(), vec![NodeId::from("y")]);
}
