//! Rewrite scenarios: rename, fold, prune and friends.

use graft_tests::prelude::*;

mod rename {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("rename_composition")
            .graph(GraphFixture::new().node("a").node("b").chain(&["a", "b"]))
            .step("a_to_bbb", Rename::kind("a", "bbb"), |a| a.renamed(1).kind("a", "bbb"))
            .step("strip_leading_b", Rename::kind("b(.*)", r"x\1"), |a| {
                a.renamed(2).kind("a", "xbb").kind("b", "x")
            })
            .step("nothing_left", Rename::kind("^b", "y"), |a| a.noop())
    }

    #[test]
    fn test_rename_rules_compose() {
        scenario().run().unwrap();
    }

    #[test]
    fn test_rename_rejects_bad_regex() {
        Scenario::new("bad_rename")
            .graph(GraphFixture::new().node("a"))
            .step("unclosed", Rename::kind("(a", "b"), |a| a.error("Invalid rename pattern"))
            .run()
            .unwrap();
    }
}

mod fold {
    use super::*;

    pub fn serial() -> Scenario {
        Scenario::new("fold_serial")
            .graph(GraphFixture::new().node("a").node("b").node("c").chain(&["a", "b", "c"]))
            .step("fold_ab", Fold::new("a > b", "ab"), |a| {
                a.matched(1)
                    .created(1)
                    .removed(2)
                    .kind("a/b", "ab")
                    .predecessors("c", &["a/b"])
                    .absent("a")
                    .absent("b")
            })
    }

    pub fn parallel() -> Scenario {
        Scenario::new("fold_parallel")
            .graph(
                GraphFixture::new()
                    .node("a")
                    .node("b")
                    .node("c")
                    .node("d")
                    .node("e")
                    .chain(&["a", "b", "c", "e"])
                    .chain(&["a", "d", "e"]),
            )
            .step("fold_branches", Fold::new("((b > c) | d) > e", "bcde"), |a| {
                a.matched(1)
                    .nodes(2)
                    .edges(1)
                    .successors("a", &["b/c/d/e"])
                    .kind("b/c/d/e", "bcde")
            })
    }

    #[test]
    fn test_fold_serial() {
        serial().run().unwrap();
    }

    #[test]
    fn test_fold_parallel() {
        parallel().run().unwrap();
    }

    #[test]
    fn test_fold_bad_pattern_fails_before_touching_graph() {
        Scenario::new("fold_bad")
            .graph(GraphFixture::new().node("a").node("b").chain(&["a", "b"]))
            .step("unbalanced", Fold::new("(a > b", "ab"), |a| a.error("Invalid pattern"))
            .step("still_intact", Rename::kind("zzz", "y"), |a| a.nodes(2).edges(1))
            .run()
            .unwrap();
    }
}

mod prune {
    use super::*;

    /// a -> b, b -> c, b -> d, c -> e, d -> e
    fn diamond() -> GraphFixture {
        GraphFixture::new()
            .node("a")
            .node("b")
            .node("c")
            .node("d")
            .node("e")
            .chain(&["a", "b", "c", "e"])
            .chain(&["b", "d", "e"])
    }

    #[test]
    fn test_prune_sink() {
        Scenario::new("prune_sink")
            .graph(diamond())
            .step("drop_e", Prune::new("e"), |a| {
                a.removed(1).absent("e").successors("d", &[]).successors("c", &[]).edges(3)
            })
            .run()
            .unwrap();
    }

    #[test]
    fn test_prune_middle_disconnects() {
        Scenario::new("prune_middle")
            .graph(diamond())
            .step("drop_b", Prune::new("b"), |a| {
                a.removed(1).successors("a", &[]).predecessors("c", &[]).edges(2)
            })
            .run()
            .unwrap();
    }

    #[test]
    fn test_prune_branch_removes_dead_inputs() {
        Scenario::new("prune_branch")
            .graph(
                GraphFixture::new()
                    .typed("x", "Input")
                    .typed("aux", "Linear")
                    .typed("aux_loss", "Loss")
                    .typed("head", "Linear")
                    .typed("out", "Softmax")
                    .chain(&["x", "aux", "aux_loss"])
                    .chain(&["x", "head", "out"]),
            )
            .step("drop_aux", PruneBranch::new("Loss"), |a| {
                a.matched(1)
                    .removed(2)
                    .absent("aux")
                    .absent("aux_loss")
                    .successors("x", &["head"])
            })
            .run()
            .unwrap();
    }
}

mod duplicates {
    use super::*;

    #[test]
    fn test_fold_duplicates_then_rename_by_title() {
        let graph = Scenario::new("stack")
            .graph(
                GraphFixture::new()
                    .typed("in", "Input")
                    .typed("c1", "Conv")
                    .typed("c2", "Conv")
                    .typed("c3", "Conv")
                    .typed("p", "Pool")
                    .chain(&["in", "c1", "c2", "c3", "p"]),
            )
            .step("collapse", Ok(FoldDuplicates::new()), |a| {
                a.matched(2).removed(2).nodes(3).successors("c1", &["p"])
            })
            .step("again", Ok(FoldDuplicates::new()), |a| a.noop())
            .run()
            .unwrap();

        let conv = graph.node(&NodeId::from("c1")).unwrap();
        assert_eq!(conv.title(), "Conv x3");
    }
}
