//! Token count and order properties of tree import.

use proptest::prelude::*;
use spangraph_babel::formats::ptb::{ParseTree, PtbOptions, TreeGraphBuilder};

fn tree_strategy() -> impl Strategy<Value = ParseTree> {
    let leaf = "[a-z]{1,6}".prop_map(ParseTree::leaf);
    // preterminals keep every internal node non-empty
    let preterminal = ("[A-Z]{1,3}", leaf).prop_map(|(label, leaf)| ParseTree::internal(label, vec![leaf]));
    preterminal.prop_recursive(4, 32, 4, |inner| {
        ("[A-Z]{1,3}", prop::collection::vec(inner, 1..4))
            .prop_map(|(label, children)| ParseTree::internal(label, children))
    })
}

proptest! {
    #[test]
    fn token_count_and_order_match_the_leaves(sentences in prop::collection::vec(tree_strategy(), 1..4)) {
        let doc = TreeGraphBuilder::build(&PtbOptions::default(), sentences.clone()).unwrap();

        let expected: Vec<&str> = sentences.iter().flat_map(|tree| tree.leaves()).collect();
        let actual: Vec<&str> = doc
            .tokens()
            .iter()
            .map(|id| doc.get_token(id).unwrap())
            .collect();
        prop_assert_eq!(actual, expected);
        prop_assert_eq!(doc.sentences().len(), sentences.len());
    }

    #[test]
    fn limit_keeps_a_prefix_of_sentences(
        sentences in prop::collection::vec(tree_strategy(), 1..5),
        limit in 1usize..6,
    ) {
        let options = PtbOptions { limit: Some(limit), ..PtbOptions::default() };
        let doc = TreeGraphBuilder::build(&options, sentences.clone()).unwrap();
        prop_assert_eq!(doc.sentences().len(), sentences.len().min(limit));
    }
}
