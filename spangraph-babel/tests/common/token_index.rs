use proptest::prelude::*;
use spangraph_babel::common::TokenIndex;
use spangraph_babel::graph::NodeId;

fn index(len: usize) -> TokenIndex {
    TokenIndex::build((1..=len).map(|i| NodeId::from(format!("t{i}")))).unwrap()
}

proptest! {
    #[test]
    fn span_offsets_ignore_input_order(
        (len, span) in (1usize..30).prop_flat_map(|len| {
            (Just(len), prop::sample::subsequence((1..=len).collect::<Vec<_>>(), 1..=len))
        }),
        seed in any::<u64>(),
    ) {
        let index = index(len);
        let ids: Vec<NodeId> = span.iter().map(|i| NodeId::from(format!("t{i}"))).collect();

        let mut shuffled = ids.clone();
        let rotation = (seed as usize) % shuffled.len();
        shuffled.rotate_left(rotation);
        shuffled.reverse();

        let expected = (span[0] - 1, span[span.len() - 1] - 1);
        prop_assert_eq!(index.span_offsets(&ids), Ok(expected));
        prop_assert_eq!(index.span_offsets(&shuffled), Ok(expected));
    }

    #[test]
    fn permutations_give_the_same_offsets(ids in Just((1..=8).map(|i| NodeId::from(format!("t{i}"))).collect::<Vec<_>>()).prop_shuffle()) {
        prop_assert_eq!(index(8).span_offsets(&ids), Ok((0, 7)));
    }
}
