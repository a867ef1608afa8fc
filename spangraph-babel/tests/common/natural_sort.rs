use proptest::prelude::*;
use spangraph_babel::common::{natural_cmp, natural_sort};
use std::cmp::Ordering;

#[test]
fn test_digits_compare_by_value() {
    let mut ids = vec!["a2", "a10", "a1"];
    natural_sort(&mut ids);
    assert_eq!(ids, vec!["a1", "a2", "a10"]);
}

#[test]
fn test_chain_suffixes_sort_after_their_base() {
    let mut ids = vec!["m10", "m1_2", "m2", "m1"];
    natural_sort(&mut ids);
    assert_eq!(ids, vec!["m1", "m1_2", "m2", "m10"]);
}

proptest! {
    #[test]
    fn numeric_suffix_orders_by_value(prefix in "[a-z_]{0,4}", a in 0u32..100_000, b in 0u32..100_000) {
        let left = format!("{prefix}{a}");
        let right = format!("{prefix}{b}");
        prop_assert_eq!(natural_cmp(&left, &right), a.cmp(&b));
    }

    #[test]
    fn sorting_is_total_and_idempotent(mut ids in prop::collection::vec("[a-c]{0,2}[0-9]{0,3}", 0..20)) {
        natural_sort(&mut ids);
        for pair in ids.windows(2) {
            prop_assert_ne!(natural_cmp(&pair[0], &pair[1]), Ordering::Greater);
        }
        let once = ids.clone();
        natural_sort(&mut ids);
        prop_assert_eq!(ids, once);
    }
}
