//! Balance properties of rendered brackets.

use proptest::prelude::*;
use spangraph_babel::format::Format;
use spangraph_babel::formats::brackets::BracketsFormat;

/// Builds well-nested bracket text from per-token open and close counts.
fn nested_text(steps: &[(usize, usize, usize)]) -> String {
    let mut depth = 0;
    let mut words = Vec::new();
    for (i, (opens, closes, label)) in steps.iter().enumerate() {
        depth += opens;
        let mut word = format!("{}w{i}", "[".repeat(*opens));
        let closes = if i == steps.len() - 1 { depth } else { (*closes).min(depth) };
        for c in 0..closes {
            word.push_str(&format!("]_{{c{}}}", (label + c) % 4));
        }
        depth -= closes;
        words.push(word);
    }
    words.join(" ")
}

proptest! {
    #[test]
    fn rendered_brackets_are_balanced(steps in prop::collection::vec((0usize..3, 0usize..3, 0usize..4), 1..25)) {
        let format = BracketsFormat::default();
        let doc = format.parse(&nested_text(&steps)).unwrap();
        let rendered = format.serialize(&doc).unwrap();

        let opens = rendered.matches('[').count();
        let closes = rendered.matches("]_{").count();
        prop_assert_eq!(opens, closes);
        prop_assert_eq!(closes, doc.markables().count());

        // every close has an open to its left
        let mut depth = 0i64;
        for c in rendered.chars() {
            match c {
                '[' => depth += 1,
                ']' => depth -= 1,
                _ => {}
            }
            prop_assert!(depth >= 0);
        }
        prop_assert_eq!(depth, 0);
    }

    #[test]
    fn rendering_is_stable_after_one_pass(steps in prop::collection::vec((0usize..3, 0usize..3, 0usize..4), 1..25)) {
        let format = BracketsFormat::default();
        let once = format.serialize(&format.parse(&nested_text(&steps)).unwrap()).unwrap();
        let twice = format.serialize(&format.parse(&once).unwrap()).unwrap();
        prop_assert_eq!(once, twice);
    }
}
