//! Property tests for segmentation, emphasis and styling

use focusread_core::*;
use proptest::prelude::*;

fn flags_strategy() -> impl Strategy<Value = FeatureFlags> {
    prop::array::uniform7(any::<bool>()).prop_map(|bits| {
        let mut flags = FeatureFlags::none();
        for (feature, bit) in Feature::ALL.into_iter().zip(bits) {
            flags.set(feature, bit);
        }
        flags
    })
}

/// Text biased towards terminators and whitespace
fn prose_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            4 => "[a-zA-Z]{1,8}",
            2 => Just(" ".to_string()),
            1 => Just(". ".to_string()),
            1 => Just("!".to_string()),
            1 => Just("?\n".to_string()),
            1 => Just(".".to_string()),
            1 => "[<>&\"' \t]{1,3}",
            1 => "\\PC{1,3}",
        ],
        0..40,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn segmentation_is_lossless(text in "\\PC*") {
        prop_assert_eq!(reconstruct(&segment(&text)), text);
    }

    #[test]
    fn segmentation_is_lossless_on_prose(text in prose_strategy()) {
        prop_assert_eq!(reconstruct(&segment(&text)), text);
    }

    #[test]
    fn sentence_indices_are_dense(text in prose_strategy()) {
        let indices: Vec<usize> = sentences(&text).map(|s| s.index).collect();
        let expected: Vec<usize> = (0..indices.len()).collect();
        prop_assert_eq!(indices, expected);
    }

    #[test]
    fn sentences_are_never_blank(text in prose_strategy()) {
        for sentence in sentences(&text) {
            prop_assert!(!sentence.text.trim().is_empty());
        }
    }

    #[test]
    fn styled_block_text_matches_source(
        text in prose_strategy(),
        block_index in 0usize..100,
        flags in flags_strategy(),
    ) {
        let block = StyledBlock::build(&text, block_index, flags);
        prop_assert_eq!(block.text_content(), text.clone());
        prop_assert!(block.verify_lossless(&text).is_ok());
    }

    #[test]
    fn rendered_html_never_leaks_source_markup(text in prose_strategy()) {
        let html = StyledBlock::build(&text, 0, FeatureFlags::default()).to_html();
        let stripped = html
            .replace("<strong>", "")
            .replace("</strong>", "")
            .replace("</span>", "");
        let without_spans = stripped
            .split("<span class=\"")
            .map(|piece| piece.split_once("\">").map(|(_, rest)| rest).unwrap_or(piece))
            .collect::<String>();
        prop_assert!(!without_spans.contains('<'));
        prop_assert!(!without_spans.contains('>'));
    }

    #[test]
    fn highlight_cycles_every_three(i in 0usize..10_000, b in 0usize..10_000, flags in flags_strategy()) {
        prop_assert_eq!(style_for(i, b, flags).highlight, style_for(i + 3, b, flags).highlight);
        prop_assert_eq!(style_for(i, b, flags).gradient, style_for(i, b + 3, flags).gradient);
        prop_assert_eq!(style_for(i, b, flags), style_for(i, b, flags));
    }

    #[test]
    fn emphasis_prefix_is_bounded(word in "\\S{1,30}") {
        let (bold, rest) = split_emphasis(&word);
        let chars = word.chars().count();
        prop_assert_eq!(bold.chars().count(), std::cmp::max(1, chars * 2 / 5));
        prop_assert_eq!(format!("{bold}{rest}"), word);
    }
}
