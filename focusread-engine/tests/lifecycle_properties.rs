//! Property tests for the block lifecycle

use focusread_engine::*;
use proptest::prelude::*;

fn single_block(text: &str) -> (Document, TextBlock) {
    let mut doc = Document::new();
    let p = doc.create_element("p");
    let t = doc.create_text(text);
    doc.append_child(p, t).unwrap();
    let root = doc.root();
    doc.append_child(root, p).unwrap();
    let block = TextBlock::capture(&doc, p).unwrap();
    (doc, block)
}

fn flags_strategy() -> impl Strategy<Value = FeatureFlags> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(bionic, highlight, beeline, spacing)| FeatureFlags {
            bionic,
            highlight,
            beeline,
            spacing,
            ..FeatureFlags::default()
        },
    )
}

proptest! {
    #[test]
    fn apply_preserves_text_content(
        text in "[a-zA-Z<>&.!? \n]{0,80}",
        index in 0usize..10,
        flags in flags_strategy(),
    ) {
        let (mut doc, mut block) = single_block(&text);
        apply_to_block(&mut doc, &mut block, index, flags, &NoExclusion).unwrap();
        prop_assert_eq!(doc.text_content(block.node()).unwrap(), text);
    }

    #[test]
    fn reset_after_apply_restores_text(
        text in "[a-zA-Z<>&.!? \n]{0,80}",
        flags in flags_strategy(),
    ) {
        let (mut doc, mut block) = single_block(&text);
        apply_to_block(&mut doc, &mut block, 0, flags, &NoExclusion).unwrap();
        reset_block(&mut doc, &mut block).unwrap();
        prop_assert!(!block.is_processed());
        prop_assert_eq!(doc.text_content(block.node()).unwrap(), text);
    }

    #[test]
    fn second_apply_changes_nothing(
        text in "[a-zA-Z.!? ]{1,60}",
        flags in flags_strategy(),
    ) {
        let (mut doc, mut block) = single_block(&text);
        apply_to_block(&mut doc, &mut block, 0, flags, &NoExclusion).unwrap();
        let first = doc.inner_html(block.node()).unwrap();
        apply_to_block(&mut doc, &mut block, 0, flags, &NoExclusion).unwrap();
        prop_assert_eq!(doc.inner_html(block.node()).unwrap(), first);
    }
}
