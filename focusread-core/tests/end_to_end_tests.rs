//! End-to-end behaviour of the text engine

use focusread_core::*;

#[test]
fn test_dr_smith_scenario_pins_heuristic() {
    let text = "Dr. Smith went home. He was tired!";
    let bodies: Vec<&str> = sentences(text).map(|s| s.text).collect();
    assert_eq!(bodies, vec!["Dr", "Smith went home", "He was tired"]);

    let delimiters: Vec<&str> = sentences(text).map(|s| s.delimiter).collect();
    assert_eq!(delimiters, vec![". ", ". ", "!"]);
}

#[test]
fn test_highlight_only_four_sentences() {
    let flags = FeatureFlags::none()
        .with(Feature::Global, true)
        .with(Feature::Highlight, true);
    let block = StyledBlock::build("One. Two. Three. Four.", 0, flags);

    let classes: Vec<Option<u8>> = block.sentences().map(|s| s.style.highlight).collect();
    assert_eq!(classes, vec![Some(0), Some(1), Some(2), Some(0)]);
    assert!(block.sentences().all(|s| s.style.gradient.is_none()));
}

#[test]
fn test_beeline_uses_block_index() {
    let flags = FeatureFlags::default().with(Feature::Beeline, true);
    for block_index in 0..6 {
        let block = StyledBlock::build("A. B.", block_index, flags);
        for span in block.sentences() {
            assert_eq!(span.style.gradient, Some((block_index % 3) as u8));
        }
    }
}

#[test]
fn test_global_gate_disables_all_styling() {
    let flags = FeatureFlags::default()
        .with(Feature::Beeline, true)
        .with(Feature::Global, false);
    let block = StyledBlock::build("Words stay plain. Every one.", 0, flags);
    let html = block.to_html();
    assert!(!html.contains("<strong>"));
    assert!(!html.contains("fr-highlight"));
    assert!(!html.contains("fr-beeline"));
    assert!(block.sentences().all(|span| span.style.is_plain()));
}

#[test]
fn test_html_for_hostile_text() {
    let text = "<img src=x onerror=alert(1)>. Fine.";
    let block = StyledBlock::build(text, 0, FeatureFlags::default());
    let html = block.to_html();
    assert!(!html.contains("<img"));
    assert!(html.contains("&lt;"));
    assert_eq!(block.text_content(), text);
}

#[test]
fn test_emphasize_contract() {
    assert_eq!(emphasize("a"), "<strong>a</strong>");
    assert_eq!(emphasize("reading"), "<strong>re</strong>ading");
    assert_eq!(emphasize(""), "");
    assert_eq!(emphasize("a<b"), "<strong>a</strong>&lt;b");
}

#[cfg(feature = "serde")]
#[test]
fn test_styled_block_serializes() {
    let block = StyledBlock::build("Hi. Bye.", 1, FeatureFlags::default());
    let json = serde_json::to_value(&block).unwrap();
    let nodes = json["nodes"].as_array().unwrap();
    assert_eq!(nodes[0]["node"], "sentence");
    assert_eq!(nodes[0]["style"]["highlight"], 0);
    assert_eq!(nodes[1]["node"], "text");
    assert_eq!(nodes[1]["text"], ". ");

    let back: StyledBlock = serde_json::from_value(json).unwrap();
    assert_eq!(back, block);
}
