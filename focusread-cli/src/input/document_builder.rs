//! Markdown to document conversion
//!
//! Input is parsed as CommonMark with comrak and the resulting AST is
//! mirrored into a [`Document`]: headings, paragraphs, lists, blockquotes,
//! fenced or indented code, thematic breaks, emphasis, inline code, links and
//! images. Raw HTML is kept as literal text so it is escaped on output.

use anyhow::Result;
use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{parse_document, Arena, ComrakOptions};
use focusread_engine::ruler::HIDDEN_CLASS;
use focusread_engine::{Document, NodeId};

/// `id` of the element that holds the converted blocks
pub const CONTENT_ROOT_ID: &str = "content";

/// Build a document from Markdown text
///
/// When `ruler_id` is given, a hidden ruler overlay with that `id` is placed
/// before the content root.
pub fn build_document(text: &str, ruler_id: Option<&str>) -> Result<Document> {
    let mut doc = Document::new();
    let body = doc.root();

    if let Some(id) = ruler_id {
        let ruler = doc.create_element("div");
        doc.set_attribute(ruler, "id", id)?;
        doc.add_class(ruler, HIDDEN_CLASS)?;
        doc.append_child(body, ruler)?;
    }

    let content = doc.create_element("div");
    doc.set_attribute(content, "id", CONTENT_ROOT_ID)?;
    doc.append_child(body, content)?;

    let arena = Arena::new();
    let options = ComrakOptions::default();
    let root = parse_document(&arena, text, &options);
    for child in root.children() {
        append_block(&mut doc, content, child)?;
    }

    // Construction is not a change anyone needs to react to
    doc.take_mutations();
    Ok(doc)
}

fn append_block<'a>(doc: &mut Document, parent: NodeId, node: &'a AstNode<'a>) -> Result<()> {
    let value = node.data.borrow().value.clone();

    match value {
        NodeValue::Heading(heading) => {
            let element = doc.create_element(&format!("h{}", heading.level));
            append_inline_children(doc, element, node)?;
            doc.append_child(parent, element)?;
        }
        NodeValue::Paragraph => {
            let element = doc.create_element("p");
            append_inline_children(doc, element, node)?;
            doc.append_child(parent, element)?;
        }
        NodeValue::List(list) => {
            let tag = match list.list_type {
                ListType::Ordered => "ol",
                ListType::Bullet => "ul",
            };
            let element = doc.create_element(tag);
            for item in node.children() {
                append_item(doc, element, item, list.tight)?;
            }
            doc.append_child(parent, element)?;
        }
        NodeValue::BlockQuote => {
            let element = doc.create_element("blockquote");
            for child in node.children() {
                append_block(doc, element, child)?;
            }
            doc.append_child(parent, element)?;
        }
        NodeValue::CodeBlock(code_block) => {
            let pre = doc.create_element("pre");
            let code = doc.create_element("code");
            let body = doc.create_text(code_block.literal.trim_end_matches('\n'));
            doc.append_child(code, body)?;
            doc.append_child(pre, code)?;
            doc.append_child(parent, pre)?;
        }
        NodeValue::HtmlBlock(html) => {
            let pre = doc.create_element("pre");
            let body = doc.create_text(html.literal.trim_end_matches('\n'));
            doc.append_child(pre, body)?;
            doc.append_child(parent, pre)?;
        }
        NodeValue::ThematicBreak => {
            let hr = doc.create_element("hr");
            doc.append_child(parent, hr)?;
        }
        _ => {
            for child in node.children() {
                append_block(doc, parent, child)?;
            }
        }
    }
    Ok(())
}

/// List item; paragraphs of a tight list are unwrapped into the `<li>`
fn append_item<'a>(
    doc: &mut Document,
    list: NodeId,
    item: &'a AstNode<'a>,
    tight: bool,
) -> Result<()> {
    let li = doc.create_element("li");
    for child in item.children() {
        let is_paragraph = matches!(child.data.borrow().value, NodeValue::Paragraph);
        if tight && is_paragraph {
            append_inline_children(doc, li, child)?;
        } else {
            append_block(doc, li, child)?;
        }
    }
    doc.append_child(list, li)?;
    Ok(())
}

fn append_inline_children<'a>(
    doc: &mut Document,
    parent: NodeId,
    node: &'a AstNode<'a>,
) -> Result<()> {
    for child in node.children() {
        append_inline(doc, parent, child)?;
    }
    Ok(())
}

fn append_inline<'a>(doc: &mut Document, parent: NodeId, node: &'a AstNode<'a>) -> Result<()> {
    let value = node.data.borrow().value.clone();

    match value {
        NodeValue::Text(text) | NodeValue::HtmlInline(text) => {
            let text = doc.create_text(text);
            doc.append_child(parent, text)?;
        }
        NodeValue::SoftBreak | NodeValue::LineBreak => {
            let text = doc.create_text("\n");
            doc.append_child(parent, text)?;
        }
        NodeValue::Code(code) => {
            let element = doc.create_element("code");
            let text = doc.create_text(code.literal);
            doc.append_child(element, text)?;
            doc.append_child(parent, element)?;
        }
        NodeValue::Emph => wrap_inline(doc, parent, node, "em")?,
        NodeValue::Strong => wrap_inline(doc, parent, node, "strong")?,
        NodeValue::Link(link) => {
            let element = doc.create_element("a");
            doc.set_attribute(element, "href", &link.url)?;
            append_inline_children(doc, element, node)?;
            doc.append_child(parent, element)?;
        }
        NodeValue::Image(link) => {
            let element = doc.create_element("img");
            doc.set_attribute(element, "src", &link.url)?;
            let mut alt = String::new();
            collect_text(node, &mut alt);
            if !alt.is_empty() {
                doc.set_attribute(element, "alt", &alt)?;
            }
            doc.append_child(parent, element)?;
        }
        _ => append_inline_children(doc, parent, node)?,
    }
    Ok(())
}

fn wrap_inline<'a>(
    doc: &mut Document,
    parent: NodeId,
    node: &'a AstNode<'a>,
    tag: &str,
) -> Result<()> {
    let element = doc.create_element(tag);
    append_inline_children(doc, element, node)?;
    doc.append_child(parent, element)?;
    Ok(())
}

fn collect_text<'a>(node: &'a AstNode<'a>, out: &mut String) {
    for child in node.children() {
        match &child.data.borrow().value {
            NodeValue::Text(text) => out.push_str(text),
            NodeValue::Code(code) => out.push_str(&code.literal),
            _ => collect_text(child, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content_html(doc: &Document) -> String {
        let content = doc.element_by_id(CONTENT_ROOT_ID).unwrap();
        doc.inner_html(content).unwrap()
    }

    fn html(markdown: &str) -> String {
        content_html(&build_document(markdown, None).unwrap())
    }

    #[test]
    fn test_paragraphs_split_on_blank_lines() {
        assert_eq!(
            html("First line.\nSame paragraph.\n\n\nSecond one."),
            "<p>First line.\nSame paragraph.</p><p>Second one.</p>"
        );
    }

    #[test]
    fn test_atx_and_setext_headings() {
        assert_eq!(
            html("# Title\n###### Deep\n####### Too deep\n\nUnder\n====="),
            "<h1>Title</h1><h6>Deep</h6><p>####### Too deep</p><h1>Under</h1>"
        );
    }

    #[test]
    fn test_tight_lists_unwrap_paragraphs() {
        assert_eq!(
            html("- one\n- two\n\n1. first\n2. second"),
            "<ul><li>one</li><li>two</li></ul><ol><li>first</li><li>second</li></ol>"
        );
    }

    #[test]
    fn test_loose_list_keeps_paragraphs() {
        assert_eq!(html("- one\n\n- two"), "<ul><li><p>one</p></li><li><p>two</p></li></ul>");
    }

    #[test]
    fn test_blockquote_holds_paragraphs() {
        assert_eq!(
            html("> quoted\n> more\n\nafter"),
            "<blockquote><p>quoted\nmore</p></blockquote><p>after</p>"
        );
    }

    #[test]
    fn test_fenced_code_keeps_blank_lines() {
        assert_eq!(
            html("Intro.\n\n```rust\nlet x = 1;\n\nx.run();\n```\n\nOutro."),
            "<p>Intro.</p><pre><code>let x = 1;\n\nx.run();</code></pre><p>Outro.</p>"
        );
    }

    #[test]
    fn test_unclosed_fence_runs_to_end() {
        assert_eq!(html("```\ncode. More code."), "<pre><code>code. More code.</code></pre>");
    }

    #[test]
    fn test_emphasis_links_and_images() {
        assert_eq!(
            html("A *b* **c** [d](https://e.test) ![f](g.png)"),
            "<p>A <em>b</em> <strong>c</strong> <a href=\"https://e.test\">d</a> \
             <img alt=\"f\" src=\"g.png\"></p>"
        );
    }

    #[test]
    fn test_thematic_break() {
        assert_eq!(html("One.\n\n---\n\nTwo."), "<p>One.</p><hr><p>Two.</p>");
    }

    #[test]
    fn test_build_document_structure() {
        let doc = build_document("# Hi\n\nText `inline` here.\n\n- item", None).unwrap();
        assert_eq!(
            content_html(&doc),
            "<h1>Hi</h1><p>Text <code>inline</code> here.</p><ul><li>item</li></ul>"
        );
        assert!(doc.element_by_id("fr-ruler").is_none());
    }

    #[test]
    fn test_unpaired_backtick_is_literal() {
        assert_eq!(html("It`s odd."), "<p>It`s odd.</p>");
    }

    #[test]
    fn test_ruler_overlay_is_hidden() {
        let mut doc = build_document("Text.", Some("fr-ruler")).unwrap();
        let ruler = doc.element_by_id("fr-ruler").unwrap();
        assert!(doc.has_class(ruler, HIDDEN_CLASS));
        assert!(doc.take_mutations().is_empty());
    }

    #[test]
    fn test_markup_in_text_is_escaped() {
        assert_eq!(html("Some <b>not bold</b> text"), "<p>Some &lt;b&gt;not bold&lt;/b&gt; text</p>");
        assert_eq!(html("<div>raw</div>"), "<pre>&lt;div&gt;raw&lt;/div&gt;</pre>");
    }
}
