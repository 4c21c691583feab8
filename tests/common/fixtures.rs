use docnav::{InMemoryNode, InMemoryPage};

/// A heading with an id at the given vertical offset
pub fn heading(tag: &str, id: &str, top: f64) -> InMemoryNode {
    InMemoryNode::new(tag)
        .with_id(id)
        .with_offset_top(top)
        .with_text(id)
}

/// A `<li><a href="#id">` entry for a table of contents
pub fn toc_entry(id: &str) -> InMemoryNode {
    InMemoryNode::new("li").with_child(InMemoryNode::new("a").with_attr("href", &format!("#{id}")))
}

/// A `<nav id="TOC">` listing the given section ids
pub fn toc_nav(ids: &[&str]) -> InMemoryNode {
    let list = ids
        .iter()
        .fold(InMemoryNode::new("ul"), |list, id| list.with_child(toc_entry(id)));
    InMemoryNode::new("nav").with_id("TOC").with_child(list)
}

/// A `<pre><code>` pair; returns `(pre, code)`
pub fn code_block(text: &str) -> (InMemoryNode, InMemoryNode) {
    let code = InMemoryNode::new("code").with_text(text);
    let pre = InMemoryNode::new("pre").with_child(code.clone());
    (pre, code)
}

/// A documentation page with a TOC and one heading per `(tag, id, top)` section
pub fn docs_page(sections: &[(&str, &str, f64)]) -> InMemoryPage {
    let ids: Vec<&str> = sections.iter().map(|(_, id, _)| *id).collect();
    sections.iter().fold(
        InMemoryPage::new().with_child(toc_nav(&ids)),
        |page, (tag, id, top)| page.with_child(heading(tag, id, *top)),
    )
}

/// The page used by the intro/details scenario
pub fn intro_details_page() -> InMemoryPage {
    docs_page(&[("h1", "intro", 0.0), ("h2", "details", 500.0)])
}
