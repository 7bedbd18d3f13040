use std::ops::Range;

use crate::dom::DomNode;
use crate::error::Skip;
use crate::model::{Module, Section};
use crate::parsers::module::{ExtractContext, collect_items};
use crate::parsers::selectors::{
    ANY_MODULE_ITEM, ITEM_CLASS, SECTION_TITLE, SUB_HEADER_CLASS, UNTITLED_SECTION,
};

/// Positions of sub-header nodes in a module's flat item list
pub fn sub_header_indices<N: DomNode>(nodes: &[N]) -> Vec<usize> {
    nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| node.has_class(SUB_HEADER_CLASS))
        .map(|(index, _)| index)
        .collect()
}

/// Body range of each sub-header: up to the next sub-header or `len`
///
/// Returns `(header_index, body)` pairs. Adjacent sub-headers give an
/// empty body.
pub fn section_ranges(indices: &[usize], len: usize) -> Vec<(usize, Range<usize>)> {
    indices
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = indices.get(i + 1).copied().unwrap_or(len);
            (start, start + 1..end)
        })
        .collect()
}

/// Split a module into sections at its sub-header markers
///
/// Works from the raw item nodes under `module_node` rather than from the
/// already-built module, so sections overlap `module.items` instead of
/// being carved out of them. A module without sub-headers has no sections.
/// Every sub-header starts a section; one nested inside another item node
/// is logged as a structural anomaly.
pub fn segment<N: DomNode>(
    module_node: &N,
    module: &Module,
    ctx: &ExtractContext<'_>,
) -> Vec<Section> {
    let nodes = module_node.select_all(&ANY_MODULE_ITEM);
    let indices = sub_header_indices(&nodes);

    for &index in &indices {
        let header = &nodes[index];
        if header.has_ancestor_with_class(ITEM_CLASS) {
            let reason = Skip::NestedSubHeader {
                id: header.node_id().unwrap_or("").to_string(),
            };
            ::log::warn!("Module {:?}: {}", module.title, reason);
        }
    }

    section_ranges(&indices, nodes.len())
        .into_iter()
        .map(|(header_index, body)| {
            let header = &nodes[header_index];
            let title = header
                .select_first(&SECTION_TITLE)
                .map(|title| title.text())
                .filter(|title| !title.is_empty())
                .unwrap_or_else(|| UNTITLED_SECTION.to_string());
            let id = header.node_id().unwrap_or("").to_string();

            let body_nodes = nodes[body]
                .iter()
                .filter(|node| !node.has_class(SUB_HEADER_CLASS));
            let (items, attachments) =
                collect_items(body_nodes, ctx, &format!("section {title:?}"));

            Section {
                id,
                title,
                module_id: module.id.clone(),
                module_title: module.title.clone(),
                items,
                attachments,
            }
        })
        .collect()
}
