//! Shared position conversion helpers.
//!
//! `roxmltree` reports one-based rows and columns, which is what the
//! diagnostic report shows, so conversion only clamps row zero.

/// Converts a `roxmltree` text position to display coordinates.
#[must_use]
pub(crate) fn text_pos_to_line_column(pos: roxmltree::TextPos) -> (u32, u32) {
    (pos.row.max(1), pos.col)
}

/// Position of a node's start tag.
#[must_use]
pub(crate) fn node_line_column(node: roxmltree::Node<'_, '_>) -> (u32, u32) {
    text_pos_to_line_column(node.document().text_pos_at(node.range().start))
}
