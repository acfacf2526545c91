//! Selection linking between a source document and its product views.
//!
//! Lookups use the start of each selection: the containing entry of the product's table for
//! the link direction gives the intervals to select on the other side. Results from multiple
//! selections are concatenated in order. A miss selects the start of the linked document.

use crate::echo::EchoLatch;
use crate::host::{EditorHost, EditorId, Selection};
use crate::product::Product;
use crate::range::LinkDirection;

/// Selections written to one editor by a propagation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedSelections {
    /// Editor written to.
    pub editor: EditorId,
    /// Uri of the document in that editor.
    pub uri: String,
    /// Selections written.
    pub selections: Vec<Selection>,
}

/// What handling a selection change did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    /// Linked selections were written to these editors.
    Applied(Vec<AppliedSelections>),
    /// The change was the echo of an earlier programmatic write and was dropped.
    Swallowed,
    /// Nothing is linked to the editor (or nothing mapped).
    Unlinked,
}

impl LinkOutcome {
    /// Editors written to, if any.
    pub fn applied(&self) -> &[AppliedSelections] {
        match self {
            LinkOutcome::Applied(applied) => applied,
            _ => &[],
        }
    }
}

/// Map `selections` of editor `from` through `product` into selections of editor `to`.
pub fn map_selections<H: EditorHost + ?Sized>(
    host: &H,
    product: &Product,
    direction: LinkDirection,
    from: EditorId,
    selections: &[Selection],
    to: EditorId,
) -> Vec<Selection> {
    let mut out = Vec::with_capacity(selections.len());
    for selection in selections {
        let offset = host.offset_at(from, selection.start);
        for range in product.linked_ranges(direction, offset) {
            out.push(Selection::new(
                host.position_at(to, range.start),
                host.position_at(to, range.end),
            ));
        }
    }
    out
}

/// Write `selections` into `editor`, arming `latch` for the echo the write causes.
///
/// The latch is armed before the host is called and withdrawn if the host reports that no
/// selection-change event will follow. Returns `true` if an echo is expected.
pub fn write_selections<H: EditorHost + ?Sized>(
    host: &mut H,
    editor: EditorId,
    latch: &mut EchoLatch,
    selections: &[Selection],
) -> bool {
    let generation = latch.arm();
    let echoes = host.set_selections(editor, selections);
    if !echoes {
        latch.disarm();
    }
    if let Some(first) = selections.first() {
        host.reveal(editor, *first);
    }
    tracing::debug!(
        editor = editor.get(),
        count = selections.len(),
        generation,
        echoes,
        "wrote linked selections"
    );
    echoes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessHost;
    use crate::host::Position;
    use crate::range::{OffsetRange, RangeEntry};
    use crate::views::ViewColumn;

    fn fan_out_product() -> Product {
        Product::new("file:/a.c", "ast", "text", "0123456789").with_range_maps(
            vec![RangeEntry::new(
                OffsetRange::new(0, 4),
                vec![OffsetRange::new(1, 2), OffsetRange::new(5, 8)],
            )],
            Vec::new(),
        )
    }

    #[test]
    fn test_fan_out_produces_one_selection_per_target() {
        let mut host = HeadlessHost::new();
        host.set_document("file:///a.c", "abcdef");
        host.set_document("monto:/a.c|ast.text", "0123\n456789");
        let source = host.open_editor("file:///a.c", ViewColumn::ONE);
        let target = host.open_editor("monto:/a.c|ast.text", ViewColumn::TWO);

        let selections = [Selection::caret(Position::new(0, 2))];
        let mapped = map_selections(
            &host,
            &fan_out_product(),
            LinkDirection::Forward,
            source,
            &selections,
            target,
        );
        assert_eq!(
            mapped,
            vec![
                Selection::new(Position::new(0, 1), Position::new(0, 2)),
                Selection::new(Position::new(1, 0), Position::new(1, 3)),
            ]
        );
    }

    #[test]
    fn test_miss_maps_to_document_start() {
        let mut host = HeadlessHost::new();
        host.set_document("file:///a.c", "abcdef\nghi");
        let source = host.open_editor("file:///a.c", ViewColumn::ONE);
        let target = host.open_editor("monto:/a.c|ast.text", ViewColumn::TWO);

        let selections = [Selection::caret(Position::new(1, 1))];
        let mapped = map_selections(
            &host,
            &fan_out_product(),
            LinkDirection::Forward,
            source,
            &selections,
            target,
        );
        assert_eq!(mapped, vec![Selection::caret(Position::new(0, 0))]);
    }

    #[test]
    fn test_write_without_echo_disarms() {
        let mut host = HeadlessHost::new();
        let editor = host.open_editor("file:///a.c", ViewColumn::ONE);
        let mut latch = EchoLatch::default();

        let current = host.selections(editor);
        assert!(!write_selections(&mut host, editor, &mut latch, &current));
        assert!(!latch.is_armed());
    }
}
