//! The merge engine: coalesces detected text regions into logical blocks.
//!
//! Two strategies are exposed because they serve different pipeline stages:
//!
//! - **Fixed point** repeatedly clusters every adjacent pair until a pass
//!   merges nothing. It is the primary strategy for collapsing fragment
//!   clouds into paragraph-level blocks. Each pass runs union-find over the
//!   O(n²) pair adjacencies, and a merged rectangle can grow into range of
//!   new neighbors, so up to n passes may run: worst case O(n³). That bound
//!   is acceptable only because n is the number of text regions in one
//!   image (tens, not thousands); callers bound latency by bounding n.
//! - **Sweep** sorts once and folds each region into a running cluster in a
//!   single ordered pass, O(n log n). It produces coarser, line-aware
//!   results and is the right tool for line-by-line merging.
//!
//! The two are deliberately separate operations with different outputs, not
//! interchangeable implementations of one contract. A pipeline typically
//! chains directions itself (e.g. [`merge_horizontal`] then
//! [`merge_vertical`]); no combination is hardcoded here.
//!
//! Both strategies are pure: they read the input slice and return a new
//! list, never mutating blocks in place.

use std::collections::BTreeMap;

use crate::core::{LayoutError, LayoutResult};
use crate::domain::{TextBlock, LINE_BREAK};
use crate::processors::{adjacent, MergeAxis, Rect};

/// The clustering strategy used by [`merge_blocks`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStrategy {
    /// Repeated pairwise clustering until no adjacent pair remains.
    FixedPoint,
    /// One ordered pass folding regions into a running cluster.
    Sweep,
}

/// Disjoint-set over block indices, used to group adjacent pairs within one
/// fixed-point pass.
#[derive(Debug)]
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        if self.parent[x] == x {
            return x;
        }
        let root = self.find(self.parent[x]);
        self.parent[x] = root;
        root
    }

    fn union(&mut self, a: usize, b: usize) {
        let mut ra = self.find(a);
        let mut rb = self.find(b);
        if ra == rb {
            return;
        }
        if self.rank[ra] < self.rank[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        if self.rank[ra] == self.rank[rb] {
            self.rank[ra] = self.rank[ra].saturating_add(1);
        }
    }
}

/// Merges adjacent text blocks under the given threshold.
///
/// The rectangle of a merged block is the union of its constituents'
/// rectangles; its text is the constituents' text joined in geometric order
/// (left-to-right for horizontal merges, top-to-bottom otherwise) with a
/// space for same-line merges and a line-break marker for stacked-line
/// merges, so no text is lost and the concatenation does not depend on the
/// order adjacencies were found. The merged font size is the minimum over
/// constituents that have one; line spacing is dropped because it is stale
/// once geometry changes.
///
/// An empty input yields an empty output. A block with no merge partner is
/// returned unchanged.
///
/// # Arguments
///
/// * `blocks` - The detected or previously merged blocks.
/// * `threshold` - Maximum pixel gap under which two blocks merge.
/// * `strategy` - Clustering strategy (see [`MergeStrategy`]).
/// * `axis` - Merge direction (see [`MergeAxis`]).
///
/// # Returns
///
/// The merged block list, or `InvalidInput` if the threshold is negative or
/// not finite.
pub fn merge_blocks(
    blocks: &[TextBlock],
    threshold: f32,
    strategy: MergeStrategy,
    axis: MergeAxis,
) -> LayoutResult<Vec<TextBlock>> {
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(LayoutError::invalid_input(format!(
            "merge threshold must be finite and non-negative, got {threshold}"
        )));
    }

    let merged = match strategy {
        MergeStrategy::FixedPoint => merge_fixed_point(blocks, threshold, axis),
        MergeStrategy::Sweep => merge_sweep(blocks, threshold, axis),
    };
    Ok(merged)
}

/// Merges words on the same text line with a single left-to-right sweep.
///
/// Convenience wrapper matching the line-merge stage of a relayout
/// pipeline; use [`merge_blocks`] directly for other combinations.
pub fn merge_horizontal(blocks: &[TextBlock], threshold: f32) -> LayoutResult<Vec<TextBlock>> {
    merge_blocks(
        blocks,
        threshold,
        MergeStrategy::Sweep,
        MergeAxis::Horizontal,
    )
}

/// Merges stacked text lines into paragraphs with a top-to-bottom sweep.
///
/// Convenience wrapper matching the paragraph-merge stage of a relayout
/// pipeline; typically applied to the output of [`merge_horizontal`].
pub fn merge_vertical(blocks: &[TextBlock], threshold: f32) -> LayoutResult<Vec<TextBlock>> {
    merge_blocks(blocks, threshold, MergeStrategy::Sweep, MergeAxis::Vertical)
}

/// Merges near-overlapping blocks regardless of direction until no adjacent
/// pair remains.
///
/// Convenience wrapper for the direction-agnostic fixed-point merge.
pub fn merge_overlapping(blocks: &[TextBlock], threshold: f32) -> LayoutResult<Vec<TextBlock>> {
    merge_blocks(
        blocks,
        threshold,
        MergeStrategy::FixedPoint,
        MergeAxis::Generic,
    )
}

fn merge_fixed_point(blocks: &[TextBlock], threshold: f32, axis: MergeAxis) -> Vec<TextBlock> {
    let mut working: Vec<TextBlock> = blocks.to_vec();

    // Every merging pass strictly reduces the block count, so this loop
    // runs at most working.len() passes before a pass finds no adjacency.
    loop {
        let n = working.len();
        if n <= 1 {
            break;
        }

        let mut sets = UnionFind::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                if adjacent(&working[i].rect, &working[j].rect, threshold, axis) {
                    sets.union(i, j);
                }
            }
        }

        let mut clusters: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for i in 0..n {
            clusters.entry(sets.find(i)).or_default().push(i);
        }

        if clusters.len() == n {
            break;
        }

        tracing::debug!("fixed-point merge pass: {} -> {} blocks", n, clusters.len());

        working = clusters
            .into_values()
            .map(|members| merge_cluster(&working, members, axis))
            .collect();
    }

    // Cluster order after a fixed-point merge is reading order of the
    // merged rectangles, which keeps the output deterministic and
    // independent of input order.
    working.sort_by(|a, b| {
        rect_order_key(&a.rect)
            .partial_cmp(&rect_order_key(&b.rect))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    working
}

fn merge_sweep(blocks: &[TextBlock], threshold: f32, axis: MergeAxis) -> Vec<TextBlock> {
    if blocks.is_empty() {
        return Vec::new();
    }

    let mut sorted: Vec<TextBlock> = blocks.to_vec();
    sorted.sort_by(|a, b| {
        (a.rect.y1, a.rect.x1)
            .partial_cmp(&(b.rect.y1, b.rect.x1))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let input_len = sorted.len();
    let mut merged: Vec<TextBlock> = Vec::new();
    let mut iter = sorted.into_iter();
    let mut current = match iter.next() {
        Some(block) => block,
        None => return Vec::new(),
    };

    for block in iter {
        if adjacent(&current.rect, &block.rect, threshold, axis) {
            current = merge_pair(current, block, axis);
        } else {
            merged.push(current);
            current = block;
        }
    }
    merged.push(current);

    tracing::debug!("sweep merge: {} -> {} blocks", input_len, merged.len());
    merged
}

/// Sort key giving reading order over merged rectangles.
fn rect_order_key(rect: &Rect) -> (f32, f32, f32, f32) {
    (rect.y1, rect.x1, rect.x2, rect.y2)
}

/// Sort key giving the geometric text-join order for an axis: leading
/// coordinate first (x for same-line merges, y otherwise), the other
/// coordinate as tie-break.
fn join_order_key(rect: &Rect, axis: MergeAxis) -> (f32, f32) {
    match axis {
        MergeAxis::Horizontal => (rect.x1, rect.y1),
        MergeAxis::Vertical | MergeAxis::Generic => (rect.y1, rect.x1),
    }
}

fn join_text(texts: &[&str], axis: MergeAxis) -> String {
    let mut out = String::new();
    for (i, text) in texts.iter().enumerate() {
        if i > 0 {
            match axis {
                MergeAxis::Horizontal | MergeAxis::Generic => out.push(' '),
                MergeAxis::Vertical => out.push(LINE_BREAK),
            }
        }
        out.push_str(text);
    }
    out
}

/// Collapses one cluster of the working set into a single block.
fn merge_cluster(working: &[TextBlock], mut members: Vec<usize>, axis: MergeAxis) -> TextBlock {
    debug_assert!(!members.is_empty());

    members.sort_by(|&a, &b| {
        join_order_key(&working[a].rect, axis)
            .partial_cmp(&join_order_key(&working[b].rect, axis))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let first = &working[members[0]];
    if members.len() == 1 {
        return first.clone();
    }

    let rect = members[1..]
        .iter()
        .fold(first.rect, |acc, &i| acc.union(&working[i].rect));
    let texts: Vec<&str> = members.iter().map(|&i| working[i].text.as_str()).collect();
    let font_size = members.iter().filter_map(|&i| working[i].font_size).min();

    TextBlock {
        text: join_text(&texts, axis),
        rect,
        font_size,
        // Stale after geometry changed; the caller re-derives it.
        line_spacing: None,
        // Enrichment normally runs after merging, so these are usually
        // empty; when present, the geometrically-first constituent wins.
        style: first.style.clone(),
    }
}

/// Merges exactly two blocks, ordering their text geometrically.
fn merge_pair(a: TextBlock, b: TextBlock, axis: MergeAxis) -> TextBlock {
    let a_first = join_order_key(&a.rect, axis) <= join_order_key(&b.rect, axis);
    let (first, second) = if a_first { (a, b) } else { (b, a) };

    TextBlock {
        text: join_text(&[&first.text, &second.text], axis),
        rect: first.rect.union(&second.rect),
        font_size: match (first.font_size, second.font_size) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        },
        line_spacing: None,
        style: first.style,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(text: &str, x1: f32, y1: f32, x2: f32, y2: f32) -> TextBlock {
        TextBlock::new(text, Rect::from_corners(x1, y1, x2, y2).unwrap())
    }

    fn rects(blocks: &[TextBlock]) -> Vec<[f32; 4]> {
        blocks.iter().map(|b| b.rect.into()).collect()
    }

    const STRATEGIES: [MergeStrategy; 2] = [MergeStrategy::FixedPoint, MergeStrategy::Sweep];
    const AXES: [MergeAxis; 3] = [MergeAxis::Horizontal, MergeAxis::Vertical, MergeAxis::Generic];

    #[test]
    fn test_horizontal_merge_of_two_words() {
        let blocks = vec![
            block("Hello", 0.0, 0.0, 50.0, 20.0),
            block("World", 55.0, 2.0, 100.0, 20.0),
        ];
        for strategy in STRATEGIES {
            let merged = merge_blocks(&blocks, 10.0, strategy, MergeAxis::Horizontal).unwrap();
            assert_eq!(merged.len(), 1, "{strategy:?}");
            assert_eq!(merged[0].text, "Hello World");
            assert_eq!(
                merged[0].rect,
                Rect::from_corners(0.0, 0.0, 100.0, 20.0).unwrap()
            );
        }
    }

    #[test]
    fn test_vertical_merge_inserts_line_break() {
        let blocks = vec![
            block("Line1", 0.0, 0.0, 100.0, 20.0),
            block("Line2", 0.0, 25.0, 100.0, 45.0),
        ];
        for strategy in STRATEGIES {
            let merged = merge_blocks(&blocks, 10.0, strategy, MergeAxis::Vertical).unwrap();
            assert_eq!(merged.len(), 1, "{strategy:?}");
            assert_eq!(merged[0].text, "Line1\nLine2");
            assert_eq!(
                merged[0].rect,
                Rect::from_corners(0.0, 0.0, 100.0, 45.0).unwrap()
            );
        }
    }

    #[test]
    fn test_distant_blocks_do_not_merge() {
        let blocks = vec![
            block("a", 0.0, 0.0, 20.0, 10.0),
            block("b", 200.0, 300.0, 250.0, 320.0),
        ];
        for strategy in STRATEGIES {
            for axis in AXES {
                let merged = merge_blocks(&blocks, 10.0, strategy, axis).unwrap();
                assert_eq!(merged.len(), 2, "{strategy:?}/{axis:?}");
            }
        }
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        for strategy in STRATEGIES {
            for axis in AXES {
                let merged = merge_blocks(&[], 10.0, strategy, axis).unwrap();
                assert!(merged.is_empty(), "{strategy:?}/{axis:?}");
            }
        }
    }

    #[test]
    fn test_single_block_returned_unchanged() {
        let blocks = vec![block("solo", 5.0, 5.0, 40.0, 15.0).with_font_size(8)];
        for strategy in STRATEGIES {
            for axis in AXES {
                let merged = merge_blocks(&blocks, 10.0, strategy, axis).unwrap();
                assert_eq!(merged, blocks, "{strategy:?}/{axis:?}");
            }
        }
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        for bad in [-1.0, f32::NAN, f32::INFINITY] {
            let result = merge_blocks(&[], bad, MergeStrategy::FixedPoint, MergeAxis::Generic);
            assert!(result.is_err());
        }
    }

    #[test]
    fn test_fixed_point_chains_through_transitive_adjacency() {
        // c touches b, b touches a, but a and c are far apart: union-find
        // groups all three within one pass.
        let blocks = vec![
            block("a", 0.0, 0.0, 30.0, 20.0),
            block("b", 35.0, 0.0, 65.0, 20.0),
            block("c", 70.0, 0.0, 100.0, 20.0),
        ];
        let merged = merge_overlapping(&blocks, 10.0).unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].text, "a b c");
        assert_eq!(
            merged[0].rect,
            Rect::from_corners(0.0, 0.0, 100.0, 20.0).unwrap()
        );
    }

    #[test]
    fn test_fixed_point_needs_second_pass_for_grown_rect() {
        // c is adjacent to neither a nor b on its own: it fails the x gap
        // against a and the y gap against b. The union of a and b satisfies
        // both, so only a second pass over the grown rectangle merges it.
        let blocks = vec![
            block("a", 0.0, 0.0, 10.0, 10.0),
            block("b", 12.0, 0.0, 22.0, 2.0),
            block("c", 24.0, 16.0, 34.0, 26.0),
        ];
        let merged = merge_overlapping(&blocks, 10.0).unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].text, "a b c");
        assert_eq!(
            merged[0].rect,
            Rect::from_corners(0.0, 0.0, 34.0, 26.0).unwrap()
        );
    }

    #[test]
    fn test_merge_is_idempotent() {
        let blocks = vec![
            block("Hello", 0.0, 0.0, 50.0, 20.0),
            block("World", 55.0, 2.0, 100.0, 20.0),
            block("Footer", 0.0, 200.0, 80.0, 220.0),
        ];
        for strategy in STRATEGIES {
            for axis in AXES {
                let once = merge_blocks(&blocks, 10.0, strategy, axis).unwrap();
                let twice = merge_blocks(&once, 10.0, strategy, axis).unwrap();
                assert_eq!(once, twice, "{strategy:?}/{axis:?}");
            }
        }
    }

    #[test]
    fn test_union_invariant() {
        // Every merged rect must exactly equal the union of its inputs, and
        // the union of all outputs must equal the union of all inputs.
        let blocks = vec![
            block("a", 0.0, 0.0, 30.0, 20.0),
            block("b", 35.0, 1.0, 65.0, 22.0),
            block("c", 0.0, 30.0, 65.0, 50.0),
            block("d", 400.0, 400.0, 450.0, 420.0),
        ];
        let merged = merge_overlapping(&blocks, 10.0).unwrap();

        let input_union = blocks[1..]
            .iter()
            .fold(blocks[0].rect, |acc, b| acc.union(&b.rect));
        let output_union = merged[1..]
            .iter()
            .fold(merged[0].rect, |acc, b| acc.union(&b.rect));
        assert_eq!(input_union, output_union);

        // No spurious area: each output rect stays inside the input union.
        for b in &merged {
            assert!(b.rect.x1 >= input_union.x1 && b.rect.x2 <= input_union.x2);
            assert!(b.rect.y1 >= input_union.y1 && b.rect.y2 <= input_union.y2);
        }
    }

    #[test]
    fn test_text_conservation() {
        let blocks = vec![
            block("alpha", 0.0, 0.0, 30.0, 20.0),
            block("beta", 35.0, 0.0, 65.0, 20.0),
            block("gamma", 0.0, 25.0, 65.0, 45.0),
            block("delta", 500.0, 500.0, 550.0, 520.0),
        ];
        for strategy in STRATEGIES {
            for axis in AXES {
                let merged = merge_blocks(&blocks, 10.0, strategy, axis).unwrap();
                let mut words: Vec<&str> = merged
                    .iter()
                    .flat_map(|b| b.text.split_whitespace())
                    .collect();
                words.sort_unstable();
                assert_eq!(
                    words,
                    vec!["alpha", "beta", "delta", "gamma"],
                    "{strategy:?}/{axis:?}"
                );
            }
        }
    }

    #[test]
    fn test_fixed_point_is_input_order_independent() {
        let blocks = vec![
            block("one", 0.0, 0.0, 30.0, 20.0),
            block("two", 35.0, 0.0, 65.0, 20.0),
            block("three", 0.0, 25.0, 65.0, 45.0),
            block("four", 300.0, 0.0, 350.0, 20.0),
        ];
        let reference = merge_overlapping(&blocks, 10.0).unwrap();

        // Geometry is tie-free here, so text order must match exactly too.
        let permutations: [[usize; 4]; 4] = [
            [3, 2, 1, 0],
            [1, 3, 0, 2],
            [2, 0, 3, 1],
            [0, 2, 1, 3],
        ];
        for perm in permutations {
            let shuffled: Vec<TextBlock> = perm.iter().map(|&i| blocks[i].clone()).collect();
            let merged = merge_overlapping(&shuffled, 10.0).unwrap();
            assert_eq!(rects(&merged), rects(&reference), "{perm:?}");
            let texts: Vec<&str> = merged.iter().map(|b| b.text.as_str()).collect();
            let reference_texts: Vec<&str> = reference.iter().map(|b| b.text.as_str()).collect();
            assert_eq!(texts, reference_texts, "{perm:?}");
        }
    }

    #[test]
    fn test_threshold_monotonicity() {
        let blocks = vec![
            block("a", 0.0, 0.0, 30.0, 20.0),
            block("b", 38.0, 0.0, 65.0, 20.0),
            block("c", 0.0, 32.0, 65.0, 50.0),
            block("d", 90.0, 0.0, 120.0, 20.0),
        ];
        for strategy in STRATEGIES {
            for axis in AXES {
                let mut previous = usize::MAX;
                for threshold in [0.0, 5.0, 8.0, 12.0, 25.0, 100.0] {
                    let merged = merge_blocks(&blocks, threshold, strategy, axis).unwrap();
                    assert!(
                        merged.len() <= previous,
                        "count grew at threshold {threshold} ({strategy:?}/{axis:?})"
                    );
                    previous = merged.len();
                }
            }
        }
    }

    #[test]
    fn test_merged_font_size_is_minimum() {
        let blocks = vec![
            block("big", 0.0, 0.0, 50.0, 20.0).with_font_size(15),
            block("small", 55.0, 0.0, 100.0, 20.0).with_font_size(9),
            block("unsized", 105.0, 0.0, 150.0, 20.0),
        ];
        let merged = merge_overlapping(&blocks, 10.0).unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].font_size, Some(9));
    }

    #[test]
    fn test_merge_drops_stale_line_spacing() {
        let mut a = block("Line1", 0.0, 0.0, 100.0, 20.0);
        a.line_spacing = Some(4);
        let b = block("Line2", 0.0, 25.0, 100.0, 45.0);
        let merged = merge_vertical(&[a, b], 10.0).unwrap();
        assert_eq!(merged.len(), 1);
        assert!(merged[0].line_spacing.is_none());
    }

    #[test]
    fn test_sweep_flushes_between_lines() {
        // Three words on one line, two on the next: the horizontal sweep
        // must produce exactly one block per line.
        let blocks = vec![
            block("the", 0.0, 0.0, 30.0, 20.0),
            block("quick", 35.0, 0.0, 75.0, 20.0),
            block("fox", 80.0, 1.0, 110.0, 20.0),
            block("jumps", 0.0, 40.0, 50.0, 60.0),
            block("over", 55.0, 40.0, 90.0, 60.0),
        ];
        let merged = merge_horizontal(&blocks, 10.0).unwrap();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].text, "the quick fox");
        assert_eq!(merged[1].text, "jumps over");
    }
}
