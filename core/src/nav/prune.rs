//! Depth-bounded pruning of nested-list markup.
//!
//! Blocks nested deeper than the configured maximum are excised as whole
//! subtrees, cutting only at exact tag boundaries so the remaining
//! document stays balanced. The blocks are not self-describing: whether a
//! subtree exceeds the limit is only known once its closer is seen, hence
//! the explicit stack instead of a single regex pass.

use std::sync::OnceLock;

use regex::Regex;

fn open_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Generated markup uses uppercase <UL>; hand-assembled fragments may not.
    RE.get_or_init(|| Regex::new(r"(?i)<UL[^>]*>").unwrap())
}

fn close_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)</UL>").unwrap())
}

pub(crate) fn count_tags(content: &str) -> (usize, usize) {
    (
        open_re().find_iter(content).count(),
        close_re().find_iter(content).count(),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    Open,
    Close,
}

/// Remove every block subtree whose nesting level exceeds `max_depth`.
///
/// Untouched content is preserved byte-for-byte; if the limit is never
/// exceeded the input is returned unchanged. Unparseable tag structure
/// (mismatched open/close counts) degrades to returning the input: a
/// partially cut document is worse than an over-deep but intact one.
pub fn prune_to_depth(content: &str, max_depth: usize) -> String {
    let mut tags: Vec<(usize, usize, TagKind)> = Vec::new();
    for m in open_re().find_iter(content) {
        tags.push((m.start(), m.end(), TagKind::Open));
    }
    for m in close_re().find_iter(content) {
        tags.push((m.start(), m.end(), TagKind::Close));
    }
    tags.sort_by_key(|t| t.0);

    let mut stack: Vec<(usize, usize)> = Vec::new();
    let mut depth = 0usize;
    let mut doomed: Vec<(usize, usize)> = Vec::new();

    for (start, end, kind) in tags {
        match kind {
            TagKind::Open => {
                depth += 1;
                stack.push((start, depth));
            }
            TagKind::Close => {
                let Some((open_start, level)) = stack.pop() else {
                    tracing::warn!(offset = start, "unmatched closing block tag, leaving document untouched");
                    return content.to_string();
                };
                if level > max_depth {
                    doomed.push((open_start, end));
                }
                depth -= 1;
            }
        }
    }

    if !stack.is_empty() {
        tracing::warn!(
            unclosed = stack.len(),
            "unclosed block tags, leaving document untouched"
        );
        return content.to_string();
    }

    if doomed.is_empty() {
        return content.to_string();
    }

    rebuild(content, &merge_ranges(doomed))
}

/// Fold a set of half-open `[start, end)` byte ranges into the minimal
/// sorted disjoint set covering the same union of positions. Adjacent
/// ranges are merged along with overlapping ones.
pub fn merge_ranges(mut ranges: Vec<(usize, usize)>) -> Vec<(usize, usize)> {
    if ranges.is_empty() {
        return ranges;
    }

    ranges.sort_by_key(|r| r.0);
    let mut merged = Vec::with_capacity(ranges.len());
    let mut current = ranges[0];

    for &(start, end) in &ranges[1..] {
        if start <= current.1 {
            current.1 = current.1.max(end);
        } else {
            merged.push(current);
            current = (start, end);
        }
    }
    merged.push(current);
    merged
}

/// Concatenate every byte span not covered by a merged skip range,
/// preserving original ordering.
fn rebuild(content: &str, skip: &[(usize, usize)]) -> String {
    let mut out = String::with_capacity(content.len());
    let mut last = 0usize;

    for &(start, end) in skip {
        if start > last {
            out.push_str(&content[last..start]);
        }
        last = end;
    }
    if last < content.len() {
        out.push_str(&content[last..]);
    }
    out
}
