//! Navigation document handling.
//!
//! A navigation document is the generated nested-list outline consumed by
//! the final packaging step: `<UL>...</UL>` blocks containing leaf entries.
//! The contract with downstream tooling is tag balance — every opening
//! block tag has exactly one matching closing tag — and a bounded nesting
//! depth, counted from 1 at the outermost list.

mod prune;

use std::path::Path;

pub use prune::{merge_ranges, prune_to_depth};

use crate::util::read_to_string_tolerant;

/// True when opening and closing block tags pair up.
pub fn check_balance(content: &str) -> bool {
    let (opens, closes) = prune::count_tags(content);
    opens == closes
}

/// Apply the depth limit to a navigation file in place. Returns whether
/// the file was rewritten.
pub fn limit_file(path: &Path, max_depth: usize) -> anyhow::Result<bool> {
    let content = read_to_string_tolerant(path)?;
    let pruned = prune_to_depth(&content, max_depth);
    if pruned == content {
        return Ok(false);
    }
    std::fs::write(path, pruned)?;
    Ok(true)
}
