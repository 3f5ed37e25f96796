//! Short-segment repair: one forward merge pass, then a dedicated
//! backward check of the final segment.

use ic_core::{effective_length, BreakReason, SegmenterConfig};
use std::collections::VecDeque;
use tracing::debug;

use crate::splitter::Draft;

fn merge_pair(mut left: Draft, right: Draft) -> Draft {
    left.content = format!("{} {}", left.content, right.content);
    left.end = right.end;
    left.reason = BreakReason::MergedForBalance;
    left.merged = true;
    left.unmerged_short = false;
    left
}

/// Merge under-sized segments into their neighbors where the result stays
/// within `max_length`. Adjacent contents are joined with a single space;
/// sentence splitting is never re-run on merged text.
///
/// This is a single pass, not a fixed-point iteration: a run of several
/// consecutive short segments can leave some below `min_length` even when
/// a different merge order would have satisfied more of them. Those keep
/// `unmerged_short` set so quality checks can see them.
pub(crate) fn repair_drafts(drafts: Vec<Draft>, config: &SegmenterConfig) -> Vec<Draft> {
    if drafts.len() <= 1 {
        return drafts;
    }

    let mut queue: VecDeque<Draft> = drafts.into();
    let mut out: Vec<Draft> = Vec::new();

    while let Some(mut current) = queue.pop_front() {
        while effective_length(&current.content) < config.min_length {
            let Some(next) = queue.pop_front() else { break };
            let merged_length =
                effective_length(&format!("{} {}", current.content, next.content));
            if merged_length > config.max_length {
                current.unmerged_short = true;
                queue.push_front(next);
                break;
            }
            debug!(start = current.start, end = next.end, "merged short segment forward");
            current = merge_pair(current, next);
        }
        out.push(current);
    }

    // The very last segment gets one backward merge attempt instead.
    let last_is_short = out
        .last()
        .is_some_and(|d| effective_length(&d.content) < config.min_length);
    if last_is_short && out.len() >= 2 {
        if let Some(last) = out.pop() {
            let fits = out.last().is_some_and(|prev| {
                effective_length(&format!("{} {}", prev.content, last.content))
                    <= config.max_length
            });
            if fits {
                if let Some(prev) = out.pop() {
                    debug!(start = prev.start, end = last.end, "merged final segment backward");
                    out.push(merge_pair(prev, last));
                }
            } else {
                let mut last = last;
                last.unmerged_short = true;
                out.push(last);
            }
        }
    }

    out
}
