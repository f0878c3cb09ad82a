//! Deterministic round-robin interleaving of per-provider result lists.

use reel_core::VideoHit;

/// Merge per-provider lists by taking one hit from each list in turn.
///
/// Order is fixed by the position of each list in `lists` (the configured
/// provider order), never by response arrival timing. Shorter lists simply
/// drop out of later rounds: lists of 2/3/1 hits interleave as
/// `[l1[0], l2[0], l3[0], l1[1], l2[1], l2[2]]`.
#[must_use]
pub fn round_robin(lists: Vec<Vec<VideoHit>>) -> Vec<VideoHit> {
    let total: usize = lists.iter().map(Vec::len).sum();
    let mut queues: Vec<std::vec::IntoIter<VideoHit>> =
        lists.into_iter().map(Vec::into_iter).collect();
    let mut merged = Vec::with_capacity(total);
    loop {
        let mut yielded = false;
        for queue in &mut queues {
            if let Some(hit) = queue.next() {
                merged.push(hit);
                yielded = true;
            }
        }
        if !yielded {
            break;
        }
    }
    merged
}
