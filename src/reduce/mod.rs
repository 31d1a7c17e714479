//! Graph simplification (§4.3). Grounded on the teacher's
//! `transform::simplify`/`transform::transpose` pattern: small free
//! functions taking `&mut Graph` plus a config struct, returning a count,
//! logging progress. Every reducer here obeys the edge-pair law (§3):
//! removing one stored directed edge requires also removing its
//! bidirected partner.

mod dead_end;
mod p_bubble;
mod self_loops;
mod submaximal;
mod transitive;

pub use dead_end::{reduce_dead_ends, DeadEndConfig};
pub use p_bubble::{reduce_p_bubbles, PBubbleConfig};
pub use self_loops::{reduce_self, reduce_with_rc};
pub use submaximal::reduce_submaximal;
pub use transitive::reduce_transitive;

use crate::builder::Graph;
use crate::edge::EdgeStore;
use crate::vertex::{other, Vertex};

/// Locates the bidirected partner of the directed edge `source → dest`
/// with overhang `len` (§3, §9 "a reducer that cannot find the partner
/// must treat it as a programming error"): the partner is stored at
/// `other(dest)`, pointing to `other(source)`. When more than one live
/// edge at `other(dest)` points to `other(source)` (parallel edges not
/// yet resolved by `reduce_submaximal`), the one whose `len` also matches
/// is preferred, since a single SPM's two stored directed edges need not
/// carry equal `len` in general but happen to when it disambiguates a
/// duplicate; otherwise the first live match is returned.
pub(crate) fn find_partner<E: EdgeStore>(graph: &Graph<E>, source: Vertex, dest: Vertex, len: u32) -> Option<u64> {
    let partner_source = other(dest);
    let want_dest = other(source);
    let start = graph.vertices.offset(partner_source);
    let end = graph.vertices.offset(partner_source + 1);
    let mut fallback = None;
    for slot in start..end {
        let rec = graph.edges.get(slot);
        if rec.reduced || rec.dest != want_dest {
            continue;
        }
        if rec.len == len {
            return Some(slot);
        }
        if fallback.is_none() {
            fallback = Some(slot);
        }
    }
    fallback
}

/// Reduces `slot` (sourced at `source`) and its partner, decrementing
/// each endpoint's outdeg exactly once. Panics if no partner can be
/// found — per §9 this is a programming-error-class condition, not a
/// recoverable one.
pub(crate) fn reduce_with_partner<E: EdgeStore>(graph: &mut Graph<E>, source: Vertex, slot: u64) {
    let rec = graph.edges.get(slot);
    debug_assert!(!rec.reduced, "reduce_with_partner called on an already-reduced slot");
    let dest = rec.dest;
    let partner_slot = find_partner(graph, source, dest, rec.len)
        .unwrap_or_else(|| panic!("no bidirected partner found for edge {source}->{dest}"));
    graph.edges.reduce(slot);
    graph.vertices.dec_outdeg(source);
    if partner_slot != slot {
        graph.edges.reduce(partner_slot);
        graph.vertices.dec_outdeg(other(dest));
    }
}
