//! Bitemporal state reconstruction: [`Rehydrator`] rebuilds a VFS by
//! loading the latest valid snapshot and replaying diffs forward
//! (§4.3), and [`TimeTravelService`] is the thin facade over it
//! (§4.4).

mod rehydrator;
mod time_travel;

pub use rehydrator::Rehydrator;
pub use time_travel::TimeTravelService;
