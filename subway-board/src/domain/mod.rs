//! Domain types for the arrival board.
//!
//! Stop identifiers are validated at construction; the record types are
//! request-scoped values produced by the board engine and serialized
//! unchanged by the web layer.

mod arrival;
mod headway;
mod stop_id;
mod transfer;

pub use arrival::{ArrivalRecord, DedupKey, UNKNOWN_TEXT, minutes_until};
pub use headway::HeadwayRecord;
pub use stop_id::{
    Direction, InvalidStopId, REALTIME_SUFFIX, StopId, is_directional, strip_realtime,
};
pub use transfer::TransferRecord;
