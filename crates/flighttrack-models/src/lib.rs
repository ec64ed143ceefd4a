#![deny(missing_docs)]

//! # Flighttrack Models
//!
//! Core data types for looking up a flight with a flight-status provider and
//! shaping the answer into something displayable.
//!
//! ## Data flow
//!
//! ```text
//! raw text ──▶ SearchQuery ──▶ (provider) ──▶ FlightsResponse
//!                                                  │
//!                                     select_best(&records)
//!                                                  │
//!                                           FlightRecord ──▶ FlightCard
//! ```
//!
//! ## Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`query`] | `SearchQuery` classification (code vs. number query) |
//! | [`record`] | Loosely-typed provider schema and total accessors |
//! | [`status`] | `FlightStatus` classification |
//! | [`select`] | Picking the best record out of a provider response |
//! | [`timestamp`] | Lenient timestamp parsing (`TimeField`) |
//! | [`card`] | The display model (`FlightCard`) and its formatter |

pub mod card;
pub mod error;
pub mod query;
pub mod record;
pub mod select;
pub mod status;
pub mod timestamp;

// Re-export all public types at crate root for convenience.
pub use card::*;
pub use error::*;
pub use query::*;
pub use record::*;
pub use select::*;
pub use status::*;
pub use timestamp::*;
