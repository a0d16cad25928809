//! D'Hondt seat allocation for multi-district elections.
//!
//! The allocator reads an [`ElectionTable`] (one row per district, one vote
//! column per party), drops parties below a nationwide vote-share
//! threshold, runs the highest-averages method in each district and returns
//! a [`ResultSet`] with per-party totals, an annotated copy of the table and
//! a totals row. Loading CSV and rendering results live in [`loader`] and
//! [`output`]; the allocator itself does no I/O.

pub mod aggregate;
pub mod allocator;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod loader;
pub mod output;
pub mod reports;
pub mod types;
pub mod util;

pub use allocator::{allocate_district, eligible_parties, simulate_election};
pub use config::AllocationConfig;
pub use error::{AllocationError, AllocationResult, AppError, AppResult};
pub use types::{Cell, DistrictAllocation, ElectionTable, ResultSet, SeatTotals};
