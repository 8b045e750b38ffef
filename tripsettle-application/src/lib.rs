#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod model;
pub mod ports;
pub mod settlement_service;

pub use error::{SettlementBuildError, TripSourceError};
pub use model::{SettlementResult, SplitPolicy, TripSnapshot};
pub use ports::{ParticipantDirectory, TripSource};
pub use settlement_service::SettlementService;
