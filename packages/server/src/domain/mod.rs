//! Domain layer for the scoreboard service.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod auth;
pub mod error;
pub mod event;
pub mod factory;
pub mod keys;
pub mod publisher;
pub mod room;
pub mod store;
pub mod value_object;

pub use auth::{TokenIssuer, TokenValidator};
pub use error::{AuthError, StoreError, ValueObjectError};
pub use event::{FIRST_SOLVER_BONUS, RoomEvent, SubmissionOutcome, SystemAction};
pub use factory::RoomKeyFactory;
pub use publisher::EventPublisher;
pub use room::{LeaderboardEntry, RoomMeta, RoomStats, RoomSummary};
pub use store::{Store, Subscription};
pub use value_object::{MessageText, ProblemId, RoomKey, Timestamp, Username};
