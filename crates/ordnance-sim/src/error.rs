//! Errors surfaced by the simulation API.

use thiserror::Error;

use ordnance_core::types::ActorId;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("actor {0:?} does not exist")]
    UnknownActor(ActorId),
    #[error("actor {0:?} has no owner")]
    MissingOwner(ActorId),
    #[error("actor {0:?} has no position")]
    MissingPosition(ActorId),
    #[error("actor type `{0}` has no sprite rendering")]
    MissingRenderSprites(String),
    #[error("target is not valid")]
    InvalidTarget,
}
