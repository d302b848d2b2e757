//! Command implementations.

mod common;
mod plan;
mod resolve;
mod tag;

pub use common::CiArgs;
pub use plan::{
    PlanArgs,
    plan,
    plan_to_writer,
};
pub use resolve::{
    ResolveArgs,
    resolve,
    resolve_to_writer,
};
pub use tag::{
    TagArgs,
    tag,
    tag_to_writer,
};
