//! SeaORM entity definitions for the contest database.

pub mod contest_submission;
pub mod generated_design;
pub mod share;
pub mod upload;
pub mod user;
