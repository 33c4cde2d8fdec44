pub mod account;
pub mod ai;
pub mod helpers;
pub mod schedule;
