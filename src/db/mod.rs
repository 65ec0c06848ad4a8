pub mod activity;
pub mod faculty;
pub mod routines;
pub mod swaps;
pub mod users;
