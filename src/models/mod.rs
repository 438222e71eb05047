pub mod ranking;
pub mod restaurant;
pub mod review;
