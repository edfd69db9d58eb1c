//! Pure helper functions shared by the engines and the presentation layer

pub mod calendar;
pub mod money;
