pub mod account;
pub mod chart;
pub mod document;
pub mod event;
