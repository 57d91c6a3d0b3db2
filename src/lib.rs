pub mod collector;
pub mod config;
pub mod context;
pub mod errors;
pub mod fakes;
pub mod gates;
pub mod github;
pub mod mover;
pub mod outcome;
pub mod references;
pub mod runner;
pub mod telemetry;
pub mod zenhub;
