pub mod band;
pub mod coerce;
pub mod features;
pub mod jurisdiction;
pub mod scoring;
