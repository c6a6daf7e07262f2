mod client;

pub use client::NbaStatsClient;
