//! Data backend for the club dashboard: turns folders (or a remote
//! manifest) of goal-clip videos and small plot-source files into scorer
//! tables, pitch-plot data and zone statistics. Rendering is someone
//! else's job; everything exported here is plain data.

pub mod aggregate;
pub mod cache;
pub mod config;
pub mod export;
pub mod fetch;
pub mod filename;
pub mod files;
pub mod manifest;
pub mod opponent;
pub mod plot_source;
pub mod report;
pub mod squad;
