//! Runs one contributor statistics job against Postgres and prints its
//! report. See [`config::WorkerConfig`] for the environment it reads.

pub mod config;
