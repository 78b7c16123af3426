//! Live adapters that talk to real API endpoints.

pub mod openai;
