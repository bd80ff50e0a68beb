//! Backend access for the web client

pub mod client;

pub use client::*;
