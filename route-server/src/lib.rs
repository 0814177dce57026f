//! Multimodal transit route planner server.
//!
//! A web application that answers: "what is the quickest way from this
//! airport, station or town to that one?" over a network of flights, bus,
//! rail and sea lines, walking links and spawn warps.

pub mod config;
pub mod domain;
pub mod network;
pub mod planner;
pub mod web;
