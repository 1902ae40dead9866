//! Refuelling stop planner server.
//!
//! A web application that answers: "I'm driving from here to there with
//! this much range left, where should I stop for fuel?"

pub mod cache;
pub mod config;
pub mod domain;
pub mod geometry;
pub mod planner;
pub mod routing;
pub mod stations;
pub mod web;
