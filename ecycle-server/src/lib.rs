//! E-Cycle Navi server.
//!
//! A municipal information page for Daejeon's small e-waste collection
//! bins: an interactive map with district and text filtering, plus a
//! repair chatbot that forwards questions to an external
//! chat-completion API.

pub mod advisor;
pub mod bins;
pub mod web;
