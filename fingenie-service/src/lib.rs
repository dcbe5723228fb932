//! fingenie-service: forwards user questions to a hosted generative model.

pub mod config;
pub mod gateway;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
pub mod utils;
