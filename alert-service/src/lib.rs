//! Patient alert relay: accepts routine update and emergency alert
//! requests, resolves the recipient's push token, and forwards a formatted
//! push message to the Expo delivery API.
pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
