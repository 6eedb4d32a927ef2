//! sahayak-service: teaching-assistant relay.
//!
//! Extracts text from uploaded images and turns a topic into a lesson plan,
//! worksheet and quiz, using Gemini models for both.

pub mod config;
pub mod dtos;
pub mod handlers;
pub mod services;
pub mod startup;
