//! Location-and-weather decision core for a plant-care watering advisor.

pub mod config;
pub mod datasources;
pub mod db;
pub mod error;
pub mod logic;
pub mod models;
