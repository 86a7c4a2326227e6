pub mod cache;
pub mod clock;
pub mod resolver;
pub mod rules;
pub mod weather;

pub use resolver::LocationResolver;
pub use rules::AdvisoryEngine;
pub use weather::WeatherService;
