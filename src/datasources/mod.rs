pub mod device;
pub mod profile;
pub mod weather_proxy;

pub use device::{ConfiguredDeviceLocation, DeviceLocationError, DeviceLocator};
pub use profile::UserProfileClient;
pub use weather_proxy::WeatherProxyClient;
