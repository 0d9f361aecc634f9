mod city;
mod country;
mod state;

pub use city::{City, CityDetail};
pub use country::Country;
pub use state::{State, StateDetail};
