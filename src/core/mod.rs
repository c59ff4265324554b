pub mod coerce;
pub mod lookup;
pub mod quantize;
