pub mod classification;
pub mod region;
pub mod outline;
pub mod metrics;
pub mod staging;
pub mod scoring;

pub use classification::*;
pub use region::*;
pub use outline::*;
pub use metrics::*;
pub use staging::*;
pub use scoring::*;
