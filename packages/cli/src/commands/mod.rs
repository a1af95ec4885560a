pub mod apply;
pub mod inspect;
pub mod new;

pub use apply::{apply, ApplyArgs};
pub use inspect::{inspect, InspectArgs};
pub use new::{new, NewArgs};
