pub mod keeper;
pub mod merge;
pub mod parser;
pub mod round;
pub mod scorecard;
pub mod selection;
pub mod session;

pub use crate::domain::model::{HoleStats, PartialHoleUpdate, Round};
pub use crate::domain::ports::{ConfigProvider, HoleStore, LineSource, RoundStore};
pub use crate::utils::error::Result;
