pub mod collation;
pub mod contact;
pub mod loader;
pub mod matcher;
pub mod settings;
pub mod unicode;
pub mod unit;

pub use loader::{DatasetOrigin, LoadState, LoadStats, ReferenceLoader};
pub use matcher::UnitMatcher;
pub use unit::{TerritorialUnit, UnitType};
