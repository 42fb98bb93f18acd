pub mod error;
pub mod event;
pub mod fixtures;
pub mod journal;
pub mod reducer;
pub mod report;
pub mod search;
pub mod stamp;
pub mod summary;
pub mod state;
pub mod timeline;
pub mod totals;
pub mod types;
pub mod validation;

pub use error::TabletError;
pub use event::*;
pub use journal::*;
pub use reducer::*;
pub use report::*;
pub use search::*;
pub use stamp::*;
pub use summary::*;
pub use state::*;
pub use timeline::*;
pub use totals::*;
pub use types::*;
pub use validation::*;
