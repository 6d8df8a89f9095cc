pub mod completion;
pub mod session;

pub use crate::domain::ports::{CandidateBackend, ConfigProvider, PopupProbe, SelectionSource};
pub use crate::domain::store::CandidateStore;
pub use crate::utils::error::Result;
