pub mod study;

pub use crate::domain::model::{CompletionRequest, StudyMode, StudyResponse, TextInput};
pub use crate::domain::ports::ChatCompletion;
pub use crate::utils::error::Result;
pub use study::StudyService;
