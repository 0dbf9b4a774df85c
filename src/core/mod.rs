pub mod clock;
pub mod errors;
pub mod models;

pub use errors::PinlianError;
pub use models::{
    AnswerOutcome,
    Band,
    PhraseRecord,
    Quality,
    ResponseTimeSample,
};
