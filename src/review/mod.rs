pub mod answer;
pub mod quality;
pub mod scheduler;
pub mod session;
pub mod stats;

pub use session::{
    LevelRange,
    ReviewSession,
    StudyConfig,
};
