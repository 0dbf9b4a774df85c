pub mod app;
pub mod settings;
pub mod setup_view;
pub mod testing_view;
pub mod theme;
pub mod top_bar;

pub use app::{
    run_gui,
    PinlianApp,
};
