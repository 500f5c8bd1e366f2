pub mod app_state;
pub mod comparison;

pub use app_state::AppState;
pub use comparison::ComparisonView;
