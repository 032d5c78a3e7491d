pub mod dashboard;
pub mod input;
pub mod results;

pub use dashboard::{Dashboard, Session};
pub use input::{FormSnapshot, InputForm};
pub use results::ResultsView;
