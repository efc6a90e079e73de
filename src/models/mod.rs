pub mod assessment;
pub mod condition;
pub mod inputs;
pub mod questionnaire;

pub use assessment::*;
pub use condition::*;
pub use inputs::*;
pub use questionnaire::*;
