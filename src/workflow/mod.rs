mod extract;
mod parser;
mod types;

pub use extract::{EXPRESSION_PLACEHOLDER, extract_scripts};
pub use parser::{grab_specific_steps, load_workflow, missing_steps, parse_workflow};
pub use types::{Job, Step, Workflow};
