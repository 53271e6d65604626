mod axes;
mod dataset;
mod fields;
mod record;

pub use axes::{CompanySize, Interference, TREATMENT_ORDER};
pub use dataset::Dataset;
pub use fields::Field;
pub use record::{SurveyRecord, SurveyYear};
