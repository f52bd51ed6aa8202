pub mod client_id;
pub mod fields;
pub mod payload;
pub mod validate;

pub use fields::{Field, FormSnapshot, FormValues, FormView, RadioGroup};
pub use payload::Payload;
