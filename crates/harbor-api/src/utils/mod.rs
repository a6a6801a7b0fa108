pub mod form;

pub use form::{parse_form, FormParseError, ParsedForm};
