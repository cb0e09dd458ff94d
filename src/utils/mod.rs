pub mod filters;

pub use filters::{build_conference_query, format_filters, ConferenceQuery, FilterValue};
