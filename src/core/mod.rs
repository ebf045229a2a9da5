// Core algorithm exports
pub mod filters;
pub mod location;
pub mod matcher;
pub mod scoring;

pub use filters::{is_eligible_candidate, skill_names_overlap, overlapping_pairs};
pub use location::{country_of, same_country};
pub use matcher::{Matcher, DEFAULT_MATCH_LIMIT};
pub use scoring::calculate_match_score;
