//! Filter rules derived from the loaded document.
//!
//! - `allow_forbid`: splits `!`-prefixed token lists into allow/forbid lists
//! - `pod_labels`: label-exclusion rules, compiled once into matchers

mod allow_forbid;
mod pod_labels;

pub use allow_forbid::*;
pub use pod_labels::*;
