//! # skillcheck
//!
//! Assesses a single learner-submitted Python program: checks that it
//! parses, profiles its structure, classifies the author's skill tier and
//! produces prioritized, scaffolded feedback.
//!
//! ```no_run
//! let result = skillcheck::assess_code("def f(x):\n    return x + 1\n");
//! assert_eq!(result.syntax_score(), 1.0);
//! for line in result.feedback() {
//!     println!("{line}");
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// The assessment pipeline
pub mod assess;
/// Assessment policy and its loading
pub mod config;
/// A module defining the default policy values and other constants
pub mod constants;
/// Tiers, feedback and the result record
pub mod grade;
/// Analysis of Python source code
pub mod python;
/// Small shared types
pub mod types;

/// Optional Python bindings.
#[cfg(feature = "python")]
pub mod bindings;

pub use assess::{Assessor, assess_code};
pub use config::{AssessmentConfig, ConfigError};
pub use grade::{SkillTier, SubmissionResult};
