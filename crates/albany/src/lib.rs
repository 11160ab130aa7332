#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/albany/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod study;
pub mod synthetic;

// Re-export the member crates
pub use albany_calendar as calendar;
pub use albany_data as data;
pub use albany_output as output;
pub use albany_panel as panel;

// Re-export main types
pub use study::{StudyConfig, StudyError, StudyOutcome, run_alpha_study};
pub use synthetic::TwoGroupScenario;
