#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/albany/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod newey_west;
pub mod portfolio;
pub mod sure;

// Re-export main types
pub use error::{CalendarError, Result};
pub use newey_west::{HacOls, NeweyWestConfig, hac_ols, long_run_variance};
pub use portfolio::{group_portfolios, long_short_series};
pub use sure::{SureFit, fit_sure};
