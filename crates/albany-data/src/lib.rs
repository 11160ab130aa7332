#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/albany/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod loader;
pub mod panel;

pub use error::{DataError, Result};
pub use loader::{read_dated_matrix, read_matrix};
pub use panel::{PanelData, load_dated_panel, load_panel};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
