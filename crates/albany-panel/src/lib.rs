#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/albany/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod contrast;
pub mod error;
pub mod estimator;
pub mod interaction;
pub mod linalg;

// Re-export main types
pub use contrast::{ContrastTest, contrast_test, group_alpha_contrast};
pub use error::{PanelError, Result};
pub use estimator::{PanelDims, PanelFit, fit_panel};
pub use interaction::interaction_matrix;
