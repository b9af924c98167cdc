//! GitLab repository listing CLI.
//!
//! - `output`: rendering of resolved repos as JSON or tab-separated lines.

pub mod output;
