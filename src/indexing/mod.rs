//! Manuscript indexing
//!
//! - `files`: discovers the `.tex` files of a manuscript, honouring exclude
//!   patterns
//! - `project`: copies the manuscript, annotates each file of the copy and
//!   replaces it atomically
//!
//! # Example
//!
//! ```ignore
//! use texindex::indexing::{run_indexer, IndexOptions};
//!
//! let report = run_indexer(&options)?;
//! println!("{}", report.stats.render_text(50));
//! ```

mod files;
mod project;

pub use files::{build_exclude_set, collect_tex_files};
pub use project::{
    copy_project, replace_atomically, run_indexer, target_dir_for, IndexOptions, IndexReport,
};
