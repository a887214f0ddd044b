//! Provides input/output functionality for the file formats of the meshing pipeline.
//!
//! Every format has a reader and/or writer implementing the traits in [`traits`].
//! Writers publish their output atomically: content goes to a temporary file in the
//! destination directory, which is renamed over the target only once complete.

pub mod atomic;
pub mod coords;
pub mod gaff;
pub mod molecules;
pub mod msms;
pub mod off;
pub mod pqr;
pub mod prmtop;
pub mod report;
pub mod traits;
pub mod xyzr;
