//! # File System Module
//!
//! File system modules handle interactions with directories and files on a
//! disk image.  There is a sub-module for each supported file system; at
//! present that is RKDOS only.

pub mod rkdos;
