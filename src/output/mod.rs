//! Output artifacts

pub mod fcpxml;
