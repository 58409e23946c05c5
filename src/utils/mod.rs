/// Utility modules for the VNG analyzer
///
/// This module contains statistical helpers, file handling, and output
/// formatting.

pub mod file_utils;
pub mod output_formatter;
pub mod statistics;
