/// Core module for VNG report analysis
///
/// This module contains the analytical heart of the tool: the report text
/// parser, the cross-file analyzer, and the domain models they share.

pub mod analyzer;
pub mod models;
pub mod parser;
