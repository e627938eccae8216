pub mod usage_analyzer;

pub use usage_analyzer::UsageAnalyzer;
