//! Report building and formatting for the delivery front end

pub mod formatter;
pub mod report;

pub use formatter::{save_report_to_file, ReportGenerator};
pub use report::{RankingReport, ScoreReport};
