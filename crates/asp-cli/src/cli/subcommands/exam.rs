use asp_core::Exam;
use clap::Subcommand;

/// Exam selection commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ExamCommands {
    /// Show the current exam and the exams you can switch to.
    Show,
    /// List the exams configured on your profile.
    List,
    /// Switch to your primary or secondary exam.
    Switch { exam: Exam },
}
