use anyhow::Context;
use asp_core::Exam;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ExamCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ExamShowResponse {
    current_exam: Option<Exam>,
    available_exams: Vec<Exam>,
    can_switch: bool,
}

#[derive(Debug, Serialize)]
struct ExamRow {
    exam: Exam,
    role: &'static str,
    current: bool,
}

/// Handle `aspirant exam <subcommand>`.
pub fn handle(action: &ExamCommands, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        ExamCommands::Show => output(&show(ctx), flags.format),
        ExamCommands::List => output(&rows(ctx), flags.format),
        ExamCommands::Switch { exam } => {
            ctx.session
                .switch_exam(*exam)
                .with_context(|| format!("cannot switch to {exam}"))?;
            output(&show(ctx), flags.format)
        }
    }
}

fn show(ctx: &AppContext) -> ExamShowResponse {
    ExamShowResponse {
        current_exam: ctx.session.current_exam(),
        available_exams: ctx.session.available_exams(),
        can_switch: ctx.session.can_switch_exam(),
    }
}

fn rows(ctx: &AppContext) -> Vec<ExamRow> {
    let current = ctx.session.current_exam();
    ctx.session
        .available_exams()
        .into_iter()
        .enumerate()
        .map(|(index, exam)| ExamRow {
            exam,
            role: if index == 0 { "primary" } else { "secondary" },
            current: Some(exam) == current,
        })
        .collect()
}
