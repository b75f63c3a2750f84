use std::fmt::Write as _;

use anyhow::Context;
use asp_core::{Exam, PageRequest, Pagination, Question, Resource, Story};
use serde::Serialize;

use crate::cli::subcommands::{FeedArgs, FeedCommands};
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct FeedPageResponse<T> {
    exam: Option<Exam>,
    pagination: Pagination,
    items: Vec<T>,
}

#[derive(Debug, Serialize)]
struct QuestionRow {
    id: String,
    title: String,
    score: i64,
    answers: u32,
    solved: bool,
    saved: bool,
}

#[derive(Debug, Serialize)]
struct ResourceRow {
    id: String,
    title: String,
    kind: String,
    rating: String,
    saved: bool,
}

#[derive(Debug, Serialize)]
struct StoryRow {
    id: String,
    title: String,
    author: String,
    likes: u32,
    saved: bool,
}

/// Handle `aspirant feed <subcommand>`.
pub async fn handle(action: &FeedCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        FeedCommands::Questions(args) => {
            let (exam, page) = target(args, ctx, flags);
            let paged = ctx
                .client
                .list_questions(exam, page)
                .await
                .context("failed to load questions")?;
            let pagination = paged.pagination();
            emit(exam, pagination, paged.items, question_row, flags)
        }
        FeedCommands::Resources(args) => {
            let (exam, page) = target(args, ctx, flags);
            let paged = ctx
                .client
                .list_resources(exam, page)
                .await
                .context("failed to load resources")?;
            let pagination = paged.pagination();
            emit(exam, pagination, paged.items, resource_row, flags)
        }
        FeedCommands::Stories(args) => {
            let (exam, page) = target(args, ctx, flags);
            let paged = ctx
                .client
                .list_stories(exam, page)
                .await
                .context("failed to load stories")?;
            let pagination = paged.pagination();
            emit(exam, pagination, paged.items, story_row, flags)
        }
    }
}

/// `--exam` wins; otherwise the session's current exam.
fn target(args: &FeedArgs, ctx: &AppContext, flags: &GlobalFlags) -> (Option<Exam>, PageRequest) {
    let exam = args.exam.or_else(|| ctx.session.current_exam());
    (exam, ctx.page(args.page, flags))
}

/// Tables get one summary row per item; json/raw get the full entities.
fn emit<T: Serialize, R: Serialize>(
    exam: Option<Exam>,
    pagination: Pagination,
    items: Vec<T>,
    summarize: fn(&T) -> R,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if flags.format != OutputFormat::Table {
        return output(
            &FeedPageResponse {
                exam,
                pagination,
                items,
            },
            flags.format,
        );
    }

    let rows = items.iter().map(summarize).collect::<Vec<_>>();
    output(&rows, flags.format)?;
    if !flags.quiet {
        println!("{}", page_footer(exam, &pagination));
    }
    Ok(())
}

fn page_footer(exam: Option<Exam>, pagination: &Pagination) -> String {
    let scope = exam.map_or_else(|| String::from("all exams"), |exam| exam.to_string());
    let mut footer = format!(
        "{scope}: page {} of {} ({} total)",
        pagination.page,
        pagination.pages.max(1),
        pagination.total
    );
    if pagination.has_next() {
        let _ = write!(footer, ", next: --page {}", pagination.page + 1);
    }
    footer
}

fn question_row(question: &Question) -> QuestionRow {
    QuestionRow {
        id: question.id.clone(),
        title: question.title.clone(),
        score: question.score(),
        answers: question.answer_count,
        solved: question.is_solved,
        saved: question.is_saved,
    }
}

fn resource_row(resource: &Resource) -> ResourceRow {
    ResourceRow {
        id: resource.id.clone(),
        title: resource.title.clone(),
        kind: resource.resource_type.clone().unwrap_or_default(),
        rating: format!("{:.1} ({})", resource.average_rating, resource.rating_count),
        saved: resource.is_saved,
    }
}

fn story_row(story: &Story) -> StoryRow {
    StoryRow {
        id: story.id.clone(),
        title: story.title.clone(),
        author: story
            .author
            .as_ref()
            .map(|author| author.username.clone())
            .unwrap_or_default(),
        likes: story.likes,
        saved: story.is_saved,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn footer_points_at_next_page() {
        let pagination = Pagination {
            page: 2,
            limit: 10,
            total: 35,
            pages: 4,
        };
        assert_eq!(
            page_footer(Some(Exam::Neet), &pagination),
            "NEET: page 2 of 4 (35 total), next: --page 3"
        );
    }

    #[test]
    fn footer_on_last_page() {
        let pagination = Pagination {
            page: 1,
            limit: 10,
            total: 0,
            pages: 0,
        };
        assert_eq!(page_footer(None, &pagination), "all exams: page 1 of 1 (0 total)");
    }

    #[test]
    fn resource_rating_is_summarized() {
        let resource: Resource = serde_json::from_str(
            r#"{"_id":"r1","title":"Polity notes","resourceType":"pdf","averageRating":4.26,"ratingCount":8}"#,
        )
        .expect("resource json");
        let row = resource_row(&resource);
        assert_eq!(row.rating, "4.3 (8)");
        assert_eq!(row.kind, "pdf");
    }
}
