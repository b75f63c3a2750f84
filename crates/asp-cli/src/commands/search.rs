use anyhow::Context;
use asp_client::SearchQuery;
use asp_core::{FeedItem, FeedKind};
use serde::Serialize;

use crate::cli::root_commands::{SearchArgs, SearchKind};
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct SearchRow {
    kind: &'static str,
    id: String,
    title: String,
    exam: String,
}

impl From<SearchKind> for FeedKind {
    fn from(kind: SearchKind) -> Self {
        match kind {
            SearchKind::Question => Self::Question,
            SearchKind::Resource => Self::Resource,
            SearchKind::Story => Self::Story,
        }
    }
}

/// Handle `aspirant search <query>`.
pub async fn handle(args: &SearchArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut query = SearchQuery::new(args.query.trim()).page(ctx.page(args.page, flags));
    if let Some(kind) = args.kind {
        query = query.kind(kind.into());
    }

    let results = ctx
        .client
        .search(&query)
        .await
        .with_context(|| format!("search for '{}' failed", args.query))?;

    if flags.format == OutputFormat::Table {
        let rows = results.items.iter().map(search_row).collect::<Vec<_>>();
        return output(&rows, flags.format);
    }
    output(&results, flags.format)
}

fn search_row(item: &FeedItem) -> SearchRow {
    let (title, exam) = match item {
        FeedItem::Question(q) => (&q.title, q.exam),
        FeedItem::Resource(r) => (&r.title, r.exam),
        FeedItem::Story(s) => (&s.title, s.exam),
    };
    SearchRow {
        kind: item.kind().as_str(),
        id: item.id().to_string(),
        title: title.clone(),
        exam: exam.map(|exam| exam.to_string()).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn rows_carry_kind_and_exam() {
        let item: FeedItem = serde_json::from_str(
            r#"{"postType":"resource","_id":"r7","title":"Current affairs digest","exam":"UPSC"}"#,
        )
        .expect("feed item json");
        let row = search_row(&item);
        assert_eq!(row.kind, "resource");
        assert_eq!(row.exam, "UPSC");
        assert_eq!(row.title, "Current affairs digest");
    }

    #[test]
    fn kind_flag_maps_to_feed_kind() {
        assert_eq!(FeedKind::from(SearchKind::Story), FeedKind::Story);
    }
}
