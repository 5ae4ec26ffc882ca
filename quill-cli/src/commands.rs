use serde_json::{Value, json};
use tracing::warn;

use quill_index::{
    HomeQuery, IndexError, IndexResult, LinkTrigger, Note, Notebook, SearchOptions, is_weak_query,
};

use crate::cli::Command;

/// Run one command against the notebook and return its JSON output.
pub fn run(notebook: &Notebook, command: Command) -> IndexResult<Value> {
    let value = match command {
        Command::Search {
            query,
            limit,
            titles,
        } => {
            if is_weak_query(&query) {
                warn!(query = %query, "Query too short or too common to search");
                return Ok(json!([]));
            }
            let options = SearchOptions {
                limit,
                title_only: titles,
            };
            serde_json::to_value(notebook.search(&query, &options))?
        }
        Command::Suggest {
            query,
            text,
            cursor,
        } => {
            let trigger = match text {
                Some(text) => {
                    let cursor = cursor.unwrap_or_else(|| text.chars().count());
                    match LinkTrigger::detect(&text, cursor) {
                        Some(trigger) => trigger,
                        None => return Ok(json!([])),
                    }
                }
                None => LinkTrigger::from_query(query.unwrap_or_default()),
            };
            serde_json::to_value(notebook.suggest_links(&trigger))?
        }
        Command::Similar { id, top_k } => {
            let note = find(notebook, &id)?;
            let top_k = top_k.unwrap_or(notebook.settings().similar_top_k);
            let similar: Vec<Value> = notebook
                .similar(note, top_k)
                .into_iter()
                .map(|similar| {
                    json!({
                        "id": similar.note.id,
                        "title": similar.note.display_title(),
                        "score": similar.score,
                        "summary": similar.summary(),
                        "sharedTokens": similar.shared_tokens,
                        "sharedLinks": similar.shared_links,
                    })
                })
                .collect();
            Value::Array(similar)
        }
        Command::Backlinks { id } => {
            serde_json::to_value(notebook.backlinks_for(find(notebook, &id)?))?
        }
        Command::Links { id } => {
            serde_json::to_value(notebook.outgoing_links(find(notebook, &id)?))?
        }
        Command::Recent { limit } => {
            let recent: Vec<Value> = notebook
                .recent_notes(limit)
                .into_iter()
                .map(|note| {
                    json!({
                        "id": note.id,
                        "title": note.display_title(),
                        "updatedAt": note.metadata.updated_at,
                    })
                })
                .collect();
            Value::Array(recent)
        }
        Command::Home { sort, pinned } => serde_json::to_value(notebook.home_listing(HomeQuery {
            sort: sort.into(),
            pinned_only: pinned,
        }))?,
    };
    Ok(value)
}

fn find<'a>(notebook: &'a Notebook, id: &str) -> IndexResult<&'a Note> {
    notebook
        .get(id)
        .ok_or_else(|| IndexError::UnknownNote(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::SortArg;
    use chrono::Utc;
    use quill_index::IndexSettings;

    fn notebook() -> Notebook {
        Notebook::with_notes(
            vec![
                Note::new("plan", "Project Plan", "See [[Budget Notes]].", Utc::now()),
                Note::new("budget", "Budget Notes", "Numbers.", Utc::now()),
            ],
            IndexSettings::default(),
        )
    }

    #[test]
    fn test_search_outputs_hits() {
        let output = run(
            &notebook(),
            Command::Search {
                query: "budget".into(),
                limit: None,
                titles: false,
            },
        )
        .expect("search");
        assert_eq!(output[0]["id"], "budget");
        assert_eq!(output[0]["highlightRanges"][0]["end"], 6);
    }

    #[test]
    fn test_weak_query_outputs_nothing() {
        let output = run(
            &notebook(),
            Command::Search {
                query: "a".into(),
                limit: None,
                titles: false,
            },
        )
        .expect("search");
        assert_eq!(output, json!([]));
    }

    #[test]
    fn test_suggest_from_text_and_caret() {
        let output = run(
            &notebook(),
            Command::Suggest {
                query: None,
                text: Some("see [[budget notes".into()),
                cursor: None,
            },
        )
        .expect("suggest");
        assert_eq!(output[0]["title"], "Budget Notes");
        assert_eq!(output[0]["kind"], "note");
        assert_eq!(output.as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn test_backlinks_and_unknown_ids() {
        let notebook = notebook();
        let output = run(&notebook, Command::Backlinks { id: "budget".into() }).expect("backlinks");
        assert_eq!(output, json!([{"sourceId": "plan", "sourceTitle": "Project Plan"}]));

        let err = run(&notebook, Command::Links { id: "nope".into() }).unwrap_err();
        assert!(matches!(err, IndexError::UnknownNote(_)));
    }

    #[test]
    fn test_home_alpha() {
        let output = run(
            &notebook(),
            Command::Home {
                sort: SortArg::Alpha,
                pinned: false,
            },
        )
        .expect("home");
        assert_eq!(output[0]["title"], "Budget Notes");
        assert_eq!(output[1]["snippet"], "See [[Budget Notes]].");
    }
}
