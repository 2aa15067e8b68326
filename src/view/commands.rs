//! Console intents - `search`, `category`, `sort`, `add` and friends.
//!
//! Each input line parses into one [`Intent`]; [`dispatch`] applies it to the store.

use crate::{
    core::{
        query::SortKey,
        store::CatalogStore,
        validation::{ProductDraft, validate},
    },
    errors::{Error, Result},
};
use tracing::debug;

/// Help text listing every console command.
pub const HELP: &str = "Commands:\n\
    \x20 search <term>       Filter by title (empty term clears)\n\
    \x20 category <slug|all> Filter by category\n\
    \x20 sort <column>       Sort by column; repeat to flip direction\n\
    \x20 unsort              Remove sorting\n\
    \x20 add title=..; price=..; category=..; stock=..[; thumbnail=..]\n\
    \x20 categories          List categories\n\
    \x20 help                Show this help\n\
    \x20 quit                Exit";

/// Something the user asked the dashboard to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Replace the search term
    Search(String),
    /// Select a category slug, or `all-categories`
    SelectCategory(String),
    /// Click a column header
    Sort(SortKey),
    /// Remove sorting
    ClearSort,
    /// Submit the add-product form
    Add(ProductDraft),
    /// Show the known categories
    ListCategories,
    /// Show the command list
    Help,
    /// Leave the console
    Quit,
}

/// What happened after dispatching an intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The query changed; re-render
    Updated,
    /// A product with this id was added; re-render
    Added(u64),
    /// Text to show without re-rendering
    Message(String),
    /// Leave the console loop
    Quit,
}

/// Parses one console line.
///
/// # Errors
/// Returns [`Error::Command`] for unknown commands, missing arguments, unknown
/// sort columns and malformed `add` fields.
pub fn parse_intent(line: &str) -> Result<Intent> {
    let line = line.trim();
    let (command, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(c, r)| (c, r.trim()));

    let intent = match command {
        "search" => Intent::Search(rest.to_string()),
        "category" | "cat" => match rest {
            "" => return Err(command_error("category needs a slug, or 'all'")),
            "all" => Intent::SelectCategory(crate::core::query::ALL_CATEGORIES.to_string()),
            slug => Intent::SelectCategory(slug.to_string()),
        },
        "sort" => Intent::Sort(rest.parse().map_err(|message| Error::Command { message })?),
        "unsort" => Intent::ClearSort,
        "add" => Intent::Add(parse_draft(rest)?),
        "categories" => Intent::ListCategories,
        "help" | "?" => Intent::Help,
        "quit" | "exit" => Intent::Quit,
        "" => return Err(command_error("empty command")),
        other => return Err(command_error(&format!("unknown command '{other}'"))),
    };
    Ok(intent)
}

/// Parses `key=value` pairs separated by `;` into a form draft.
fn parse_draft(fields: &str) -> Result<ProductDraft> {
    let mut draft = ProductDraft::default();
    for pair in fields.split(';').map(str::trim).filter(|p| !p.is_empty()) {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| command_error(&format!("expected key=value, got '{pair}'")))?;
        let value = value.trim().to_string();
        match key.trim() {
            "title" => draft.title = value,
            "price" => draft.price = value,
            "category" => draft.category = value,
            "stock" => draft.stock = value,
            "thumbnail" => draft.thumbnail = value,
            other => return Err(command_error(&format!("unknown field '{other}'"))),
        }
    }
    Ok(draft)
}

fn command_error(message: &str) -> Error {
    Error::Command {
        message: message.to_string(),
    }
}

/// Applies `intent` to `store`.
///
/// # Errors
/// Returns [`Error::Validation`] when an add submission fails validation; the
/// store is left untouched in that case.
pub fn dispatch(store: &mut CatalogStore, intent: Intent) -> Result<Outcome> {
    debug!("Dispatching {:?}", intent);
    let outcome = match intent {
        Intent::Search(term) => {
            store.set_search_term(term);
            Outcome::Updated
        }
        Intent::SelectCategory(slug) => {
            store.set_selected_category(&slug);
            Outcome::Updated
        }
        Intent::Sort(key) => {
            store.toggle_sort(key);
            Outcome::Updated
        }
        Intent::ClearSort => {
            store.clear_sort();
            Outcome::Updated
        }
        Intent::Add(draft) => {
            let candidate = validate(&draft, store.categories())?;
            Outcome::Added(store.add_product(candidate).id)
        }
        Intent::ListCategories => Outcome::Message(
            store
                .categories()
                .iter()
                .map(|c| format!("{} ({})", c.display_name(), c.slug))
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        Intent::Help => Outcome::Message(HELP.to_string()),
        Intent::Quit => Outcome::Quit,
    };
    Ok(outcome)
}
