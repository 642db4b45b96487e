use axum::extract::{Query, State};
use axum::response::Html;

use super::HashQuery;
use crate::page::{self, PageView};
use crate::server::AppState;

/// `GET /` renders the lookup form, plus a result panel when a hash was submitted.
///
/// Never fails: an unparsable query string is treated like a missing one.
pub(crate) async fn lookup(
    State(state): State<AppState>,
    query: Option<Query<HashQuery>>,
) -> Html<String> {
    let Some(hash) = query.and_then(|Query(query)| query.normalized()) else {
        return Html(page::render(&PageView::Form));
    };

    let file_name = state.index.get(&hash).map(display_name);
    let view = match file_name.as_deref() {
        Some(file_name) => PageView::Found {
            hash: &hash,
            file_name,
        },
        None => PageView::NotFound { hash: &hash },
    };
    Html(page::render(&view))
}

/// Last path component, as shown to the user and offered as the download name.
pub(crate) fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
