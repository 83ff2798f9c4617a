// SPDX-FileCopyrightText: 2022 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use reqwest::Method;

use crate::model;

use super::{Executor, Request};

/// Free-text search across the books. Without a kind filter the server
/// searches everything.
pub(crate) struct Search {
    pub(crate) query: String,
    pub(crate) kind: Option<model::search::SearchKind>,
}

impl From<Search> for Request {
    fn from(value: Search) -> Self {
        let segment = value.kind.map_or("All", model::search::SearchKind::as_segment);
        Self::new(Method::GET, format!("api/Search/{segment}")).with_query("q", value.query)
    }
}

impl Executor for Search {
    type Response = Vec<model::search::SearchHit>;
}
