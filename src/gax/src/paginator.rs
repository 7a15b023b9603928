// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Streams over paginated list responses.
//!
//! List operations return at most one page of results. Each page includes a
//! `nextLink`, an absolute URL to fetch the following page. The last page has
//! no `nextLink`. [Paginator] streams the pages, and [ItemPaginator] streams
//! the items in all the pages.

use crate::Result;
use futures::stream::unfold;
use futures::{Stream, StreamExt};
use pin_project::pin_project;
use std::future::Future;
use std::pin::Pin;

/// Describes a type that can be iterated over asynchronously when used with
/// [Paginator].
pub trait PageableResponse {
    type PageItem: Send;

    /// Consumes the page returning its items.
    fn items(self) -> Vec<Self::PageItem>;

    /// The token, or link, to fetch the next page. Empty on the last page.
    fn next_page_token(&self) -> String;
}

/// An adapter that converts list operations into a [Stream] of pages.
#[pin_project]
pub struct Paginator<T> {
    #[pin]
    stream: Pin<Box<dyn Stream<Item = Result<T>> + Send>>,
}

type ControlFlow = std::ops::ControlFlow<(), String>;

impl<T> Paginator<T>
where
    T: PageableResponse + Send + 'static,
{
    /// Creates a new [Paginator] given the initial page token and a function
    /// to fetch the next page.
    ///
    /// The function receives an empty token for the first page when
    /// `seed_token` is empty.
    pub fn new<F, E>(seed_token: String, execute: E) -> Self
    where
        F: Future<Output = Result<T>> + Send + 'static,
        E: Fn(String) -> F + Clone + Send + Sync + 'static,
    {
        let stream = unfold(ControlFlow::Continue(seed_token), move |state| {
            let execute = execute.clone();
            async move {
                let token = match state {
                    ControlFlow::Continue(token) => token,
                    ControlFlow::Break(_) => return None,
                };
                match execute(token).await {
                    Ok(page) => {
                        let tok = page.next_page_token();
                        let next_state = if tok.is_empty() {
                            ControlFlow::Break(())
                        } else {
                            ControlFlow::Continue(tok)
                        };
                        Some((Ok(page), next_state))
                    }
                    Err(e) => Some((Err(e), ControlFlow::Break(()))),
                }
            }
        });
        Self {
            stream: Box::pin(stream),
        }
    }

    /// Returns the next page, or `None` after the last page.
    pub async fn next(&mut self) -> Option<Result<T>> {
        self.stream.next().await
    }

    /// Converts the stream of pages into a stream of items.
    pub fn items(self) -> ItemPaginator<T> {
        ItemPaginator::new(self)
    }
}

impl<T> Stream for Paginator<T> {
    type Item = Result<T>;

    fn poll_next(
        self: Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Option<Self::Item>> {
        self.project().stream.poll_next(cx)
    }
}

impl<T> std::fmt::Debug for Paginator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Paginator").finish_non_exhaustive()
    }
}

/// An adapter that converts a [Paginator] into a stream of individual items.
///
/// Errors fetching a page are returned once, and terminate the stream.
#[pin_project]
pub struct ItemPaginator<T: PageableResponse> {
    #[pin]
    stream: Pin<Box<dyn Stream<Item = Result<T::PageItem>> + Send>>,
}

impl<T> ItemPaginator<T>
where
    T: PageableResponse + Send + 'static,
    T::PageItem: 'static,
{
    fn new(pages: Paginator<T>) -> Self {
        let stream = pages.flat_map(|page| {
            let items: Vec<Result<T::PageItem>> = match page {
                Ok(p) => p.items().into_iter().map(Ok).collect(),
                Err(e) => vec![Err(e)],
            };
            futures::stream::iter(items)
        });
        Self {
            stream: Box::pin(stream),
        }
    }

    /// Returns the next item, or `None` after the last item.
    pub async fn next(&mut self) -> Option<Result<T::PageItem>> {
        self.stream.next().await
    }
}

impl<T: PageableResponse> Stream for ItemPaginator<T> {
    type Item = Result<T::PageItem>;

    fn poll_next(
        self: Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Option<Self::Item>> {
        self.project().stream.poll_next(cx)
    }
}

impl<T: PageableResponse> std::fmt::Debug for ItemPaginator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemPaginator").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    #[derive(Debug)]
    struct TestPage {
        items: Vec<String>,
        next_link: String,
    }

    impl PageableResponse for TestPage {
        type PageItem = String;
        fn items(self) -> Vec<String> {
            self.items
        }
        fn next_page_token(&self) -> String {
            self.next_link.clone()
        }
    }

    fn page(items: &[&str], next_link: &str) -> TestPage {
        TestPage {
            items: items.iter().map(|s| s.to_string()).collect(),
            next_link: next_link.to_string(),
        }
    }

    fn fake_service(
        pages: Vec<Result<TestPage>>,
        want_tokens: Vec<&'static str>,
    ) -> impl Fn(String) -> futures::future::Ready<Result<TestPage>> + Clone + Send + Sync {
        let pages = Arc::new(Mutex::new(VecDeque::from(pages)));
        let tokens = Arc::new(Mutex::new(VecDeque::from(want_tokens)));
        move |token: String| {
            let want = tokens.lock().unwrap().pop_front().unwrap();
            assert_eq!(token, want);
            let page = pages.lock().unwrap().pop_front().unwrap();
            futures::future::ready(page)
        }
    }

    #[tokio::test]
    async fn pages() {
        let execute = fake_service(
            vec![
                Ok(page(&["vnet1", "vnet2"], "https://test.invalid/page2")),
                Ok(page(&["vnet3"], "")),
            ],
            vec!["", "https://test.invalid/page2"],
        );
        let mut paginator = Paginator::new(String::new(), execute);
        let mut names = Vec::new();
        while let Some(p) = paginator.next().await {
            let p = p.unwrap();
            names.push(p.items);
        }
        assert_eq!(
            names,
            vec![vec!["vnet1".to_string(), "vnet2".to_string()], vec![
                "vnet3".to_string()
            ]]
        );
    }

    #[tokio::test]
    async fn items() {
        let execute = fake_service(
            vec![
                Ok(page(&["vnet1", "vnet2"], "page2")),
                Ok(page(&[], "page3")),
                Ok(page(&["vnet3"], "")),
            ],
            vec!["", "page2", "page3"],
        );
        let mut items = Paginator::new(String::new(), execute).items();
        let mut names = Vec::new();
        while let Some(item) = items.next().await {
            names.push(item.unwrap());
        }
        assert_eq!(names, vec!["vnet1", "vnet2", "vnet3"]);
    }

    #[tokio::test]
    async fn error_ends_stream() {
        let execute = fake_service(
            vec![
                Ok(page(&["vnet1"], "page2")),
                Err(Error::http(
                    500,
                    http::HeaderMap::new(),
                    bytes::Bytes::from_static(b"oops"),
                )),
            ],
            vec!["", "page2"],
        );
        let mut items = Paginator::new(String::new(), execute).items();
        assert_eq!(items.next().await.map(|r| r.unwrap()), Some("vnet1".to_string()));
        let err = items.next().await.and_then(|r| r.err());
        assert!(
            err.as_ref().is_some_and(|e| e.http_status_code() == Some(500)),
            "{err:?}"
        );
        assert!(items.next().await.is_none());
    }
}
