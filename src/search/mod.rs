//! Search orchestration: prompt construction, completion call, image lookup.

use std::future::Future;

use anyhow::Result;

use crate::external::pexels::PexelsClient;
use crate::llm::LlmClient;
use crate::prompt::{self, QueryMode};

/// Shown in place of a result when the completion call fails.
pub const FETCH_FAILED_FALLBACK: &str = "Failed to fetch data.";

/// Narrow seam over the completion endpoint so the orchestration
/// can be exercised without a network.
pub trait CompletionApi {
    fn complete(&self, prompt: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Narrow seam over the image-search endpoint.
pub trait ImageApi {
    fn search_image(&self, term: &str) -> impl Future<Output = Result<String>> + Send;
}

impl CompletionApi for LlmClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        LlmClient::complete(self, prompt).await
    }
}

impl ImageApi for PexelsClient {
    async fn search_image(&self, term: &str) -> Result<String> {
        PexelsClient::search_image(self, term).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub output: String,
    pub image_url: String,
}

#[derive(Clone)]
pub struct SearchController<C, P> {
    pub completion: C,
    pub images: P,
}

impl<C: CompletionApi, P: ImageApi> SearchController<C, P> {
    /// Run one search cycle. Returns `None` for an empty or whitespace-only
    /// query; both network failures degrade to fallback values instead of
    /// propagating. The image lookup only runs after a successful completion
    /// and its outcome never masks the completion text.
    pub async fn search(&self, mode: QueryMode, query: &str) -> Option<SearchOutcome> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        let outcome = match self.completion.complete(&prompt::build_prompt(mode, query)).await {
            Ok(output) => {
                let term = prompt::image_search_term(mode, query);
                let image_url = match self.images.search_image(&term).await {
                    Ok(url) => url,
                    Err(err) => {
                        tracing::debug!(error = %err, term = %term, "image search failed");
                        String::new()
                    }
                };
                SearchOutcome { output, image_url }
            }
            Err(err) => {
                tracing::error!(error = %err, "completion request failed");
                SearchOutcome {
                    output: FETCH_FAILED_FALLBACK.to_string(),
                    image_url: String::new(),
                }
            }
        };

        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeCompletion {
        reply: Result<&'static str, &'static str>,
    }

    impl CompletionApi for FakeCompletion {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            match self.reply {
                Ok(text) => Ok(text.to_string()),
                Err(msg) => Err(anyhow!(msg)),
            }
        }
    }

    struct FakeImages {
        reply: Result<&'static str, &'static str>,
        calls: AtomicUsize,
    }

    impl FakeImages {
        fn new(reply: Result<&'static str, &'static str>) -> Self {
            Self { reply, calls: AtomicUsize::new(0) }
        }
    }

    impl ImageApi for &FakeImages {
        async fn search_image(&self, _term: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.reply {
                Ok(url) => Ok(url.to_string()),
                Err(msg) => Err(anyhow!(msg)),
            }
        }
    }

    #[tokio::test]
    async fn empty_and_whitespace_queries_are_noops() {
        let images = FakeImages::new(Ok("unused"));
        let controller = SearchController {
            completion: FakeCompletion { reply: Ok("unused") },
            images: &images,
        };
        assert_eq!(controller.search(QueryMode::Plant, "").await, None);
        assert_eq!(controller.search(QueryMode::Disease, "   ").await, None);
        assert_eq!(images.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn success_sets_output_and_image() {
        let images = FakeImages::new(Ok("https://images.pexels.com/tulsi/medium.jpg"));
        let controller = SearchController {
            completion: FakeCompletion { reply: Ok("<b>Tulsi</b>") },
            images: &images,
        };
        let outcome = controller.search(QueryMode::Plant, "Tulsi").await.unwrap();
        assert_eq!(outcome.output, "<b>Tulsi</b>");
        assert_eq!(outcome.image_url, "https://images.pexels.com/tulsi/medium.jpg");
        assert_eq!(images.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn completion_failure_skips_image_and_falls_back() {
        let images = FakeImages::new(Ok("unused"));
        let controller = SearchController {
            completion: FakeCompletion { reply: Err("connection reset") },
            images: &images,
        };
        let outcome = controller.search(QueryMode::Disease, "Cold").await.unwrap();
        assert_eq!(outcome.output, FETCH_FAILED_FALLBACK);
        assert_eq!(outcome.image_url, "");
        assert_eq!(images.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn image_failure_is_swallowed() {
        let images = FakeImages::new(Err("timed out"));
        let controller = SearchController {
            completion: FakeCompletion { reply: Ok("<b>Cold</b> remedies") },
            images: &images,
        };
        let outcome = controller.search(QueryMode::Disease, "Cold").await.unwrap();
        assert_eq!(outcome.output, "<b>Cold</b> remedies");
        assert_eq!(outcome.image_url, "");
    }

    #[tokio::test]
    async fn leading_and_trailing_whitespace_is_trimmed_for_the_image_term() {
        struct TermCapture(std::sync::Mutex<String>);
        impl ImageApi for &TermCapture {
            async fn search_image(&self, term: &str) -> Result<String> {
                *self.0.lock().unwrap() = term.to_string();
                Ok(String::new())
            }
        }
        let capture = TermCapture(std::sync::Mutex::new(String::new()));
        let controller = SearchController {
            completion: FakeCompletion { reply: Ok("ok") },
            images: &capture,
        };
        controller.search(QueryMode::Plant, "  Tulsi  ").await.unwrap();
        assert_eq!(*capture.0.lock().unwrap(), "Tulsi plant");
    }
}
