//! Token listing controller.
//!
//! Owns the page state, issues backend requests, and pushes results through
//! the view seam. Mutations (batch-add, delete, cleanup) always re-fetch
//! afterwards; the server's ordering and identifiers are authoritative, so
//! the controller never appends or removes rows locally.
//!
//! Requests carry a sequence tag. A response whose tag is no longer current
//! was superseded by a newer operation and is discarded instead of
//! overwriting fresher state.

use crate::client::TokenBackend;
use crate::console::display::prepare_rows;
use crate::console::pagination::window;
use crate::console::view::ListView;
use crate::errors::ConsoleError;
use crate::models::token::TokenPage;
use crate::notify::{Notice, Notifier};

/// Page sizes the size selector offers.
pub const PAGE_SIZES: &[u32] = &[10, 15, 30, 50];
pub const DEFAULT_PAGE_SIZE: u32 = 15;

/// Identifies one listing request: the sequence number it was issued under
/// and the page state it was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTag {
    seq: u64,
    page: u32,
    per_page: u32,
}

/// Listing controller, constructed once per session.
pub struct TokenConsole<B, V, N> {
    backend: B,
    view: V,
    notifier: N,
    page: u32,
    per_page: u32,
    total: u64,
    total_pages: u32,
    staged_delete: Option<u64>,
    seq: u64,
}

impl<B, V, N> TokenConsole<B, V, N>
where
    B: TokenBackend,
    V: ListView,
    N: Notifier,
{
    /// Create a controller at page 1 with the given page size.
    pub fn new(backend: B, view: V, notifier: N, per_page: u32) -> Result<Self, ConsoleError> {
        if !PAGE_SIZES.contains(&per_page) {
            return Err(ConsoleError::Validation(format!(
                "page size must be one of {PAGE_SIZES:?}"
            )));
        }
        Ok(Self {
            backend,
            view,
            notifier,
            page: 1,
            per_page,
            total: 0,
            total_pages: 0,
            staged_delete: None,
            seq: 0,
        })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn staged_delete(&self) -> Option<u64> {
        self.staged_delete
    }

    /// Start a listing request, superseding any request still in flight.
    fn begin_load(&mut self) -> RequestTag {
        self.seq += 1;
        RequestTag {
            seq: self.seq,
            page: self.page,
            per_page: self.per_page,
        }
    }

    /// Apply a fetched page if its tag is still current. Returns false when
    /// the response was superseded; stale responses are not errors.
    fn apply_page(&mut self, tag: RequestTag, fetched: TokenPage) -> bool {
        if tag.seq != self.seq {
            tracing::debug!(
                issued = tag.seq,
                current = self.seq,
                "discarding stale listing response"
            );
            return false;
        }

        self.page = fetched.page;
        self.total = fetched.total;
        self.total_pages = fetched.total_pages;

        let rows = prepare_rows(fetched.page, tag.per_page, &fetched.tokens);
        self.view.render_rows(&rows);
        self.view
            .render_pagination(&window(fetched.page, fetched.total_pages, fetched.total));
        true
    }

    /// Fetch and render the current page.
    ///
    /// On failure the prior rendering is left intact and the error is both
    /// notified and returned. When the response shows the current page past
    /// the end (the last row of the last page was deleted), the controller
    /// clamps to the last page and fetches once more, restoring the
    /// `page <= total_pages` invariant.
    pub async fn load_page(&mut self) -> Result<(), ConsoleError> {
        let mut clamped = false;
        loop {
            let tag = self.begin_load();
            let fetched = match self.backend.list_tokens(tag.page, tag.per_page).await {
                Ok(p) => p,
                Err(e) => {
                    self.notifier
                        .notify(Notice::error(format!("failed to load tokens: {e}")));
                    return Err(e);
                }
            };

            let last = fetched.total_pages.max(1);
            if fetched.page > last && !clamped {
                if tag.seq != self.seq {
                    return Ok(());
                }
                self.page = last;
                clamped = true;
                continue;
            }

            self.apply_page(tag, fetched);
            return Ok(());
        }
    }

    /// Split `raw` on newlines, drop blank lines, and submit the remainder
    /// as one batch. An empty set fails validation before any request is
    /// made. On success the current page is re-fetched; returns how many
    /// tokens the server actually added.
    pub async fn add_tokens(&mut self, raw: &str) -> Result<usize, ConsoleError> {
        let tokens: Vec<String> = raw
            .lines()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect();

        if tokens.is_empty() {
            let message = "enter at least one token".to_string();
            self.notifier.notify(Notice::warning(message.clone()));
            return Err(ConsoleError::Validation(message));
        }

        match self.backend.add_batch(&tokens).await {
            Ok(resp) => {
                let added = resp.tokens.len();
                self.notifier
                    .notify(Notice::success(format!("added {added} tokens")));
                self.load_page().await?;
                Ok(added)
            }
            Err(e) => {
                self.notifier
                    .notify(Notice::error(format!("failed to add tokens: {e}")));
                Err(e)
            }
        }
    }

    /// Stage `id` for deletion. Fails while another delete is awaiting
    /// confirmation; only one target may be staged at a time.
    pub fn stage_delete(&mut self, id: u64) -> Result<(), ConsoleError> {
        if let Some(pending) = self.staged_delete {
            return Err(ConsoleError::Validation(format!(
                "delete of token {pending} is already awaiting confirmation"
            )));
        }
        self.staged_delete = Some(id);
        Ok(())
    }

    /// Abandon the staged delete, if any.
    pub fn cancel_delete(&mut self) {
        self.staged_delete = None;
    }

    /// Issue the staged delete. The staged id is cleared whether the request
    /// succeeds or fails; success re-fetches the current page, failure
    /// leaves the listing unchanged.
    pub async fn confirm_delete(&mut self) -> Result<(), ConsoleError> {
        let Some(id) = self.staged_delete.take() else {
            return Err(ConsoleError::Validation("no delete is staged".into()));
        };

        match self.backend.delete_token(id).await {
            Ok(()) => {
                self.notifier
                    .notify(Notice::success(format!("token {id} deleted")));
                self.load_page().await
            }
            Err(e) => {
                self.notifier
                    .notify(Notice::error(format!("failed to delete token {id}: {e}")));
                Err(e)
            }
        }
    }

    /// Navigate to `page` and reload.
    pub async fn change_page(&mut self, page: u32) -> Result<(), ConsoleError> {
        if page < 1 {
            return Err(ConsoleError::Validation("page numbers start at 1".into()));
        }
        self.page = page;
        self.load_page().await
    }

    /// Switch the page size and reload. Changing the size invalidates the
    /// previous page's row boundaries, so this always returns to page 1.
    pub async fn change_page_size(&mut self, size: u32) -> Result<(), ConsoleError> {
        if !PAGE_SIZES.contains(&size) {
            return Err(ConsoleError::Validation(format!(
                "page size must be one of {PAGE_SIZES:?}"
            )));
        }
        self.per_page = size;
        self.page = 1;
        self.load_page().await
    }

    /// Ask the backend to drop tokens inside its expiry threshold, then
    /// re-fetch the current page.
    pub async fn cleanup(&mut self) -> Result<(), ConsoleError> {
        match self.backend.cleanup().await {
            Ok(resp) => {
                self.notifier.notify(Notice::success(resp.message));
                self.load_page().await
            }
            Err(e) => {
                self.notifier
                    .notify(Notice::error(format!("cleanup failed: {e}")));
                Err(e)
            }
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::TokenBackend;
    use crate::console::display::TokenRow;
    use crate::console::pagination::PageLink;
    use crate::models::token::{MessageResponse, TokenBatchResponse, TokenRecord};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    #[derive(Default, Clone)]
    struct NullBackend;

    #[async_trait]
    impl TokenBackend for NullBackend {
        async fn list_tokens(&self, page: u32, per_page: u32) -> Result<TokenPage, ConsoleError> {
            Ok(TokenPage {
                tokens: vec![],
                total: 0,
                page,
                per_page,
                total_pages: 0,
            })
        }

        async fn add_batch(&self, _: &[String]) -> Result<TokenBatchResponse, ConsoleError> {
            Ok(TokenBatchResponse {
                message: String::new(),
                tokens: vec![],
            })
        }

        async fn delete_token(&self, _: u64) -> Result<(), ConsoleError> {
            Ok(())
        }

        async fn cleanup(&self) -> Result<MessageResponse, ConsoleError> {
            Ok(MessageResponse {
                message: "Removed 0 expired tokens".into(),
            })
        }
    }

    #[derive(Default, Clone)]
    struct RecordingView {
        renders: Arc<Mutex<Vec<Vec<TokenRow>>>>,
        strips: Arc<Mutex<Vec<Vec<PageLink>>>>,
    }

    impl ListView for RecordingView {
        fn render_rows(&mut self, rows: &[TokenRow]) {
            self.renders.lock().unwrap().push(rows.to_vec());
        }

        fn render_pagination(&mut self, links: &[PageLink]) {
            self.strips.lock().unwrap().push(links.to_vec());
        }
    }

    #[derive(Default, Clone)]
    struct RecordingNotifier {
        notices: Arc<Mutex<Vec<Notice>>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notice: Notice) {
            self.notices.lock().unwrap().push(notice);
        }
    }

    fn console() -> TokenConsole<NullBackend, RecordingView, RecordingNotifier> {
        TokenConsole::new(
            NullBackend,
            RecordingView::default(),
            RecordingNotifier::default(),
            15,
        )
        .unwrap()
    }

    fn page_of(page: u32, total_pages: u32, total: u64) -> TokenPage {
        TokenPage {
            tokens: vec![TokenRecord {
                id: 1,
                token: "t".into(),
                exp_time: 0,
                exp_time_display: "2024-01-01 00:00:00".into(),
                is_expired: false,
            }],
            total,
            page,
            per_page: 15,
            total_pages,
        }
    }

    #[test]
    fn test_rejects_unknown_page_size() {
        let result = TokenConsole::new(
            NullBackend,
            RecordingView::default(),
            RecordingNotifier::default(),
            17,
        );
        assert!(matches!(result, Err(ConsoleError::Validation(_))));
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut console = console();
        let old = console.begin_load();
        let fresh = console.begin_load();

        assert!(!console.apply_page(old, page_of(1, 3, 31)));
        assert_eq!(console.total_pages(), 0, "stale response must not apply");

        assert!(console.apply_page(fresh, page_of(1, 3, 31)));
        assert_eq!(console.total_pages(), 3);
        assert_eq!(console.view.renders.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_single_delete_staged_at_a_time() {
        let mut console = console();
        console.stage_delete(7).unwrap();
        let second = console.stage_delete(9);
        assert!(matches!(second, Err(ConsoleError::Validation(_))));
        assert_eq!(console.staged_delete(), Some(7));

        console.cancel_delete();
        assert_eq!(console.staged_delete(), None);
        console.stage_delete(9).unwrap();
    }

    #[tokio::test]
    async fn test_confirm_clears_staged_id_on_success() {
        let mut console = console();
        console.stage_delete(7).unwrap();
        console.confirm_delete().await.unwrap();
        assert_eq!(console.staged_delete(), None);
    }

    #[tokio::test]
    async fn test_confirm_without_staged_delete_fails() {
        let mut console = console();
        let result = console.confirm_delete().await;
        assert!(matches!(result, Err(ConsoleError::Validation(_))));
    }

    #[tokio::test]
    async fn test_change_page_size_resets_to_page_1() {
        let mut console = console();
        console.change_page(4).await.unwrap();
        console.change_page_size(30).await.unwrap();
        assert_eq!(console.page(), 1);
        assert_eq!(console.per_page(), 30);
    }

    #[tokio::test]
    async fn test_change_page_size_rejects_unlisted_value() {
        let mut console = console();
        let result = console.change_page_size(17).await;
        assert!(matches!(result, Err(ConsoleError::Validation(_))));
        assert_eq!(console.per_page(), 15);
    }

    #[tokio::test]
    async fn test_blank_add_input_fails_validation() {
        let mut console = console();
        assert!(console.add_tokens("").await.unwrap_err().is_validation());
        assert!(console
            .add_tokens("\n\n")
            .await
            .unwrap_err()
            .is_validation());
        let warned = console.notifier.notices.lock().unwrap().len();
        assert_eq!(warned, 2);
    }

    #[tokio::test]
    async fn test_change_page_rejects_zero() {
        let mut console = console();
        let result = console.change_page(0).await;
        assert!(matches!(result, Err(ConsoleError::Validation(_))));
    }
}
