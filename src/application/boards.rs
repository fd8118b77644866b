//! Board, board-group, and board-webhook operations.

use std::sync::Arc;

use uuid::Uuid;

use crewdeck_api_types::boards::{
    BoardCreate, BoardFilter, BoardGroupFilter, BoardGroupRead, BoardRead, BoardUpdate,
    BoardWebhookCreate, BoardWebhookRead, BoardWebhookUpdate,
};
use crewdeck_api_types::{ListPage, PageRequest};

use crate::application::api::ConsoleApi;
use crate::application::cached_list;
use crate::application::error::AppError;
use crate::cache::{ListKey, OptimisticListDelete, QueryCache, QueryKey, ResourceKind};

/// Mutation input for a webhook delete; the webhook id alone does not
/// address the endpoint.
#[derive(Debug, Clone, Copy)]
pub struct WebhookDeleteRequest {
    pub board_id: Uuid,
    pub webhook_id: Uuid,
}

pub struct BoardService {
    api: Arc<dyn ConsoleApi>,
    cache: Arc<QueryCache>,
}

impl BoardService {
    pub fn new(api: Arc<dyn ConsoleApi>, cache: Arc<QueryCache>) -> Self {
        Self { api, cache }
    }

    pub fn list_key(filter: &BoardFilter, page: &PageRequest) -> ListKey {
        ListKey::for_query(ResourceKind::Boards, filter, page)
    }

    /// Webhook lists are scoped per board; the board id is the filter.
    pub fn webhook_list_key(board_id: Uuid, page: &PageRequest) -> ListKey {
        ListKey::for_query(ResourceKind::BoardWebhooks, &board_id, page)
    }

    pub async fn list(
        &self,
        filter: &BoardFilter,
        page: PageRequest,
    ) -> Result<ListPage<BoardRead>, AppError> {
        let key = Self::list_key(filter, &page);
        let api = Arc::clone(&self.api);
        let filter = filter.clone();
        cached_list(&self.cache, key, move || async move {
            api.list_boards(&filter, page).await
        })
        .await
    }

    pub async fn get(&self, id: Uuid) -> Result<BoardRead, AppError> {
        Ok(self.api.get_board(id).await?)
    }

    pub async fn create(&self, input: &BoardCreate) -> Result<BoardRead, AppError> {
        let created = self.api.create_board(input).await?;
        self.cache.invalidate_lists(ResourceKind::Boards);
        Ok(created)
    }

    pub async fn update(&self, id: Uuid, input: &BoardUpdate) -> Result<BoardRead, AppError> {
        let updated = self.api.update_board(id, input).await?;
        self.cache.invalidate_lists(ResourceKind::Boards);
        Ok(updated)
    }

    /// Optimistically delete a board from the list view addressed by
    /// `key`. Board removal changes agent assignments and dashboard
    /// series, so both are flagged stale on confirmation.
    pub async fn delete(&self, key: ListKey, id: Uuid) -> Result<(), AppError> {
        let coordinator = OptimisticListDelete::new(
            Arc::clone(&self.cache),
            key,
            |board: &BoardRead| board.id,
            |id: &Uuid| *id,
        )
        .invalidate(QueryKey::DashboardMetrics);
        let api = Arc::clone(&self.api);
        coordinator
            .run(id, move |id| async move { api.delete_board(id).await })
            .await?;
        self.cache.invalidate_lists(ResourceKind::Agents);
        Ok(())
    }

    pub async fn list_groups(
        &self,
        filter: &BoardGroupFilter,
        page: PageRequest,
    ) -> Result<ListPage<BoardGroupRead>, AppError> {
        let key = ListKey::for_query(ResourceKind::BoardGroups, filter, &page);
        let api = Arc::clone(&self.api);
        let filter = filter.clone();
        cached_list(&self.cache, key, move || async move {
            api.list_board_groups(&filter, page).await
        })
        .await
    }

    pub async fn list_webhooks(
        &self,
        board_id: Uuid,
        page: PageRequest,
    ) -> Result<ListPage<BoardWebhookRead>, AppError> {
        let key = Self::webhook_list_key(board_id, &page);
        let api = Arc::clone(&self.api);
        cached_list(&self.cache, key, move || async move {
            api.list_board_webhooks(board_id, page).await
        })
        .await
    }

    pub async fn create_webhook(
        &self,
        board_id: Uuid,
        input: &BoardWebhookCreate,
    ) -> Result<BoardWebhookRead, AppError> {
        let created = self.api.create_board_webhook(board_id, input).await?;
        self.cache.invalidate_lists(ResourceKind::BoardWebhooks);
        Ok(created)
    }

    pub async fn update_webhook(
        &self,
        board_id: Uuid,
        webhook_id: Uuid,
        input: &BoardWebhookUpdate,
    ) -> Result<BoardWebhookRead, AppError> {
        let updated = self
            .api
            .update_board_webhook(board_id, webhook_id, input)
            .await?;
        self.cache.invalidate_lists(ResourceKind::BoardWebhooks);
        Ok(updated)
    }

    /// Optimistically delete a webhook from its board's webhook list.
    pub async fn delete_webhook(
        &self,
        key: ListKey,
        request: WebhookDeleteRequest,
    ) -> Result<(), AppError> {
        let coordinator = OptimisticListDelete::new(
            Arc::clone(&self.cache),
            key,
            |webhook: &BoardWebhookRead| webhook.id,
            |request: &WebhookDeleteRequest| request.webhook_id,
        );
        let api = Arc::clone(&self.api);
        coordinator
            .run(request, move |request| async move {
                api.delete_board_webhook(request.board_id, request.webhook_id)
                    .await
            })
            .await?;
        Ok(())
    }
}
