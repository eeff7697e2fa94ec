// Copyright (c) 2026 Dropbox, Inc.

//! Dropbox Paper documents.
//!
//! Unlike files, Paper content is exchanged with the API host: [`Paper::download`] and
//! [`Paper::create`] are content-transfer calls on `api.dropboxapi.com`.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use crate::async_client_trait::HttpClient;
use crate::client::Download;
use crate::client_helpers::{rpc, transfer};
use crate::client_trait_common::Endpoint;
use crate::common::Tag;

/// Routes in the `paper` namespace.
#[derive(Debug)]
pub struct Paper<'a, C> {
    client: &'a C,
}

impl<'a, C: HttpClient> Paper<'a, C> {
    pub(crate) fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Return the IDs of the Paper docs the user has access to, filtered and sorted.
    pub async fn list_docs(&self, arg: &ListPaperDocsArgs) -> crate::Result<ListPaperDocsResponse> {
        rpc(self.client, "paper/docs/list", arg).await
    }

    /// Continue listing from the cursor of a previous [`list_docs`](Self::list_docs) call.
    pub async fn list_docs_continue(&self, arg: &ListPaperDocsContinueArgs) -> crate::Result<ListPaperDocsResponse> {
        rpc(self.client, "paper/docs/list/continue", arg).await
    }

    /// Export a Paper doc in the given format.
    pub async fn download(&self, arg: &PaperDocExport) -> crate::Result<Download<PaperDocExportResult>> {
        let response = transfer(self.client, Endpoint::Api, "paper/docs/download", arg, None).await?;
        Download::from_response(response)
    }

    /// Create a new Paper doc from the given content.
    pub async fn create(&self, arg: &PaperDocCreateArgs, contents: Bytes) -> crate::Result<PaperDocCreateUpdateResult> {
        transfer(self.client, Endpoint::Api, "paper/docs/create", arg, Some(contents))
            .await?
            .json()
            .await
    }

    /// Permanently delete a Paper doc. This cannot be undone.
    pub async fn permanently_delete(&self, arg: &RefPaperDoc) -> crate::Result<()> {
        rpc(self.client, "paper/docs/permanently_delete", arg).await
    }

    /// Return the folders containing a Paper doc, outermost first.
    pub async fn get_folder_info(&self, arg: &RefPaperDoc) -> crate::Result<FoldersContainingPaperDoc> {
        rpc(self.client, "paper/docs/get_folder_info", arg).await
    }

    /// Fetch a Paper doc's metadata. This is a preview route and may change without notice.
    pub async fn alpha_get_metadata(&self, arg: &RefPaperDoc) -> crate::Result<PaperDocMetadata> {
        rpc(self.client, "paper/docs/get_metadata", arg).await
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListPaperDocsFilterBy {
    /// Docs the user has accessed.
    #[default]
    DocsAccessed,
    /// Docs the user has created.
    DocsCreated,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListPaperDocsSortBy {
    #[default]
    Accessed,
    Modified,
    Created,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListPaperDocsSortOrder {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPaperDocsArgs {
    pub filter_by: ListPaperDocsFilterBy,
    pub sort_by: ListPaperDocsSortBy,
    pub sort_order: ListPaperDocsSortOrder,
    /// Size limit per batch, at most 1000.
    pub limit: u32,
}

impl Default for ListPaperDocsArgs {
    fn default() -> Self {
        Self {
            filter_by: ListPaperDocsFilterBy::default(),
            sort_by: ListPaperDocsSortBy::default(),
            sort_order: ListPaperDocsSortOrder::default(),
            limit: 1000,
        }
    }
}

impl ListPaperDocsArgs {
    pub fn with_filter_by(mut self, value: ListPaperDocsFilterBy) -> Self {
        self.filter_by = value;
        self
    }

    pub fn with_sort_by(mut self, value: ListPaperDocsSortBy) -> Self {
        self.sort_by = value;
        self
    }

    pub fn with_sort_order(mut self, value: ListPaperDocsSortOrder) -> Self {
        self.sort_order = value;
        self
    }

    pub fn with_limit(mut self, value: u32) -> Self {
        self.limit = value;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPaperDocsContinueArgs {
    /// The `value` of a [`Cursor`] from a previous list call.
    pub cursor: String,
}

impl ListPaperDocsContinueArgs {
    pub fn new(cursor: String) -> Self {
        Self { cursor }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPaperDocsResponse {
    pub doc_ids: Vec<String>,
    pub cursor: Cursor,
    pub has_more: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    pub value: String,
    /// When the cursor stops being valid, in ISO 8601 form. Absent for cursors that don't expire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Html,
    Markdown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperDocExport {
    pub doc_id: String,
    pub export_format: ExportFormat,
}

impl PaperDocExport {
    pub fn new(doc_id: String, export_format: ExportFormat) -> Self {
        Self { doc_id, export_format }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperDocExportResult {
    pub owner: String,
    pub title: String,
    pub revision: i64,
    pub mime_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportFormat {
    Html,
    Markdown,
    PlainText,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperDocCreateArgs {
    pub import_format: ImportFormat,
    /// The Paper folder to create the doc in. The user's root if absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_folder_id: Option<String>,
}

impl PaperDocCreateArgs {
    pub fn new(import_format: ImportFormat) -> Self {
        Self { import_format, parent_folder_id: None }
    }

    pub fn with_parent_folder_id(mut self, value: String) -> Self {
        self.parent_folder_id = Some(value);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperDocCreateUpdateResult {
    pub doc_id: String,
    pub revision: i64,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefPaperDoc {
    pub doc_id: String,
}

impl RefPaperDoc {
    pub fn new(doc_id: String) -> Self {
        Self { doc_id }
    }
}

/// For a doc at the top level, both fields are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoldersContainingPaperDoc {
    /// `team` or `invite_only`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_sharing_policy_type: Option<Tag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folders: Option<Vec<Folder>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperDocMetadata {
    pub doc_id: String,
    pub owner: String,
    pub title: String,
    pub created_date: String,
    /// `active`, `archived` or `deleted`.
    pub status: Tag,
    pub revision: i64,
    pub last_updated_date: String,
    pub last_editor: String,
}
