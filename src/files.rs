// Copyright (c) 2026 Dropbox, Inc.

//! Files and folders: metadata, listing, upload and download.
//!
//! Upload and download go to the content host; everything else is an RPC call on the API host.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde::ser::SerializeStruct;
use crate::async_client_trait::HttpClient;
use crate::client::Download;
use crate::client_helpers::{rpc, transfer};
use crate::client_trait_common::Endpoint;

/// Routes in the `files` namespace.
#[derive(Debug)]
pub struct Files<'a, C> {
    client: &'a C,
}

impl<'a, C: HttpClient> Files<'a, C> {
    pub(crate) fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Returns the metadata for a file or folder.
    pub async fn get_metadata(&self, arg: &GetMetadataArg) -> crate::Result<Metadata> {
        rpc(self.client, "files/get_metadata", arg).await
    }

    /// Starts returning the contents of a folder. If the result's `has_more` is true, call
    /// [`list_folder_continue`](Self::list_folder_continue) with its cursor to get the rest.
    pub async fn list_folder(&self, arg: &ListFolderArg) -> crate::Result<ListFolderResult> {
        rpc(self.client, "files/list_folder", arg).await
    }

    pub async fn list_folder_continue(&self, arg: &ListFolderContinueArg) -> crate::Result<ListFolderResult> {
        rpc(self.client, "files/list_folder/continue", arg).await
    }

    /// Create a folder at a given path.
    pub async fn create_folder(&self, arg: &CreateFolderArg) -> crate::Result<CreateFolderResult> {
        rpc(self.client, "files/create_folder_v2", arg).await
    }

    /// Delete the file or folder at a given path. A folder is deleted along with all its contents.
    pub async fn delete(&self, arg: &DeleteArg) -> crate::Result<DeleteResult> {
        rpc(self.client, "files/delete_v2", arg).await
    }

    /// Create a new file with the contents provided in the request. Limited to 150 MiB.
    pub async fn upload(&self, arg: &CommitInfo, contents: Bytes) -> crate::Result<FileMetadata> {
        transfer(self.client, Endpoint::Content, "files/upload", arg, Some(contents))
            .await?
            .json()
            .await
    }

    /// Download a file.
    pub async fn download(&self, arg: &DownloadArg) -> crate::Result<Download<FileMetadata>> {
        let response = transfer(self.client, Endpoint::Content, "files/download", arg, None).await?;
        Download::from_response(response)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetMetadataArg {
    /// The path or ID of a file or folder.
    pub path: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub include_deleted: bool,
}

impl GetMetadataArg {
    pub fn new(path: String) -> Self {
        Self { path, include_deleted: false }
    }

    pub fn with_include_deleted(mut self, value: bool) -> Self {
        self.include_deleted = value;
        self
    }
}

/// Metadata for a file, folder, or deleted entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum Metadata {
    File(FileMetadata),
    Folder(FolderMetadata),
    Deleted(DeletedMetadata),
}

impl Metadata {
    pub fn name(&self) -> &str {
        match self {
            Metadata::File(m) => &m.name,
            Metadata::Folder(m) => &m.name,
            Metadata::Deleted(m) => &m.name,
        }
    }

    pub fn path_display(&self) -> Option<&str> {
        match self {
            Metadata::File(m) => m.path_display.as_deref(),
            Metadata::Folder(m) => m.path_display.as_deref(),
            Metadata::Deleted(m) => m.path_display.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    pub name: String,
    pub id: String,
    /// Modification time set by the desktop client, in ISO 8601 form.
    pub client_modified: String,
    /// Last time the file was modified on Dropbox, in ISO 8601 form.
    pub server_modified: String,
    pub rev: String,
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_lower: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_display: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderMetadata {
    pub name: String,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_lower: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_display: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedMetadata {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_lower: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_display: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFolderArg {
    /// A unique identifier for the folder. Use the empty string for the root.
    pub path: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub recursive: bool,
    /// The maximum number of results to return per request. This is an approximate target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl ListFolderArg {
    pub fn new(path: String) -> Self {
        Self { path, recursive: false, limit: None }
    }

    pub fn with_recursive(mut self, value: bool) -> Self {
        self.recursive = value;
        self
    }

    pub fn with_limit(mut self, value: u32) -> Self {
        self.limit = Some(value);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFolderContinueArg {
    /// The cursor returned by a previous list call. Passed back verbatim.
    pub cursor: String,
}

impl ListFolderContinueArg {
    pub fn new(cursor: String) -> Self {
        Self { cursor }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFolderResult {
    pub entries: Vec<Metadata>,
    pub cursor: String,
    pub has_more: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateFolderArg {
    pub path: String,
    /// If there's a conflict, have the server try to rename the folder to avoid it.
    #[serde(default)]
    pub autorename: bool,
}

impl CreateFolderArg {
    pub fn new(path: String) -> Self {
        Self { path, autorename: false }
    }

    pub fn with_autorename(mut self, value: bool) -> Self {
        self.autorename = value;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateFolderResult {
    pub metadata: FolderMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteArg {
    pub path: String,
}

impl DeleteArg {
    pub fn new(path: String) -> Self {
        Self { path }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResult {
    pub metadata: Metadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadArg {
    /// The path of the file to download.
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
}

impl DownloadArg {
    pub fn new(path: String) -> Self {
        Self { path, rev: None }
    }

    pub fn with_rev(mut self, rev: String) -> Self {
        self.rev = Some(rev);
        self
    }
}

/// Arguments for [`Files::upload`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitInfo {
    /// Path in the user's Dropbox to save the file.
    pub path: String,
    pub mode: WriteMode,
    /// If there's a conflict, have the server try to rename the file to avoid it.
    pub autorename: bool,
    /// Don't notify the user's devices about this modification.
    pub mute: bool,
}

impl CommitInfo {
    pub fn new(path: String) -> Self {
        Self {
            path,
            mode: WriteMode::Add,
            autorename: false,
            mute: false,
        }
    }

    pub fn with_mode(mut self, mode: WriteMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_autorename(mut self, value: bool) -> Self {
        self.autorename = value;
        self
    }

    pub fn with_mute(mut self, value: bool) -> Self {
        self.mute = value;
        self
    }
}

/// What to do if a file already exists at the upload path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteMode {
    /// Never overwrite the existing file.
    Add,
    /// Always overwrite the existing file.
    Overwrite,
    /// Overwrite only if the existing file is at the given revision.
    Update(String),
}

impl Serialize for WriteMode {
    fn serialize<S: serde::ser::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            WriteMode::Add => {
                let mut s = serializer.serialize_struct("WriteMode", 1)?;
                s.serialize_field(".tag", "add")?;
                s.end()
            }
            WriteMode::Overwrite => {
                let mut s = serializer.serialize_struct("WriteMode", 1)?;
                s.serialize_field(".tag", "overwrite")?;
                s.end()
            }
            WriteMode::Update(rev) => {
                let mut s = serializer.serialize_struct("WriteMode", 2)?;
                s.serialize_field(".tag", "update")?;
                s.serialize_field("update", rev)?;
                s.end()
            }
        }
    }
}
