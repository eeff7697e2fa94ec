// Copyright (c) 2026 Dropbox, Inc.

//! Shared links, shared folders, and their members.

use serde::{Deserialize, Serialize};
use crate::async_client_trait::HttpClient;
use crate::client_helpers::rpc;
use crate::common::Tag;

/// Routes in the `sharing` namespace.
#[derive(Debug)]
pub struct Sharing<'a, C> {
    client: &'a C,
}

impl<'a, C: HttpClient> Sharing<'a, C> {
    pub(crate) fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Create a shared link. If a shared link already exists for the path, it is returned.
    pub async fn create_shared_link(&self, arg: &CreateSharedLinkArg) -> crate::Result<PathLinkMetadata> {
        rpc(self.client, "sharing/create_shared_link", arg).await
    }

    /// Return the list of all shared folders the current user has access to.
    pub async fn list_shared_folders(&self, arg: &ListFoldersArgs) -> crate::Result<ListFoldersResult> {
        rpc(self.client, "sharing/list_folders", arg).await
    }

    pub async fn list_shared_folders_continue(&self, arg: &ListContinueArg) -> crate::Result<ListFoldersResult> {
        rpc(self.client, "sharing/list_folders/continue", arg).await
    }

    /// Returns shared folder membership by its folder ID.
    pub async fn list_shared_folder_members(&self, arg: &ListFolderMembersArgs) -> crate::Result<SharedMembers> {
        rpc(self.client, "sharing/list_folder_members", arg).await
    }

    pub async fn list_shared_folder_members_continue(&self, arg: &ListContinueArg) -> crate::Result<SharedMembers> {
        rpc(self.client, "sharing/list_folder_members/continue", arg).await
    }

    /// Use to obtain the members who have been invited to a file, both inherited and
    /// uninherited members.
    pub async fn list_shared_file_members(&self, arg: &ListFileMembersArg) -> crate::Result<SharedMembers> {
        rpc(self.client, "sharing/list_file_members", arg).await
    }

    pub async fn list_shared_file_members_continue(&self, arg: &ListContinueArg) -> crate::Result<SharedMembers> {
        rpc(self.client, "sharing/list_file_members/continue", arg).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSharedLinkArg {
    pub path: String,
    #[serde(default)]
    pub short_url: bool,
}

impl CreateSharedLinkArg {
    pub fn new(path: String) -> Self {
        Self { path, short_url: false }
    }

    pub fn with_short_url(mut self, value: bool) -> Self {
        self.short_url = value;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathLinkMetadata {
    pub url: String,
    pub path: String,
    pub visibility: Tag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFoldersArgs {
    /// The maximum number of results to return per request.
    pub limit: u32,
}

impl Default for ListFoldersArgs {
    fn default() -> Self {
        Self { limit: 1000 }
    }
}

impl ListFoldersArgs {
    pub fn with_limit(mut self, value: u32) -> Self {
        self.limit = value;
        self
    }
}

/// Continues any of the sharing list calls. The cursor is passed back verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListContinueArg {
    pub cursor: String,
}

impl ListContinueArg {
    pub fn new(cursor: String) -> Self {
        Self { cursor }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFoldersResult {
    pub entries: Vec<SharedFolderMetadata>,
    /// Present if there are further results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedFolderMetadata {
    pub shared_folder_id: String,
    pub name: String,
    pub access_type: Tag,
    #[serde(default)]
    pub is_inside_team_folder: bool,
    #[serde(default)]
    pub is_team_folder: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_lower: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_invited: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFolderMembersArgs {
    pub shared_folder_id: String,
    pub limit: u32,
}

impl ListFolderMembersArgs {
    pub fn new(shared_folder_id: String) -> Self {
        Self { shared_folder_id, limit: 1000 }
    }

    pub fn with_limit(mut self, value: u32) -> Self {
        self.limit = value;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFileMembersArg {
    /// The file for which you want to see members.
    pub file: String,
    pub include_inherited: bool,
    pub limit: u32,
}

impl ListFileMembersArg {
    pub fn new(file: String) -> Self {
        Self { file, include_inherited: true, limit: 100 }
    }

    pub fn with_include_inherited(mut self, value: bool) -> Self {
        self.include_inherited = value;
        self
    }

    pub fn with_limit(mut self, value: u32) -> Self {
        self.limit = value;
        self
    }
}

/// Members of a shared folder or file, one page at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedMembers {
    #[serde(default)]
    pub users: Vec<UserMembershipInfo>,
    #[serde(default)]
    pub groups: Vec<GroupMembershipInfo>,
    #[serde(default)]
    pub invitees: Vec<InviteeMembershipInfo>,
    /// Present if there are further members.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

impl SharedMembers {
    /// Number of users, groups and invitees on this page.
    pub fn len(&self) -> usize {
        self.users.len() + self.groups.len() + self.invitees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMembershipInfo {
    pub access_type: Tag,
    pub user: UserInfo,
    #[serde(default)]
    pub is_inherited: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub account_id: String,
    pub email: String,
    pub display_name: String,
    pub same_team: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_member_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMembershipInfo {
    pub access_type: Tag,
    pub group: GroupInfo,
    #[serde(default)]
    pub is_inherited: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupInfo {
    pub group_name: String,
    pub group_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteeMembershipInfo {
    pub access_type: Tag,
    pub invitee: InviteeInfo,
    #[serde(default)]
    pub is_inherited: bool,
}

/// Currently invitees are only identified by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteeInfo {
    #[serde(rename = ".tag")]
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
