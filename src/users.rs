// Copyright (c) 2026 Dropbox, Inc.

//! Information about user accounts.

use serde::{Deserialize, Serialize};
use crate::async_client_trait::HttpClient;
use crate::client_helpers::rpc;
use crate::common::Tag;

/// Routes in the `users` namespace.
#[derive(Debug)]
pub struct Users<'a, C> {
    client: &'a C,
}

impl<'a, C: HttpClient> Users<'a, C> {
    pub(crate) fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Get information about a user's account.
    pub async fn get_account(&self, arg: &GetAccountArg) -> crate::Result<BasicAccount> {
        rpc(self.client, "users/get_account", arg).await
    }

    /// Get information about multiple user accounts. At most 300 accounts may be queried per
    /// request.
    pub async fn get_account_batch(&self, arg: &GetAccountBatchArg) -> crate::Result<Vec<BasicAccount>> {
        rpc(self.client, "users/get_account_batch", arg).await
    }

    /// Get information about the current user's account.
    pub async fn get_current_account(&self) -> crate::Result<FullAccount> {
        rpc(self.client, "users/get_current_account", &()).await
    }

    /// Get the space usage information for the current user's account.
    pub async fn get_space_usage(&self) -> crate::Result<SpaceUsage> {
        rpc(self.client, "users/get_space_usage", &()).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetAccountArg {
    /// A user's account identifier.
    pub account_id: String,
}

impl GetAccountArg {
    pub fn new(account_id: String) -> Self {
        Self { account_id }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetAccountBatchArg {
    pub account_ids: Vec<String>,
}

impl GetAccountBatchArg {
    pub fn new(account_ids: Vec<String>) -> Self {
        Self { account_ids }
    }
}

/// Representations for a person's name to assist with internationalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Name {
    pub given_name: String,
    pub surname: String,
    /// Locale-dependent name. In the US, a person's familiar name is their given name.
    pub familiar_name: String,
    pub display_name: String,
    pub abbreviated_name: String,
}

/// Basic information about any account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicAccount {
    pub account_id: String,
    pub name: Name,
    pub email: String,
    pub email_verified: bool,
    pub disabled: bool,
    /// Whether this user is a teammate of the current user.
    #[serde(default)]
    pub is_teammate: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_photo_url: Option<String>,
    /// Only present if the user is in the same team as the current user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_member_id: Option<String>,
}

/// Detailed information about the current user's account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullAccount {
    pub account_id: String,
    pub name: Name,
    pub email: String,
    pub email_verified: bool,
    pub disabled: bool,
    pub locale: String,
    pub referral_link: String,
    pub is_paired: bool,
    pub account_type: AccountType,
    pub root_info: RootInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<FullTeam>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_member_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_photo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum AccountType {
    Basic,
    Pro,
    Business,
    #[serde(other)]
    Other,
}

/// The namespaces an account's paths resolve against. `root_namespace_id` is what
/// [`PathRoot::Root`](crate::PathRoot::Root) expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootInfo {
    /// `user` or `team`.
    #[serde(rename = ".tag")]
    pub tag: String,
    pub root_namespace_id: String,
    pub home_namespace_id: String,
    /// Only present for team root info.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullTeam {
    pub id: String,
    pub name: String,
    pub sharing_policies: TeamSharingPolicies,
    pub office_addin_policy: Tag,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSharingPolicies {
    pub shared_folder_member_policy: Tag,
    pub shared_folder_join_policy: Tag,
    pub shared_link_create_policy: Tag,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceUsage {
    /// The user's total space usage, in bytes.
    pub used: u64,
    pub allocation: SpaceAllocation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum SpaceAllocation {
    /// The user's space allocation applies only to their individual account.
    Individual { allocated: u64 },

    /// The user shares space with other members of their team.
    Team { used: u64, allocated: u64 },

    #[serde(other)]
    Other,
}

impl SpaceAllocation {
    /// The allocated space in bytes, if known.
    pub fn allocated(&self) -> Option<u64> {
        match self {
            SpaceAllocation::Individual { allocated } | SpaceAllocation::Team { allocated, .. } => {
                Some(*allocated)
            }
            SpaceAllocation::Other => None,
        }
    }
}
