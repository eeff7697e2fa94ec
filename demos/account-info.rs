#![deny(rust_2018_idioms)]

//! Prints the current account, its space usage, and the members of every shared folder, using the
//! blocking client.

use std::time::Duration;
use dropbox_client::default_client::DefaultClient;
use dropbox_client::sharing::{ListContinueArg, ListFolderMembersArgs, ListFoldersArgs};
use dropbox_client::{block_on_sync, Dropbox, Error, PathRoot};

fn main() {
    env_logger::init();

    let Ok(token) = std::env::var("DBX_OAUTH_TOKEN") else {
        eprintln!("usage: {}", std::env::args().next().unwrap());
        eprintln!("    A Dropbox OAuth token must be given in the environment variable");
        eprintln!("    DBX_OAUTH_TOKEN.");
        std::process::exit(1);
    };

    let client = DefaultClient::new(token).with_timeout(Duration::from_secs(30));
    let mut dbx = Dropbox::new(client);

    let account = match block_on_sync(dbx.users().get_current_account()) {
        Ok(account) => account,
        Err(e) => {
            report("users/get_current_account", &e);
            std::process::exit(2);
        }
    };
    println!("{} <{}>", account.name.display_name, account.email);
    println!("account id: {}", account.account_id);
    if let Some(team) = &account.team {
        println!("team: {}", team.name);
    }

    // Resolve paths against the account's root namespace from here on, so team folders show up
    // for team members too.
    let mut client = dbx.into_inner();
    client.set_path_root(Some(PathRoot::Root(account.root_info.root_namespace_id.clone())));
    dbx = Dropbox::new(client);

    match block_on_sync(dbx.users().get_space_usage()) {
        Ok(usage) => match usage.allocation.allocated() {
            Some(allocated) => println!("using {} of {} bytes", usage.used, allocated),
            None => println!("using {} bytes", usage.used),
        },
        Err(e) => report("users/get_space_usage", &e),
    }

    let mut page = match block_on_sync(dbx.sharing().list_shared_folders(&ListFoldersArgs::default())) {
        Ok(page) => page,
        Err(e) => {
            report("sharing/list_folders", &e);
            return;
        }
    };
    loop {
        for folder in &page.entries {
            println!("shared folder {} ({})", folder.name, folder.access_type.as_str());
            print_members(&dbx, &folder.shared_folder_id);
        }
        let Some(cursor) = page.cursor.take() else {
            break;
        };
        page = match block_on_sync(dbx.sharing().list_shared_folders_continue(&ListContinueArg::new(cursor))) {
            Ok(page) => page,
            Err(e) => {
                report("sharing/list_folders/continue", &e);
                break;
            }
        };
    }
}

fn print_members(dbx: &Dropbox<DefaultClient>, shared_folder_id: &str) {
    let arg = ListFolderMembersArgs::new(shared_folder_id.to_owned()).with_limit(100);
    let mut members = match block_on_sync(dbx.sharing().list_shared_folder_members(&arg)) {
        Ok(members) => members,
        Err(e) => {
            report("sharing/list_folder_members", &e);
            return;
        }
    };
    loop {
        for user in &members.users {
            println!("    {} <{}>: {}", user.user.display_name, user.user.email, user.access_type.as_str());
        }
        for group in &members.groups {
            println!("    group {}: {}", group.group.group_name, group.access_type.as_str());
        }
        for invitee in &members.invitees {
            println!("    invited {}: {}",
                invitee.invitee.email.as_deref().unwrap_or("?"), invitee.access_type.as_str());
        }
        let Some(cursor) = members.cursor.take() else {
            break;
        };
        members = match block_on_sync(
            dbx.sharing().list_shared_folder_members_continue(&ListContinueArg::new(cursor)))
        {
            Ok(members) => members,
            Err(e) => {
                report("sharing/list_folder_members/continue", &e);
                break;
            }
        };
    }
}

fn report(route: &str, e: &Error) {
    match e.api_error() {
        Some(api) if api.is_too_many_requests() => {
            let retry_after = api.headers.get("Retry-After").unwrap_or("?");
            eprintln!("{route}: rate limited, retry after {retry_after} seconds");
        }
        Some(api) => {
            let (category, value) = api.tag();
            eprintln!("{route}: {} [{category}/{value}]", api.user_message.as_deref().unwrap_or(&api.summary));
        }
        None => eprintln!("{route}: {e}"),
    }
}
