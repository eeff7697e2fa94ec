#![deny(rust_2018_idioms)]

//! This example illustrates a few basic Dropbox API operations with the async client: listing the
//! contents of a folder recursively, fetching a file given its path, and showing its metadata.

use std::time::Duration;
use tokio_util::compat::FuturesAsyncReadCompatExt;
use tokio_util::sync::CancellationToken;
use dropbox_client::default_async_client::DefaultClient;
use dropbox_client::{files, with_cancellation, Dropbox, PathRoot};

enum Operation {
    Usage,
    List(String),
    Download(String),
    Stat(String),
}

fn parse_args() -> Operation {
    let mut ctor: Option<fn(String) -> Operation> = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => return Operation::Usage,
            "--list" => {
                ctor = Some(Operation::List);
            }
            "--download" => {
                ctor = Some(Operation::Download);
            }
            "--stat" => {
                ctor = Some(Operation::Stat);
            }
            path if path.starts_with('/') => {
                return if let Some(ctor) = ctor {
                    ctor(arg)
                } else {
                    eprintln!("Either --download, --list or --stat must be specified");
                    Operation::Usage
                };
            }
            _ => {
                eprintln!("Unrecognized option {arg:?}");
                eprintln!();
                return Operation::Usage;
            }
        }
    }
    Operation::Usage
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let op = parse_args();

    let token = std::env::var("DBX_OAUTH_TOKEN").ok();
    if matches!(op, Operation::Usage) || token.is_none() {
        eprintln!("usage: {} [option]", std::env::args().next().unwrap());
        eprintln!("    options:");
        eprintln!("        --help | -h          view this text");
        eprintln!("        --download <path>    copy the contents of <path> to stdout");
        eprintln!("        --list <path>        recursively list all files under <path>");
        eprintln!("        --stat <path>        list all metadata of <path>");
        eprintln!();
        eprintln!("    A Dropbox OAuth token must be given in the environment variable");
        eprintln!("    DBX_OAUTH_TOKEN. Press Ctrl-C to abandon a call in progress.");
        std::process::exit(1);
    }

    let client = DefaultClient::new(token.unwrap_or_default())
        .with_timeout(Duration::from_secs(120))
        .with_path_root(PathRoot::Home);
    let dbx = Dropbox::new(client);

    let shutdown = CancellationToken::new();
    let on_ctrl_c = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_ctrl_c.cancel();
        }
    });

    match op {
        Operation::Usage => (), // handled above
        Operation::Download(path) => {
            eprintln!("Copying file to stdout: {path}");
            eprintln!();

            let arg = files::DownloadArg::new(path);
            match with_cancellation(shutdown.cancelled(), dbx.files().download(&arg)).await {
                Ok(download) => {
                    eprintln!("{} bytes, revision {}", download.metadata.size, download.metadata.rev);
                    match tokio::io::copy(&mut download.body.compat(), &mut tokio::io::stdout()).await {
                        Ok(n) => {
                            eprintln!("Downloaded {n} bytes");
                        }
                        Err(e) => {
                            eprintln!("I/O error: {e}");
                        }
                    }
                }
                Err(e) if e.is_cancelled() => eprintln!("cancelled"),
                Err(e) => {
                    eprintln!("Error from files/download: {e}");
                }
            }
        }
        Operation::List(mut path) => {
            eprintln!("Listing recursively: {path}");

            // Special case: the root folder is empty string. All other paths need to start with '/'.
            if path == "/" {
                path.clear();
            }

            let arg = files::ListFolderArg::new(path).with_recursive(true);
            let mut result = match with_cancellation(shutdown.cancelled(), dbx.files().list_folder(&arg)).await {
                Ok(result) => result,
                Err(e) => {
                    eprintln!("Error from files/list_folder: {e}");
                    return;
                }
            };

            let mut num_entries = result.entries.len();
            let mut num_pages = 1;

            loop {
                for entry in result.entries {
                    match entry {
                        files::Metadata::Folder(entry) => {
                            println!("Folder: {}", entry.path_display.unwrap_or(entry.name));
                        }
                        files::Metadata::File(entry) => {
                            println!("File: {}", entry.path_display.unwrap_or(entry.name));
                        }
                        files::Metadata::Deleted(entry) => {
                            panic!("unexpected deleted entry: {entry:?}");
                        }
                    }
                }

                if !result.has_more {
                    break;
                }

                let arg = files::ListFolderContinueArg::new(result.cursor);
                result = match with_cancellation(shutdown.cancelled(), dbx.files().list_folder_continue(&arg)).await {
                    Ok(result) => {
                        num_pages += 1;
                        num_entries += result.entries.len();
                        result
                    }
                    Err(e) => {
                        eprintln!("Error from files/list_folder_continue: {e}");
                        break;
                    }
                }
            }

            eprintln!("{num_entries} entries from {num_pages} result pages");
        }
        Operation::Stat(path) => {
            eprintln!("listing metadata for: {path}");

            let arg = files::GetMetadataArg::new(path).with_include_deleted(true);

            match dbx.files().get_metadata(&arg).await {
                Ok(result) => println!("{result:#?}"),
                Err(e) => match e.api_error() {
                    Some(api) if api.is("path", "not_found") => eprintln!("no such file"),
                    _ => eprintln!("Error from files/get_metadata: {e}"),
                },
            }
        }
    }
}
