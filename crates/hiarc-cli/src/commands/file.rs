//! File command implementation.

use super::{delete, get, key, non_empty, parse_access_level, parse_metadata, related, update};
use crate::cli::{AddVersionArgs, DownloadArgs, FileAction, FileArgs, FileCreateArgs, GrantArgs};
use crate::error::{CliError, Result};
use crate::output::Rendered;
use hiarc_domain::EntityKind;
use hiarc_sdk::models::{
    AccessGrant, AddClassificationRequest, AddRetentionPolicyRequest, AddVersionRequest,
    AllowedFilesRequest, AttachFileRequest, CopyFileRequest, CreateFileRequest,
    DirectUploadRequest, Grantee,
};
use hiarc_sdk::{EntityOp, HiarcClient};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

const KIND: EntityKind = EntityKind::File;

/// Execute the file command.
pub async fn execute_file(args: FileArgs, client: &HiarcClient) -> Result<Rendered> {
    match args.action {
        FileAction::Get(args) => get(client, KIND, &args.key).await,
        FileAction::Versions(args) => related(client, KIND, &args.key, "versions").await,
        FileAction::RetentionPolicies(args) => {
            related(client, KIND, &args.key, "retentionpolicies").await
        }
        FileAction::Collections(args) => related(client, KIND, &args.key, "collections").await,
        FileAction::DirectDownload(args) => {
            related(client, KIND, &args.key, "directdownloadurl").await
        }
        FileAction::DirectUpload {
            storage_service,
            expires_in,
        } => {
            let mut op = EntityOp::collection_action(KIND, "directuploadurl");
            if let Some(seconds) = expires_in.filter(|s| *s > 0) {
                op = op.with_query("expiresInSeconds", seconds);
            }
            let body = DirectUploadRequest {
                storage_service: non_empty(storage_service),
            };
            send(client, op, &body).await
        }
        FileAction::Create(args) => create_file(client, args).await,
        FileAction::Attach {
            key: file,
            name,
            storage_service,
            storage_id,
        } => {
            let body = AttachFileRequest {
                name: non_empty(name),
                storage_service: non_empty(storage_service),
                storage_id: non_empty(storage_id),
            };
            send(client, EntityOp::action(KIND, key(&file)?, "attach"), &body).await
        }
        FileAction::Copy {
            source,
            destination,
            storage_service,
        } => {
            let body = CopyFileRequest {
                key: key(&destination)?.into_inner(),
                storage_service: non_empty(storage_service),
            };
            send(client, EntityOp::action(KIND, key(&source)?, "copy"), &body).await
        }
        FileAction::AddVersion(args) => add_version(client, args).await,
        FileAction::AddGroup(args) => grant(client, args, Grantee::Group).await,
        FileAction::AddUser(args) => grant(client, args, Grantee::User).await,
        FileAction::AddClassification {
            file,
            classification,
        } => {
            let body = AddClassificationRequest {
                classification_key: key(&classification)?.into_inner(),
            };
            send(client, EntityOp::link(KIND, key(&file)?, "classifications"), &body).await
        }
        FileAction::AddRetention {
            file,
            retention_policy,
        } => {
            let body = AddRetentionPolicyRequest {
                retention_policy_key: key(&retention_policy)?.into_inner(),
            };
            send(client, EntityOp::link(KIND, key(&file)?, "retentionpolicies"), &body).await
        }
        FileAction::Download(args) => download(client, args).await,
        FileAction::Update(args) => update(client, KIND, args).await,
        FileAction::Filter { keys } => {
            let body = AllowedFilesRequest {
                keys: keys
                    .iter()
                    .map(|k| key(k).map(|k| k.into_inner()))
                    .collect::<Result<_>>()?,
            };
            send(client, EntityOp::collection_action(KIND, "allowed"), &body).await
        }
        FileAction::Delete(args) => delete(client, KIND, &args.key).await,
    }
}

async fn send<B: Serialize>(client: &HiarcClient, op: EntityOp, body: &B) -> Result<Rendered> {
    Ok(Rendered::Json(client.send(&op, Some(body)).await?))
}

async fn create_file(client: &HiarcClient, args: FileCreateArgs) -> Result<Rendered> {
    let file_key = key(&args.key)?;
    let metadata = parse_metadata(args.metadata.as_deref())?;
    let local_name = upload_source(&args.path)?;
    let name = non_empty(args.name).unwrap_or(local_name);

    let request = CreateFileRequest {
        key: file_key.into_inner(),
        name: name.clone(),
        description: non_empty(args.description),
        metadata,
        storage_service: non_empty(args.storage_service),
    };
    let value = client
        .upload(&EntityOp::create(KIND), &request, &args.path, &name)
        .await?;
    Ok(Rendered::Json(value))
}

async fn add_version(client: &HiarcClient, args: AddVersionArgs) -> Result<Rendered> {
    let file_key = key(&args.key)?;
    let local_name = upload_source(&args.path)?;
    let name = non_empty(args.name).unwrap_or(local_name);

    let request = AddVersionRequest {
        key: file_key.as_str().to_string(),
        storage_service: non_empty(args.storage_service),
    };
    let value = client
        .upload(
            &EntityOp::action(KIND, &file_key, "versions"),
            &request,
            &args.path,
            &name,
        )
        .await?;
    Ok(Rendered::Json(value))
}

async fn grant(
    client: &HiarcClient,
    args: GrantArgs,
    grantee: fn(String) -> Grantee,
) -> Result<Rendered> {
    let access_level = parse_access_level(&args.access_level)?;
    let file = key(&args.target)?;
    let grantee = grantee(key(&args.grantee)?.into_inner());

    let relation = match grantee {
        Grantee::User(_) => "users",
        Grantee::Group(_) => "groups",
    };
    let body = AccessGrant {
        grantee,
        access_level,
    };
    send(client, EntityOp::link(KIND, &file, relation), &body).await
}

async fn download(client: &HiarcClient, args: DownloadArgs) -> Result<Rendered> {
    let file_key = key(&args.key)?;
    let dir = download_dir(&args.path)?;

    let name = match non_empty(args.name) {
        Some(name) => name,
        None => {
            let file = client
                .send(&EntityOp::get(KIND, &file_key), None::<&()>)
                .await?;
            file.get("name")
                .and_then(|n| n.as_str())
                .filter(|n| !n.is_empty())
                .map(str::to_string)
                .ok_or_else(|| {
                    CliError::InvalidInput(format!(
                        "File {} has no name on the platform; pass --name",
                        file_key
                    ))
                })?
        }
    };

    let dest = dir.join(local_file_name(&name)?);
    let bytes = client
        .download_to(&EntityOp::related(KIND, &file_key, "download"), &dest)
        .await?;
    debug!(dest = %dest.display(), bytes, "Saved download");

    Ok(Rendered::confirm(format!(
        "Downloaded file: {} to {}",
        file_key,
        dir.display()
    )))
}

/// Check an upload source and return its file name.
fn upload_source(path: &Path) -> Result<String> {
    let meta = std::fs::metadata(path).map_err(|e| {
        CliError::InvalidInput(format!("Cannot read {}: {}", path.display(), e))
    })?;
    if !meta.is_file() {
        return Err(CliError::InvalidInput(format!(
            "{} is not a file",
            path.display()
        )));
    }
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| {
            CliError::InvalidInput(format!("{} has no usable file name", path.display()))
        })
}

/// Check that a download target is an existing directory.
fn download_dir(path: &Path) -> Result<PathBuf> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(path.to_path_buf()),
        Ok(_) => Err(CliError::InvalidInput(
            "Download path must be a directory.".to_string(),
        )),
        Err(e) => Err(CliError::InvalidInput(format!(
            "Cannot read {}: {}",
            path.display(),
            e
        ))),
    }
}

/// Keep only the final component of a name so a download stays in its directory.
fn local_file_name(name: &str) -> Result<&str> {
    Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CliError::InvalidInput(format!("'{}' is not a usable file name", name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_upload_source() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.pdf");
        std::fs::write(&path, b"%PDF").unwrap();

        assert_eq!(upload_source(&path).unwrap(), "report.pdf");
        assert!(upload_source(dir.path()).is_err());
        assert!(upload_source(&dir.path().join("missing.txt")).is_err());
    }

    #[test]
    fn test_download_dir() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("f.txt");
        std::fs::write(&file, b"x").unwrap();

        assert!(download_dir(dir.path()).is_ok());
        let err = download_dir(&file).unwrap_err();
        assert!(err.to_string().contains("must be a directory"));
        assert!(download_dir(&dir.path().join("nope")).is_err());
    }

    #[test]
    fn test_local_file_name_strips_directories() {
        assert_eq!(local_file_name("notes.txt").unwrap(), "notes.txt");
        assert_eq!(local_file_name("../../etc/passwd").unwrap(), "passwd");
        assert!(local_file_name("..").is_err());
    }
}
