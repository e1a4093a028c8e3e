//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs, SetAction};
use crate::config::ProfileStore;
use crate::context::RequestContext;
use crate::error::Result;
use crate::output::Rendered;

/// Name accepted by `config view` for every profile
const VIEW_ALL: &str = "all";

/// Execute the config command.
///
/// `init` names its profile with the global `--profile` flag.
pub fn execute_config(
    args: ConfigArgs,
    ctx: &RequestContext,
    store: &ProfileStore,
) -> Result<Rendered> {
    match args.action {
        ConfigAction::Init { url, admin_key } => {
            store.init(&ctx.profile, &url, &admin_key)?;
            Ok(Rendered::confirm(format!(
                "Config created at {}",
                store.path().display()
            )))
        }
        ConfigAction::Add {
            name,
            url,
            admin_key,
        } => {
            store.add(&name, &url, admin_key.as_deref())?;
            Ok(Rendered::confirm(format!("Config profile '{}' added", name)))
        }
        ConfigAction::Delete { name } => {
            store.delete(&name)?;
            Ok(Rendered::confirm(format!("Config profile '{}' deleted", name)))
        }
        ConfigAction::View { name } if name == VIEW_ALL => Rendered::json(&store.view_all()?),
        ConfigAction::View { name } => Rendered::json(&store.view(&name)?),
        ConfigAction::Set { field } => match field {
            SetAction::Url { name, url } => {
                store.set_url(&name, &url)?;
                Ok(Rendered::confirm(format!("Url updated on profile {}", name)))
            }
            SetAction::AdminKey { name, key } => {
                store.set_admin_key(&name, &key)?;
                Ok(Rendered::confirm(format!(
                    "Admin key updated on profile {}",
                    name
                )))
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_PROFILE;
    use crate::error::CliError;
    use serde_json::json;
    use tempfile::TempDir;

    fn run(store: &ProfileStore, action: ConfigAction) -> Result<Rendered> {
        execute_config(ConfigArgs { action }, &RequestContext::default(), store)
    }

    #[test]
    fn test_init_add_view_delete() {
        let dir = TempDir::new().unwrap();
        let store = ProfileStore::at(dir.path().join("config.json"));

        run(
            &store,
            ConfigAction::Init {
                url: "https://api.example.com".into(),
                admin_key: "K1".into(),
            },
        )
        .unwrap();
        run(
            &store,
            ConfigAction::Add {
                name: "staging".into(),
                url: "https://staging.example.com".into(),
                admin_key: Some("K2".into()),
            },
        )
        .unwrap();

        let all = run(&store, ConfigAction::View { name: "all".into() }).unwrap();
        assert_eq!(
            all,
            Rendered::Json(json!({
                "default": { "url": "https://api.example.com", "adminKey": "K1", "profile": "default" },
                "staging": { "url": "https://staging.example.com", "adminKey": "K2", "profile": "staging" }
            }))
        );

        let deleted = run(&store, ConfigAction::Delete { name: "staging".into() }).unwrap();
        assert_eq!(deleted, Rendered::confirm("Config profile 'staging' deleted"));
        assert_eq!(
            store.view_all().unwrap().keys().collect::<Vec<_>>(),
            vec![DEFAULT_PROFILE]
        );
    }

    #[test]
    fn test_init_uses_context_profile() {
        let dir = TempDir::new().unwrap();
        let store = ProfileStore::at(dir.path().join("config.json"));
        let ctx = RequestContext::new("prod");

        execute_config(
            ConfigArgs {
                action: ConfigAction::Init {
                    url: "https://prod".into(),
                    admin_key: "pk".into(),
                },
            },
            &ctx,
            &store,
        )
        .unwrap();
        assert_eq!(store.view("prod").unwrap().admin_key, "pk");
    }

    #[test]
    fn test_view_unknown_profile() {
        let dir = TempDir::new().unwrap();
        let store = ProfileStore::at(dir.path().join("config.json"));
        store.init(DEFAULT_PROFILE, "u", "k").unwrap();

        let err = run(&store, ConfigAction::View { name: "nope".into() }).unwrap_err();
        assert!(matches!(err, CliError::ProfileNotFound(_)));
    }

    #[test]
    fn test_set_fields() {
        let dir = TempDir::new().unwrap();
        let store = ProfileStore::at(dir.path().join("config.json"));
        store.init(DEFAULT_PROFILE, "u", "k").unwrap();

        let out = run(
            &store,
            ConfigAction::Set {
                field: SetAction::AdminKey {
                    name: DEFAULT_PROFILE.into(),
                    key: "k2".into(),
                },
            },
        )
        .unwrap();
        assert_eq!(out, Rendered::confirm("Admin key updated on profile default"));
        assert_eq!(store.view(DEFAULT_PROFILE).unwrap().admin_key, "k2");
    }
}
