//! Per-invocation request context and the factory that turns it into a client.

use crate::config::{ProfileStore, DEFAULT_PROFILE};
use crate::error::{CliError, Result};
use hiarc_sdk::{Auth, HiarcClient};
use tracing::debug;

/// Environment variable selecting the profile when `--profile` is left at its default
pub const PROFILE_ENV: &str = "HIARC_PROFILE";

/// Flags that shape every request of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Value of `--profile`
    pub profile: String,
    /// Bearer token overriding the profile's admin key
    pub token: Option<String>,
    /// User key to act as
    pub as_user: Option<String>,
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new(DEFAULT_PROFILE)
    }
}

impl RequestContext {
    /// Context for `profile` with no token or impersonation.
    ///
    /// Surrounding whitespace is dropped so `config init` and lookups agree on the name.
    pub fn new(profile: impl Into<String>) -> Self {
        Self {
            profile: profile.into().trim().to_string(),
            token: None,
            as_user: None,
        }
    }

    /// Set the bearer token. Empty strings count as unset.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    /// Set the user to act as. Empty strings count as unset.
    pub fn with_as_user(mut self, as_user: Option<String>) -> Self {
        self.as_user = as_user.filter(|u| !u.is_empty());
        self
    }
}

/// One step in choosing the active profile.
pub trait ProfileResolver {
    /// Short name for logging
    fn name(&self) -> &'static str;

    /// Profile name chosen by this step, if any
    fn resolve(&self, ctx: &RequestContext) -> Option<String>;
}

/// Uses `--profile` when it was set to something other than `default`.
#[derive(Debug, Default)]
pub struct FlagResolver;

impl ProfileResolver for FlagResolver {
    fn name(&self) -> &'static str {
        "flag"
    }

    fn resolve(&self, ctx: &RequestContext) -> Option<String> {
        let profile = ctx.profile.as_str();
        (!profile.is_empty() && profile != DEFAULT_PROFILE).then(|| profile.to_string())
    }
}

/// Uses an environment variable, read once at construction.
#[derive(Debug)]
pub struct EnvResolver {
    value: Option<String>,
}

impl EnvResolver {
    /// Read `var` from the process environment.
    pub fn from_env(var: &str) -> Self {
        Self::with_value(std::env::var(var).ok())
    }

    /// Use a fixed value in place of the environment.
    pub fn with_value(value: Option<String>) -> Self {
        Self { value }
    }
}

impl ProfileResolver for EnvResolver {
    fn name(&self) -> &'static str {
        "env"
    }

    fn resolve(&self, _ctx: &RequestContext) -> Option<String> {
        self.value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }
}

/// Always yields `default`.
#[derive(Debug, Default)]
pub struct DefaultResolver;

impl ProfileResolver for DefaultResolver {
    fn name(&self) -> &'static str {
        "default"
    }

    fn resolve(&self, _ctx: &RequestContext) -> Option<String> {
        Some(DEFAULT_PROFILE.to_string())
    }
}

/// Resolvers evaluated in order; the first answer wins.
pub struct ResolverChain {
    resolvers: Vec<Box<dyn ProfileResolver>>,
}

impl ResolverChain {
    /// Chain from explicit resolvers.
    pub fn new(resolvers: Vec<Box<dyn ProfileResolver>>) -> Self {
        Self { resolvers }
    }

    /// Flag, then `HIARC_PROFILE`, then `default`.
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(FlagResolver),
            Box::new(EnvResolver::from_env(PROFILE_ENV)),
            Box::new(DefaultResolver),
        ])
    }

    /// Name of the active profile.
    pub fn resolve(&self, ctx: &RequestContext) -> String {
        for resolver in &self.resolvers {
            if let Some(profile) = resolver.resolve(ctx) {
                debug!(profile = %profile, source = resolver.name(), "Resolved profile");
                return profile;
            }
        }
        DEFAULT_PROFILE.to_string()
    }
}

/// Builds the authenticated client for one invocation.
pub struct ClientFactory {
    chain: ResolverChain,
}

impl Default for ClientFactory {
    fn default() -> Self {
        Self::new(ResolverChain::standard())
    }
}

impl ClientFactory {
    /// Factory over a resolver chain.
    pub fn new(chain: ResolverChain) -> Self {
        Self { chain }
    }

    /// Name of the profile this context runs against.
    pub fn active_profile(&self, ctx: &RequestContext) -> String {
        self.chain.resolve(ctx)
    }

    /// Resolve the profile, load it and configure a client.
    ///
    /// A token replaces the admin key. Without a token the profile must
    /// carry an admin key.
    pub fn build(&self, ctx: &RequestContext, store: &ProfileStore) -> Result<HiarcClient> {
        let name = self.active_profile(ctx);
        let profile = store.lookup(&name)?;

        if profile.url.trim().is_empty() {
            return Err(CliError::Config(format!(
                "Profile '{}' has no URL. Set one with `hiarc config set url {} <url>`.",
                name, name
            )));
        }

        let auth = match &ctx.token {
            Some(token) => Auth::Bearer(token.clone()),
            None if profile.admin_key.is_empty() => {
                return Err(CliError::Config(format!(
                    "Profile '{}' has no admin key. Set one with `hiarc config set admin-key {} <key>` or pass --token.",
                    name, name
                )));
            }
            None => Auth::AdminKey(profile.admin_key),
        };

        debug!(profile = %name, url = %profile.url, auth = auth.mode(), "Building client");
        let client = HiarcClient::new(&profile.url, auth)?;
        Ok(match &ctx.as_user {
            Some(user) => client.with_as_user(user.clone()),
            None => client,
        })
    }
}
