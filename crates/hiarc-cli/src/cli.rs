//! CLI command definitions and argument parsing.

use crate::config::DEFAULT_PROFILE;
use crate::context::RequestContext;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Hiarc CLI - Manage users, groups, collections and files on the Hiarc platform.
#[derive(Debug, Parser)]
#[command(name = "hiarc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Profile to use
    #[arg(short, long, global = true, default_value = DEFAULT_PROFILE)]
    pub profile: String,

    /// Bearer token, sent instead of the profile's admin key
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Act as this user key
    #[arg(long, global = true)]
    pub as_user: Option<String>,

    /// Configuration file path
    #[arg(short, long, global = true, env = "HIARC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log requests and profile resolution to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Request context for this invocation.
    pub fn request_context(&self) -> RequestContext {
        RequestContext::new(self.profile.clone())
            .with_token(self.token.clone())
            .with_as_user(self.as_user.clone())
    }
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration profiles
    Config(ConfigArgs),

    /// User commands
    User(UserArgs),

    /// Group commands
    Group(GroupArgs),

    /// Collection commands
    Collection(CollectionArgs),

    /// File commands
    File(FileArgs),

    /// Classification commands
    Classification(ClassificationArgs),

    /// Retention policy commands
    RetentionPolicy(RetentionPolicyArgs),

    /// Legal hold commands
    LegalHold(LegalHoldArgs),

    /// Token commands
    Token(TokenArgs),

    /// Print the version number of Hiarc CLI
    Version,
}

/// A single entity key.
#[derive(Debug, Clone, Args)]
pub struct KeyArg {
    /// Entity key
    pub key: String,
}

/// Optional fields shared by create and update.
#[derive(Debug, Clone, Default, Args)]
pub struct EntityFields {
    /// Display name
    #[arg(long)]
    pub name: Option<String>,

    /// Description
    #[arg(long)]
    pub description: Option<String>,

    /// Metadata as a JSON object, e.g. '{"department":"legal"}'
    #[arg(long, value_name = "JSON")]
    pub metadata: Option<String>,
}

/// Arguments for create commands.
#[derive(Debug, Clone, Args)]
pub struct CreateArgs {
    /// Key for the new entity
    pub key: String,

    #[command(flatten)]
    pub fields: EntityFields,
}

/// Arguments for update commands.
#[derive(Debug, Clone, Args)]
pub struct UpdateArgs {
    /// Key of the entity to update
    pub key: String,

    #[command(flatten)]
    pub fields: EntityFields,
}

/// Arguments for find commands.
#[derive(Debug, Clone, Default, Args)]
pub struct FindArgs {
    /// Query as a JSON object; repeat for several
    #[arg(long = "query", value_name = "JSON", required = true)]
    pub queries: Vec<String>,
}

/// Grant access to a user or group.
#[derive(Debug, Clone, Args)]
pub struct GrantArgs {
    /// Key of the collection or file
    pub target: String,

    /// Key of the user or group receiving access
    pub grantee: String,

    /// CO_OWNER, READ_WRITE, READ_ONLY or UPLOAD_ONLY (any case)
    pub access_level: String,
}

// ---------------------------------------------------------------------------
// config

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Create your config file (profile from --profile)
    Init {
        /// Base URL of the platform
        #[arg(long)]
        url: String,
        /// Admin key
        #[arg(long = "admin-key", visible_alias = "adminKey")]
        admin_key: String,
    },

    /// Add a profile to your config file, or update its URL
    Add {
        /// Profile name
        name: String,
        /// Base URL of the platform
        #[arg(long)]
        url: String,
        /// Admin key; the stored key is kept when omitted
        #[arg(long = "admin-key", visible_alias = "adminKey")]
        admin_key: Option<String>,
    },

    /// Delete a profile from your config file
    Delete {
        /// Profile name
        name: String,
    },

    /// View a profile, or `all` for every profile
    View {
        /// Profile name, or `all`
        name: String,
    },

    /// Set a value in your config file
    Set {
        #[command(subcommand)]
        field: SetAction,
    },
}

/// Fields `config set` can change.
#[derive(Debug, Subcommand)]
pub enum SetAction {
    /// Set the URL of a profile
    Url {
        /// Profile name
        name: String,
        /// New URL
        url: String,
    },

    /// Set the admin key of a profile
    #[command(alias = "adminKey")]
    AdminKey {
        /// Profile name
        name: String,
        /// New admin key
        key: String,
    },
}

// ---------------------------------------------------------------------------
// user

/// Arguments for user commands.
#[derive(Debug, Parser)]
pub struct UserArgs {
    #[command(subcommand)]
    pub action: UserAction,
}

/// User actions.
#[derive(Debug, Subcommand)]
pub enum UserAction {
    /// Create a user with a key
    Create(CreateArgs),
    /// Get a user by key
    Get(KeyArg),
    /// Get all users
    All,
    /// Get the current user
    Current,
    /// Get the groups a user belongs to
    Groups(KeyArg),
    /// Get the groups of the current user
    CurrentGroups,
    /// Update a user
    Update(UpdateArgs),
    /// Delete a user
    Delete(KeyArg),
    /// Find users
    Find(FindArgs),
}

// ---------------------------------------------------------------------------
// group

/// Arguments for group commands.
#[derive(Debug, Parser)]
pub struct GroupArgs {
    #[command(subcommand)]
    pub action: GroupAction,
}

/// Group actions.
#[derive(Debug, Subcommand)]
pub enum GroupAction {
    /// Create a group with a key
    Create(CreateArgs),
    /// Get a group by key
    Get(KeyArg),
    /// Get all groups
    All,
    /// Get the groups a user belongs to
    ForUser {
        /// User key
        user: String,
    },
    /// Get the groups of the current user
    Current,
    /// Update a group
    Update(UpdateArgs),
    /// Delete a group
    Delete(KeyArg),
    /// Add a user to a group
    AddUser {
        /// Group key
        group: String,
        /// User key
        user: String,
    },
    /// Find groups
    Find(FindArgs),
}

// ---------------------------------------------------------------------------
// collection

/// Arguments for collection commands.
#[derive(Debug, Parser)]
pub struct CollectionArgs {
    #[command(subcommand)]
    pub action: CollectionAction,
}

/// Collection actions.
#[derive(Debug, Subcommand)]
pub enum CollectionAction {
    /// Create a collection with a key
    Create(CreateArgs),
    /// Get a collection by key
    Get(KeyArg),
    /// Get all collections
    All,
    /// Get child collections
    Children(KeyArg),
    /// Get files in a collection
    Files(KeyArg),
    /// Get child collections and files
    Items(KeyArg),
    /// Update a collection
    Update(UpdateArgs),
    /// Delete a collection
    Delete(KeyArg),
    /// Remove a file from a collection
    RemoveFile {
        /// Collection key
        collection: String,
        /// File key
        file: String,
    },
    /// Grant a user access to a collection
    AddUser(GrantArgs),
    /// Grant a group access to a collection
    AddGroup(GrantArgs),
    /// Add a file to a collection
    AddFile {
        /// Collection key
        collection: String,
        /// File key
        file: String,
    },
    /// Add a child collection
    AddChild {
        /// Parent collection key
        parent: String,
        /// Child collection key
        child: String,
    },
    /// Find collections
    Find(FindArgs),
}

// ---------------------------------------------------------------------------
// file

/// Arguments for file commands.
#[derive(Debug, Parser)]
pub struct FileArgs {
    #[command(subcommand)]
    pub action: FileAction,
}

/// File actions.
#[derive(Debug, Subcommand)]
pub enum FileAction {
    /// Get a file by key
    Get(KeyArg),
    /// Get the versions of a file
    Versions(KeyArg),
    /// Get the retention policies on a file
    RetentionPolicies(KeyArg),
    /// Get the collections holding a file
    Collections(KeyArg),
    /// Get a direct download URL for a file
    DirectDownload(KeyArg),
    /// Get a direct upload URL
    DirectUpload {
        /// Storage service to upload into
        #[arg(long)]
        storage_service: Option<String>,
        /// Seconds until the upload URL expires
        #[arg(long, value_name = "SECS")]
        expires_in: Option<u32>,
    },
    /// Upload a file
    Create(FileCreateArgs),
    /// Attach a file that already lives in a storage service
    Attach {
        /// Key for the file
        key: String,
        /// File name
        #[arg(long)]
        name: Option<String>,
        /// Storage service holding the file
        #[arg(long)]
        storage_service: Option<String>,
        /// Id of the file within the storage service
        #[arg(long)]
        storage_id: Option<String>,
    },
    /// Copy a file to a new key
    Copy {
        /// Source file key
        source: String,
        /// Destination file key
        destination: String,
        /// Storage service for the copy
        #[arg(long)]
        storage_service: Option<String>,
    },
    /// Upload a new version of a file
    AddVersion(AddVersionArgs),
    /// Grant a group access to a file
    AddGroup(GrantArgs),
    /// Grant a user access to a file
    AddUser(GrantArgs),
    /// Add a classification to a file
    AddClassification {
        /// File key
        file: String,
        /// Classification key
        classification: String,
    },
    /// Add a retention policy to a file
    AddRetention {
        /// File key
        file: String,
        /// Retention policy key
        retention_policy: String,
    },
    /// Download a file into a local directory
    Download(DownloadArgs),
    /// Update a file
    Update(UpdateArgs),
    /// Filter file keys down to those the caller can access
    Filter {
        /// File keys
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Delete a file
    Delete(KeyArg),
}

/// Arguments for `file create`.
#[derive(Debug, Clone, Args)]
pub struct FileCreateArgs {
    /// Key for the new file
    pub key: String,

    /// Local file to upload
    #[arg(long)]
    pub path: PathBuf,

    /// File name on the platform; defaults to the local file name
    #[arg(long)]
    pub name: Option<String>,

    /// Description
    #[arg(long)]
    pub description: Option<String>,

    /// Metadata as a JSON object
    #[arg(long, value_name = "JSON")]
    pub metadata: Option<String>,

    /// Storage service to place the file in
    #[arg(long)]
    pub storage_service: Option<String>,
}

/// Arguments for `file add-version`.
#[derive(Debug, Clone, Args)]
pub struct AddVersionArgs {
    /// File key
    pub key: String,

    /// Local file to upload
    #[arg(long)]
    pub path: PathBuf,

    /// File name sent with the upload; defaults to the local file name
    #[arg(long)]
    pub name: Option<String>,

    /// Storage service to place the version in
    #[arg(long)]
    pub storage_service: Option<String>,
}

/// Arguments for `file download`.
#[derive(Debug, Clone, Args)]
pub struct DownloadArgs {
    /// File key
    pub key: String,

    /// Local directory to download into
    #[arg(long)]
    pub path: PathBuf,

    /// Local file name; defaults to the name stored on the platform
    #[arg(long)]
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// classification, retention policy, legal hold, token

/// Arguments for classification commands.
#[derive(Debug, Parser)]
pub struct ClassificationArgs {
    #[command(subcommand)]
    pub action: ClassificationAction,
}

/// Classification actions.
#[derive(Debug, Subcommand)]
pub enum ClassificationAction {
    /// Create a classification with a key
    Create(CreateArgs),
    /// Get a classification by key
    Get(KeyArg),
    /// Get all classifications
    All,
    /// Update a classification
    Update(UpdateArgs),
    /// Delete a classification
    Delete(KeyArg),
    /// Find classifications
    Find(FindArgs),
}

/// Arguments for retention policy commands.
#[derive(Debug, Parser)]
pub struct RetentionPolicyArgs {
    #[command(subcommand)]
    pub action: RetentionPolicyAction,
}

/// Retention policy actions.
#[derive(Debug, Subcommand)]
pub enum RetentionPolicyAction {
    /// Create a retention policy with a key
    Create(CreateArgs),
    /// Get a retention policy by key
    Get(KeyArg),
    /// Get all retention policies
    All,
    /// Update a retention policy
    Update(UpdateArgs),
    /// Find retention policies
    Find(FindArgs),
}

/// Arguments for legal hold commands.
#[derive(Debug, Parser)]
pub struct LegalHoldArgs {
    #[command(subcommand)]
    pub action: LegalHoldAction,
}

/// Legal hold actions.
#[derive(Debug, Subcommand)]
pub enum LegalHoldAction {
    /// Create a legal hold with a key
    Create(CreateArgs),
    /// Get a legal hold by key
    Get(KeyArg),
}

/// Arguments for token commands.
#[derive(Debug, Parser)]
pub struct TokenArgs {
    #[command(subcommand)]
    pub action: TokenAction,
}

/// Token actions.
#[derive(Debug, Subcommand)]
pub enum TokenAction {
    /// Create a token scoped to a user
    Create {
        /// User key
        user: String,
        /// Minutes until the token expires
        #[arg(long, value_name = "MINUTES")]
        expires_in: Option<f32>,
    },
}
