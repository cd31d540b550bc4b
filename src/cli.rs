use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use directories::ProjectDirs;
use flexi_logger::Logger;
use log::{debug, info};
use serde::Serialize;

use crate::assets::{Asset, AssetFile, Visibility};
use crate::config::{Config, CONFIG};
use crate::database::Database;
use crate::error::AssetListError;
use crate::query::{
    EntityDef, ListEngine, Listable, ParseMode, Predicate, RawListParams, SqliteStorage,
};
use crate::scopes;
use crate::suppliers::Supplier;
use crate::users::{User, UserGroup};

#[derive(Parser)]
#[command(
    name = "assetlist",
    version,
    about = "List asset-management records with filter strings and pagination"
)]
pub struct Cli {
    /// Database file directory (default: the app's local data directory)
    #[arg(long = "db-dir", short = 'd', global = true)]
    pub db_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create the database schema, or check that it is current
    Init,

    /// List one page of records as JSON
    List {
        entity: EntityKind,

        /// Filter string, e.g. "version >= 2 and owner_userName ilike bob"
        #[arg(long = "filter", short = 'f')]
        filter: Option<String>,

        /// Page size (invalid values fall back to 10)
        #[arg(long = "limit", short = 'l', allow_hyphen_values = true)]
        limit: Option<String>,

        /// Records to skip (invalid values fall back to 0)
        #[arg(long = "offset", short = 'o', allow_hyphen_values = true)]
        offset: Option<String>,

        /// Include the total match count: true, yes or 1 (default: true)
        #[arg(long = "count", short = 'c')]
        count: Option<String>,

        /// Restrict asset files to a visibility: PUBLIC, GROUP or PRIVATE
        #[arg(long = "visibility")]
        visibility: Option<Visibility>,

        /// Owning user for PRIVATE files or for assets
        #[arg(long = "owner-user")]
        owner_user: Option<i64>,

        /// Owning group for GROUP files, or groups for assets (repeatable)
        #[arg(long = "owner-group")]
        owner_group: Vec<i64>,
    },

    /// Show the attributes a filter can use
    Fields { entity: EntityKind },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Users,
    UserGroups,
    Assets,
    AssetFiles,
    Suppliers,
}

impl EntityKind {
    fn entity(&self) -> &'static EntityDef {
        match self {
            EntityKind::Users => User::entity(),
            EntityKind::UserGroups => UserGroup::entity(),
            EntityKind::Assets => Asset::entity(),
            EntityKind::AssetFiles => AssetFile::entity(),
            EntityKind::Suppliers => Supplier::entity(),
        }
    }
}

/// Ownership options from the `list` command.
struct ScopeArgs<'a> {
    visibility: Option<Visibility>,
    owner_user: Option<i64>,
    owner_group: &'a [i64],
}

impl ScopeArgs<'_> {
    fn is_empty(&self) -> bool {
        self.visibility.is_none() && self.owner_user.is_none() && self.owner_group.is_empty()
    }

    fn file_scope(&self) -> Result<Option<Predicate<AssetFile>>, AssetListError> {
        let visibility = match self.visibility {
            Some(visibility) => visibility,
            None if self.is_empty() => return Ok(None),
            None => {
                return Err(AssetListError::InvalidScope(
                    "asset file owners require --visibility".into(),
                ))
            }
        };
        if self.owner_group.len() > 1 {
            return Err(AssetListError::InvalidScope(
                "asset files take a single --owner-group".into(),
            ));
        }
        scopes::file_visibility_scope(
            visibility,
            self.owner_user,
            self.owner_group.first().copied(),
        )
        .map(Some)
    }

    fn asset_scope(&self) -> Result<Option<Predicate<Asset>>, AssetListError> {
        if self.visibility.is_some() {
            return Err(AssetListError::InvalidScope(
                "--visibility applies to asset files only".into(),
            ));
        }
        let owner = self.owner_user.map(scopes::asset_owner_scope).transpose()?;
        let groups = match self.owner_group.is_empty() {
            true => None,
            false => Some(scopes::asset_group_scope(self.owner_group)?),
        };
        Ok(match (owner, groups) {
            (Some(owner), groups) => Some(owner.and(groups)),
            (None, groups) => groups,
        })
    }

    fn unscoped(&self, entity: EntityKind) -> Result<(), AssetListError> {
        match self.is_empty() {
            true => Ok(()),
            false => Err(AssetListError::InvalidScope(format!(
                "{entity:?} listings take no ownership options"
            ))),
        }
    }
}

impl Cli {
    pub fn handle_command_line() -> Result<(), AssetListError> {
        let args = Cli::parse();

        let project_dirs = ProjectDirs::from("", "", "assetlist").ok_or_else(|| {
            AssetListError::Error("Could not determine the app's data directory".into())
        })?;

        let config = CONFIG.get_or_init(|| Config::load_config(&project_dirs));

        let _logger = Logger::try_with_str(config.logging.log_spec())
            .and_then(|logger| logger.log_to_stderr().start())
            .map_err(|e| AssetListError::Error(format!("Failed to start logger: {e}")))?;

        debug!(
            "Command-line args: {:?}",
            std::env::args_os().collect::<Vec<_>>()
        );

        let db_dir = match &args.db_dir {
            Some(dir) => dir.clone(),
            None => config.database.dir_or(project_dirs.data_local_dir()),
        };
        std::fs::create_dir_all(&db_dir)?;

        let db = Database::open(&db_dir, config.database.pool_size)?;
        db.ensure_schema()?;

        let stdout = io::stdout();
        let mut out = stdout.lock();
        args.execute(db, config.filter.parse_mode(), &mut out)
    }

    /// Runs the command against an open database whose schema is current.
    pub fn execute(
        &self,
        db: Database,
        parse_mode: ParseMode,
        out: &mut impl Write,
    ) -> Result<(), AssetListError> {
        match &self.command {
            Command::Init => {
                info!("Schema is current");
                writeln!(out, "Database ready")?;
                Ok(())
            }
            Command::List {
                entity,
                filter,
                limit,
                offset,
                count,
                visibility,
                owner_user,
                owner_group,
            } => {
                let raw = RawListParams {
                    limit: limit.clone(),
                    offset: offset.clone(),
                    count: count.clone(),
                    filter: filter.clone(),
                };
                let scope = ScopeArgs {
                    visibility: *visibility,
                    owner_user: *owner_user,
                    owner_group,
                };
                let engine = ListEngine::new(SqliteStorage::new(db)).with_parse_mode(parse_mode);
                Self::list(&engine, *entity, &raw, &scope, out)
            }
            Command::Fields { entity } => Self::fields(entity.entity(), out),
        }
    }

    fn list(
        engine: &ListEngine<SqliteStorage>,
        entity: EntityKind,
        raw: &RawListParams,
        scope: &ScopeArgs,
        out: &mut impl Write,
    ) -> Result<(), AssetListError> {
        match entity {
            EntityKind::Users => {
                scope.unscoped(entity)?;
                Self::list_json::<User>(engine, raw, None, out)
            }
            EntityKind::UserGroups => {
                scope.unscoped(entity)?;
                Self::list_json::<UserGroup>(engine, raw, None, out)
            }
            EntityKind::Suppliers => {
                scope.unscoped(entity)?;
                Self::list_json::<Supplier>(engine, raw, None, out)
            }
            EntityKind::Assets => Self::list_json(engine, raw, scope.asset_scope()?, out),
            EntityKind::AssetFiles => Self::list_json(engine, raw, scope.file_scope()?, out),
        }
    }

    fn list_json<T: Listable + Serialize>(
        engine: &ListEngine<SqliteStorage>,
        raw: &RawListParams,
        extra: Option<Predicate<T>>,
        out: &mut impl Write,
    ) -> Result<(), AssetListError> {
        let items = engine.list::<T>(&raw.resolve(), extra)?;
        serde_json::to_writer_pretty(&mut *out, &items)?;
        writeln!(out)?;
        Ok(())
    }

    fn fields(entity: &EntityDef, out: &mut impl Write) -> Result<(), AssetListError> {
        for (name, spec) in entity.attr_entries() {
            let target = match spec.attr_type.relation_target() {
                Some(target) => format!(" -> {}", target.name),
                None => String::new(),
            };
            writeln!(
                out,
                "{:<24} {:<10} {}{}",
                name,
                spec.attr_type.type_name(),
                spec.attr_type.kind().name(),
                target
            )?;
        }
        Ok(())
    }
}
