// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask - Project Automation and Infrastructure Orchestration
//!
//! Provides explicit, opt-in backend validation for MySQL/MariaDB in
//! addition to the default `SQLite` backend.
//!
//! ## Backend Testing Commands
//!
//! - `cargo test` — Runs all standard tests against `SQLite` (fast, no
//!   infrastructure)
//! - `cargo xtask test-mariadb` — Runs backend validation tests against
//!   `MariaDB`
//! - `cargo xtask verify-migrations` — Verifies schema parity between
//!   the `SQLite` and `MySQL` migration directories
//!
//! ### Design Principles
//!
//! - No test infrastructure is embedded in test code
//! - No tests silently skip due to missing services
//! - External databases are opt-in only, never automatic
//! - Standard `cargo test` remains fast and infrastructure-free
//! - All backend-specific orchestration lives in xtask

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::collections::{BTreeMap, BTreeSet};
use std::{io, process::Output};

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{Result, eyre::Context};
use diesel::sql_types::Text;
use diesel::{
    Connection, MysqlConnection, QueryableByName, RunQueryDsl, SqliteConnection,
};
use duct::cmd;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        self.command.run()
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Run CI checks (lint, build, test)
    CI,

    /// Build the project
    #[command(visible_alias = "b")]
    Build,

    /// Run cargo check
    #[command(visible_alias = "c")]
    Check,

    /// Lint formatting, clippy, and docs
    #[command(visible_alias = "l")]
    Lint,

    /// Run clippy on the project
    #[command(visible_alias = "cl")]
    LintClippy,

    /// Check documentation for errors and warnings
    #[command(visible_alias = "d")]
    LintDocs,

    /// Check for formatting issues in the project
    #[command(visible_alias = "lf")]
    LintFormatting,

    /// Fix clippy warnings in the project
    #[command(visible_alias = "fc")]
    FixClippy,

    /// Fix formatting issues in the project
    #[command(visible_alias = "fmt")]
    FixFormatting,

    /// Run tests
    #[command(visible_alias = "t")]
    Test,

    /// Run `MariaDB` backend validation tests
    #[command(visible_alias = "tm")]
    TestMariadb,

    /// Verify schema parity between `SQLite` and `MySQL` migrations
    #[command(visible_alias = "vm")]
    VerifyMigrations,
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Build => build(),
            Self::Check => check(),
            Self::Lint => lint(),
            Self::LintClippy => lint_clippy(),
            Self::LintDocs => lint_docs(),
            Self::LintFormatting => lint_formatting(),
            Self::FixClippy => fix_clippy(),
            Self::FixFormatting => fix_formatting(),
            Self::Test => test(),
            Self::TestMariadb => test_mariadb(),
            Self::VerifyMigrations => verify_migrations(),
        }
    }
}

fn ci() -> Result<()> {
    lint()?;
    build()?;
    test()?;
    Ok(())
}

fn build() -> Result<()> {
    run_cargo(vec!["build", "--all-targets"])
}

fn check() -> Result<()> {
    run_cargo(vec!["check", "--all-targets"])
}

fn lint() -> Result<()> {
    lint_formatting()?;
    lint_clippy()?;
    lint_docs()?;
    Ok(())
}

fn lint_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--workspace",
        "--",
        "-D",
        "warnings",
    ])
}

fn lint_docs() -> Result<()> {
    cmd("cargo", ["doc", "--no-deps", "--workspace"])
        .env("RUSTDOCFLAGS", "-D warnings")
        .run_with_trace()?;
    Ok(())
}

fn lint_formatting() -> Result<()> {
    run_cargo(vec!["fmt", "--all", "--check"])
}

fn fix_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--workspace",
        "--fix",
        "--allow-dirty",
        "--allow-staged",
    ])
}

fn fix_formatting() -> Result<()> {
    run_cargo(vec!["fmt", "--all"])
}

fn test() -> Result<()> {
    run_cargo(vec!["test", "--workspace"])
}

fn run_cargo(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

/// Container configuration shared by the MariaDB orchestration
/// commands. Ports differ per command so they can run concurrently.
struct MariadbContainer {
    name: &'static str,
    db_name: &'static str,
    db_user: &'static str,
    db_password: &'static str,
    port: &'static str,
}

impl MariadbContainer {
    fn database_url(&self) -> String {
        format!(
            "mysql://{}:{}@127.0.0.1:{}/{}",
            self.db_user, self.db_password, self.port, self.db_name
        )
    }

    fn cleanup(&self) {
        tracing::info!("Cleaning up MariaDB container");
        let _ = cmd!("docker", "stop", self.name).run();
        let _ = cmd!("docker", "rm", self.name).run();
    }

    /// Starts the container and waits for it to accept connections.
    fn start(&self) -> Result<()> {
        use std::thread::sleep;
        use std::time::Duration;

        tracing::info!("Checking Docker availability");
        cmd!("docker", "--version")
            .run_with_trace()
            .wrap_err("Docker is not available. Please install Docker.")?;

        self.cleanup();

        tracing::info!("Starting MariaDB container: {}", self.name);
        cmd!(
            "docker",
            "run",
            "--name",
            self.name,
            "-e",
            format!("MARIADB_DATABASE={}", self.db_name),
            "-e",
            format!("MARIADB_USER={}", self.db_user),
            "-e",
            format!("MARIADB_PASSWORD={}", self.db_password),
            "-e",
            "MARIADB_ROOT_PASSWORD=root_password",
            "-p",
            format!("{}:3306", self.port),
            "-d",
            "mariadb:11"
        )
        .run_with_trace()
        .wrap_err("Failed to start MariaDB container")?;

        tracing::info!("Waiting for MariaDB to be ready...");
        let max_attempts = 30;
        for attempt in 1..=max_attempts {
            sleep(Duration::from_secs(1));
            tracing::debug!("Connection attempt {}/{}", attempt, max_attempts);

            let result = cmd!(
                "docker",
                "exec",
                self.name,
                "mariadb",
                "-u",
                self.db_user,
                format!("-p{}", self.db_password),
                "-e",
                "SELECT 1"
            )
            .run();

            if result.is_ok() {
                tracing::info!("MariaDB is ready");
                return Ok(());
            }
        }

        self.cleanup();
        Err(color_eyre::eyre::eyre!(
            "MariaDB did not become ready within timeout"
        ))
    }
}

fn test_mariadb() -> Result<()> {
    tracing::info!("Starting MariaDB backend validation");

    let container = MariadbContainer {
        name: "orghist-test-mariadb",
        db_name: "orghist_test",
        db_user: "orghist",
        db_password: "test_password",
        port: "3307", // Non-standard port to avoid conflicts
    };
    container.start()?;

    // Run ignored tests with explicit opt-in, filtered to the backend
    // validation module so non-ignored tests stay untouched.
    tracing::info!("Running MariaDB backend validation tests");
    let test_result = cmd!(
        "cargo",
        "test",
        "--package",
        "orghist-persistence",
        "backend_validation_tests",
        "--",
        "--ignored",
        "--test-threads=1"
    )
    .env("DATABASE_URL", container.database_url())
    .env("ORGHIST_TEST_BACKEND", "mariadb")
    .run_with_trace();

    // Always cleanup container
    container.cleanup();

    test_result.wrap_err("MariaDB backend validation tests failed")?;

    tracing::info!("MariaDB backend validation completed successfully");
    Ok(())
}

/// Verify schema parity between `SQLite` and `MySQL` migrations.
///
/// Provisions an in-memory `SQLite` database and an ephemeral `MariaDB`
/// container, applies each backend's migrations, introspects the
/// resulting schemas (tables and column names), and fails hard on any
/// structural mismatch. Cleanup happens regardless of outcome.
fn verify_migrations() -> Result<()> {
    use diesel_migrations::{MigrationHarness, embed_migrations};

    tracing::info!("Starting schema parity verification");

    let container = MariadbContainer {
        name: "orghist-verify-migrations",
        db_name: "orghist_verify",
        db_user: "orghist",
        db_password: "verify_password",
        port: "3308", // Different port from test-mariadb to avoid conflicts
    };
    container.start()?;

    let verification_result = (|| -> Result<()> {
        tracing::info!("Applying SQLite migrations");
        #[allow(clippy::items_after_statements)]
        const SQLITE_MIGRATIONS: diesel_migrations::EmbeddedMigrations =
            embed_migrations!("../crates/persistence/migrations");

        let mut sqlite_conn = SqliteConnection::establish(":memory:")
            .wrap_err("Failed to create SQLite in-memory database")?;
        sqlite_conn
            .run_pending_migrations(SQLITE_MIGRATIONS)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to apply SQLite migrations: {e}"))?;

        tracing::info!("Applying MySQL migrations");
        #[allow(clippy::items_after_statements)]
        const MYSQL_MIGRATIONS: diesel_migrations::EmbeddedMigrations =
            embed_migrations!("../crates/persistence/migrations_mysql");

        let mut mysql_conn = MysqlConnection::establish(&container.database_url())
            .wrap_err("Failed to connect to MariaDB")?;
        mysql_conn
            .run_pending_migrations(MYSQL_MIGRATIONS)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to apply MySQL migrations: {e}"))?;

        tracing::info!("Comparing schemas");
        let sqlite_schema = introspect_sqlite_schema(&mut sqlite_conn)?;
        let mysql_schema = introspect_mysql_schema(&mut mysql_conn, container.db_name)?;
        compare_schemas(&sqlite_schema, &mysql_schema)?;

        tracing::info!("Schema parity verification passed");
        Ok(())
    })();

    container.cleanup();
    verification_result
}

/// Normalized schema representation: table name to column name set.
type SchemaMap = BTreeMap<String, BTreeSet<String>>;

#[derive(QueryableByName)]
struct NameRow {
    #[diesel(sql_type = Text)]
    name: String,
}

#[derive(QueryableByName)]
struct TableColumnRow {
    #[diesel(sql_type = Text)]
    table_name: String,
    #[diesel(sql_type = Text)]
    column_name: String,
}

fn introspect_sqlite_schema(conn: &mut SqliteConnection) -> Result<SchemaMap> {
    let tables: Vec<NameRow> = diesel::sql_query(
        "SELECT name FROM sqlite_master WHERE type = 'table' \
         AND name NOT LIKE 'sqlite_%' AND name != '__diesel_schema_migrations'",
    )
    .load(conn)
    .wrap_err("Failed to list SQLite tables")?;

    let mut schema: SchemaMap = BTreeMap::new();
    for table in tables {
        let columns: Vec<NameRow> = diesel::sql_query(format!(
            "SELECT name FROM pragma_table_info('{}')",
            table.name
        ))
        .load(conn)
        .wrap_err_with(|| format!("Failed to list columns of {}", table.name))?;
        schema.insert(
            table.name,
            columns.into_iter().map(|row| row.name).collect(),
        );
    }
    Ok(schema)
}

fn introspect_mysql_schema(conn: &mut MysqlConnection, db_name: &str) -> Result<SchemaMap> {
    let rows: Vec<TableColumnRow> = diesel::sql_query(format!(
        "SELECT table_name AS table_name, column_name AS column_name \
         FROM information_schema.columns WHERE table_schema = '{db_name}' \
         AND table_name != '__diesel_schema_migrations'"
    ))
    .load(conn)
    .wrap_err("Failed to introspect MySQL schema")?;

    let mut schema: SchemaMap = BTreeMap::new();
    for row in rows {
        schema.entry(row.table_name).or_default().insert(row.column_name);
    }
    Ok(schema)
}

fn compare_schemas(sqlite: &SchemaMap, mysql: &SchemaMap) -> Result<()> {
    if sqlite == mysql {
        return Ok(());
    }

    for (table, columns) in sqlite {
        match mysql.get(table) {
            None => tracing::error!("Table '{table}' exists only in the SQLite schema"),
            Some(mysql_columns) if mysql_columns != columns => {
                tracing::error!(
                    "Table '{table}' differs: sqlite={columns:?} mysql={mysql_columns:?}"
                );
            }
            Some(_) => (),
        }
    }
    for table in mysql.keys() {
        if !sqlite.contains_key(table) {
            tracing::error!("Table '{table}' exists only in the MySQL schema");
        }
    }

    Err(color_eyre::eyre::eyre!(
        "Schema parity verification failed: migration directories have diverged"
    ))
}

/// Extension trait adding tracing to `duct` expressions.
trait RunWithTrace {
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl RunWithTrace for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("Running: {:?}", self);
        self.run()
    }
}
