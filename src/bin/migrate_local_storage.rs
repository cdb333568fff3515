use clap::Parser;
use mipref_lib::database::Database;
use mipref_lib::store::{import_local_storage, ImportSummary};
use std::path::PathBuf;

/// One-time import of a browser local-storage dump into the mipref store.
///
/// The dump is a JSON object such as
/// `{ "mipref_history": "[...]", "mipref_settings": "{...}" }`.
#[derive(Debug, Parser)]
#[command(name = "migrate_local_storage", version, about)]
struct MigrateArgs {
    /// JSON file holding the local-storage keys
    #[arg(value_name = "DUMP")]
    dump: PathBuf,

    /// Store directory (defaults to the mipref data directory)
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Replace keys that already exist in the store
    #[arg(long)]
    overwrite: bool,

    /// Validate the dump without writing anything
    #[arg(long)]
    dry_run: bool,
}

fn migrate(args: &MigrateArgs) -> Result<ImportSummary, String> {
    let content = std::fs::read_to_string(&args.dump)
        .map_err(|error| format!("Failed to read {}: {}", args.dump.display(), error))?;
    let dump: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&content)
        .map_err(|error| format!("{} is not a JSON object: {}", args.dump.display(), error))?;

    let data_dir =
        mipref_lib::resolve_data_dir(args.data_dir.as_deref()).map_err(|e| e.to_string())?;
    std::fs::create_dir_all(&data_dir).map_err(|error| {
        format!(
            "Failed to create data directory {}: {}",
            data_dir.display(),
            error
        )
    })?;
    let db_path = data_dir.join(mipref_lib::commands::DB_FILE);
    let db = Database::new(&db_path).map_err(|e| e.to_string())?;
    println!("Using store: {}", db_path.display());

    import_local_storage(&db, &dump, args.overwrite, args.dry_run).map_err(|e| e.to_string())
}

fn print_keys(label: &str, keys: &[String]) {
    if keys.is_empty() {
        println!("  {}: 0", label);
    } else {
        println!("  {}: {} ({})", label, keys.len(), keys.join(", "));
    }
}

fn main() {
    env_logger::init();
    let args = MigrateArgs::parse();

    match migrate(&args) {
        Ok(summary) => {
            if args.dry_run {
                println!("Dry run, nothing was written.");
            } else {
                println!("Local storage import complete.");
            }
            print_keys("imported", &summary.imported);
            print_keys("skipped_existing", &summary.skipped_existing);
            print_keys("skipped_unknown", &summary.skipped_unknown);
            print_keys("failed", &summary.failed);
            if !summary.failed.is_empty() {
                std::process::exit(1);
            }
        }
        Err(error) => {
            eprintln!("{}", error);
            std::process::exit(1);
        }
    }
}
