use clap::Parser;
use flatten_folders::{
    cli,
    commands::{self, FlattenOptions, FlattenOutcome},
    planner::{IndexPadding, RenameStrategy},
};
use std::path::PathBuf;

/// This command moves every file found in any subdirectory of the given directories into the top level of that directory.
/// For example, with a directory structure like this:
/// icons/svg/logo.svg
/// icons/png/logo.png
/// icons/png/old/logo.png
/// it produces icons/logo.svg, icons/logo_01.png and icons/logo_02.png.
/// Files sharing a name, in any of the given directories, are renamed with an index or a GUID.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directories to flatten; each keeps its own files
    #[arg(required = true, num_args = 1..)]
    directories: Vec<PathBuf>,

    /// How duplicate file names are made unique: guid or index (case-insensitive)
    #[arg(short = 'm', long, default_value_t = RenameStrategy::SequentialIndex, value_parser = str::parse::<RenameStrategy>)]
    rename_method: RenameStrategy,

    /// Number of digits the index is zero-padded to when renaming by index
    #[arg(short = 'p', long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(1..=6))]
    index_zero_padding: u8,

    /// Delete all subdirectories once their files have been moved
    #[arg(short, long)]
    delete_subdirectories: bool,

    /// Print the planned moves as a table without changing anything
    #[arg(short = 'n', long, visible_alias = "what-if")]
    dry_run: bool,

    /// Log every planned and performed move
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    cli::init_logging(if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    });

    let options = FlattenOptions {
        rename_strategy: args.rename_method,
        padding: IndexPadding::try_from(args.index_zero_padding)?,
        delete_subdirectories: args.delete_subdirectories,
        dry_run: args.dry_run,
        ..FlattenOptions::new(args.directories)
    };

    if let FlattenOutcome::Preview(table) = commands::flatten_folders(&options)? {
        println!("{}", table);
    }
    Ok(())
}
