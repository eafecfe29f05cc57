use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "rft",
    about = "Inspect, check and rewrite rFactor .gen/.scn files",
    version
)]
struct Cli {
    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Print SearchPath/MASFile/skybox info of a file or directory as JSON
    Info(InfoArgs),
    /// Replace SearchPath/MASFile lists and drop the skybox block
    Rewrite(RewriteArgs),
    /// Report missing search paths and MAS files below a mod directory
    Check(CheckArgs),
}

#[derive(ClapArgs, Debug)]
struct InfoArgs {
    /// .gen/.scn file or directory to scan
    path: PathBuf,
}

#[derive(ClapArgs, Debug)]
struct RewriteArgs {
    /// File to rewrite (.gen or .scn)
    path: PathBuf,
    /// Replacement SearchPath entry, repeatable (forward or back slashes)
    #[arg(long = "search-path", value_name = "DIR")]
    search_paths: Vec<String>,
    /// Replacement MASFile entry, repeatable
    #[arg(long = "mas-file", value_name = "MAS")]
    mas_files: Vec<String>,
    /// Optional output path; otherwise prints to stdout
    #[arg(long, conflicts_with = "in_place")]
    out: Option<PathBuf>,
    /// Overwrite the input file
    #[arg(long, default_value_t = false)]
    in_place: bool,
    /// Zip the input file before overwriting it
    #[arg(long, default_value_t = false, requires = "in_place")]
    backup: bool,
}

#[derive(ClapArgs, Debug)]
struct CheckArgs {
    /// Mod directory to scan
    dir: PathBuf,
    /// Directory substituted for <VEHDIR> (defaults to DIR)
    #[arg(long)]
    vehdir: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Cmd::Info(a) => cmd_info(a),
        Cmd::Rewrite(a) => cmd_rewrite(a),
        Cmd::Check(a) => cmd_check(a),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn non_empty(v: Vec<String>) -> Option<Vec<String>> {
    if v.is_empty() {
        None
    } else {
        Some(v.iter().map(|p| rft_core::to_portable(p)).collect())
    }
}

fn relative_name(root: &Path, p: &Path) -> String {
    p.strip_prefix(root)
        .unwrap_or(p)
        .to_string_lossy()
        .replace('\\', "/")
}

fn cmd_info(args: InfoArgs) {
    let p = args.path.as_path();
    let value = if p.is_file() {
        match rft_core::extract_info(p) {
            Ok(info) => info.to_json(),
            Err(e) => {
                eprintln!("error: {}", e);
                std::process::exit(2);
            }
        }
    } else if p.is_dir() {
        let files = rft_core::scan_mod_dir(p).unwrap_or_else(|e| {
            eprintln!("error: {}", e);
            std::process::exit(2);
        });
        let mut map = serde_json::Map::new();
        for f in files.scene_files() {
            let entry = match rft_core::extract_info(&f) {
                Ok(info) => info.to_json(),
                Err(e) => serde_json::json!({ "$error": e.to_string() }),
            };
            map.insert(relative_name(p, &f), entry);
        }
        serde_json::Value::Object(map)
    } else {
        eprintln!("error: not found: {}", p.display());
        std::process::exit(2);
    };
    match serde_json::to_string_pretty(&value) {
        Ok(s) => println!("{}", s),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(3);
        }
    }
}

fn cmd_rewrite(args: RewriteArgs) {
    let search_paths = non_empty(args.search_paths);
    let mas_files = non_empty(args.mas_files);
    let text = rft_core::rewrite(&args.path, search_paths, mas_files).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(2);
    });
    if args.in_place {
        if args.backup {
            let files = [args.path.clone()];
            match rft_core::zip_backup_files(&args.path, &files) {
                Ok(zip) => eprintln!("backup: {}", zip.display()),
                Err(e) => {
                    eprintln!("error: backup failed: {}", e);
                    std::process::exit(4);
                }
            }
        }
        rft_core::write_scn_file(&args.path, &text).unwrap_or_else(|e| {
            eprintln!("error writing: {}", e);
            std::process::exit(5);
        });
    } else if let Some(out) = args.out {
        rft_core::write_scn_file(&out, &text).unwrap_or_else(|e| {
            eprintln!("error writing: {}", e);
            std::process::exit(5);
        });
    } else {
        print!("{}", text);
    }
}

fn cmd_check(args: CheckArgs) {
    let root = args.dir.as_path();
    let files = rft_core::scan_mod_dir(root).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(2);
    });
    let vehdir = args.vehdir.clone().unwrap_or_else(|| root.to_path_buf());

    let mut errors: Vec<String> = Vec::new();
    for f in files.scene_files() {
        let name = relative_name(root, &f);
        println!("[{}]", name);
        let info = match rft_core::extract_info(&f) {
            Ok(info) => info,
            Err(e) => {
                println!("  error: {}", e);
                errors.push(format!("{}: {}", name, e));
                continue;
            }
        };
        let opts = rft_core::CheckOpts {
            vehdir: vehdir.clone(),
            teamdir: f.parent().unwrap_or(root).to_path_buf(),
            ..Default::default()
        };
        let report = rft_core::check_references(&info.search_paths, &info.mas_files, &opts);
        if report.is_clean() {
            println!("  ok");
            continue;
        }
        for w in &report.warnings {
            println!("  warning: {}", w);
        }
        for e in &report.errors {
            println!("  error: {}", e);
            errors.push(format!("{}: {}", name, e));
        }
    }

    println!();
    println!("[MASFiles]");
    for mas in &files.mas_files {
        println!("  {}", relative_name(root, mas));
    }
    println!();

    if errors.is_empty() {
        println!("No errors");
    } else {
        println!("Error summary:");
        println!("==============");
        for e in &errors {
            println!("error: {}", e);
        }
        std::process::exit(1);
    }
}
