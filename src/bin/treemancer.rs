//! Command-line interface for treemancer
//!
//! Usage:
//!   treemancer from-file `<path>` [-o `<dir>`] [--all-trees] [--no-files] [--dry-run] [--preview]
//!   treemancer from-syntax `<syntax|template>` [-o `<dir>`] [--no-files] [--dry-run] [--preview] [--to-diagram]
//!   treemancer inspect `<path|syntax>` [--syntax `<syntax>`] [--format `<format>`]
//!   treemancer list-formats

use clap::{Arg, ArgAction, ArgMatches, Command};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use treemancer::treemancer::config::{Loader, TreemancerConfig, PROJECT_CONFIG_FILE};
use treemancer::treemancer::creator::{CreationReport, TreeCreator};
use treemancer::treemancer::formats::to_diagram;
use treemancer::treemancer::processor::{
    available_formats, process_file, process_str, ProcessingSpec,
};
use treemancer::treemancer::source::{read_diagram_file, resolve_syntax_input};
use treemancer::{DeclarativeParser, DiagramParser, SourceSyntax, TreeParser};

const SYNTAX_HELP: &str = "\
Syntax help:
- Use > to go deeper: project > src > main.py
- Use spaces to create siblings: app > file1.py file2.py
- Use | to go back up: root > sub > file | another_file
- Use d(name) for directories: d(mydir)
- Use f(name) for files: f(myfile.txt)";

fn main() {
    let matches = build_cli().get_matches();

    let config = load_config(&matches);
    init_logging(&config, matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("from-file", sub)) => handle_from_file_command(sub, &config),
        Some(("from-syntax", sub)) => handle_from_syntax_command(sub, &config),
        Some(("inspect", sub)) => handle_inspect_command(sub),
        Some(("list-formats", _)) => handle_list_formats_command(),
        _ => unreachable!(),
    }
}

fn build_cli() -> Command {
    Command::new("treemancer")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Create directory structures from declarative syntax and tree diagrams")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_parser(clap::value_parser!(PathBuf))
                .help("Configuration file layered over ./treemancer.toml"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log parse and creation details to stderr"),
        )
        .subcommand(
            creation_args(
                Command::new("from-file")
                    .about("Create directory structures from tree diagrams in a text or Markdown file")
                    .arg(
                        Arg::new("path")
                            .help("File containing one or more tree diagrams")
                            .required(true)
                            .value_parser(clap::value_parser!(PathBuf))
                            .index(1),
                    )
                    .arg(
                        Arg::new("all-trees")
                            .long("all-trees")
                            .action(ArgAction::SetTrue)
                            .help("Create every tree found in the file"),
                    ),
            ),
        )
        .subcommand(
            creation_args(
                Command::new("from-syntax")
                    .about("Create a directory structure from declarative syntax or a .tree template")
                    .arg(
                        Arg::new("syntax")
                            .help("Declarative syntax, e.g. \"app > src > main.py | README.md\", or a template path")
                            .required(true)
                            .index(1),
                    )
                    .arg(
                        Arg::new("to-diagram")
                            .long("to-diagram")
                            .action(ArgAction::SetTrue)
                            .help("Print the tree diagram instead of creating anything"),
                    ),
            ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Show tokens or the parsed tree of a file or inline syntax")
                .arg(
                    Arg::new("input")
                        .help("Path to a file, or inline syntax")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("syntax")
                        .long("syntax")
                        .short('s')
                        .value_parser(clap::value_parser!(SourceSyntax))
                        .help("Input language: declarative or diagram (guessed when omitted)"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (e.g., 'token-simple', 'tree-json')")
                        .default_value("tree-diagram"),
                ),
        )
        .subcommand(Command::new("list-formats").about("List available inspect formats"))
}

/// Output and creation flags shared by `from-file` and `from-syntax`
fn creation_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_parser(clap::value_parser!(PathBuf))
                .help("Directory to create the structure in (default: current directory)"),
        )
        .arg(
            Arg::new("no-files")
                .long("no-files")
                .action(ArgAction::SetTrue)
                .help("Create only directories, skip files"),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .action(ArgAction::SetTrue)
                .help("Show what would be created without creating it"),
        )
        .arg(
            Arg::new("preview")
                .long("preview")
                .action(ArgAction::SetTrue)
                .help("Show the tree and ask for confirmation before creating"),
        )
}

/// Defaults, then `./treemancer.toml`, then `--config`, then flags.
fn load_config(matches: &ArgMatches) -> TreemancerConfig {
    let mut loader = Loader::new().with_optional_file(PROJECT_CONFIG_FILE);
    if let Some(path) = matches.get_one::<PathBuf>("config") {
        loader = loader.with_file(path);
    }

    if let Some((_, sub)) = matches.subcommand() {
        loader = apply_flag_overrides(loader, sub).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            process::exit(1);
        });
    }

    loader.build().unwrap_or_else(|e| {
        eprintln!("Error loading configuration: {}", e);
        process::exit(1);
    })
}

fn apply_flag_overrides(
    mut loader: Loader,
    sub: &ArgMatches,
) -> Result<Loader, config::ConfigError> {
    if let Ok(Some(output)) = sub.try_get_one::<PathBuf>("output") {
        loader = loader.set_override("create.output", output.to_string_lossy().into_owned())?;
    }
    if flag(sub, "no-files") {
        loader = loader.set_override("create.create_files", false)?;
    }
    if flag(sub, "dry-run") {
        loader = loader.set_override("create.dry_run", true)?;
    }
    if flag(sub, "all-trees") {
        loader = loader.set_override("diagram.all_trees", true)?;
    }
    Ok(loader)
}

/// Flags not defined on a subcommand read as unset.
fn flag(matches: &ArgMatches, id: &str) -> bool {
    matches!(matches.try_get_one::<bool>(id), Ok(Some(true)))
}

fn init_logging(config: &TreemancerConfig, verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::try_new(&config.log.filter).unwrap_or_else(|_| EnvFilter::new("warn"))
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Handle the from-file command
fn handle_from_file_command(matches: &ArgMatches, config: &TreemancerConfig) {
    let path = required::<PathBuf>(matches, "path");

    let text = read_diagram_file(path).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    let parser = DiagramParser::new();
    let parsed = if config.diagram.all_trees {
        parser.parse_all(&text)
    } else {
        parser.parse(&text).map(|tree| vec![tree])
    };
    let trees = parsed.unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });
    debug!(trees = trees.len(), path = %path.display(), "parsed diagram file");
    println!("Found {} tree(s) in {}", trees.len(), path.display());

    if flag(matches, "preview") {
        for (i, tree) in trees.iter().enumerate() {
            println!("\nTree {}:", i + 1);
            print!("{}", to_diagram(tree));
        }
        confirm_or_exit();
    }

    let creator = TreeCreator::new(config.create_options());
    let base = config.create.output.as_path();
    let reports = if trees.len() == 1 {
        vec![creator.create(&trees[0], base)]
    } else {
        creator.create_many(&trees, base)
    };

    print_reports(&reports);
    exit_on_failure(&reports);
}

/// Handle the from-syntax command
fn handle_from_syntax_command(matches: &ArgMatches, config: &TreemancerConfig) {
    let arg = required::<String>(matches, "syntax");

    let input = resolve_syntax_input(arg).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    let tree = DeclarativeParser::new()
        .parse(input.text())
        .unwrap_or_else(|e| {
            eprintln!("Syntax error: {}", e);
            if e.is_syntax_error() {
                eprintln!("\n{}", SYNTAX_HELP);
            }
            process::exit(1);
        });

    if flag(matches, "to-diagram") {
        print!("{}", to_diagram(&tree));
        return;
    }

    if flag(matches, "preview") {
        println!("Tree preview:");
        print!("{}", to_diagram(&tree));
        confirm_or_exit();
    }

    let creator = TreeCreator::new(config.create_options());
    let reports = vec![creator.create(&tree, &config.create.output)];
    print_reports(&reports);
    exit_on_failure(&reports);
}

/// Handle the inspect command
fn handle_inspect_command(matches: &ArgMatches) {
    let input = required::<String>(matches, "input");
    let format = required::<String>(matches, "format");

    let spec = ProcessingSpec::from_string(format).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        eprintln!("Run `treemancer list-formats` to see the available formats");
        process::exit(1);
    });

    let path = Path::new(input);
    let result = if path.is_file() {
        let syntax = matches
            .get_one::<SourceSyntax>("syntax")
            .copied()
            .unwrap_or_else(|| syntax_for_file(path));
        process_file(path, syntax, &spec)
    } else {
        let syntax = matches
            .get_one::<SourceSyntax>("syntax")
            .copied()
            .unwrap_or_else(|| SourceSyntax::detect(input));
        process_str(input, syntax, &spec)
    };

    match result {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// `.tree` templates hold declarative syntax; everything else is read as diagrams.
fn syntax_for_file(path: &Path) -> SourceSyntax {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("tree") => SourceSyntax::Declarative,
        _ => SourceSyntax::Diagram,
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available formats:\n");
    for format in available_formats() {
        println!("  {}", format);
    }
}

fn required<'a, T>(matches: &'a ArgMatches, id: &str) -> &'a T
where
    T: Clone + Send + Sync + 'static,
{
    match matches.get_one::<T>(id) {
        Some(value) => value,
        None => {
            eprintln!("Error: missing argument <{}>", id);
            process::exit(2);
        }
    }
}

fn confirm_or_exit() {
    print!("\nProceed with creation? [y/N] ");
    let _ = io::stdout().flush();

    let mut answer = String::new();
    let confirmed = io::stdin().lock().read_line(&mut answer).is_ok()
        && matches!(answer.trim().to_lowercase().as_str(), "y" | "yes");
    if !confirmed {
        println!("Cancelled");
        process::exit(0);
    }
}

fn print_reports(reports: &[CreationReport]) {
    let many = reports.len() > 1;
    for (i, report) in reports.iter().enumerate() {
        if many {
            println!("\nTree {}:", i + 1);
        }
        print!("{}", report);
    }

    if many {
        let errors: usize = reports.iter().map(|r| r.errors().count()).sum();
        println!("\nOverall summary:");
        println!("  Trees: {}", reports.len());
        println!(
            "  Total directories: {}",
            reports.iter().map(CreationReport::directories_created).sum::<usize>()
        );
        println!(
            "  Total files: {}",
            reports.iter().map(CreationReport::files_created).sum::<usize>()
        );
        if errors > 0 {
            println!("  Total errors: {}", errors);
        }
    }
}

fn exit_on_failure(reports: &[CreationReport]) {
    if reports.iter().any(|report| !report.is_success()) {
        process::exit(1);
    }
}
