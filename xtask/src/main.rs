//! `xtask` — workspace automation for the project.
//!
//! `check-data` cross-checks a data directory: every `MOVE` destination must
//! have its map and event files, every clerk's shop file must exist, and every
//! shop entry must name an item in the catalog. All problems are reported in
//! one run instead of stopping at the first.
use clap::{Parser, Subcommand};
use color_eyre::Result;
use color_eyre::eyre::bail;
use lanoir_core::GameConfig;
use lanoir_core::config::CONFIG_FILE;
use lanoir_core::data::DataFile;
use lanoir_core::event::{Event, EventScript};
use lanoir_core::item::ItemCatalog;
use lanoir_core::world::ITEM_CATALOG;
use regex::Regex;
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// A `.shop` line: item catalog indices separated by commas.
const SHOP_LINE_PATTERN: &str = r"^\d+(\s*,\s*\d+)*$";

/// Top-level CLI entry point for the xtask binary.
#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that maps, event scripts and shops in a data directory refer to each other
    CheckData {
        /// Data directory to scan
        #[arg(default_value = "data")]
        dir: PathBuf,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    match cli.command {
        Commands::CheckData { dir } => {
            let problems = check_data(&dir)?;
            if !problems.is_empty() {
                println!("DATA PROBLEMS FOUND");
                for problem in &problems {
                    println!("{problem}");
                }
                bail!("{} problem(s) in {}", problems.len(), dir.display());
            }
            println!("{}: all references resolve.", dir.display());
            Ok(())
        }
    }
}

/// One broken reference or unreadable file.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Problem {
    path: PathBuf,
    /// 1-based line, when the problem points at one.
    line: Option<usize>,
    message: String,
}

impl Problem {
    fn new(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self { path: path.into(), line: None, message: message.into() }
    }

    fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{line}: {}", self.path.display(), self.message),
            None => write!(f, "{}: {}", self.path.display(), self.message),
        }
    }
}

/// Scans `dir` and returns every problem found, sorted by file and line.
///
/// Only an unreadable directory is an error; everything else becomes a [`Problem`].
fn check_data(dir: &Path) -> Result<Vec<Problem>> {
    let mut problems = Vec::new();
    let maps = file_stems(dir, "map")?;
    let scripts = file_stems(dir, "evt")?;
    let shops = file_stems(dir, "shop")?;

    match GameConfig::load(dir) {
        Ok(config) if !maps.contains(&config.start_map) => problems.push(Problem::new(
            dir.join(CONFIG_FILE),
            format!("start map `{}` has no .map file", config.start_map),
        )),
        Ok(_) => {}
        Err(err) => problems.push(Problem::new(dir.join(CONFIG_FILE), err.to_string())),
    }

    for name in maps.symmetric_difference(&scripts) {
        let (present, missing) = if maps.contains(name) { ("map", "evt") } else { ("evt", "map") };
        problems.push(Problem::new(
            dir.join(format!("{name}.{present}")),
            format!("no matching {name}.{missing}"),
        ));
    }

    let mut clerk_shops = BTreeSet::new();
    for name in &scripts {
        let path = dir.join(format!("{name}.evt"));
        let script = match DataFile::read(&path).and_then(|file| EventScript::parse(&file)) {
            Ok(script) => script,
            Err(err) => {
                problems.push(Problem::new(&path, err.to_string()));
                continue;
            }
        };
        for event in &script.events {
            let Event::Move(teleport) = event else { continue };
            for (kind, known) in [("map", &maps), ("evt", &scripts)] {
                if !known.contains(&teleport.destination) {
                    problems.push(Problem::new(
                        &path,
                        format!(
                            "MOVE at ({}, {}) leads to `{}` but {}.{kind} is missing",
                            teleport.pos.x, teleport.pos.y, teleport.destination,
                            teleport.destination
                        ),
                    ));
                }
            }
        }
        for shop in script.npcs.iter().filter_map(|npc| npc.shop.as_deref()) {
            clerk_shops.insert(shop.to_string());
            if !shops.contains(shop) {
                problems.push(Problem::new(&path, format!("CLERK sells from missing {shop}.shop")));
            }
        }
    }

    let catalog_path = dir.join(ITEM_CATALOG);
    let catalog = match DataFile::read(&catalog_path).and_then(|file| ItemCatalog::parse(&file)) {
        Ok(catalog) => Some(catalog),
        Err(err) => {
            problems.push(Problem::new(&catalog_path, err.to_string()));
            None
        }
    };
    let line_re = Regex::new(SHOP_LINE_PATTERN)?;
    for name in &shops {
        let path = dir.join(format!("{name}.shop"));
        if !clerk_shops.contains(name) {
            println!("note: no clerk sells from {}", path.display());
        }
        match fs::read_to_string(&path) {
            Ok(text) => problems.extend(check_shop(&path, &text, &line_re, catalog.as_ref())),
            Err(err) => problems.push(Problem::new(&path, err.to_string())),
        }
    }

    problems.sort_by(|left, right| {
        left.path.cmp(&right.path).then_with(|| left.line.cmp(&right.line))
    });
    Ok(problems)
}

/// Checks one shop file's syntax and, when the catalog loaded, each index.
fn check_shop(
    path: &Path,
    text: &str,
    line_re: &Regex,
    catalog: Option<&ItemCatalog>,
) -> Vec<Problem> {
    let mut problems = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if !line_re.is_match(line) {
            problems.push(
                Problem::new(path, format!("`{line}` is not a list of item indices"))
                    .at_line(index + 1),
            );
            continue;
        }
        let Some(catalog) = catalog else { continue };
        for field in line.split(',').map(str::trim) {
            let in_range = field.parse::<usize>().is_ok_and(|item| item < catalog.len());
            if !in_range {
                problems.push(
                    Problem::new(
                        path,
                        format!("item index {field} is past the {} catalog items", catalog.len()),
                    )
                    .at_line(index + 1),
                );
            }
        }
    }
    problems
}

/// File stems in `dir` with the given extension.
fn file_stems(dir: &Path, extension: &str) -> Result<BTreeSet<String>> {
    let mut stems = BTreeSet::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some(extension) {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
            stems.insert(stem.to_string());
        }
    }
    Ok(stems)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITEMS: &str = "\
0,Short Sword,Sword,3,80,A light blade.
1,Oak Cane,Cane,3,90,Focuses the mind.
";

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).expect("write fixture");
    }

    fn fixture() -> tempfile::TempDir {
        let temp = tempfile::tempdir().expect("Failed to create temp dir");
        let dir = temp.path();
        write(dir, "game.toml", "start_map = \"town\"\n");
        write(dir, ITEM_CATALOG, ITEMS);
        write(dir, "town.map", "");
        write(dir, "town.evt", "BGM,town\nCLERK,merchant,4,4,2,2,0,0,Hello,smith\n");
        write(dir, "smith.shop", "0,1\n");
        temp
    }

    #[test]
    fn clean_directory_has_no_problems() -> Result<()> {
        let temp = fixture();
        assert_eq!(check_data(temp.path())?, Vec::new());
        Ok(())
    }

    #[test]
    fn every_broken_reference_is_reported_in_one_pass() -> Result<()> {
        let temp = fixture();
        let dir = temp.path();
        write(
            dir,
            "town.evt",
            "MOVE,0,4,3,cave,1,1\nCLERK,merchant,4,4,2,2,0,0,Hello,smith\n\
             CLERK,witch,4,4,5,2,0,0,Potions,apothecary\n",
        );
        write(dir, "smith.shop", "0,7\n");

        let problems = check_data(dir)?;
        let messages: Vec<String> = problems.iter().map(|p| p.message.clone()).collect();
        assert_eq!(problems.len(), 4, "{messages:#?}");
        assert!(messages.iter().any(|m| m.contains("cave.map is missing")));
        assert!(messages.iter().any(|m| m.contains("cave.evt is missing")));
        assert!(messages.iter().any(|m| m.contains("missing apothecary.shop")));
        assert!(messages.iter().any(|m| m.contains("item index 7")));
        Ok(())
    }

    #[test]
    fn map_without_script_is_reported() -> Result<()> {
        let temp = fixture();
        write(temp.path(), "cellar.map", "");
        let problems = check_data(temp.path())?;
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].message, "no matching cellar.evt");
        Ok(())
    }

    #[test]
    fn malformed_shop_line_names_the_line() -> Result<()> {
        let line_re = Regex::new(SHOP_LINE_PATTERN)?;
        let problems = check_shop(Path::new("bad.shop"), "# stock\n0,1\nsword\n", &line_re, None);
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].to_string(), "bad.shop:3: `sword` is not a list of item indices");
        Ok(())
    }
}
