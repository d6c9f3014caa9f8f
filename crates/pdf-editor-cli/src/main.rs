//! PDF Editor CLI - Command line tool for merging and editing PDF pages.

mod script;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use pdf_editor_core::{
    Anchor, AppConfig, Edit, EditSession, PageCollection, PageNumber, PdfEditor, Rotation,
    Selection,
};
use std::path::{Path, PathBuf};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use crate::script::Script;

#[derive(Parser, Debug)]
#[command(name = "pdf-edit")]
#[command(author, version, about = "Merge, rotate, reorder, delete and extract PDF pages", long_about = None)]
struct Args {
    /// Config file path
    #[arg(short, long, global = true, env = "PDF_EDITOR_CONFIG")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Combine several PDFs into one
    Merge {
        /// Input PDF files
        #[arg(required = true, num_args = 2..)]
        inputs: Vec<PathBuf>,

        /// Order in which inputs are combined (e.g. "3,1"); unlisted inputs are left out
        #[arg(long)]
        order: Option<String>,

        /// Output PDF file (default: merged filename from config, next to the first input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Rotate selected pages clockwise
    Rotate {
        input: PathBuf,

        /// Pages to rotate (e.g. "1-3,7")
        #[arg(short, long)]
        pages: String,

        /// Degrees clockwise, a multiple of 90 (default from config)
        #[arg(short, long, allow_negative_numbers = true)]
        degrees: Option<i64>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Move selected pages to a new position
    Reorder {
        input: PathBuf,

        /// Pages to move, in the order they should appear (e.g. "4,1")
        #[arg(short, long)]
        pages: String,

        /// Insert after this page (0 = start of document)
        #[arg(short, long)]
        after: usize,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Remove selected pages
    Delete {
        input: PathBuf,

        #[arg(short, long)]
        pages: String,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Keep only the selected pages
    Extract {
        input: PathBuf,

        #[arg(short, long)]
        pages: String,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the pages of a PDF
    Info {
        input: PathBuf,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Apply a TOML script of edits in sequence
    Apply {
        input: PathBuf,

        #[arg(short, long)]
        script: PathBuf,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Parse a 1-based page list such as "1-3,7,5-4" into a selection.
///
/// Pages keep the order in which they are listed. Descending ranges are
/// expanded in descending order. Listing a page twice is an error rather
/// than a deselect.
fn parse_pages(pages: &str, total: usize) -> Result<Selection> {
    let mut numbers = Vec::new();

    for part in pages.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        if let Some((start, end)) = part.split_once('-') {
            let start: usize = start.trim().parse().context("Invalid page range start")?;
            let end: usize = end.trim().parse().context("Invalid page range end")?;
            // Bounds are checked before expanding so a huge range fails fast
            page_in_range(start, total)?;
            page_in_range(end, total)?;
            if start <= end {
                numbers.extend(start..=end);
            } else {
                numbers.extend((end..=start).rev());
            }
        } else {
            numbers.push(part.parse().context("Invalid page number")?);
        }
    }

    selection_from_numbers(&numbers, total)
}

/// Validate 1-based page numbers against `total` and collect them in order.
fn selection_from_numbers(numbers: &[usize], total: usize) -> Result<Selection> {
    if numbers.is_empty() {
        bail!("No pages given");
    }

    let mut selection = Selection::new();
    for &number in numbers {
        let page = page_in_range(number, total)?;
        if !selection.insert(page.index()) {
            bail!("Page {number} is listed more than once");
        }
    }
    Ok(selection)
}

fn page_in_range(number: usize, total: usize) -> Result<PageNumber> {
    PageNumber::try_new(number, total)
        .with_context(|| format!("Page {number} does not exist (document has {total} pages)"))
}

fn progress_bar(len: usize) -> ProgressBar {
    #[allow(clippy::cast_possible_truncation)]
    let pb = ProgressBar::new(len as u64);
    // Template is hardcoded and valid, unwrap is safe
    #[allow(clippy::unwrap_used)]
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::from_file(path).context("Failed to load config file"),
        None => Ok(AppConfig::load()),
    }
}

fn run_merge(editor: &PdfEditor, inputs: &[PathBuf], order: Option<&str>, output: Option<PathBuf>) -> Result<PathBuf> {
    let order = match order {
        Some(order) => parse_pages(order, inputs.len()).context("Invalid merge order")?,
        None => Selection::all(inputs.len()),
    };

    let pb = progress_bar(order.len());
    let progress = pb.clone();
    let merged = editor
        .merge_files(
            inputs,
            &order,
            Some(Box::new(move |done, _total| {
                progress.set_position(u64::try_from(done).unwrap_or(u64::MAX));
            })),
        )
        .context("Failed to merge PDFs")?;
    pb.finish_with_message("Loaded");
    info!("Merged {} documents into {} pages", order.len(), merged.len());

    let output = output.unwrap_or_else(|| editor.merged_output_path(&inputs[0]));
    save(editor, &merged, &output)?;
    Ok(output)
}

/// Open `input`, apply one edit to the listed pages and save.
fn run_edit(editor: &PdfEditor, input: &Path, pages: &str, edit: Edit, output: Option<PathBuf>) -> Result<PathBuf> {
    let mut session = editor
        .open(input)
        .with_context(|| format!("Failed to load PDF: {}", input.display()))?;
    let selection = parse_pages(pages, session.current().len())?;

    session
        .apply_with(edit, &selection)
        .with_context(|| format!("Failed to {}", edit.kind()))?;

    let output = output.unwrap_or_else(|| PdfEditor::output_path(input, edit.kind()));
    save(editor, session.current(), &output)?;
    Ok(output)
}

fn run_script(editor: &PdfEditor, input: &Path, script: &Path, output: Option<PathBuf>) -> Result<PathBuf> {
    let script = Script::from_file(script)?;
    let Some(last) = script.edits.last() else {
        bail!("Edit script contains no edits");
    };
    let default_rotation = editor.config().default_rotation()?;
    let last_kind = last.to_edit(default_rotation)?.kind();

    let mut session = editor
        .open(input)
        .with_context(|| format!("Failed to load PDF: {}", input.display()))?;

    let pb = progress_bar(script.edits.len());
    for (step, scripted) in script.edits.iter().enumerate() {
        let edit = scripted.to_edit(default_rotation)?;
        pb.set_message(edit.kind().to_string());

        let selection = selection_from_numbers(scripted.pages(), session.current().len())
            .with_context(|| format!("Edit {} ({})", step + 1, edit.kind()))?;
        session
            .apply_with(edit, &selection)
            .with_context(|| format!("Edit {} ({}) failed", step + 1, edit.kind()))?;
        pb.inc(1);
    }
    pb.finish_with_message("Applied");

    let output = output.unwrap_or_else(|| PdfEditor::output_path(input, last_kind));
    save(editor, session.current(), &output)?;
    Ok(output)
}

fn save(editor: &PdfEditor, pages: &PageCollection, output: &Path) -> Result<()> {
    editor
        .save(pages, output)
        .with_context(|| format!("Failed to write output: {}", output.display()))
}

fn run_info(editor: &PdfEditor, input: &Path, json: bool) -> Result<()> {
    let session: EditSession = editor
        .open(input)
        .with_context(|| format!("Failed to load PDF: {}", input.display()))?;
    let summary = session.current().summary()?;

    // CLI output is intentional
    #[allow(clippy::print_stdout)]
    {
        if json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            println!("{}: {} pages", input.display(), summary.len());
            for page in &summary {
                println!(
                    "  page {:>4}  source {} page {:>4}  rotation {:>3}°",
                    page.number, page.source, page.source_page, page.rotation
                );
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    // Load .env file if present (before parsing args so env vars are available)
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Setup logging
    let log_level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    let config = load_config(args.config.as_deref())?;
    let default_rotation: Rotation = config.default_rotation()?;
    let editor = PdfEditor::new(config).context("Invalid configuration")?;

    let written = match args.command {
        Command::Merge { inputs, order, output } => run_merge(&editor, &inputs, order.as_deref(), output)?,
        Command::Rotate {
            input,
            pages,
            degrees,
            output,
        } => {
            let delta = script::rotation_delta(degrees, default_rotation)?;
            run_edit(&editor, &input, &pages, Edit::Rotate(delta), output)?
        }
        Command::Reorder {
            input,
            pages,
            after,
            output,
        } => run_edit(&editor, &input, &pages, Edit::Reorder(Anchor::from_position(after)), output)?,
        Command::Delete { input, pages, output } => run_edit(&editor, &input, &pages, Edit::Delete, output)?,
        Command::Extract { input, pages, output } => run_edit(&editor, &input, &pages, Edit::Extract, output)?,
        Command::Apply { input, script, output } => run_script(&editor, &input, &script, output)?,
        Command::Info { input, json } => return run_info(&editor, &input, json),
    };

    // CLI output is intentional
    #[allow(clippy::print_stdout)]
    {
        println!("Saved to: {}", written.display());
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use lopdf::{Document, Object, dictionary};
    use pdf_editor_core::EditKind;

    /// Write a PDF whose pages carry a `/Label` entry
    fn write_pdf(path: &Path, labels: &[&str]) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let kids: Vec<Object> = labels
            .iter()
            .map(|label| {
                doc.add_object(dictionary! {
                    "Type" => "Page",
                    "Parent" => pages_id,
                    "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
                    "Label" => Object::string_literal(*label),
                })
                .into()
            })
            .collect();
        let count = i64::try_from(kids.len()).unwrap();
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(path).unwrap();
    }

    /// Labels and rotations of the pages in a written PDF
    fn read_pages(path: &Path) -> Vec<(String, i64)> {
        let doc = Document::load(path).unwrap();
        doc.get_pages()
            .into_values()
            .map(|id| {
                let dict = doc.get_dictionary(id).unwrap();
                let label = String::from_utf8_lossy(dict.get(b"Label").unwrap().as_str().unwrap()).into_owned();
                let rotation = dict.get(b"Rotate").and_then(Object::as_i64).unwrap_or(0);
                (label, rotation)
            })
            .collect()
    }

    fn labels(path: &Path) -> Vec<String> {
        read_pages(path).into_iter().map(|(label, _)| label).collect()
    }

    fn editor() -> PdfEditor {
        PdfEditor::new(AppConfig::default()).unwrap()
    }

    fn indices(selection: &Selection) -> Vec<usize> {
        selection.iter().collect()
    }

    #[test]
    fn test_parse_pages_keeps_listed_order() {
        let selection = parse_pages("4,1", 5).unwrap();
        assert_eq!(indices(&selection), vec![3, 0]);
    }

    #[test]
    fn test_parse_pages_ranges() {
        assert_eq!(indices(&parse_pages("1-3, 5", 5).unwrap()), vec![0, 1, 2, 4]);
        assert_eq!(indices(&parse_pages("5-3", 5).unwrap()), vec![4, 3, 2]);
    }

    #[test]
    fn test_parse_pages_out_of_range() {
        assert!(parse_pages("6", 5).is_err());
        assert!(parse_pages("0", 5).is_err());
        assert!(parse_pages("4-6", 5).is_err());
    }

    #[test]
    fn test_parse_pages_rejects_duplicates() {
        let err = parse_pages("2,1-3", 5).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_parse_pages_rejects_garbage() {
        assert!(parse_pages("a", 5).is_err());
        assert!(parse_pages("", 5).is_err());
        assert!(parse_pages("1-", 5).is_err());
    }

    #[test]
    fn test_edit_kind_for_default_output() {
        let path = PdfEditor::output_path(Path::new("in.pdf"), EditKind::Reorder);
        assert_eq!(path, PathBuf::from("in_reordered.pdf"));
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let args = Args::try_parse_from(["pdf-edit", "-v", "rotate", "a.pdf", "--pages", "1", "--degrees", "-90"]).unwrap();
        assert_eq!(args.verbose, 1);
        assert!(matches!(args.command, Command::Rotate { degrees: Some(-90), .. }));

        let args = Args::try_parse_from(["pdf-edit", "merge", "a.pdf", "b.pdf", "--order", "2,1"]).unwrap();
        assert!(matches!(args.command, Command::Merge { ref inputs, .. } if inputs.len() == 2));

        assert!(Args::try_parse_from(["pdf-edit", "merge", "a.pdf"]).is_err());
    }

    #[test]
    fn test_parse_pages_huge_range_fails_fast() {
        let err = parse_pages("1-10000000000", 5).unwrap_err();
        assert!(err.to_string().contains("10000000000 does not exist"));
        assert!(parse_pages("10000000000-1", 5).is_err());
    }

    #[test]
    fn test_run_edit_writes_default_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.pdf");
        write_pdf(&input, &["A", "B", "C"]);

        let written = run_edit(&editor(), &input, "3,1", Edit::Reorder(Anchor::Start), None).unwrap();
        assert_eq!(written, dir.path().join("doc_reordered.pdf"));
        assert_eq!(labels(&written), ["C", "A", "B"]);
    }

    #[test]
    fn test_run_edit_refuses_to_delete_everything() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.pdf");
        write_pdf(&input, &["A", "B"]);

        assert!(run_edit(&editor(), &input, "1-2", Edit::Delete, None).is_err());
        assert!(!dir.path().join("doc_deleted.pdf").exists());
    }

    #[test]
    fn test_run_script_chains_edits() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.pdf");
        write_pdf(&input, &["A", "B", "C", "D"]);

        let script = dir.path().join("edits.toml");
        std::fs::write(
            &script,
            "[[edit]]\nop = \"delete\"\npages = [2]\n\n\
             [[edit]]\nop = \"rotate\"\npages = [2]\ndegrees = 180\n\n\
             [[edit]]\nop = \"reorder\"\npages = [3]\nafter = 0\n",
        )
        .unwrap();

        let output = dir.path().join("out.pdf");
        let written = run_script(&editor(), &input, &script, Some(output.clone())).unwrap();
        assert_eq!(written, output);
        // A B C D -> A C D -> C rotated -> D A C
        assert_eq!(
            read_pages(&written),
            [
                ("D".to_string(), 0),
                ("A".to_string(), 0),
                ("C".to_string(), 180),
            ]
        );
    }

    #[test]
    fn test_run_script_reports_failing_step() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.pdf");
        write_pdf(&input, &["A", "B"]);

        let script = dir.path().join("edits.toml");
        std::fs::write(
            &script,
            "[[edit]]\nop = \"extract\"\npages = [1]\n\n[[edit]]\nop = \"delete\"\npages = [1]\n",
        )
        .unwrap();

        let err = run_script(&editor(), &input, &script, None).unwrap_err();
        assert!(format!("{err:#}").contains("Edit 2 (delete) failed"));
    }

    #[test]
    fn test_run_merge_in_given_order() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.pdf");
        let second = dir.path().join("second.pdf");
        write_pdf(&first, &["p1", "p2"]);
        write_pdf(&second, &["p3"]);

        let written = run_merge(&editor(), &[first, second], Some("2,1"), None).unwrap();
        assert_eq!(written, dir.path().join("merged_pdfs.pdf"));
        assert_eq!(labels(&written), ["p3", "p1", "p2"]);
    }
}
