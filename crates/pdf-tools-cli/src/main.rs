use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use pdf_page_order::{GridShape, PageOrder, PageOrderContext, SheetSide, SourceFile};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdft", about = "PDF page-order tools", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a page-order expression
    Order {
        /// Page-order expression, e.g. "f1:booklet sh3:fill"
        expression: String,

        #[command(flatten)]
        context: ContextArgs,

        /// Column count for this evaluation only
        #[arg(long)]
        cols_override: Option<usize>,

        /// Output format
        #[arg(long, default_value = "plain", value_enum)]
        format: FormatArg,
    },

    /// Show statistics for a page-order expression
    Stats {
        /// Page-order expression
        expression: String,

        #[command(flatten)]
        context: ContextArgs,
    },

    /// Suggest a grid and signature size for an expression
    Hint {
        /// Page-order expression
        expression: String,
    },
}

#[derive(Args)]
struct ContextArgs {
    /// JSON context file (files and grid)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Input PDF file(s), page counts read from the documents
    #[arg(short, long, num_args = 1..)]
    input: Vec<PathBuf>,

    /// Source file given as NAME:PAGES, e.g. cover.pdf:2
    #[arg(long = "file", value_parser = parse_file_spec)]
    files: Vec<SourceFile>,

    /// Rows per sheet side
    #[arg(long)]
    rows: Option<usize>,

    /// Columns per sheet side
    #[arg(long)]
    cols: Option<usize>,

    /// Write the assembled context to a JSON file
    #[arg(long)]
    save_config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Space-separated slots, 0 for empty
    Plain,
    /// Slots, sheets and diagnostics as JSON
    Json,
    /// One line per sheet side
    Sheets,
}

fn parse_file_spec(spec: &str) -> std::result::Result<SourceFile, String> {
    let (name, pages) = spec
        .rsplit_once(':')
        .ok_or_else(|| format!("expected NAME:PAGES, got `{}`", spec))?;
    let pages = pages
        .parse()
        .map_err(|e| format!("invalid page count in `{}`: {}", spec, e))?;
    Ok(SourceFile::new(name, pages))
}

impl ContextArgs {
    /// Config file first, then PDFs, then NAME:PAGES entries; flags override the grid
    async fn build(self) -> Result<PageOrderContext> {
        let mut context = match &self.config {
            Some(path) => PageOrderContext::load(path)
                .await
                .with_context(|| format!("loading {}", path.display()))?,
            None => PageOrderContext::default(),
        };

        if !self.input.is_empty() {
            let loaded = pdf_page_order::load_context(&self.input, context.grid).await?;
            context.files.extend(loaded.files);
        }
        context.files.extend(self.files);

        let grid = context.grid;
        context.grid = GridShape::new(
            self.rows.unwrap_or(grid.rows),
            self.cols.unwrap_or(grid.cols),
        );
        context.validate()?;

        if let Some(path) = &self.save_config {
            context.save(path).await?;
            log::info!("Saved context to {}", path.display());
        }

        Ok(context)
    }
}

fn print_diagnostics(order: &PageOrder) {
    for diagnostic in &order.diagnostics {
        eprintln!("warning: {}", diagnostic);
    }
}

fn print_order(order: &PageOrder, format: FormatArg) -> Result<()> {
    match format {
        FormatArg::Plain => {
            let slots: Vec<String> = order.slots.iter().map(|s| s.to_string()).collect();
            println!("{}", slots.join(" "));
            print_diagnostics(order);
        }
        FormatArg::Json => {
            let sheets: Vec<&[usize]> = order.sheets().collect();
            let diagnostics: Vec<String> =
                order.diagnostics.iter().map(|d| d.to_string()).collect();
            let json = serde_json::json!({
                "rows": order.grid.rows,
                "cols": order.grid.cols,
                "slots": order.slots,
                "sheets": sheets,
                "diagnostics": diagnostics,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        FormatArg::Sheets => {
            for (index, (side, sheet)) in order.sides().enumerate() {
                let side = match side {
                    SheetSide::Front => "front",
                    SheetSide::Back => "back",
                };
                let slots: Vec<String> = sheet
                    .iter()
                    .map(|&s| if s == 0 { "-".to_string() } else { s.to_string() })
                    .collect();
                println!("{:>4} {:<5} {}", index + 1, side, slots.join(" "));
            }
            print_diagnostics(order);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Order {
            expression,
            context,
            cols_override,
            format,
        } => {
            let context = context.build().await?;
            let order = pdf_page_order::parse_page_order(&expression, &context, cols_override);
            print_order(&order, format)?;
        }

        Commands::Stats {
            expression,
            context,
        } => {
            let context = context.build().await?;
            let order = pdf_page_order::parse_page_order(&expression, &context, None);
            let stats = pdf_page_order::calculate_statistics(&order, &context);

            println!("Page Order Statistics:");
            println!("  Source pages: {}", stats.source_pages);
            println!("  Slots per sheet: {}", stats.slots_per_sheet);
            println!("  Sheet sides: {}", stats.sheets);
            println!("  Placed pages: {}", stats.placed_pages);
            println!("  Distinct pages: {}", stats.distinct_pages);
            println!("  Blank slots: {}", stats.blank_slots);
            println!("  Unused pages: {}", stats.unused_pages);
            print_diagnostics(&order);
        }

        Commands::Hint { expression } => {
            let hint = pdf_page_order::suggest_layout(&expression);
            println!("Grid: {}x{}", hint.rows, hint.cols);
            if let Some(size) = hint.signature_size {
                println!("Signature: {} pages", size);
            }
            println!("Duplex: {}", if hint.duplex { "yes" } else { "no" });
        }
    }

    Ok(())
}
