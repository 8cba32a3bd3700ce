use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use serde::Serialize;
use tracing::info;

use proposal_index::cli::{Cli, Command, OutputFormat};
use proposal_index::config::Config;
use proposal_index::{Category, Document, DocumentFilter, SearchEndpoint, Source, TreeNode};

fn setup_logging(verbose: bool) -> Result<()> {
    // Logs go to stderr so stdout stays clean for command output
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(dir) = cli.dir {
        config.proposals_dir = dir;
    }
    config.validate().context("Invalid configuration")?;

    info!(dir = ?config.proposals_dir, short_name = %config.short_name, "px starting");

    let source = Source::new(config);
    let format = cli.format;

    match cli.command {
        Command::List {
            status,
            proposal_type,
            tag,
            category,
        } => {
            let filter = DocumentFilter {
                status,
                proposal_type,
                category,
                tag,
            };
            let index = source.index();
            let docs = index.matching(&filter);
            emit(format, &docs, |docs| {
                for doc in docs {
                    print_doc_line(&source, doc);
                }
            })?;
        }
        Command::Show { slug } => {
            let segments: Vec<&str> = slug.split('/').collect();
            let doc = source
                .get_by_path(&segments)
                .ok_or_else(|| eyre::eyre!("Proposal not found: {}", slug))?;
            emit(format, &doc, |doc| print_doc(&source, doc))?;
        }
        Command::Search { query } => {
            let results = SearchEndpoint::new(&source).query(&query);
            emit(format, &results, |results| {
                if results.is_empty() {
                    println!("No results");
                }
                for r in results {
                    let number = r
                        .structured
                        .number
                        .map(|n| format!("{}-{}", source.short_name(), n))
                        .unwrap_or_else(|| "?".to_string());
                    println!("{} {} {}", number.yellow(), r.title.bold(), r.url.dimmed());
                }
            })?;
        }
        Command::Stats => {
            let stats = source.stats();
            emit(format, &stats, |stats| {
                println!("Proposals: {}", stats.total.to_string().cyan());
                println!("  By status:");
                for (status, count) in &stats.by_status {
                    println!("    {:<12} {}", status, count);
                }
                println!("  By type:");
                for (kind, count) in &stats.by_type {
                    println!("    {:<16} {}", kind, count);
                }
            })?;
        }
        Command::Categories { all } => {
            let categories = if all {
                source.categorize_all()
            } else {
                source.categorized_non_empty()
            };
            emit(format, &categories, |categories| {
                for cat in categories {
                    print_category_summary(cat);
                }
            })?;
        }
        Command::Category { slug } => {
            let category = source
                .category_by_slug(&slug)
                .ok_or_else(|| eyre::eyre!("Category not found: {}", slug))?;
            emit(format, &category, |cat| {
                print_category_summary(cat);
                for doc in &cat.documents {
                    print_doc_line(&source, doc);
                }
            })?;
        }
        Command::Tree => {
            let tree = source.navigation_tree();
            emit(format, &tree, |tree| {
                println!("{}", tree.name.bold());
                for node in &tree.children {
                    print_node(node, 1);
                }
            })?;
        }
        Command::Tags => {
            let tags = source.all_tags();
            emit(format, &tags, |tags| {
                for tag in tags {
                    println!("{}", tag);
                }
            })?;
        }
        Command::Slugs => {
            let slugs: Vec<String> = source.slugs().iter().map(|s| s.join("/")).collect();
            emit(format, &slugs, |slugs| {
                for slug in slugs {
                    println!("{}", slug);
                }
            })?;
        }
        Command::Recent { count } => {
            let docs = source.recent(count);
            emit(format, &docs, |docs| {
                for doc in docs {
                    print_doc_line(&source, doc);
                }
            })?;
        }
    }

    Ok(())
}

/// Print `value` as pretty JSON or through the text renderer
fn emit<T: Serialize + ?Sized>(format: OutputFormat, value: &T, text: impl FnOnce(&T)) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => text(value),
    }
    Ok(())
}

fn print_doc_line(source: &Source, doc: &Document) {
    println!(
        "{} {} {}",
        format!("{}-{}", source.short_name(), doc.display_number()).yellow(),
        doc.title.bold(),
        format!("[{}]", doc.metadata.status_label()).dimmed()
    );
}

fn print_doc(source: &Source, doc: &Document) {
    let meta = &doc.metadata;
    println!(
        "{} {}",
        format!("{}-{}", source.short_name(), doc.display_number()).yellow(),
        doc.title.bold()
    );
    if let Some(desc) = &doc.description {
        println!("  {}", desc);
    }
    println!("  Status:   {}", meta.status_label());
    println!("  Type:     {}", meta.type_label());
    if let Some(category) = &meta.category {
        println!("  Category: {}", category);
    }
    if let Some(author) = &meta.author {
        println!("  Author:   {}", author);
    }
    if let Some(created) = &meta.created {
        println!("  Created:  {}", created);
    }
    if !meta.requires.is_empty() {
        let requires: Vec<String> = meta.requires.iter().map(u32::to_string).collect();
        println!("  Requires: {}", requires.join(", "));
    }
    if !meta.tags.is_empty() {
        println!("  Tags:     {}", meta.tags.join(", "));
    }

    let headings = doc.headings();
    if !headings.is_empty() {
        println!();
        println!("{}", "Contents".bold());
        for h in headings {
            println!("{}{}", "  ".repeat(h.depth - 1), h.title);
        }
    }
}

fn print_category_summary(cat: &Category) {
    let stats = cat.stats();
    println!(
        "{} {} ({}-{}): {} proposals, {} final, {} draft",
        cat.slug().cyan(),
        cat.name().bold(),
        cat.config.low(),
        cat.config.high(),
        stats.total,
        stats.final_count,
        stats.draft
    );
}

fn print_node(node: &TreeNode, depth: usize) {
    let indent = "  ".repeat(depth);
    match node {
        TreeNode::Page { name, url } => println!("{}{} {}", indent, name, url.dimmed()),
        TreeNode::Folder { name, children, .. } => {
            println!("{}{}", indent, name.bold());
            for child in children {
                print_node(child, depth + 1);
            }
        }
    }
}
