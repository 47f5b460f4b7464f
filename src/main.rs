//! CLI entry point for pagewright

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pagewright::commands::render::Format;
use pagewright::content::PageKind;

#[derive(Parser)]
#[command(name = "pagewright")]
#[command(author = "Yukang Chen")]
#[command(version)]
#[command(about = "Typed section documents rendered into SEO-ready static pages", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new draft document
    New {
        /// Title of the new document
        title: String,

        /// Page kind (article, checklist, landing, service)
        #[arg(short, long, default_value = "article")]
        kind: PageKind,

        /// Category; also the subdirectory under content/
        #[arg(long)]
        category: Option<String>,
    },

    /// Validate every document without writing output
    Check,

    /// Generate static files
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Render one document to stdout
    Render {
        /// Document file (.yml, .yaml or .json)
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "html")]
        format: Format,
    },

    /// List site information
    List {
        /// Type of content to list (post, category, tag, draft)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Start a local server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Enable static mode (no file watching)
        #[arg(long)]
        r#static: bool,
    },

    /// Remove the public folder
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "pagewright=debug,info"
    } else {
        "pagewright=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            pagewright::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::New {
            title,
            kind,
            category,
        } => {
            let site = pagewright::Site::new(&base_dir)?;
            tracing::info!("Creating new {} with title: {}", kind.as_str(), title);
            let path =
                pagewright::commands::new::create_document(&site, &title, kind, category.as_deref())?;
            println!("Created: {:?}", path);
        }

        Commands::Check => {
            let site = pagewright::Site::new(&base_dir)?;
            site.check()?;
        }

        Commands::Generate { watch } => {
            let site = pagewright::Site::new(&base_dir)?;
            tracing::info!("Generating static files...");

            site.generate()?;
            println!("Generated successfully!");

            if watch {
                pagewright::commands::generate::watch(&site).await?;
            }
        }

        Commands::Render { file, format } => {
            let site = pagewright::Site::new(&base_dir)?;
            let file = if file.is_absolute() {
                file
            } else {
                base_dir.join(file)
            };
            pagewright::commands::render::run(&site, &file, format)?;
        }

        Commands::List { r#type } => {
            let site = pagewright::Site::new(&base_dir)?;
            pagewright::commands::list::run(&site, &r#type)?;
        }

        Commands::Serve { port, ip, r#static } => {
            let site = pagewright::Site::new(&base_dir)?;

            // Generate first
            tracing::info!("Generating static files...");
            site.generate()?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            pagewright::server::start(&site, &ip, port, !r#static).await?;
        }

        Commands::Clean => {
            let site = pagewright::Site::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("pagewright version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
